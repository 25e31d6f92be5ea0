//! Many-to-many links between projects, plots and plant lists.
//!
//! A project holds plots and plant lists, and a plot holds plant lists. The
//! page that shows an entity can start a link from either side, so every
//! directed pair is normalised into one of three canonical [`Link`]s before
//! it reaches the backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::{PlantlistId, PlotId, ProjectId};

/// The three entity types that can be linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Project,
    Plot,
    Plantlist,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [Self::Project, Self::Plot, Self::Plantlist];

    /// Singular path segment, e.g. `plot`.
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Plot => "plot",
            Self::Plantlist => "plantlist",
        }
    }

    /// Plural path segment, e.g. `plots`.
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Project => "projects",
            Self::Plot => "plots",
            Self::Plantlist => "plantlists",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::Plot => "Plot",
            Self::Plantlist => "Plant List",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for EntityKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| lowered == kind.segment() || lowered == kind.plural())
            .ok_or_else(|| ModelError::UnknownEntityKind(s.to_string()))
    }
}

/// Whether a link is being created or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    Add,
    Remove,
}

impl LinkAction {
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

/// A canonical link between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Link {
    ProjectPlot {
        project: ProjectId,
        plot: PlotId,
    },
    ProjectPlantlist {
        project: ProjectId,
        plantlist: PlantlistId,
    },
    PlotPlantlist {
        plot: PlotId,
        plantlist: PlantlistId,
    },
}

impl Link {
    /// Normalise a directed pair into its canonical link.
    ///
    /// Either side may be the primary one; linking an entity kind to itself
    /// is rejected.
    pub fn resolve(
        primary: EntityKind,
        primary_id: u32,
        secondary: EntityKind,
        secondary_id: u32,
    ) -> Result<Self> {
        use EntityKind::{Plantlist, Plot, Project};

        let link = match (primary, secondary) {
            (Project, Plot) => Self::ProjectPlot {
                project: ProjectId(primary_id),
                plot: PlotId(secondary_id),
            },
            (Plot, Project) => Self::ProjectPlot {
                project: ProjectId(secondary_id),
                plot: PlotId(primary_id),
            },
            (Project, Plantlist) => Self::ProjectPlantlist {
                project: ProjectId(primary_id),
                plantlist: PlantlistId(secondary_id),
            },
            (Plantlist, Project) => Self::ProjectPlantlist {
                project: ProjectId(secondary_id),
                plantlist: PlantlistId(primary_id),
            },
            (Plot, Plantlist) => Self::PlotPlantlist {
                plot: PlotId(primary_id),
                plantlist: PlantlistId(secondary_id),
            },
            (Plantlist, Plot) => Self::PlotPlantlist {
                plot: PlotId(secondary_id),
                plantlist: PlantlistId(primary_id),
            },
            (kind, _) => return Err(ModelError::InvalidConnection(kind)),
        };
        Ok(link)
    }

    /// Backend path that performs `action` on this link.
    pub fn path(&self, action: LinkAction) -> String {
        let action = action.segment();
        match self {
            Self::ProjectPlot { project, plot } => {
                format!("/projects/{project}/{action}/plot/{plot}")
            }
            Self::ProjectPlantlist { project, plantlist } => {
                format!("/projects/{project}/{action}/plantlist/{plantlist}")
            }
            Self::PlotPlantlist { plot, plantlist } => {
                format!("/plots/{plot}/{action}/plantlist/{plantlist}")
            }
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProjectPlot { project, plot } => write!(f, "project {project} <-> plot {plot}"),
            Self::ProjectPlantlist { project, plantlist } => {
                write!(f, "project {project} <-> plantlist {plantlist}")
            }
            Self::PlotPlantlist { plot, plantlist } => {
                write!(f, "plot {plot} <-> plantlist {plantlist}")
            }
        }
    }
}

/// One `(id, name)` pair as the connection query returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, String)", into = "(u32, String)")]
pub struct ConnectionItem {
    pub id: u32,
    pub name: String,
}

impl ConnectionItem {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl From<(u32, String)> for ConnectionItem {
    fn from((id, name): (u32, String)) -> Self {
        Self { id, name }
    }
}

impl From<ConnectionItem> for (u32, String) {
    fn from(item: ConnectionItem) -> Self {
        (item.id, item.name)
    }
}

/// What a primary entity is linked to, and what it could still be linked to.
///
/// `options` are the current user's entities of the secondary kind that are
/// not linked yet; `list_items` are the linked ones. An id never appears in
/// both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionState {
    #[serde(default)]
    pub options: Vec<ConnectionItem>,
    #[serde(default)]
    pub list_items: Vec<ConnectionItem>,
}

impl ConnectionState {
    pub fn is_connected(&self, id: u32) -> bool {
        self.list_items.iter().any(|item| item.id == id)
    }

    /// Move every listed option into `list_items`.
    ///
    /// Ids that are not offered as options are ignored. Returns the items
    /// that moved, in the order requested.
    pub fn connect(&mut self, ids: &[u32]) -> Vec<ConnectionItem> {
        let mut moved = Vec::new();
        for &id in ids {
            if let Some(pos) = self.options.iter().position(|item| item.id == id) {
                let item = self.options.remove(pos);
                self.list_items.push(item.clone());
                moved.push(item);
            }
        }
        moved
    }

    /// Move a linked item back into `options`.
    pub fn disconnect(&mut self, id: u32) -> Option<ConnectionItem> {
        let pos = self.list_items.iter().position(|item| item.id == id)?;
        let item = self.list_items.remove(pos);
        self.options.push(item.clone());
        Some(item)
    }

    /// Record link updates the backend accepted. Returns the items that
    /// moved.
    pub fn apply(&mut self, action: LinkAction, ids: &[u32]) -> Vec<ConnectionItem> {
        match action {
            LinkAction::Add => self.connect(ids),
            LinkAction::Remove => ids.iter().filter_map(|&id| self.disconnect(id)).collect(),
        }
    }
}
