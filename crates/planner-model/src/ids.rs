//! Typed identifiers for backend rows.
//!
//! Every table in the backend uses an integer primary key. Wrapping each in
//! its own type keeps a plot id from being passed where a plant-list entry id
//! is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

row_id!(
    /// Identifier of a project.
    ProjectId
);
row_id!(
    /// Identifier of a plot.
    PlotId
);
row_id!(
    /// Identifier of a plant list.
    PlantlistId
);
row_id!(
    /// Identifier of a plant cached from the catalog.
    PlantId
);
row_id!(
    /// Identifier of a plant-list-to-plant link (`plantlists_plants.id`).
    ///
    /// Cells reference this rather than the plant, so a symbol change on the
    /// plant list shows up on every plot that uses it.
    PlantlistEntryId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_integers() {
        let json = serde_json::to_string(&PlotId(7)).unwrap();
        assert_eq!(json, "7");
        let id: PlantlistEntryId = serde_json::from_str("42").unwrap();
        assert_eq!(id, PlantlistEntryId(42));
    }

    #[test]
    fn ids_parse_from_cli_text() {
        assert_eq!(" 12 ".parse::<ProjectId>().unwrap(), ProjectId(12));
        assert!("x".parse::<PlotId>().is_err());
    }
}
