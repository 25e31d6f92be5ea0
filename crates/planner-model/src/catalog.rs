//! Plant catalog search and pagination.
//!
//! The backend proxies a remote plant database. A search returns one page of
//! plants plus a set of links (`first`, `prev`, `next`, `last`) that are
//! posted back to walk through the result set. `prev` and `next` are only
//! present when such a page exists.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ModelError, Result};

/// Image shown for plants the catalog has no picture for.
pub const DEFAULT_PLANT_IMAGE: &str = "/static/images/default-plant-pic.png";

/// Value the backend's form layer expects for a checked box.
const CHECKED: &str = "y";

/// Multi-valued search filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchFilter {
    Duration,
    LigneousType,
    FlowerColor,
    GrowthMonths,
    BloomMonths,
    FruitMonths,
    EdiblePart,
}

const MONTHS: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const COLORS: &[&str] = &[
    "white", "red", "brown", "orange", "yellow", "lime", "green", "cyan", "blue", "purple",
    "magenta", "grey", "black",
];

impl SearchFilter {
    pub const ALL: [SearchFilter; 7] = [
        Self::Duration,
        Self::LigneousType,
        Self::FlowerColor,
        Self::GrowthMonths,
        Self::BloomMonths,
        Self::FruitMonths,
        Self::EdiblePart,
    ];

    /// Form field name.
    pub const fn field(self) -> &'static str {
        match self {
            Self::Duration => "duration",
            Self::LigneousType => "ligneous_type",
            Self::FlowerColor => "flower_color",
            Self::GrowthMonths => "growth_months",
            Self::BloomMonths => "bloom_months",
            Self::FruitMonths => "fruit_months",
            Self::EdiblePart => "edible_part",
        }
    }

    /// Values the backend accepts for this filter.
    pub const fn choices(self) -> &'static [&'static str] {
        match self {
            Self::Duration => &["annual", "biennial", "perennial"],
            Self::LigneousType => &["liana", "subshrub", "shrub", "tree", "parasite"],
            Self::FlowerColor => COLORS,
            Self::GrowthMonths | Self::BloomMonths | Self::FruitMonths => MONTHS,
            Self::EdiblePart => &[
                "roots", "stem", "leaves", "flowers", "fruits", "seeds", "tubers",
            ],
        }
    }
}

impl fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// A plant search request.
///
/// ```
/// use planner_model::catalog::{PlantSearch, SearchFilter};
///
/// let search = PlantSearch::new()
///     .query("tomato")
///     .filter(SearchFilter::EdiblePart, "fruits")
///     .unwrap()
///     .vegetable(true);
/// assert_eq!(search.to_form()["edible_part"][0], "fruits");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlantSearch {
    query: Option<String>,
    filters: Vec<(SearchFilter, String)>,
    vegetable: bool,
    evergreen: bool,
}

impl PlantSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text search. Blank text falls back to browsing main species.
    #[must_use]
    pub fn query(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.query = (!text.trim().is_empty()).then(|| text.trim().to_string());
        self
    }

    /// Add one filter value, checked against the filter's choices.
    pub fn filter(mut self, filter: SearchFilter, value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref().trim().to_ascii_lowercase();
        if !filter.choices().contains(&value.as_str()) {
            return Err(ModelError::InvalidFilterValue { filter, value });
        }
        if !self.filters.iter().any(|(f, v)| *f == filter && *v == value) {
            self.filters.push((filter, value));
        }
        Ok(self)
    }

    #[must_use]
    pub fn vegetable(mut self, enabled: bool) -> Self {
        self.vegetable = enabled;
        self
    }

    #[must_use]
    pub fn evergreen(mut self, enabled: bool) -> Self {
        self.evergreen = enabled;
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Values chosen for one filter, in the order they were added.
    pub fn values(&self, filter: SearchFilter) -> impl Iterator<Item = &str> {
        self.filters
            .iter()
            .filter(move |(f, _)| *f == filter)
            .map(|(_, v)| v.as_str())
    }

    /// Form body the search endpoint expects: every field is an array of
    /// strings and unset fields are left out.
    pub fn to_form(&self) -> Value {
        let mut form = Map::new();
        if let Some(text) = &self.query {
            form.insert("search".into(), Value::from(vec![text.clone()]));
        }
        for filter in SearchFilter::ALL {
            let values: Vec<Value> = self.values(filter).map(Value::from).collect();
            if !values.is_empty() {
                form.insert(filter.field().into(), Value::Array(values));
            }
        }
        if self.vegetable {
            form.insert("vegetable".into(), Value::from(vec![CHECKED]));
        }
        if self.evergreen {
            form.insert("evergreen".into(), Value::from(vec![CHECKED]));
        }
        Value::Object(form)
    }
}

/// One plant record from the catalog. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogPlant {
    pub id: Option<u64>,
    pub slug: String,
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub family: Option<String>,
    pub family_common_name: Option<String>,
    pub image_url: Option<String>,
}

impl CatalogPlant {
    pub fn image_or_default(&self) -> &str {
        self.image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_PLANT_IMAGE)
    }

    /// Common name, falling back to the scientific name and then the slug.
    pub fn display_name(&self) -> &str {
        self.common_name
            .as_deref()
            .or(self.scientific_name.as_deref())
            .unwrap_or(&self.slug)
    }
}

/// Which page link to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageNav {
    First,
    Prev,
    Next,
    Last,
}

impl fmt::Display for PageNav {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::First => "first",
            Self::Prev => "previous",
            Self::Next => "next",
            Self::Last => "last",
        })
    }
}

/// Pagination links of a catalog page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

impl PageLinks {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }

    pub fn get(&self, nav: PageNav) -> Option<&str> {
        match nav {
            PageNav::First => self.first.as_deref(),
            PageNav::Prev => self.prev.as_deref(),
            PageNav::Next => self.next.as_deref(),
            PageNav::Last => self.last.as_deref(),
        }
    }

    /// Link to follow for `nav`, or an error when that page does not exist.
    pub fn link(&self, nav: PageNav) -> Result<&str> {
        self.get(nav).ok_or(ModelError::NoSuchPage(nav))
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogPage {
    pub plants: Vec<CatalogPlant>,
    pub links: PageLinks,
}

impl CatalogPage {
    /// Decode the `[plants, links]` pair the search and pagination
    /// endpoints return.
    ///
    /// A rejected search comes back as `{"errors": {...}}` instead.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(mut parts) if parts.len() == 2 => {
                let links = parts.pop().unwrap_or_default();
                let plants = parts.pop().unwrap_or_default();
                let plants = serde_json::from_value(plants)
                    .map_err(|e| ModelError::MalformedCatalog(format!("plants: {e}")))?;
                let links = serde_json::from_value(links)
                    .map_err(|e| ModelError::MalformedCatalog(format!("links: {e}")))?;
                Ok(Self { plants, links })
            }
            Value::Object(map) if map.contains_key("errors") => Err(ModelError::SearchRejected(
                map.get("errors").map(Value::to_string).unwrap_or_default(),
            )),
            other => Err(ModelError::MalformedCatalog(format!(
                "expected [plants, links], got {}",
                kind_of(&other)
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array of the wrong length",
        Value::Object(_) => "an object",
    }
}
