//! Plant symbols and cell assignments.
//!
//! The backend stores a symbol as a fragment of icon markup such as
//! `<i class='symbol fas fa-seedling' style='color:#228B22;'></i>`. The grid
//! model only needs an icon name and a colour, so markup is parsed into a
//! [`SymbolGlyph`] on the way in and rebuilt on the way out.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ids::PlantlistEntryId;

/// Icon classes used when a plant has no symbol of its own.
pub const DEFAULT_ICON: &str = "fas fa-seedling";

/// Colour used when a plant has no symbol of its own.
pub const DEFAULT_COLOR: &str = "#228B22";

/// Class every rendered symbol carries so the page can find it.
const SYMBOL_CLASS: &str = "symbol";

/// Renderable token for a plant: icon classes plus a CSS colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolGlyph {
    /// Icon classes, e.g. `fas fa-leaf`. Holds the raw markup when it could
    /// not be parsed.
    pub icon: String,
    /// CSS colour, e.g. `#228B22`. Empty when unknown.
    pub color: String,
}

impl Default for SymbolGlyph {
    fn default() -> Self {
        Self {
            icon: DEFAULT_ICON.to_string(),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl SymbolGlyph {
    pub fn new(icon: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            color: color.into(),
        }
    }

    /// Parse stored icon markup.
    ///
    /// Size modifiers (`fa-2x`, `fa-lg`, ...) and the `symbol` marker class
    /// are dropped. Markup without a class attribute is kept verbatim as an
    /// opaque icon.
    pub fn from_markup(markup: &str) -> Self {
        let markup = markup.trim();
        let Some(classes) = attr_value(&CLASS_ATTR, markup) else {
            return Self {
                icon: markup.to_string(),
                color: String::new(),
            };
        };

        let icon = classes
            .split_whitespace()
            .filter(|class| *class != SYMBOL_CLASS && !is_size_class(class))
            .collect::<Vec<_>>()
            .join(" ");

        let color = attr_value(&STYLE_ATTR, markup)
            .and_then(style_color)
            .unwrap_or_default();

        Self { icon, color }
    }

    /// Rebuild the markup the backend stores.
    pub fn to_markup(&self) -> String {
        if self.is_opaque() {
            return self.icon.clone();
        }
        if self.color.is_empty() {
            format!("<i class='{SYMBOL_CLASS} {}'></i>", self.icon)
        } else {
            format!(
                "<i class='{SYMBOL_CLASS} {}' style='color:{};'></i>",
                self.icon, self.color
            )
        }
    }

    /// True when the glyph carries unparsed markup.
    pub fn is_opaque(&self) -> bool {
        self.icon.trim_start().starts_with('<')
    }

    /// Short icon name without the icon-font prefix, e.g. `seedling`.
    pub fn short_name(&self) -> &str {
        if self.is_opaque() {
            return "?";
        }
        self.icon
            .split_whitespace()
            .rev()
            .find(|class| class.starts_with("fa-"))
            .map_or(self.icon.as_str(), |class| &class[3..])
    }

    pub fn is_default(&self) -> bool {
        self.icon == DEFAULT_ICON && self.color.eq_ignore_ascii_case(DEFAULT_COLOR)
    }
}

impl fmt::Display for SymbolGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.color.is_empty() {
            f.write_str(self.short_name())
        } else {
            write!(f, "{} {}", self.short_name(), self.color)
        }
    }
}

/// A symbol bound to one cell, referencing the plant-list entry it came from.
///
/// Snapshots from older backends carry only the symbol markup, so the entry
/// may be unknown for cells that were loaded rather than painted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub entry_id: Option<PlantlistEntryId>,
    pub glyph: SymbolGlyph,
}

impl Assignment {
    pub fn new(entry_id: PlantlistEntryId, glyph: SymbolGlyph) -> Self {
        Self {
            entry_id: Some(entry_id),
            glyph,
        }
    }

    /// An assignment whose plant-list entry is not known.
    pub fn unlinked(glyph: SymbolGlyph) -> Self {
        Self {
            entry_id: None,
            glyph,
        }
    }

    pub fn references(&self, entry_id: PlantlistEntryId) -> bool {
        self.entry_id == Some(entry_id)
    }
}

/// `class='...'` or `class="..."`, not matching `data-class`.
static CLASS_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)class\s*=\s*(?:'([^']*)'|"([^"]*)")"#).expect("Invalid class regex")
});

static STYLE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)style\s*=\s*(?:'([^']*)'|"([^"]*)")"#).expect("Invalid style regex")
});

static STYLE_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*color\s*:\s*([^;]*)").expect("Invalid color regex")
});

/// Icon-font size modifiers: `fa-2x`, `fa-lg`, `fa-fw`, ...
static SIZE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^fa-(?:\d+x|xs|sm|lg|fw)$").expect("Invalid size class regex"));

fn is_size_class(class: &str) -> bool {
    SIZE_CLASS.is_match(class)
}

/// Value of a quoted attribute inside a single tag.
fn attr_value<'a>(pattern: &Regex, markup: &'a str) -> Option<&'a str> {
    let caps = pattern.captures(markup)?;
    caps.get(1).or_else(|| caps.get(2)).map(|found| found.as_str())
}

fn style_color(style: &str) -> Option<String> {
    STYLE_COLOR
        .captures(style)
        .and_then(|caps| caps.get(1))
        .map(|found| found.as_str().trim().to_string())
}
