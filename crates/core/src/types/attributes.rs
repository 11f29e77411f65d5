//! Product attributes and listing options.
//!
//! The string forms match the `value` attributes of the page's select and
//! radio controls, so every enum here round-trips through `FromStr`/`Display`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Product line a lip glaze belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Classic,
    Glossy,
    Set,
    Luxury,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [Self::Classic, Self::Glossy, Self::Set, Self::Luxury];

    /// The control value, e.g. `"Glossy"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Glossy => "Glossy",
            Self::Set => "Set",
            Self::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("invalid category: {s}"))
    }
}

/// Skin tone used by the shade finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinTone {
    Fair,
    Medium,
    Tan,
    Deep,
}

impl SkinTone {
    /// All tones from lightest to deepest.
    pub const ALL: [Self; 4] = [Self::Fair, Self::Medium, Self::Tan, Self::Deep];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fair => "fair",
            Self::Medium => "medium",
            Self::Tan => "tan",
            Self::Deep => "deep",
        }
    }
}

impl fmt::Display for SkinTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkinTone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("invalid skin tone: {s}"))
    }
}

/// Category selection in the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "all" {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Price ordering in the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Default,
    /// Cheapest first.
    Asc,
    /// Most expensive first.
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" | "" => Ok(Self::Default),
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}
