//! Place categories.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Error returned when a category string is empty or means "all".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid category: {reason}")]
pub struct InvalidCategory {
    reason: &'static str,
}

/// The kind of a point of interest.
///
/// Known kinds parse case-insensitively; anything else is kept verbatim as
/// [`Category::Other`] so user-contributed places are never rejected for an
/// unfamiliar label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Nature,
    Restaurant,
    Adventure,
    Historical,
    Hotel,
    Other(String),
}

impl Category {
    /// Parse a category name. "All" is a filter, not a category, and is rejected.
    ///
    /// ```
    /// use travel_server::domain::Category;
    ///
    /// assert_eq!(Category::parse("nature").unwrap(), Category::Nature);
    /// assert_eq!(Category::parse("Temple").unwrap().as_str(), "Temple");
    /// assert!(Category::parse("All").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidCategory> {
        let s = s.trim();
        if s.is_empty() {
            return Err(InvalidCategory {
                reason: "category is empty",
            });
        }
        let category = match s.to_ascii_lowercase().as_str() {
            "all" => {
                return Err(InvalidCategory {
                    reason: "\"All\" is not a category",
                });
            }
            "nature" => Category::Nature,
            "restaurant" => Category::Restaurant,
            "adventure" => Category::Adventure,
            "historical" => Category::Historical,
            "hotel" => Category::Hotel,
            _ => Category::Other(s.to_string()),
        };
        Ok(category)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Nature => "Nature",
            Category::Restaurant => "Restaurant",
            Category::Adventure => "Adventure",
            Category::Historical => "Historical",
            Category::Hotel => "Hotel",
            Category::Other(name) => name,
        }
    }

    /// Exact-match comparison used by filters. `Other` labels compare
    /// case-insensitively.
    pub fn matches(&self, other: &Category) -> bool {
        match (self, other) {
            (Category::Other(a), Category::Other(b)) => a.eq_ignore_ascii_case(b),
            _ => self == other,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = InvalidCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A category filter for place listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Build a filter from optional user input; absent, blank or "All" means no filter.
    pub fn from_input(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            None | Some("") => CategoryFilter::All,
            Some(s) if s.eq_ignore_ascii_case("all") => CategoryFilter::All,
            Some(s) => Category::parse(s).map_or(CategoryFilter::All, CategoryFilter::Only),
        }
    }

    pub fn accepts(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted.matches(category),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_categories() {
        assert_eq!(Category::parse("Nature").unwrap(), Category::Nature);
        assert_eq!(Category::parse("RESTAURANT").unwrap(), Category::Restaurant);
        assert_eq!(Category::parse(" adventure ").unwrap(), Category::Adventure);
        assert_eq!(Category::parse("historical").unwrap(), Category::Historical);
        assert_eq!(Category::parse("Hotel").unwrap(), Category::Hotel);
    }

    #[test]
    fn unknown_category_is_kept() {
        let c = Category::parse("Waterfall").unwrap();
        assert_eq!(c, Category::Other("Waterfall".to_string()));
        assert_eq!(c.to_string(), "Waterfall");
    }

    #[test]
    fn reject_empty_and_all() {
        assert!(Category::parse("").is_err());
        assert!(Category::parse("  ").is_err());
        assert!(Category::parse("all").is_err());
    }

    #[test]
    fn filter_from_input() {
        assert_eq!(CategoryFilter::from_input(None), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_input(Some("All")), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_input(Some("")), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_input(Some("nature")),
            CategoryFilter::Only(Category::Nature)
        );
    }

    #[test]
    fn filter_accepts() {
        let nature = CategoryFilter::Only(Category::Nature);
        assert!(nature.accepts(&Category::Nature));
        assert!(!nature.accepts(&Category::Hotel));
        assert!(CategoryFilter::All.accepts(&Category::Hotel));

        let temple = CategoryFilter::from_input(Some("temple"));
        assert!(temple.accepts(&Category::Other("Temple".to_string())));
    }

    #[test]
    fn serde_uses_names() {
        let json = serde_json::to_string(&Category::Historical).unwrap();
        assert_eq!(json, "\"Historical\"");
        let back: Category = serde_json::from_str("\"historical\"").unwrap();
        assert_eq!(back, Category::Historical);
    }
}
