//! Transaction categories and their display metadata.
//!
//! The recognized tags form a closed set, but stored data may carry any
//! tag. Unrecognized tags are preserved verbatim and rendered with a
//! fallback icon and colour.

use crate::core::format::Locale;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Tag used when a record carries no category at all.
pub const OTHER_TAG: &str = "other";

const FALLBACK_ICON: &str = "🏷";
const FALLBACK_COLOR: &str = "#94a3b8";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Delivery,
    Ridehail,
    Necessary,
    Unknown(String),
}

/// Canonical display data for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub icon: &'static str,
    pub color: &'static str,
    pub label_en: &'static str,
    pub label_es: &'static str,
}

impl Category {
    pub const KNOWN: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Delivery,
        Category::Ridehail,
        Category::Necessary,
    ];

    pub fn tag(&self) -> &str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Delivery => "delivery",
            Category::Ridehail => "ridehail",
            Category::Necessary => "necessary",
            Category::Unknown(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Unknown(_))
    }

    /// Returns the lookup entry, or `None` for unrecognized tags.
    pub fn info(&self) -> Option<CategoryInfo> {
        let info = match self {
            Category::Food => CategoryInfo {
                icon: "🍲",
                color: "#34d399",
                label_en: "Food",
                label_es: "Comida",
            },
            Category::Transport => CategoryInfo {
                icon: "🚌",
                color: "#60a5fa",
                label_en: "Transport",
                label_es: "Transporte",
            },
            Category::Entertainment => CategoryInfo {
                icon: "🎬",
                color: "#f59e0b",
                label_en: "Entertainment",
                label_es: "Entretenimiento",
            },
            Category::Delivery => CategoryInfo {
                icon: "🚲",
                color: "#f472b6",
                label_en: "Delivery App",
                label_es: "Delivery App",
            },
            Category::Ridehail => CategoryInfo {
                icon: "🚗",
                color: "#22d3ee",
                label_en: "Ride-hailing App",
                label_es: "Transport App",
            },
            Category::Necessary => CategoryInfo {
                icon: "🛍",
                color: "#a78bfa",
                label_en: "Necessary",
                label_es: "Necesario",
            },
            Category::Unknown(_) => return None,
        };
        Some(info)
    }

    /// Display label for the locale. Unrecognized tags render as the raw tag.
    pub fn label(&self, locale: Locale) -> String {
        match (self.info(), locale) {
            (Some(info), Locale::EsCl) => info.label_es.to_string(),
            (Some(info), Locale::EnUs) => info.label_en.to_string(),
            (None, _) => self.tag().to_string(),
        }
    }

    pub fn icon(&self) -> &'static str {
        self.info().map_or(FALLBACK_ICON, |info| info.icon)
    }

    pub fn color(&self) -> &'static str {
        self.info().map_or(FALLBACK_COLOR, |info| info.color)
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Unknown(OTHER_TAG.to_string())
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "food" => Category::Food,
            "transport" => Category::Transport,
            "entertainment" => Category::Entertainment,
            "delivery" => Category::Delivery,
            "ridehail" => Category::Ridehail,
            "necessary" => Category::Necessary,
            "" => Category::default(),
            _ => Category::Unknown(s.trim().to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::from(s.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.tag().to_string()
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_round_trip() {
        for category in Category::KNOWN {
            assert!(category.is_known());
            assert_eq!(Category::from(category.tag()), category);
        }
    }

    #[test]
    fn test_parsing_is_case_insensitive() {
        assert_eq!(Category::from("FOOD"), Category::Food);
        assert_eq!(Category::from(" Ridehail "), Category::Ridehail);
    }

    #[test]
    fn test_unknown_tag_falls_back() {
        let category = Category::from("groceries");
        assert_eq!(category, Category::Unknown("groceries".to_string()));
        assert_eq!(category.label(Locale::EnUs), "groceries");
        assert_eq!(category.icon(), FALLBACK_ICON);
        assert!(Category::KNOWN.iter().all(|known| known.icon() != FALLBACK_ICON));
        assert_eq!(category.color(), FALLBACK_COLOR);
    }

    #[test]
    fn test_empty_tag_is_other() {
        assert_eq!(Category::from(""), Category::default());
        assert_eq!(Category::default().tag(), "other");
    }

    #[test]
    fn test_labels_follow_locale() {
        assert_eq!(Category::Food.label(Locale::EnUs), "Food");
        assert_eq!(Category::Food.label(Locale::EsCl), "Comida");
        assert_eq!(Category::Necessary.label(Locale::EsCl), "Necesario");
    }

    #[test]
    fn test_serde_uses_plain_tag() {
        let json = serde_json::to_string(&Category::Entertainment).unwrap();
        assert_eq!(json, "\"entertainment\"");
        let parsed: Category = serde_json::from_str("\"misc\"").unwrap();
        assert_eq!(parsed, Category::Unknown("misc".to_string()));
    }
}
