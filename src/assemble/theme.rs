//! Colour themes.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Accent colours used by the assembler. Values are hex without `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Lookup key
    pub key: &'static str,
    /// Display name
    pub name: &'static str,
    /// Level-1 heading colour
    pub heading1: &'static str,
    /// Level-2 heading colour
    pub heading2: &'static str,
    /// Left border of blockquotes, in the body and in cells
    pub accent: &'static str,
    /// Body blockquote fill
    pub quote_fill: &'static str,
    /// In-cell quote fill
    pub cell_quote_fill: &'static str,
    /// Top, right and bottom border of body blockquotes
    pub box_border: &'static str,
}

/// Built-in themes. The first entry is the default.
pub const THEMES: [Theme; 5] = [
    Theme {
        key: "indigo",
        name: "Indigo",
        heading1: "2E75B5",
        heading2: "1F4E79",
        accent: "2E75B5",
        quote_fill: "F8F9FA",
        cell_quote_fill: "F0F8FF",
        box_border: "CCCCCC",
    },
    Theme {
        key: "emerald",
        name: "Emerald",
        heading1: "10B981",
        heading2: "065F46",
        accent: "10B981",
        quote_fill: "ECFDF5",
        cell_quote_fill: "ECFDF5",
        box_border: "CCCCCC",
    },
    Theme {
        key: "rose",
        name: "Rose",
        heading1: "F43F5E",
        heading2: "9F1239",
        accent: "F43F5E",
        quote_fill: "FFF1F2",
        cell_quote_fill: "FFF1F2",
        box_border: "CCCCCC",
    },
    Theme {
        key: "amber",
        name: "Amber",
        heading1: "F59E0B",
        heading2: "92400E",
        accent: "F59E0B",
        quote_fill: "FFFBEB",
        cell_quote_fill: "FFFBEB",
        box_border: "CCCCCC",
    },
    Theme {
        key: "slate",
        name: "Slate",
        heading1: "475569",
        heading2: "1E293B",
        accent: "475569",
        quote_fill: "F1F5F9",
        cell_quote_fill: "F1F5F9",
        box_border: "CCCCCC",
    },
];

impl Theme {
    /// Look up a theme by key, case-insensitively.
    pub fn by_name(key: &str) -> Result<Theme> {
        let key = key.trim();
        THEMES
            .iter()
            .find(|t| t.key.eq_ignore_ascii_case(key))
            .copied()
            .ok_or_else(|| Error::UnknownTheme(key.to_string()))
    }

    /// All built-in themes.
    pub fn all() -> &'static [Theme] {
        &THEMES
    }

    /// Keys of all built-in themes.
    pub fn keys() -> Vec<&'static str> {
        THEMES.iter().map(|t| t.key).collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        THEMES[0]
    }
}

/// Themes serialize as their key.
impl Serialize for Theme {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.key)
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let key = String::deserialize(deserializer)?;
        Theme::by_name(&key).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_indigo() {
        let theme = Theme::default();
        assert_eq!(theme.key, "indigo");
        assert_eq!(theme.heading1, "2E75B5");
        assert_eq!(theme.heading2, "1F4E79");
    }

    #[test]
    fn test_by_name() {
        assert_eq!(Theme::by_name("Rose").unwrap().heading1, "F43F5E");
        assert_eq!(Theme::keys().len(), 5);
    }

    #[test]
    fn test_unknown_theme() {
        let err = Theme::by_name("neon").unwrap_err();
        assert!(matches!(err, Error::UnknownTheme(ref k) if k == "neon"));
    }

    #[test]
    fn test_deserialize_by_key() {
        let theme: Theme = serde_json::from_str("\"slate\"").unwrap();
        assert_eq!(theme.key, "slate");
        assert!(serde_json::from_str::<Theme>("\"neon\"").is_err());
    }

    #[test]
    fn test_serialize_round_trips_key() {
        let rose = Theme::by_name("rose").unwrap();
        let json = serde_json::to_string(&rose).unwrap();
        assert_eq!(json, "\"rose\"");
        assert_eq!(serde_json::from_str::<Theme>(&json).unwrap(), rose);
    }
}
