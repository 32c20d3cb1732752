//! Assembly options and configuration.

use super::Theme;
use crate::error::Result;
use chrono::Datelike;

/// Options for assembling a document.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Colour theme
    pub theme: Theme,

    /// Glyph written before list items (followed by a space)
    pub list_marker: String,

    /// First year of the academic year on the cover page (None = current year)
    pub academic_year: Option<i32>,

    /// Generate the cover page when metadata names an institution
    pub include_cover_page: bool,

    /// Append the signature footer when metadata is given
    pub include_footer: bool,
}

impl AssembleOptions {
    /// Create new assemble options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the theme by key.
    pub fn with_theme_name(mut self, key: &str) -> Result<Self> {
        self.theme = Theme::by_name(key)?;
        Ok(self)
    }

    /// Set the list marker glyph.
    pub fn with_list_marker(mut self, marker: impl Into<String>) -> Self {
        self.list_marker = marker.into();
        self
    }

    /// Fix the academic year instead of reading the clock.
    pub fn with_academic_year(mut self, year: i32) -> Self {
        self.academic_year = Some(year);
        self
    }

    /// Enable or disable the cover page.
    pub fn with_cover_page(mut self, include: bool) -> Self {
        self.include_cover_page = include;
        self
    }

    /// Enable or disable the signature footer.
    pub fn with_footer(mut self, include: bool) -> Self {
        self.include_footer = include;
        self
    }

    /// First year of the academic year to print.
    pub fn resolve_academic_year(&self) -> i32 {
        self.academic_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }

    /// List marker followed by a space, as written before item text.
    pub fn marker_prefix(&self) -> String {
        format!("{} ", self.list_marker)
    }
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            list_marker: "-".to_string(),
            academic_year: None,
            include_cover_page: true,
            include_footer: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = AssembleOptions::new();
        assert_eq!(opts.theme.key, "indigo");
        assert_eq!(opts.marker_prefix(), "- ");
        assert!(opts.include_cover_page);
        assert!(opts.include_footer);
    }

    #[test]
    fn test_builder() {
        let opts = AssembleOptions::new()
            .with_theme_name("amber")
            .unwrap()
            .with_list_marker("•")
            .with_academic_year(2024)
            .with_footer(false);
        assert_eq!(opts.theme.key, "amber");
        assert_eq!(opts.marker_prefix(), "• ");
        assert_eq!(opts.resolve_academic_year(), 2024);
        assert!(!opts.include_footer);
    }

    #[test]
    fn test_unknown_theme_name() {
        assert!(AssembleOptions::new().with_theme_name("neon").is_err());
    }
}
