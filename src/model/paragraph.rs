//! Paragraph and text-level types.

use super::MathNode;
use serde::{Deserialize, Serialize};

/// A paragraph of inline content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Runs, math and breaks in the paragraph
    pub content: Vec<Inline>,

    /// Paragraph style
    pub style: ParagraphStyle,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
            style: ParagraphStyle::default(),
        }
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Create a paragraph holding the given inline content.
    pub fn with_content(content: Vec<Inline>) -> Self {
        Self {
            content,
            style: ParagraphStyle::default(),
        }
    }

    /// Create a paragraph that forces a page break.
    pub fn page_break() -> Self {
        Self::with_content(vec![Inline::PageBreak])
    }

    /// Replace the style and return self.
    pub fn styled(mut self, style: ParagraphStyle) -> Self {
        self.style = style;
        self
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.content.push(Inline::Text(TextRun::new(text)));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.content.push(Inline::Text(run));
    }

    /// Get plain text content of the paragraph.
    ///
    /// Math renders as its linear form (`a/b` for fractions).
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                Inline::Text(run) => run.text.clone(),
                Inline::Math(node) => node.linear_text(),
                Inline::Tab => "\t".to_string(),
                Inline::PageBreak => String::new(),
            })
            .collect()
    }

    /// Text runs of the paragraph, skipping math and breaks.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.content.iter().filter_map(|c| match c {
            Inline::Text(run) => Some(run),
            _ => None,
        })
    }

    /// Check if the paragraph has no visible content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() || self.plain_text().trim().is_empty()
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        self.style.heading_level.is_some()
    }

    /// Get the heading level (1-3) or None.
    pub fn heading_level(&self) -> Option<u8> {
        self.style.heading_level
    }

    /// Check if this paragraph contains a forced page break.
    pub fn has_page_break(&self) -> bool {
        self.content.iter().any(|c| matches!(c, Inline::PageBreak))
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// A text run with styling
    Text(TextRun),

    /// An equation
    Math(MathNode),

    /// A tab character, aligned by the paragraph's tab stops
    Tab,

    /// A hard page break
    PageBreak,
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                bold: true,
                ..Default::default()
            },
        }
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                italic: true,
                ..Default::default()
            },
        }
    }

    /// Set the font size in half-points and return self.
    pub fn size(mut self, half_points: u32) -> Self {
        self.style.size = Some(half_points);
        self
    }

    /// Set the text colour (hex, no leading `#`) and return self.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.style.color = Some(color.into());
        self
    }

    /// Underline the run and return self.
    pub fn underlined(mut self) -> Self {
        self.style.underline = true;
        self
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Run-level overrides on top of the document's default style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Single underline
    pub underline: bool,

    /// Font size in half-points (28 = 14pt)
    pub size: Option<u32>,

    /// Text color (hex, e.g. "2E75B5")
    pub color: Option<String>,
}

impl TextStyle {
    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.underline || self.size.is_some() || self.color.is_some()
    }
}

/// Paragraph styling properties. Measurements are in twips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Heading level (1-3) or None for normal paragraph
    pub heading_level: Option<u8>,

    /// Text alignment; None inherits the default style
    pub alignment: Option<Alignment>,

    /// Space before and after
    pub spacing: Spacing,

    /// Left/right/hanging indentation
    pub indent: Indent,

    /// Paragraph borders
    pub borders: Option<ParagraphBorders>,

    /// Background fill (hex)
    pub shading: Option<String>,

    /// Custom tab stops
    pub tab_stops: Vec<TabStop>,
}

impl ParagraphStyle {
    /// Create a default paragraph style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set alignment and return self.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Set spacing before and after and return self.
    pub fn spacing(mut self, before: u32, after: u32) -> Self {
        self.spacing = Spacing {
            before: Some(before),
            after: Some(after),
        };
        self
    }

    /// Set spacing after only and return self.
    pub fn space_after(mut self, after: u32) -> Self {
        self.spacing.after = Some(after);
        self
    }

    /// Set space before only and return self.
    pub fn space_before(mut self, before: u32) -> Self {
        self.spacing.before = Some(before);
        self
    }

    /// Set indentation and return self.
    pub fn indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    /// Set borders and return self.
    pub fn borders(mut self, borders: ParagraphBorders) -> Self {
        self.borders = Some(borders);
        self
    }

    /// Set background fill and return self.
    pub fn shading(mut self, fill: impl Into<String>) -> Self {
        self.shading = Some(fill.into());
        self
    }

    /// Add a tab stop and return self.
    pub fn tab_stop(mut self, stop: TabStop) -> Self {
        self.tab_stops.push(stop);
        self
    }

    /// Mark as heading and return self.
    pub fn heading(mut self, level: u8) -> Self {
        self.heading_level = Some(level.clamp(1, 3));
        self
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

/// Vertical spacing around a paragraph, in twips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    /// Space before
    pub before: Option<u32>,
    /// Space after
    pub after: Option<u32>,
}

impl Spacing {
    /// Check if no spacing override is set.
    pub fn is_empty(&self) -> bool {
        self.before.is_none() && self.after.is_none()
    }
}

/// Paragraph indentation, in twips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indent {
    /// Left indent
    pub left: Option<u32>,
    /// Right indent
    pub right: Option<u32>,
    /// Hanging indent for lines after the first
    pub hanging: Option<u32>,
}

impl Indent {
    /// Left indent only.
    pub fn left(left: u32) -> Self {
        Self {
            left: Some(left),
            ..Default::default()
        }
    }

    /// Same indent on both sides.
    pub fn symmetric(both: u32) -> Self {
        Self {
            left: Some(both),
            right: Some(both),
            hanging: None,
        }
    }

    /// Left indent with a hanging first line, so wrapped lines align under the text.
    pub fn hanging(left: u32, hanging: u32) -> Self {
        Self {
            left: Some(left),
            right: None,
            hanging: Some(hanging),
        }
    }

    /// Check if no indentation is set.
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.hanging.is_none()
    }
}

/// Border line style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// Single solid line
    #[default]
    Single,
    /// No border
    None,
}

/// One side of a paragraph or cell border.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderLine {
    /// Line style
    pub style: BorderStyle,
    /// Width in eighths of a point
    pub size: u32,
    /// Line colour (hex)
    pub color: String,
    /// Distance from text in points
    pub space: u32,
}

impl BorderLine {
    /// Create a single-line border.
    pub fn single(size: u32, color: impl Into<String>) -> Self {
        Self {
            style: BorderStyle::Single,
            size,
            color: color.into(),
            space: 0,
        }
    }

    /// Create an invisible border.
    pub fn none() -> Self {
        Self {
            style: BorderStyle::None,
            size: 0,
            color: "auto".to_string(),
            space: 0,
        }
    }

    /// Set the spacing from text and return self.
    pub fn space(mut self, space: u32) -> Self {
        self.space = space;
        self
    }
}

/// Borders around a paragraph. Absent sides are not drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphBorders {
    /// Top border
    pub top: Option<BorderLine>,
    /// Left border
    pub left: Option<BorderLine>,
    /// Bottom border
    pub bottom: Option<BorderLine>,
    /// Right border
    pub right: Option<BorderLine>,
}

impl ParagraphBorders {
    /// Only a left border.
    pub fn left(line: BorderLine) -> Self {
        Self {
            left: Some(line),
            ..Default::default()
        }
    }

    /// The same line on all four sides.
    pub fn all(line: BorderLine) -> Self {
        Self {
            top: Some(line.clone()),
            left: Some(line.clone()),
            bottom: Some(line.clone()),
            right: Some(line),
        }
    }
}

/// A custom tab stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabStop {
    /// Alignment of text at the stop
    pub kind: TabKind,
    /// Position from the left margin in twips
    pub position: u32,
}

impl TabStop {
    /// Right-aligned tab stop.
    pub fn right(position: u32) -> Self {
        Self {
            kind: TabKind::Right,
            position,
        }
    }
}

/// Tab stop alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabKind {
    /// Text starts at the stop
    Left,
    /// Text is centred on the stop
    Center,
    /// Text ends at the stop
    Right,
}
