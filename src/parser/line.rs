//! Line classification for text regions and table cells.

use super::TableGrid;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `<br>`, `<br/>`, `<br />` in any case.
static SOFT_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("soft break pattern is valid"));

static QUOTE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^>\s*").expect("quote prefix pattern is valid"));

static LIST_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*]\s+").expect("list prefix pattern is valid"));

/// A typed block of the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// `#`, `##` or `###` heading
    Heading {
        /// Level 1-3
        level: u8,
        /// Heading text without the marker
        text: String,
    },

    /// `> ` line
    Blockquote {
        /// Text without the marker
        text: String,
    },

    /// `- ` or `* ` line
    ListItem {
        /// Text without the marker
        text: String,
    },

    /// Any other non-blank line
    Paragraph {
        /// Trimmed line
        text: String,
    },

    /// Whitespace-only line
    Blank,

    /// A table region with content rows
    Table(TableGrid),
}

/// Block kind without content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Heading with its level
    Heading(u8),
    /// Blockquote
    Blockquote,
    /// List item
    ListItem,
    /// Paragraph
    Paragraph,
    /// Blank line
    Blank,
    /// Table
    Table,
}

impl Block {
    /// Get the block kind.
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading { level, .. } => BlockKind::Heading(*level),
            Block::Blockquote { .. } => BlockKind::Blockquote,
            Block::ListItem { .. } => BlockKind::ListItem,
            Block::Paragraph { .. } => BlockKind::Paragraph,
            Block::Blank => BlockKind::Blank,
            Block::Table(_) => BlockKind::Table,
        }
    }

    /// Inline text of a line block. Tables and blank lines have none.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. }
            | Block::Blockquote { text }
            | Block::ListItem { text }
            | Block::Paragraph { text } => Some(text),
            Block::Blank | Block::Table(_) => None,
        }
    }
}

/// Classify one non-table line of a text region.
///
/// The line is trimmed first. Markers must be followed by a space, so
/// `#Tag` and `**bold**` stay paragraphs.
pub fn classify_line(line: &str) -> Block {
    let line = line.trim();

    if line.is_empty() {
        return Block::Blank;
    }

    for (level, marker) in [(1u8, "# "), (2, "## "), (3, "### ")] {
        if let Some(text) = line.strip_prefix(marker) {
            return Block::Heading {
                level,
                text: text.to_string(),
            };
        }
    }

    if line.starts_with("> ") {
        return Block::Blockquote {
            text: QUOTE_PREFIX_RE.replace(line, "").into_owned(),
        };
    }

    if is_list_line(line) {
        return Block::ListItem {
            text: LIST_PREFIX_RE.replace(line, "").into_owned(),
        };
    }

    Block::Paragraph {
        text: line.to_string(),
    }
}

fn is_list_line(line: &str) -> bool {
    line.starts_with("- ") || line.starts_with("* ")
}

/// Treatment of one sub-line inside a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellLineKind {
    /// Starts with `>`
    Quote,
    /// Starts with `- ` or `* `
    ListItem,
    /// Anything else
    Plain,
}

/// One soft-break-separated sub-line of a table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLine {
    /// Sub-line treatment
    pub kind: CellLineKind,
    /// Text with the marker removed
    pub text: String,
}

/// Split a cell on soft breaks and classify each sub-line.
///
/// An empty cell yields one empty plain sub-line, so every cell has at least
/// one paragraph.
pub fn split_cell_lines(cell: &str) -> Vec<CellLine> {
    SOFT_BREAK_RE
        .split(cell.trim())
        .map(|part| classify_cell_line(part.trim()))
        .collect()
}

fn classify_cell_line(line: &str) -> CellLine {
    if line.starts_with('>') {
        CellLine {
            kind: CellLineKind::Quote,
            text: QUOTE_PREFIX_RE.replace(line, "").into_owned(),
        }
    } else if is_list_line(line) {
        CellLine {
            kind: CellLineKind::ListItem,
            text: LIST_PREFIX_RE.replace(line, "").into_owned(),
        }
    } else {
        CellLine {
            kind: CellLineKind::Plain,
            text: line.to_string(),
        }
    }
}
