//! Block segmentation: splits source lines into text regions and table regions.
//!
//! Segmentation only distinguishes "inside a table" from "not". Line-level
//! classification of text regions (heading, quote, list item) happens later
//! in [`classify_line`](super::classify_line).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Separator rows hold only pipes, dashes, colons and whitespace.
static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\|?[\s\-:|]+\|?$").expect("separator pattern is valid"));

/// A contiguous region of source lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Consecutive non-table lines
    Text(Vec<String>),

    /// Consecutive table lines, raw
    Table(TableSource),
}

impl Segment {
    /// Check if this is a table region.
    pub fn is_table(&self) -> bool {
        matches!(self, Segment::Table(_))
    }

    /// Number of source lines in the region.
    pub fn line_count(&self) -> usize {
        match self {
            Segment::Text(lines) => lines.len(),
            Segment::Table(source) => source.rows.len(),
        }
    }
}

/// The raw rows of one table region, separators included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSource {
    /// Source lines as written
    pub rows: Vec<String>,
}

impl TableSource {
    /// Create a table source from raw rows.
    pub fn new(rows: Vec<String>) -> Self {
        Self { rows }
    }

    /// Rows that carry content: not blank and not a separator.
    pub fn content_rows(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(|row| row.trim())
            .filter(|row| !row.is_empty() && !is_separator_row(row))
    }

    /// Split into header and body cells.
    ///
    /// Returns `None` when no content row is left after filtering, in which
    /// case the region produces no table at all.
    pub fn to_grid(&self) -> Option<TableGrid> {
        let mut rows = self.content_rows().map(split_cells);
        let header = rows.next()?;
        Some(TableGrid {
            header,
            body: rows.collect(),
        })
    }
}

/// Header and body cells of a table region. Rows may be ragged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGrid {
    /// First content row
    pub header: Vec<String>,

    /// Remaining content rows
    pub body: Vec<Vec<String>>,
}

impl TableGrid {
    /// Iterate over all rows, header first.
    pub fn rows(&self) -> impl Iterator<Item = &Vec<String>> {
        std::iter::once(&self.header).chain(self.body.iter())
    }

    /// Total number of rows including the header.
    pub fn row_count(&self) -> usize {
        1 + self.body.len()
    }

    /// Cell count of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows().map(Vec::len).max().unwrap_or(0)
    }
}

/// Check if a line belongs to a table region.
///
/// The trimmed line must start with `|` and either end with `|` or contain at
/// least two pipes, so rows missing their trailing pipe still count.
pub fn is_table_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') && (trimmed.ends_with('|') || trimmed.split('|').count() > 2)
}

/// Check if a trimmed row is a header/body separator.
pub fn is_separator_row(row: &str) -> bool {
    SEPARATOR_RE.is_match(row.trim())
}

/// Split a table row into trimmed cells, dropping the empty pieces produced
/// by edge pipes.
pub fn split_cells(row: &str) -> Vec<String> {
    let trimmed = row.trim();
    let mut pieces: Vec<&str> = trimmed.split('|').collect();
    if trimmed.starts_with('|') && !pieces.is_empty() {
        pieces.remove(0);
    }
    if trimmed.ends_with('|') && !pieces.is_empty() {
        pieces.pop();
    }
    pieces.into_iter().map(|cell| cell.trim().to_string()).collect()
}

/// Segment a sequence of lines.
///
/// A region ends wherever a line's table status differs from its
/// predecessor's.
pub fn segment_lines<I, S>(lines: I) -> Vec<Segment>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().fold(Vec::new(), |mut segments, line| {
        let line = line.as_ref();
        let in_table = is_table_line(line);
        match (segments.last_mut(), in_table) {
            (Some(Segment::Table(source)), true) => source.rows.push(line.to_string()),
            (Some(Segment::Text(text)), false) => text.push(line.to_string()),
            (_, true) => segments.push(Segment::Table(TableSource::new(vec![line.to_string()]))),
            (_, false) => segments.push(Segment::Text(vec![line.to_string()])),
        }
        segments
    })
}

/// Segment a full text. Both `\n` and `\r\n` line endings are accepted.
pub fn segment(text: &str) -> Vec<Segment> {
    let segments = segment_lines(text.lines());
    log::debug!(
        "segmented {} lines into {} regions ({} tables)",
        segments.iter().map(Segment::line_count).sum::<usize>(),
        segments.len(),
        segments.iter().filter(|s| s.is_table()).count()
    );
    segments
}
