//! Table types.

use super::{BorderLine, Paragraph};
use serde::{Deserialize, Serialize};

/// A table structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Total width as a percentage of the text area
    pub width_percent: u32,

    /// Column sizing strategy
    pub layout: TableLayout,
}

impl Table {
    /// Create a new empty full-width autofit table.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            width_percent: 100,
            layout: TableLayout::AutoFit,
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the widest row's cell count. Rows may be ragged.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the header row, if one is marked.
    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first().filter(|r| r.is_header)
    }

    /// Get body rows (non-header).
    pub fn body(&self) -> &[TableRow] {
        match self.header() {
            Some(_) => &self.rows[1..],
            None => &self.rows,
        }
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// Column sizing strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableLayout {
    /// Columns size to their content
    #[default]
    AutoFit,
    /// Columns keep their grid widths
    Fixed,
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,

    /// Whether this row repeats as a header on each page
    pub is_header: bool,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }

    /// Create a header row.
    pub fn header(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: true,
        }
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content (paragraphs)
    pub content: Vec<Paragraph>,

    /// Vertical alignment
    pub vertical_alignment: VerticalAlignment,

    /// Cell borders
    pub borders: CellBorders,

    /// Inner margins in twips
    pub margins: CellMargins,
}

impl TableCell {
    /// Create a cell with multiple paragraphs.
    pub fn with_content(content: Vec<Paragraph>) -> Self {
        Self {
            content,
            vertical_alignment: VerticalAlignment::Top,
            borders: CellBorders::default(),
            margins: CellMargins::default(),
        }
    }

    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_content(vec![Paragraph::with_text(text)])
    }

    /// Set vertical alignment and return self.
    pub fn valign(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    /// Set borders and return self.
    pub fn borders(mut self, borders: CellBorders) -> Self {
        self.borders = borders;
        self
    }

    /// Set uniform inner margins and return self.
    pub fn margins(mut self, margin: u32) -> Self {
        self.margins = CellMargins::uniform(margin);
        self
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() || self.plain_text().trim().is_empty()
    }
}

/// Vertical alignment for table cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    /// Top alignment
    #[default]
    Top,
    /// Middle/center alignment
    Center,
    /// Bottom alignment
    Bottom,
}

/// Borders of one cell. Absent sides fall back to the table default (none).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellBorders {
    /// Top border
    pub top: Option<BorderLine>,
    /// Left border
    pub left: Option<BorderLine>,
    /// Bottom border
    pub bottom: Option<BorderLine>,
    /// Right border
    pub right: Option<BorderLine>,
}

impl CellBorders {
    /// The same line on all four sides.
    pub fn uniform(line: BorderLine) -> Self {
        Self {
            top: Some(line.clone()),
            left: Some(line.clone()),
            bottom: Some(line.clone()),
            right: Some(line),
        }
    }

    /// Explicitly hidden borders on all sides.
    pub fn hidden() -> Self {
        Self::uniform(BorderLine::none())
    }

    /// Check if no side is set.
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none() && self.bottom.is_none() && self.right.is_none()
    }
}

/// Inner cell margins in twips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMargins {
    /// Top margin
    pub top: Option<u32>,
    /// Left margin
    pub left: Option<u32>,
    /// Bottom margin
    pub bottom: Option<u32>,
    /// Right margin
    pub right: Option<u32>,
}

impl CellMargins {
    /// Same margin on all sides.
    pub fn uniform(margin: u32) -> Self {
        Self {
            top: Some(margin),
            left: Some(margin),
            bottom: Some(margin),
            right: Some(margin),
        }
    }

    /// Check if no margin is set.
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none() && self.bottom.is_none() && self.right.is_none()
    }
}
