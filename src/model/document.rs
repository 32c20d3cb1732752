//! Document-level types.

use super::{Paragraph, Table};
use serde::{Deserialize, Serialize};

/// An assembled Word document: one section of top-level nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Core properties (title, author)
    pub properties: DocumentProperties,

    /// Page geometry of the single section
    pub page: PageSetup,

    /// The `Normal` paragraph style every run inherits
    pub default_style: DefaultStyle,

    /// Top-level content in order
    pub nodes: Vec<Node>,
}

impl Document {
    /// Create a new empty document with A4 geometry.
    pub fn new() -> Self {
        Self {
            properties: DocumentProperties::default(),
            page: PageSetup::default(),
            default_style: DefaultStyle::default(),
            nodes: Vec::new(),
        }
    }

    /// Add a node to the document.
    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Add a paragraph to the document.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.add_node(Node::Paragraph(paragraph));
    }

    /// Add a table to the document.
    pub fn add_table(&mut self, table: Table) {
        self.add_node(Node::Table(table));
    }

    /// Get the number of top-level nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the document has any content.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over top-level paragraphs.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Paragraph(p) => Some(p),
            Node::Table(_) => None,
        })
    }

    /// Iterate over top-level tables.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Table(t) => Some(t),
            Node::Paragraph(_) => None,
        })
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.nodes
            .iter()
            .map(|node| match node {
                Node::Paragraph(p) => p.plain_text(),
                Node::Table(t) => t.plain_text(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A top-level content node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// A styled paragraph
    Paragraph(Paragraph),

    /// A bordered table
    Table(Table),
}

/// Core document properties written to `docProps/core.xml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentProperties {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Subject line
    pub subject: Option<String>,
}

/// Page geometry in twips (1 cm = 567 twips).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSetup {
    /// Page width
    pub width: u32,
    /// Page height
    pub height: u32,
    /// Top margin
    pub margin_top: u32,
    /// Bottom margin
    pub margin_bottom: u32,
    /// Left margin
    pub margin_left: u32,
    /// Right margin
    pub margin_right: u32,
}

impl PageSetup {
    /// A4 portrait with 2cm top/bottom, 3cm left and 1.5cm right margins.
    pub fn a4() -> Self {
        Self {
            width: 11906,
            height: 16838,
            margin_top: 1134,
            margin_bottom: 1134,
            margin_left: 1701,
            margin_right: 851,
        }
    }

    /// Width available for text between the side margins.
    pub fn text_width(&self) -> u32 {
        self.width
            .saturating_sub(self.margin_left)
            .saturating_sub(self.margin_right)
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::a4()
    }
}

/// The named default paragraph style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultStyle {
    /// Style id and name
    pub name: String,
    /// Font family
    pub font_family: String,
    /// Font size in half-points
    pub font_size: u32,
    /// Line spacing in 240ths of a line
    pub line_spacing: u32,
}

impl Default for DefaultStyle {
    fn default() -> Self {
        Self {
            name: "Normal".to_string(),
            font_family: "Times New Roman".to_string(),
            font_size: 28,
            line_spacing: 276,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableRow;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.node_count(), 0);
        assert_eq!(doc.default_style.font_family, "Times New Roman");
        assert_eq!(doc.default_style.font_size, 28);
    }

    #[test]
    fn test_a4_geometry() {
        let page = PageSetup::a4();
        assert_eq!(page.text_width(), 11906 - 1701 - 851);
    }

    #[test]
    fn test_node_iterators() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("one"));
        let mut table = Table::new();
        table.add_row(TableRow::new(vec![]));
        doc.add_table(table);
        doc.add_paragraph(Paragraph::with_text("two"));

        assert_eq!(doc.paragraphs().count(), 2);
        assert_eq!(doc.tables().count(), 1);
        assert!(matches!(doc.nodes[1], Node::Table(_)));
        assert!(doc.plain_text().contains("one"));
    }
}
