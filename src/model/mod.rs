//! Document model types for Word output.
//!
//! This module defines the tree the assembler builds and the DOCX writer
//! serializes: top-level paragraphs and tables, each carrying the
//! formatting (fonts, borders, shading, indentation, table layout) that ends
//! up in `word/document.xml`.

mod document;
mod math;
mod metadata;
mod paragraph;
mod table;

pub use document::{DefaultStyle, Document, DocumentProperties, Node, PageSetup};
pub use math::MathNode;
pub use metadata::{Attachment, LessonMetadata};
pub use paragraph::{
    Alignment, BorderLine, BorderStyle, Indent, Inline, Paragraph, ParagraphBorders,
    ParagraphStyle, Spacing, TabKind, TabStop, TextRun, TextStyle,
};
pub use table::{
    CellBorders, CellMargins, Table, TableCell, TableLayout, TableRow, VerticalAlignment,
};
