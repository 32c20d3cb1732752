//! Assembly statistics.

use serde::{Deserialize, Serialize};

/// Statistics collected while assembling a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyStats {
    /// Headings written to the body
    pub heading_count: u32,

    /// Level-1 headings left out because a cover page carries the title
    pub suppressed_heading_count: u32,

    /// Body paragraphs, blank lines included
    pub paragraph_count: u32,

    /// List items, in the body and inside cells
    pub list_item_count: u32,

    /// Blockquotes, in the body and inside cells
    pub blockquote_count: u32,

    /// Tables written
    pub table_count: u32,

    /// Table regions with no content rows
    pub dropped_table_count: u32,

    /// Math spans
    pub math_count: u32,

    /// Math spans rendered as fractions
    pub fraction_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Whether a cover page was generated
    pub has_cover_page: bool,
}

impl AssemblyStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment suppressed heading count.
    pub fn add_suppressed_heading(&mut self) {
        self.suppressed_heading_count += 1;
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment list item count.
    pub fn add_list_item(&mut self) {
        self.list_item_count += 1;
    }

    /// Increment blockquote count.
    pub fn add_blockquote(&mut self) {
        self.blockquote_count += 1;
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Increment dropped table count.
    pub fn add_dropped_table(&mut self) {
        self.dropped_table_count += 1;
    }

    /// Count one math span.
    pub fn add_math(&mut self, is_fraction: bool) {
        self.math_count += 1;
        if is_fraction {
            self.fraction_count += 1;
        }
    }

    /// Add word count from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &AssemblyStats) {
        self.heading_count += other.heading_count;
        self.suppressed_heading_count += other.suppressed_heading_count;
        self.paragraph_count += other.paragraph_count;
        self.list_item_count += other.list_item_count;
        self.blockquote_count += other.blockquote_count;
        self.table_count += other.table_count;
        self.dropped_table_count += other.dropped_table_count;
        self.math_count += other.math_count;
        self.fraction_count += other.fraction_count;
        self.word_count += other.word_count;
        self.has_cover_page |= other.has_cover_page;
    }
}
