//! # mdocx
//!
//! Convert lesson-plan Markdown into styled Word documents.
//!
//! The input dialect is narrow: `#`..`###` headings, `- `/`* ` list items,
//! `> ` blockquotes, `**bold**`, `$...$`/`$$...$$` math and pipe tables whose
//! cells may hold `<br>`-separated sub-lines. Optional lesson metadata adds
//! an official cover page and a signature footer.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mdocx::{to_docx, to_docx_with_metadata, LessonMetadata};
//!
//! fn main() -> mdocx::Result<()> {
//!     let bytes = to_docx("# Phân số\n\nMột nửa là $1/2$.")?;
//!     std::fs::write("Tai_lieu_chuyen_doi.docx", bytes)?;
//!
//!     let meta = LessonMetadata::from_json_file("lesson.json")?;
//!     let bytes = to_docx_with_metadata("## I. Mục tiêu", &meta)?;
//!     std::fs::write("Giao_an_GDPT2018.docx", bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Block segmentation**: text and table regions, separator rows dropped
//! - **Inline spans**: bold and math, with unbalanced markers kept literally
//! - **Equations**: simple fractions written as Word equations
//! - **Themes**: five accent palettes for headings and boxes
//! - **Normalizer**: idempotent rewrite rules for pasted LaTeX-ish text

pub mod assemble;
pub mod convert;
pub mod error;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use assemble::{AssembleOptions, Assembler, Assembly, AssemblyStats, Theme};
pub use convert::{convert, convert_file, ConvertOptions, ConvertResult, ExportKind};
pub use error::{Error, Result};
pub use model::{
    Alignment, Document, Inline, LessonMetadata, MathNode, Node, Paragraph, ParagraphStyle,
    Table, TableCell, TableRow, TextRun, TextStyle,
};
pub use normalize::{
    clean_whitespace, fractionify, normalize, unify_delimiters, NormalizeOptions, NormalizeRule,
    Normalizer,
};
pub use parser::{parse_blocks, parse_inline, Block, BlockKind, InlineSpan, MathSpan};
pub use render::JsonFormat;

/// Assemble a document tree from text and optional metadata.
///
/// # Example
///
/// ```
/// use mdocx::assemble;
///
/// let doc = assemble("Hello **world**", None);
/// assert_eq!(doc.plain_text(), "Hello world");
/// ```
pub fn assemble(text: &str, metadata: Option<&LessonMetadata>) -> Document {
    Assembler::default().assemble(text, metadata).document
}

/// Convert text to `.docx` bytes.
///
/// # Example
///
/// ```no_run
/// let bytes = mdocx::to_docx("- first\n- second").unwrap();
/// std::fs::write("list.docx", bytes).unwrap();
/// ```
pub fn to_docx(text: &str) -> Result<Vec<u8>> {
    render::write_docx(&assemble(text, None))
}

/// Convert text to `.docx` bytes with lesson metadata (cover page and footer).
pub fn to_docx_with_metadata(text: &str, metadata: &LessonMetadata) -> Result<Vec<u8>> {
    render::write_docx(&assemble(text, Some(metadata)))
}

/// Convert text to `.docx` bytes on the blocking thread pool.
///
/// Yields exactly one result; there is no partial output.
#[cfg(feature = "async")]
pub async fn to_docx_async(
    text: String,
    metadata: Option<LessonMetadata>,
    options: ConvertOptions,
) -> Result<ConvertResult> {
    tokio::task::spawn_blocking(move || convert(&text, metadata.as_ref(), &options))
        .await
        .map_err(|e| Error::Other(format!("conversion task failed: {}", e)))?
}

/// Builder for converting Markdown to Word documents.
///
/// # Example
///
/// ```no_run
/// use mdocx::Mdocx;
///
/// let result = Mdocx::new()
///     .with_theme_name("rose")?
///     .normalized()
///     .convert("## Hoạt động 1\n\n$x=1/2$")?;
/// std::fs::write(result.file_name(), result.to_docx()?)?;
/// # Ok::<(), mdocx::Error>(())
/// ```
pub struct Mdocx {
    options: ConvertOptions,
    metadata: Option<LessonMetadata>,
}

impl Mdocx {
    /// Create a new Mdocx builder.
    pub fn new() -> Self {
        Self {
            options: ConvertOptions::default(),
            metadata: None,
        }
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.options = self.options.with_theme(theme);
        self
    }

    /// Set the theme by key.
    pub fn with_theme_name(mut self, key: &str) -> Result<Self> {
        self.options = self.options.with_theme_name(key)?;
        Ok(self)
    }

    /// Attach lesson metadata.
    pub fn with_metadata(mut self, metadata: LessonMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Fix the academic year printed on the cover page.
    pub fn with_academic_year(mut self, year: i32) -> Self {
        self.options.assemble = self.options.assemble.with_academic_year(year);
        self
    }

    /// Set the list marker glyph.
    pub fn with_list_marker(mut self, marker: impl Into<String>) -> Self {
        self.options.assemble = self.options.assemble.with_list_marker(marker);
        self
    }

    /// Run all normalizer rules before assembly.
    pub fn normalized(mut self) -> Self {
        self.options = self.options.normalized();
        self
    }

    /// Set normalizer options.
    pub fn with_normalize(mut self, options: NormalizeOptions) -> Self {
        self.options = self.options.with_normalize(options);
        self
    }

    /// Set the export context.
    pub fn with_export_kind(mut self, kind: ExportKind) -> Self {
        self.options = self.options.with_export_kind(kind);
        self
    }

    /// Assemble the text and return a result wrapper.
    pub fn convert(self, text: &str) -> Result<MdocxResult> {
        let text = match &self.options.normalize {
            Some(opts) => Normalizer::new(opts.clone()).process(text),
            None => text.to_string(),
        };
        let assembly = Assembler::new(self.options.assemble.clone())
            .assemble(&text, self.metadata.as_ref());
        let kind = self
            .options
            .export_kind
            .unwrap_or_else(|| ExportKind::for_metadata(self.metadata.as_ref()));

        Ok(MdocxResult {
            document: assembly.document,
            stats: assembly.stats,
            export_kind: kind,
        })
    }

    /// Read a Markdown file and assemble it.
    pub fn convert_file<P: AsRef<std::path::Path>>(self, path: P) -> Result<MdocxResult> {
        let text = std::fs::read_to_string(path)?;
        self.convert(&text)
    }
}

impl Default for Mdocx {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of assembling a document with [`Mdocx`].
pub struct MdocxResult {
    /// The assembled document
    pub document: Document,
    /// Assembly statistics
    stats: AssemblyStats,
    export_kind: ExportKind,
}

impl MdocxResult {
    /// Serialize to `.docx` bytes.
    pub fn to_docx(&self) -> Result<Vec<u8>> {
        render::write_docx(&self.document)
    }

    /// Serialize the document tree to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get plain text of the document.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get assembly statistics.
    pub fn stats(&self) -> &AssemblyStats {
        &self.stats
    }

    /// Default file name for the export context.
    pub fn file_name(&self) -> &'static str {
        self.export_kind.default_file_name()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mdocx_builder() {
        let result = Mdocx::new()
            .with_theme_name("slate")
            .unwrap()
            .with_list_marker("•")
            .convert("- item")
            .unwrap();
        assert_eq!(result.plain_text(), "• item");
        assert_eq!(result.file_name(), "Tai_lieu_chuyen_doi.docx");
        assert_eq!(result.stats().list_item_count, 1);
    }

    #[test]
    fn test_mdocx_builder_unknown_theme() {
        assert!(matches!(
            Mdocx::new().with_theme_name("neon"),
            Err(Error::UnknownTheme(_))
        ));
    }

    #[test]
    fn test_mdocx_with_metadata() {
        let meta = LessonMetadata::new("Toán", "6A", "1", "Bài 1").with_institution("THCS A");
        let result = Mdocx::new()
            .with_metadata(meta)
            .with_academic_year(2030)
            .convert("# Bài 1")
            .unwrap();
        assert!(result.stats().has_cover_page);
        assert!(result.plain_text().contains("Năm học: 2030 - 2031"));
        assert_eq!(result.file_name(), "Giao_an_GDPT2018.docx");
        assert!(result.to_docx().unwrap().starts_with(b"PK"));
    }

    #[test]
    fn test_mdocx_normalized() {
        let result = Mdocx::new().normalized().convert(r"\(a/b\)").unwrap();
        assert_eq!(result.stats().fraction_count, 1);
        let json = result.to_json(JsonFormat::Compact).unwrap();
        assert!(json.contains("\"numerator\":\"a\""));
    }

    #[test]
    fn test_to_docx_empty_input() {
        let bytes = to_docx("").unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert!(assemble("", None).is_empty());
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_to_docx_async() {
        let result = to_docx_async("$1/2$".to_string(), None, ConvertOptions::new())
            .await
            .unwrap();
        assert_eq!(result.stats.fraction_count, 1);
        assert_eq!(result.mime_type, render::DOCX_MIME_TYPE);
    }
}
