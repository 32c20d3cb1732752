//! End-to-end conversion: Markdown text (and optional metadata) to `.docx`.
//!
//! # Example
//!
//! ```no_run
//! use mdocx::convert::{convert, ConvertOptions};
//!
//! fn main() -> mdocx::Result<()> {
//!     let options = ConvertOptions::new().with_theme_name("emerald")?.normalized();
//!     let result = convert("# Bài 1\n\nHalf is $1/2$.", None, &options)?;
//!     result.write_to(&result.file_name)?;
//!     Ok(())
//! }
//! ```

use std::borrow::Cow;
use std::path::Path;

use crate::assemble::{AssembleOptions, Assembler, AssemblyStats, Theme};
use crate::error::Result;
use crate::model::LessonMetadata;
use crate::normalize::{NormalizeOptions, Normalizer};
use crate::render::{write_docx, DOCX_MIME_TYPE};

/// Calling context of a conversion, which decides the default file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportKind {
    /// Free text pasted into the converter tool
    #[default]
    PlainConversion,

    /// A full lesson plan with metadata
    LessonPlan,
}

impl ExportKind {
    /// Default download name for this context.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            ExportKind::PlainConversion => "Tai_lieu_chuyen_doi.docx",
            ExportKind::LessonPlan => "Giao_an_GDPT2018.docx",
        }
    }

    /// Lesson plan when metadata is given, plain conversion otherwise.
    pub fn for_metadata(metadata: Option<&LessonMetadata>) -> Self {
        match metadata {
            Some(_) => ExportKind::LessonPlan,
            None => ExportKind::PlainConversion,
        }
    }
}

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Assembly options
    pub assemble: AssembleOptions,

    /// Normalizer to run before assembly (None = text used as given)
    pub normalize: Option<NormalizeOptions>,

    /// Export context (None = derived from the presence of metadata)
    pub export_kind: Option<ExportKind>,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set assembly options.
    pub fn with_assemble_options(mut self, options: AssembleOptions) -> Self {
        self.assemble = options;
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.assemble = self.assemble.with_theme(theme);
        self
    }

    /// Set the theme by key.
    pub fn with_theme_name(mut self, key: &str) -> Result<Self> {
        self.assemble = self.assemble.with_theme_name(key)?;
        Ok(self)
    }

    /// Run the given normalizer options before assembly.
    pub fn with_normalize(mut self, options: NormalizeOptions) -> Self {
        self.normalize = Some(options);
        self
    }

    /// Run all normalizer rules before assembly.
    pub fn normalized(self) -> Self {
        self.with_normalize(NormalizeOptions::all())
    }

    /// Set the export context.
    pub fn with_export_kind(mut self, kind: ExportKind) -> Self {
        self.export_kind = Some(kind);
        self
    }
}

/// Result of a conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// The `.docx` package
    pub bytes: Vec<u8>,

    /// Default file name for the export context
    pub file_name: String,

    /// MIME type of the output
    pub mime_type: &'static str,

    /// Assembly statistics
    pub stats: AssemblyStats,
}

impl ConvertResult {
    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.bytes.len()
    }

    /// Write the package to a file.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Convert text to a `.docx` package.
pub fn convert(
    text: &str,
    metadata: Option<&LessonMetadata>,
    options: &ConvertOptions,
) -> Result<ConvertResult> {
    let text = match &options.normalize {
        Some(normalize) => Cow::Owned(Normalizer::new(normalize.clone()).process(text)),
        None => Cow::Borrowed(text),
    };

    let assembly = Assembler::new(options.assemble.clone()).assemble(&text, metadata);
    let bytes = write_docx(&assembly.document)?;
    let kind = options
        .export_kind
        .unwrap_or_else(|| ExportKind::for_metadata(metadata));

    Ok(ConvertResult {
        bytes,
        file_name: kind.default_file_name().to_string(),
        mime_type: DOCX_MIME_TYPE,
        stats: assembly.stats,
    })
}

/// Read a Markdown file and convert it.
pub fn convert_file<P: AsRef<Path>>(
    path: P,
    metadata: Option<&LessonMetadata>,
    options: &ConvertOptions,
) -> Result<ConvertResult> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    log::debug!("converting {} ({} bytes)", path.display(), text.len());
    convert(&text, metadata, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_file_names() {
        assert_eq!(
            ExportKind::PlainConversion.default_file_name(),
            "Tai_lieu_chuyen_doi.docx"
        );
        assert_eq!(ExportKind::LessonPlan.default_file_name(), "Giao_an_GDPT2018.docx");
    }

    #[test]
    fn test_convert_plain() {
        let result = convert("Hello", None, &ConvertOptions::new()).unwrap();
        assert_eq!(result.file_name, "Tai_lieu_chuyen_doi.docx");
        assert_eq!(result.mime_type, DOCX_MIME_TYPE);
        assert!(result.bytes.starts_with(b"PK"));
        assert_eq!(result.stats.paragraph_count, 1);
    }

    #[test]
    fn test_convert_with_metadata_uses_lesson_name() {
        let meta = LessonMetadata::new("Toán", "6A", "1", "Bài 1");
        let result = convert("Hello", Some(&meta), &ConvertOptions::new()).unwrap();
        assert_eq!(result.file_name, "Giao_an_GDPT2018.docx");
    }

    #[test]
    fn test_explicit_export_kind_wins() {
        let meta = LessonMetadata::new("Toán", "6A", "1", "Bài 1");
        let options = ConvertOptions::new().with_export_kind(ExportKind::PlainConversion);
        let result = convert("Hello", Some(&meta), &options).unwrap();
        assert_eq!(result.file_name, "Tai_lieu_chuyen_doi.docx");
    }

    #[test]
    fn test_normalized_conversion() {
        let options = ConvertOptions::new().normalized();
        let result = convert(r"Half is \(1/2\)", None, &options).unwrap();
        assert_eq!(result.stats.math_count, 1);
        assert_eq!(result.stats.fraction_count, 1);
    }

    #[test]
    fn test_unknown_theme_option() {
        assert!(ConvertOptions::new().with_theme_name("neon").is_err());
    }
}
