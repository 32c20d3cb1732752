//! JSON rendering of the document tree.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Serialize(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MathNode, Paragraph, Inline};

    #[test]
    fn test_to_json_pretty() {
        let mut doc = Document::new();
        doc.properties.title = Some("Test".to_string());
        doc.add_paragraph(Paragraph::with_text("Hello"));

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Hello"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_content(vec![Inline::Math(MathNode::fraction(
            "1", "2",
        ))]));

        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"kind\":\"fraction\""));
    }
}
