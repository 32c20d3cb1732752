//! Inline scanning: bold spans and math spans.
//!
//! The scanner walks a line left to right. Math is recognised first
//! (`$$...$$` for display, `$...$` for inline); the text between math spans
//! is then split on `**` markers. Every character that is not a consumed
//! delimiter appears in exactly one span.

use super::parse_math;
use crate::model::MathNode;
use serde::{Deserialize, Serialize};

const BOLD_MARKER: &str = "**";

/// One typed span of an inline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum InlineSpan {
    /// Unformatted text
    Plain(String),

    /// Text between a pair of `**` markers
    Bold(String),

    /// A math span
    Math(MathSpan),
}

impl InlineSpan {
    /// Text content without delimiters.
    pub fn text(&self) -> &str {
        match self {
            InlineSpan::Plain(s) | InlineSpan::Bold(s) => s,
            InlineSpan::Math(m) => &m.expression,
        }
    }

    /// Check if this is a math span.
    pub fn is_math(&self) -> bool {
        matches!(self, InlineSpan::Math(_))
    }
}

/// A math span with its source preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathSpan {
    /// Source text including the `$` delimiters
    pub raw: String,

    /// Expression between the delimiters
    pub expression: String,

    /// Whether the span used `$$` delimiters
    pub display: bool,
}

impl MathSpan {
    /// Create an inline (`$`) span.
    pub fn inline(expression: impl Into<String>) -> Self {
        let expression = expression.into();
        Self {
            raw: format!("${}$", expression),
            expression,
            display: false,
        }
    }

    /// Create a display (`$$`) span.
    pub fn display(expression: impl Into<String>) -> Self {
        let expression = expression.into();
        Self {
            raw: format!("$${}$$", expression),
            expression,
            display: true,
        }
    }

    /// Structured equation for this span.
    pub fn node(&self) -> MathNode {
        parse_math(&self.expression)
    }
}

/// Parse a line into inline spans.
pub fn parse_inline(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while let Some(pos) = rest.find('$') {
        plain.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if let Some(after) = rest.strip_prefix("$$") {
            match after.find("$$") {
                Some(end) if end > 0 => {
                    flush_plain(&mut plain, &mut spans);
                    spans.push(InlineSpan::Math(MathSpan::display(&after[..end])));
                    rest = &after[end + 2..];
                }
                _ => {
                    plain.push_str("$$");
                    rest = after;
                }
            }
            continue;
        }

        let after = &rest[1..];
        match after.find('$') {
            Some(end) => {
                flush_plain(&mut plain, &mut spans);
                spans.push(InlineSpan::Math(MathSpan::inline(&after[..end])));
                rest = &after[end + 1..];
            }
            None => {
                plain.push('$');
                rest = after;
            }
        }
    }

    plain.push_str(rest);
    flush_plain(&mut plain, &mut spans);
    spans
}

/// Split accumulated plain text into bold and plain spans.
fn flush_plain(plain: &mut String, spans: &mut Vec<InlineSpan>) {
    if plain.is_empty() {
        return;
    }
    spans.extend(split_bold(plain));
    plain.clear();
}

/// Split text on `**` markers. Odd-indexed pieces are bold.
///
/// With an odd number of markers the last one is unmatched and stays in the
/// text as a literal.
fn split_bold(text: &str) -> Vec<InlineSpan> {
    let mut parts: Vec<String> = text.split(BOLD_MARKER).map(str::to_string).collect();

    if parts.len() % 2 == 0 {
        if let (Some(tail), Some(head)) = (parts.pop(), parts.pop()) {
            parts.push(format!("{}{}{}", head, BOLD_MARKER, tail));
        }
    }

    parts
        .into_iter()
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, part)| {
            if i % 2 == 1 {
                InlineSpan::Bold(part)
            } else {
                InlineSpan::Plain(part)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(
            parse_inline("Just text."),
            vec![InlineSpan::Plain("Just text.".to_string())]
        );
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn test_bold_and_math() {
        let spans = parse_inline("**A** and $x/y$");
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0], InlineSpan::Bold("A".to_string()));
        assert_eq!(spans[1], InlineSpan::Plain(" and ".to_string()));
        match &spans[2] {
            InlineSpan::Math(m) => {
                assert_eq!(m.expression, "x/y");
                assert_eq!(m.raw, "$x/y$");
                assert!(!m.display);
                assert_eq!(m.node(), MathNode::fraction("x", "y"));
            }
            other => panic!("expected math span, got {:?}", other),
        }
    }

    #[test]
    fn test_unbalanced_bold() {
        assert_eq!(
            parse_inline("**bold text"),
            vec![InlineSpan::Plain("**bold text".to_string())]
        );
        assert_eq!(
            parse_inline("a **b** c **d"),
            vec![
                InlineSpan::Plain("a ".to_string()),
                InlineSpan::Bold("b".to_string()),
                InlineSpan::Plain(" c **d".to_string()),
            ]
        );
    }

    #[test]
    fn test_display_math() {
        let spans = parse_inline("see $$\\frac{1}{2}$$ here");
        assert_eq!(spans.len(), 3);
        let InlineSpan::Math(m) = &spans[1] else {
            panic!("expected math span");
        };
        assert!(m.display);
        assert_eq!(m.raw, "$$\\frac{1}{2}$$");
        assert_eq!(m.node(), MathNode::fraction("1", "2"));
    }

    #[test]
    fn test_unclosed_dollar_is_literal() {
        assert_eq!(
            parse_inline("costs $5"),
            vec![InlineSpan::Plain("costs $5".to_string())]
        );
        assert_eq!(
            parse_inline("a $$ b"),
            vec![InlineSpan::Plain("a $$ b".to_string())]
        );
    }

    #[test]
    fn test_bold_inside_math_untouched() {
        let spans = parse_inline("$a**b$");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text(), "a**b");
    }

    #[test]
    fn test_text_preserved() {
        let input = "x **y** $z$ w";
        let joined: String = parse_inline(input).iter().map(|s| s.text()).collect();
        assert_eq!(joined, "x y z w");
    }
}
