//! Equation nodes.

use serde::{Deserialize, Serialize};

/// A structured equation as written into the document.
///
/// Only simple fractions are recognised; anything else is carried verbatim
/// as an unparsed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MathNode {
    /// A stacked fraction
    Fraction {
        /// Numerator text
        numerator: String,
        /// Denominator text
        denominator: String,
    },

    /// An expression kept as-is
    Run {
        /// Expression text
        text: String,
    },
}

impl MathNode {
    /// Create a fraction node.
    pub fn fraction(numerator: impl Into<String>, denominator: impl Into<String>) -> Self {
        MathNode::Fraction {
            numerator: numerator.into(),
            denominator: denominator.into(),
        }
    }

    /// Create an unparsed run.
    pub fn run(text: impl Into<String>) -> Self {
        MathNode::Run { text: text.into() }
    }

    /// Check if this node is a fraction.
    pub fn is_fraction(&self) -> bool {
        matches!(self, MathNode::Fraction { .. })
    }

    /// Linear text form, e.g. `1/2`.
    pub fn linear_text(&self) -> String {
        match self {
            MathNode::Fraction {
                numerator,
                denominator,
            } => format!("{}/{}", numerator, denominator),
            MathNode::Run { text } => text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_text() {
        assert_eq!(MathNode::fraction("x", "y").linear_text(), "x/y");
        assert_eq!(MathNode::run("a + b").linear_text(), "a + b");
        assert!(MathNode::fraction("1", "2").is_fraction());
        assert!(!MathNode::run("1").is_fraction());
    }
}
