//! Mapping of math expressions to equation nodes.

use crate::model::MathNode;
use once_cell::sync::Lazy;
use regex::Regex;

/// `a/b` where each side is a word or one parenthesised group.
static SLASH_FRACTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\w+|\([^()]*\))\s*/\s*(\w+|\([^()]*\))\s*$")
        .expect("slash fraction pattern is valid")
});

/// First `\frac{a}{b}` in an expression.
static LATEX_FRACTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\frac\{(.+?)\}\{(.+?)\}").expect("latex fraction pattern is valid")
});

/// Map a math expression (delimiters already removed) to an equation node.
///
/// Only the first `\frac{}{}` of an expression is extracted; surrounding
/// content in the same expression is not kept. Anything that is not a
/// recognised fraction becomes an unparsed run.
pub fn parse_math(expression: &str) -> MathNode {
    if let Some(caps) = SLASH_FRACTION_RE.captures(expression) {
        return MathNode::fraction(strip_parens(&caps[1]), strip_parens(&caps[2]));
    }

    if let Some(caps) = LATEX_FRACTION_RE.captures(expression) {
        return MathNode::fraction(&caps[1], &caps[2]);
    }

    log::debug!("math kept as unparsed run: {:?}", expression);
    MathNode::run(expression)
}

fn strip_parens(side: &str) -> &str {
    side.strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(side)
}
