//! Text normalizer: rewrite rules applied to raw Markdown before conversion.
//!
//! Each rule is a pure `&str -> String` function. Re-running a rule on its
//! own output changes nothing for well-formed math.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

static BRACKET_DISPLAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\\\[(.*?)\\\]").expect("bracket pattern is valid"));

static PAREN_INLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\\((.*?)\\\)").expect("paren pattern is valid"));

static DOUBLE_DOLLAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\$\$(.*?)\$\$").expect("double dollar pattern is valid"));

/// A `$...$` span with non-empty content.
static MATH_SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([^$]+)\$").expect("math span pattern is valid"));

static SLASH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\b\w+|\([^)]+\))\s*/\s*(\b\w+|\([^)]+\))").expect("slash pattern is valid")
});

static EQUALS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*=\s*").expect("equals pattern is valid"));

static BLANK_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n\s*\n").expect("blank run pattern is valid"));

/// Which rules a normalizer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizeRule {
    /// `\[...\]` and `\(...\)` to `$...$`, `$$...$$` collapsed to `$...$`
    Delimiters,
    /// `a/b` inside math to `\frac{a}{b}`
    Fractions,
    /// Spacing around `=` inside math, runs of blank lines
    Whitespace,
    /// All three, in order
    #[default]
    All,
}

impl NormalizeRule {
    /// Rule keys accepted by [`FromStr`].
    pub const KEYS: [&'static str; 4] = ["delimiters", "fractions", "whitespace", "all"];
}

impl FromStr for NormalizeRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delimiters" => Ok(NormalizeRule::Delimiters),
            "fractions" => Ok(NormalizeRule::Fractions),
            "whitespace" => Ok(NormalizeRule::Whitespace),
            "all" => Ok(NormalizeRule::All),
            other => Err(Error::Other(format!(
                "unknown normalize rule '{}' (expected one of: {})",
                other,
                Self::KEYS.join(", ")
            ))),
        }
    }
}

/// Options for the normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Rewrite bracket and paren math delimiters to dollars
    pub unify_delimiters: bool,

    /// Rewrite slash fractions inside math to `\frac`
    pub fractionify: bool,

    /// Tidy spacing inside math and collapse blank-line runs
    pub clean_whitespace: bool,

    /// Compose decomposed diacritics (Unicode NFC) first
    pub unicode_nfc: bool,
}

impl NormalizeOptions {
    /// Create options from a rule selection.
    pub fn from_rule(rule: NormalizeRule) -> Self {
        let none = Self::none();
        match rule {
            NormalizeRule::Delimiters => Self {
                unify_delimiters: true,
                ..none
            },
            NormalizeRule::Fractions => Self {
                fractionify: true,
                ..none
            },
            NormalizeRule::Whitespace => Self {
                clean_whitespace: true,
                ..none
            },
            NormalizeRule::All => Self::all(),
        }
    }

    /// No rules.
    pub fn none() -> Self {
        Self {
            unify_delimiters: false,
            fractionify: false,
            clean_whitespace: false,
            unicode_nfc: false,
        }
    }

    /// The three rewrite rules.
    pub fn all() -> Self {
        Self {
            unify_delimiters: true,
            fractionify: true,
            clean_whitespace: true,
            unicode_nfc: false,
        }
    }

    /// Enable or disable the NFC pass.
    pub fn with_unicode_nfc(mut self, enabled: bool) -> Self {
        self.unicode_nfc = enabled;
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::all()
    }
}

/// Runs the enabled rules in order: NFC, delimiters, fractions, whitespace.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    /// Create a normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Create a normalizer for one rule selection.
    pub fn from_rule(rule: NormalizeRule) -> Self {
        Self::new(NormalizeOptions::from_rule(rule))
    }

    /// Get the options.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Process text through the enabled rules.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.options.unicode_nfc {
            result = normalize_unicode(&result);
        }
        if self.options.unify_delimiters {
            result = unify_delimiters(&result);
        }
        if self.options.fractionify {
            result = fractionify(&result);
        }
        if self.options.clean_whitespace {
            result = clean_whitespace(&result);
        }

        result
    }
}

/// Apply delimiter unification, fraction-ification and whitespace cleanup.
pub fn normalize(text: &str) -> String {
    Normalizer::default().process(text)
}

/// Rewrite `\[...\]` and `\(...\)` to `$...$`, then collapse `$$...$$` to
/// `$...$`.
///
/// Passes repeat until the text stops changing, so nested forms such as
/// `$$\(x\)$$` end as `$x$`. Every pass that rewrites something removes
/// delimiter characters, which bounds the loop.
pub fn unify_delimiters(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = unify_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn unify_pass(text: &str) -> String {
    let text = BRACKET_DISPLAY_RE.replace_all(text, "$$$1$$");
    let text = PAREN_INLINE_RE.replace_all(&text, "$$$1$$");
    DOUBLE_DOLLAR_RE.replace_all(&text, "$$$1$$").into_owned()
}

/// Inside `$...$` spans, rewrite `a/b` and `(a)/(b)` to `\frac{a}{b}`.
///
/// Outer parentheses of a side are dropped; the fraction bar groups it.
pub fn fractionify(text: &str) -> String {
    MATH_SPAN_RE
        .replace_all(text, |caps: &Captures| {
            let inner = SLASH_RE.replace_all(&caps[1], |c: &Captures| {
                format!("\\frac{{{}}}{{{}}}", strip_parens(&c[1]), strip_parens(&c[2]))
            });
            format!("${}$", inner)
        })
        .into_owned()
}

/// Inside `$...$` spans, put exactly one space on each side of `=`.
/// Everywhere, collapse three or more line breaks separated only by
/// whitespace into one blank line.
pub fn clean_whitespace(text: &str) -> String {
    let spaced = MATH_SPAN_RE.replace_all(text, |caps: &Captures| {
        format!("${}$", EQUALS_RE.replace_all(&caps[1], " = "))
    });
    BLANK_RUN_RE.replace_all(&spaced, "\n\n").into_owned()
}

/// Compose decomposed characters (Unicode NFC).
pub fn normalize_unicode(text: &str) -> String {
    text.nfc().collect()
}

fn strip_parens(side: &str) -> &str {
    side.strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(side)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unify_delimiters() {
        assert_eq!(unify_delimiters(r"\[x^2\]"), "$x^2$");
        assert_eq!(unify_delimiters(r"so \(a+b\) holds"), "so $a+b$ holds");
        assert_eq!(unify_delimiters("$$y$$"), "$y$");
        assert_eq!(unify_delimiters("\\[a\nb\\]"), "$a\nb$");
    }

    #[test]
    fn test_unify_nested_delimiters() {
        assert_eq!(unify_delimiters(r"$$\(x\)$$"), "$x$");
        assert_eq!(unify_delimiters(r"$$\[x\]$$"), "$x$");
        assert_eq!(
            unify_delimiters(r"Cho $$\(a/b\)$$ và $$\[c\]$$."),
            "Cho $a/b$ và $c$."
        );
        let once = normalize(r"$$\(x\)$$");
        assert_eq!(once, "$x$");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_fractionify() {
        assert_eq!(fractionify("$1/2$"), r"$\frac{1}{2}$");
        assert_eq!(fractionify("$(a+b)/(c)$"), r"$\frac{a+b}{c}$");
        assert_eq!(fractionify("x/y outside"), "x/y outside");
        assert_eq!(fractionify(r"$\frac{1}{2}$"), r"$\frac{1}{2}$");
    }

    #[test]
    fn test_clean_whitespace() {
        assert_eq!(clean_whitespace("$x=1$"), "$x = 1$");
        assert_eq!(clean_whitespace("$x   =  1$"), "$x = 1$");
        assert_eq!(clean_whitespace("a = b"), "a = b");
        assert_eq!(clean_whitespace("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(clean_whitespace("a\n  \n \nb"), "a\n\nb");
        assert_eq!(clean_whitespace("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_normalize_order() {
        assert_eq!(normalize(r"\(x=a/b\)"), r"$x = \frac{a}{b}$");
    }

    #[test]
    fn test_normalize_idempotent() {
        let input = "Intro \\[1/2\\] and \\(x=y/z\\)\n\n\n\nnext $$a/b$$";
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_single_rule() {
        let n = Normalizer::from_rule(NormalizeRule::Delimiters);
        assert_eq!(n.process(r"\(a/b\)"), "$a/b$");
        assert!(!n.options().fractionify);
    }

    #[test]
    fn test_rule_from_str() {
        assert_eq!("Fractions".parse::<NormalizeRule>().unwrap(), NormalizeRule::Fractions);
        assert!("everything".parse::<NormalizeRule>().is_err());
    }

    #[test]
    fn test_unicode_nfc() {
        let decomposed = "Pha\u{302}n so\u{302}\u{301}";
        let n = Normalizer::new(NormalizeOptions::none().with_unicode_nfc(true));
        assert_eq!(n.process(decomposed), "Phân số");
        assert_eq!(normalize(decomposed), decomposed);
    }
}
