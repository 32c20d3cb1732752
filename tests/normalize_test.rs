//! Integration tests for the text normalizer.

use mdocx::{normalize, unify_delimiters, NormalizeOptions, NormalizeRule, Normalizer};
use proptest::prelude::*;

const FRAGMENTS: &[&str] = &[
    "Phân số",
    "**đậm**",
    "a = b",
    "x/y",
    r"\(a/b\)",
    r"\(x=y/z\)",
    r"\[x^2 + 1\]",
    "$$y$$",
    "$(a+b)/(c)$",
    "$x=1$",
    r"$\frac{3}{4}$",
    "- mục",
    "> ghi chú",
    "| a | b |",
];

const SEPARATORS: &[&str] = &[" ", "\n", "\n\n", "\n\n\n\n", "\n \n  \n"];

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (prop::sample::select(FRAGMENTS), prop::sample::select(SEPARATORS)),
        0..16,
    )
    .prop_map(|parts| {
        parts
            .into_iter()
            .flat_map(|(fragment, sep)| [fragment, sep])
            .collect::<String>()
    })
}

const PROSE: &[&str] = &["Tính ", "Phân số", "a = b", "**đậm**", "x/y"];

const WRAPPED_MATH: &[&str] = &[r"\(x\)", r"\[a/b\]", r"\(x=1\)", r"\[(a+b)/(c)\]", "y"];

/// Prose and `$$`-wrapped math glued together with no separator.
fn nested_document() -> impl Strategy<Value = String> {
    let unit = prop_oneof![
        prop::sample::select(PROSE).prop_map(str::to_string),
        prop::sample::select(WRAPPED_MATH).prop_map(|inner| format!("$${}$$", inner)),
    ];
    prop::collection::vec(unit, 0..8).prop_map(|units| units.concat())
}

proptest! {
    #[test]
    fn normalize_is_idempotent(text in document()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn single_rules_are_idempotent(text in document()) {
        for rule in [NormalizeRule::Delimiters, NormalizeRule::Fractions, NormalizeRule::Whitespace] {
            let normalizer = Normalizer::from_rule(rule);
            let once = normalizer.process(&text);
            prop_assert_eq!(normalizer.process(&once), once);
        }
    }

    #[test]
    fn nested_delimiters_are_idempotent(text in nested_document()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
        let unified = unify_delimiters(&text);
        prop_assert_eq!(unify_delimiters(&unified), unified);
    }

    #[test]
    fn no_bracket_delimiters_remain(text in document()) {
        let out = normalize(&text);
        prop_assert!(!out.contains(r"\("));
        prop_assert!(!out.contains(r"\["));
        prop_assert!(!out.contains("$$"));
    }
}

#[test]
fn test_lesson_fragment() {
    let input = "Tính \\(1/2 + 1/3\\):\n\n\n\n\\[x=(a+b)/(c)\\]";
    assert_eq!(
        normalize(input),
        "Tính $\\frac{1}{2} + \\frac{1}{3}$:\n\n$x = \\frac{a+b}{c}$"
    );
}

#[test]
fn test_wrapped_delimiters_collapse() {
    assert_eq!(normalize(r"$$\(x\)$$"), "$x$");
    assert_eq!(normalize(r"$$\[x\]$$"), "$x$");
    let input = r"Tính $$\(a/b\)$$ rồi $$\[c\]$$.";
    let once = normalize(input);
    assert_eq!(once, r"Tính $\frac{a}{b}$ rồi $c$.");
    assert_eq!(normalize(&once), once);
}

#[test]
fn test_disabled_rules_leave_text_alone() {
    let input = r"\(a/b\)   $x=1$";
    let normalizer = Normalizer::new(NormalizeOptions::none());
    assert_eq!(normalizer.process(input), input);
}

#[test]
fn test_normalized_text_converts_to_fractions() {
    let normalized = normalize(r"\((a+b)/(c)\)");
    let doc = mdocx::assemble(&normalized, None);
    assert_eq!(doc.plain_text(), "a+b/c");
}
