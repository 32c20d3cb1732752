//! Integration tests for the Markdown dialect parser.

use mdocx::parser::{parse_math, segment, Segment};
use mdocx::{parse_blocks, parse_inline, Block, BlockKind, InlineSpan, MathNode};

#[test]
fn test_segment_table_boundaries() {
    let segments = segment("foo\n|a|b|\n|-|-|\n|1|2|\nbar");
    assert_eq!(segments.len(), 3);

    assert_eq!(segments[0], Segment::Text(vec!["foo".to_string()]));
    match &segments[1] {
        Segment::Table(source) => {
            let grid = source.to_grid().unwrap();
            assert_eq!(grid.header, vec!["a", "b"]);
            assert_eq!(grid.body, vec![vec!["1".to_string(), "2".to_string()]]);
        }
        other => panic!("expected table, got {:?}", other),
    }
    assert_eq!(segments[2], Segment::Text(vec!["bar".to_string()]));
}

#[test]
fn test_crlf_input() {
    let blocks = parse_blocks("# Title\r\n\r\nBody\r\n");
    let kinds: Vec<_> = blocks.iter().map(Block::kind).collect();
    assert_eq!(
        kinds,
        vec![BlockKind::Heading(1), BlockKind::Blank, BlockKind::Paragraph]
    );
}

#[test]
fn test_plain_round_trip() {
    let spans = parse_inline("Nothing special here, just 3 + 4.");
    assert_eq!(
        spans,
        vec![InlineSpan::Plain(
            "Nothing special here, just 3 + 4.".to_string()
        )]
    );
}

#[test]
fn test_bold_math_non_overlap() {
    let spans = parse_inline("**A** and $x/y$");
    assert_eq!(spans.len(), 3);
    assert_eq!(spans[0], InlineSpan::Bold("A".to_string()));
    assert_eq!(spans[1], InlineSpan::Plain(" and ".to_string()));
    match &spans[2] {
        InlineSpan::Math(m) => assert_eq!(m.node(), MathNode::fraction("x", "y")),
        other => panic!("expected math, got {:?}", other),
    }
}

#[test]
fn test_unbalanced_bold_is_literal() {
    assert_eq!(
        parse_inline("**bold text"),
        vec![InlineSpan::Plain("**bold text".to_string())]
    );
}

#[test]
fn test_unclosed_dollar_is_literal() {
    assert_eq!(
        parse_inline("costs $5"),
        vec![InlineSpan::Plain("costs $5".to_string())]
    );
}

#[test]
fn test_first_frac_only() {
    assert_eq!(
        parse_math(r"\frac{1}{2} + \frac{3}{4}"),
        MathNode::fraction("1", "2")
    );
}

#[test]
fn test_header_only_table_kept() {
    let blocks = parse_blocks("| a | b |\n|---|---|");
    assert_eq!(blocks.len(), 1);
    match &blocks[0] {
        Block::Table(grid) => {
            assert_eq!(grid.header, vec!["a", "b"]);
            assert!(grid.body.is_empty());
        }
        other => panic!("expected table, got {:?}", other),
    }
}

#[test]
fn test_all_separator_table_dropped() {
    assert!(parse_blocks("|---|\n|:--|").is_empty());
}

#[test]
fn test_block_classification() {
    let blocks = parse_blocks("## Goals\n> Remember\n- one\n* two\nText");
    assert_eq!(
        blocks,
        vec![
            Block::Heading {
                level: 2,
                text: "Goals".to_string()
            },
            Block::Blockquote {
                text: "Remember".to_string()
            },
            Block::ListItem {
                text: "one".to_string()
            },
            Block::ListItem {
                text: "two".to_string()
            },
            Block::Paragraph {
                text: "Text".to_string()
            },
        ]
    );
}
