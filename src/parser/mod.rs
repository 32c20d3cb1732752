//! Markdown dialect parsing.
//!
//! Two passes over the same line grammar: [`segment`] splits the text into
//! text and table regions, then each text line is classified with
//! [`classify_line`] and each piece of content is scanned for bold and math
//! spans with [`parse_inline`].

mod inline;
mod line;
mod math;
mod segment;

pub use inline::{parse_inline, InlineSpan, MathSpan};
pub use line::{classify_line, split_cell_lines, Block, BlockKind, CellLine, CellLineKind};
pub use math::parse_math;
pub use segment::{
    is_separator_row, is_table_line, segment, segment_lines, split_cells, Segment, TableGrid,
    TableSource,
};

/// Parse text into the typed block stream.
///
/// Table regions left without content rows are dropped.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    segment(text)
        .into_iter()
        .flat_map(|segment| match segment {
            Segment::Text(lines) => lines.iter().map(|l| classify_line(l)).collect::<Vec<_>>(),
            Segment::Table(source) => match source.to_grid() {
                Some(grid) => vec![Block::Table(grid)],
                None => {
                    log::debug!("dropping table region with no content rows");
                    Vec::new()
                }
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blocks_mixed() {
        let text = "# Title\n\nIntro **bold**\n| a | b |\n|---|---|\n| 1 | 2 |\n- item\n> note";
        let kinds: Vec<BlockKind> = parse_blocks(text).iter().map(Block::kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Heading(1),
                BlockKind::Blank,
                BlockKind::Paragraph,
                BlockKind::Table,
                BlockKind::ListItem,
                BlockKind::Blockquote,
            ]
        );
    }

    #[test]
    fn test_parse_blocks_drops_empty_table() {
        let blocks = parse_blocks("before\n|---|---|\nafter");
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| b.kind() == BlockKind::Paragraph));
    }
}
