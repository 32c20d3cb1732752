//! Document assembly: maps parsed blocks to styled document nodes.
//!
//! The assembler never fails. Malformed math becomes an unparsed run,
//! ragged table rows are written as they are, and table regions without
//! content rows produce nothing.

mod cover;
mod footer;
mod options;
mod stats;
mod theme;

pub use cover::cover_page;
pub use footer::signature_footer;
pub use options::AssembleOptions;
pub use stats::AssemblyStats;
pub use theme::{Theme, THEMES};

use crate::model::{
    Alignment, BorderLine, CellBorders, Document, DocumentProperties, Indent, Inline,
    LessonMetadata, Paragraph, ParagraphBorders, ParagraphStyle, Table, TableCell, TableRow,
    TextRun, VerticalAlignment,
};
use crate::parser::{
    classify_line, parse_inline, segment, split_cell_lines, Block, CellLineKind, InlineSpan,
    Segment, TableGrid,
};

/// Cell border width in eighths of a point.
const CELL_BORDER_SIZE: u32 = 4;
const CELL_BORDER_COLOR: &str = "000000";
const CELL_MARGIN: u32 = 100;

/// An assembled document with the statistics gathered while building it.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// The document tree
    pub document: Document,

    /// Counts of what went into it
    pub stats: AssemblyStats,
}

/// Builds a [`Document`] from Markdown text and optional lesson metadata.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    options: AssembleOptions,
}

impl Assembler {
    /// Create an assembler with the given options.
    pub fn new(options: AssembleOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &AssembleOptions {
        &self.options
    }

    /// Assemble a document.
    pub fn assemble(&self, text: &str, metadata: Option<&LessonMetadata>) -> Assembly {
        let mut state = State {
            options: &self.options,
            document: Document::new(),
            stats: AssemblyStats::new(),
        };

        if let Some(meta) = metadata {
            state.document.properties = DocumentProperties {
                title: Some(meta.lesson_title.clone()),
                author: meta.author().map(str::to_string),
                subject: Some(meta.subject.clone()),
            };
        }

        let cover = metadata.filter(|m| self.options.include_cover_page && m.has_cover_page());
        if let Some(meta) = cover {
            for p in cover_page(meta, &self.options) {
                state.document.add_paragraph(p);
            }
            state.stats.has_cover_page = true;
        }

        for region in segment(text) {
            match region {
                Segment::Text(lines) => {
                    for line in &lines {
                        state.push_block(classify_line(line));
                    }
                }
                Segment::Table(source) => match source.to_grid() {
                    Some(grid) => state.push_block(Block::Table(grid)),
                    None => {
                        log::debug!("dropping table region of {} separator rows", source.rows.len());
                        state.stats.add_dropped_table();
                    }
                },
            }
        }

        if let Some(meta) = metadata.filter(|_| self.options.include_footer) {
            let (spacer, table) = signature_footer(meta);
            state.document.add_paragraph(spacer);
            state.document.add_table(table);
        }

        let State {
            document, mut stats, ..
        } = state;
        stats.count_text(&document.plain_text());

        log::debug!(
            "assembled {} nodes ({} headings, {} tables, {} math spans)",
            document.node_count(),
            stats.heading_count,
            stats.table_count,
            stats.math_count
        );

        Assembly { document, stats }
    }
}

/// Per-call assembly state.
struct State<'a> {
    options: &'a AssembleOptions,
    document: Document,
    stats: AssemblyStats,
}

impl State<'_> {
    fn push_block(&mut self, block: Block) {
        match block {
            Block::Heading { level, text } => {
                if level == 1 && self.stats.has_cover_page {
                    log::debug!("suppressing level-1 heading under cover page: {:?}", text);
                    self.stats.add_suppressed_heading();
                    return;
                }
                let p = self.heading(level, &text);
                self.stats.add_heading();
                self.document.add_paragraph(p);
            }
            Block::Blockquote { text } => {
                let p = self.blockquote(&text);
                self.stats.add_blockquote();
                self.document.add_paragraph(p);
            }
            Block::ListItem { text } => {
                let p = self.list_item(&text);
                self.stats.add_list_item();
                self.document.add_paragraph(p);
            }
            Block::Paragraph { text } => {
                let p = Paragraph::with_content(self.inline_content(&text)).styled(
                    ParagraphStyle::new()
                        .align(Alignment::Justify)
                        .space_after(200),
                );
                self.stats.add_paragraph();
                self.document.add_paragraph(p);
            }
            Block::Blank => {
                self.stats.add_paragraph();
                self.document.add_paragraph(Paragraph::new());
            }
            Block::Table(grid) => {
                let table = self.table(&grid);
                self.stats.add_table();
                self.document.add_table(table);
            }
        }
    }

    /// Map inline spans to runs and equations.
    fn inline_content(&mut self, text: &str) -> Vec<Inline> {
        parse_inline(text)
            .into_iter()
            .map(|span| match span {
                InlineSpan::Plain(s) => Inline::Text(TextRun::new(s)),
                InlineSpan::Bold(s) => Inline::Text(TextRun::bold(s)),
                InlineSpan::Math(m) => {
                    let node = m.node();
                    self.stats.add_math(node.is_fraction());
                    Inline::Math(node)
                }
            })
            .collect()
    }

    fn heading(&mut self, level: u8, text: &str) -> Paragraph {
        let theme = self.options.theme;
        let (size, color, style) = match level {
            1 => (
                32,
                Some(theme.heading1),
                ParagraphStyle::new()
                    .align(Alignment::Center)
                    .spacing(400, 200),
            ),
            2 => (28, Some(theme.heading2), ParagraphStyle::new().spacing(300, 150)),
            _ => (28, None, ParagraphStyle::new().spacing(200, 100)),
        };

        let mut content = self.inline_content(text);
        for item in &mut content {
            if let Inline::Text(run) = item {
                run.style.bold = true;
                run.style.size = Some(size);
                run.style.color = color.map(str::to_string);
            }
        }
        Paragraph::with_content(content).styled(style.heading(level))
    }

    fn blockquote(&mut self, text: &str) -> Paragraph {
        let theme = self.options.theme;
        let side = BorderLine::single(6, theme.box_border).space(4);
        let borders = ParagraphBorders {
            top: Some(side.clone()),
            left: Some(BorderLine::single(18, theme.accent).space(10)),
            bottom: Some(side.clone()),
            right: Some(side),
        };
        let style = ParagraphStyle::new()
            .borders(borders)
            .shading(theme.quote_fill)
            .spacing(200, 200)
            .indent(Indent::symmetric(720))
            .align(Alignment::Justify);

        Paragraph::with_content(self.inline_content(text)).styled(style)
    }

    fn list_item(&mut self, text: &str) -> Paragraph {
        let mut content = vec![Inline::Text(TextRun::new(self.options.marker_prefix()))];
        content.extend(self.inline_content(text));
        Paragraph::with_content(content).styled(
            ParagraphStyle::new()
                .indent(Indent::hanging(720, 360))
                .space_after(100),
        )
    }

    fn table(&mut self, grid: &TableGrid) -> Table {
        let mut table = Table::new();
        table.add_row(TableRow::header(self.cells(&grid.header)));
        for row in &grid.body {
            table.add_row(TableRow::new(self.cells(row)));
        }
        table
    }

    fn cells(&mut self, row: &[String]) -> Vec<TableCell> {
        let borders = CellBorders::uniform(BorderLine::single(CELL_BORDER_SIZE, CELL_BORDER_COLOR));
        row.iter()
            .map(|cell| {
                TableCell::with_content(self.cell_paragraphs(cell))
                    .valign(VerticalAlignment::Center)
                    .borders(borders.clone())
                    .margins(CELL_MARGIN)
            })
            .collect()
    }

    /// One paragraph per soft-break-separated sub-line.
    fn cell_paragraphs(&mut self, cell: &str) -> Vec<Paragraph> {
        let theme = self.options.theme;
        split_cell_lines(cell)
            .into_iter()
            .map(|line| {
                let style = ParagraphStyle::new().space_after(100);
                match line.kind {
                    CellLineKind::Quote => {
                        self.stats.add_blockquote();
                        Paragraph::with_content(self.inline_content(&line.text)).styled(
                            style
                                .indent(Indent::left(300))
                                .borders(ParagraphBorders::left(
                                    BorderLine::single(12, theme.accent).space(5),
                                ))
                                .shading(theme.cell_quote_fill),
                        )
                    }
                    CellLineKind::ListItem => {
                        self.stats.add_list_item();
                        let mut content =
                            vec![Inline::Text(TextRun::new(self.options.marker_prefix()))];
                        content.extend(self.inline_content(&line.text));
                        Paragraph::with_content(content).styled(style.indent(Indent::hanging(360, 360)))
                    }
                    CellLineKind::Plain => {
                        Paragraph::with_content(self.inline_content(&line.text)).styled(style)
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MathNode, Node};

    fn assemble(text: &str) -> Assembly {
        Assembler::default().assemble(text, None)
    }

    #[test]
    fn test_plain_paragraph_round_trip() {
        let assembly = assemble("A plain sentence.");
        assert_eq!(assembly.document.node_count(), 1);
        let p = assembly.document.paragraphs().next().unwrap();
        assert_eq!(p.runs().count(), 1);
        assert_eq!(p.plain_text(), "A plain sentence.");
        assert_eq!(p.style.alignment, Some(Alignment::Justify));
    }

    #[test]
    fn test_empty_input() {
        let assembly = assemble("");
        assert!(assembly.document.is_empty());
    }

    #[test]
    fn test_heading_styles() {
        let assembly = assemble("# One\n## Two **bold**\n### Three");
        let paragraphs: Vec<_> = assembly.document.paragraphs().collect();
        assert_eq!(paragraphs[0].heading_level(), Some(1));
        assert_eq!(paragraphs[0].style.alignment, Some(Alignment::Center));
        let first = paragraphs[0].runs().next().unwrap();
        assert!(first.style.bold);
        assert_eq!(first.style.size, Some(32));
        assert_eq!(first.style.color.as_deref(), Some("2E75B5"));

        assert!(paragraphs[1].runs().all(|r| r.style.bold));
        assert_eq!(paragraphs[1].plain_text(), "Two bold");
        assert_eq!(paragraphs[2].runs().next().unwrap().style.color, None);
        assert_eq!(assembly.stats.heading_count, 3);
    }

    #[test]
    fn test_list_item_marker() {
        let assembly = assemble("- first item");
        let p = assembly.document.paragraphs().next().unwrap();
        assert_eq!(p.plain_text(), "- first item");
        assert_eq!(p.style.indent, Indent::hanging(720, 360));
        assert_eq!(assembly.stats.list_item_count, 1);
    }

    #[test]
    fn test_blockquote_style() {
        let theme = Theme::by_name("emerald").unwrap();
        let assembly = Assembler::new(AssembleOptions::new().with_theme(theme))
            .assemble("> remember this", None);
        let p = assembly.document.paragraphs().next().unwrap();
        let borders = p.style.borders.as_ref().unwrap();
        assert_eq!(borders.left.as_ref().unwrap().size, 18);
        assert_eq!(borders.left.as_ref().unwrap().color, "10B981");
        assert_eq!(borders.top.as_ref().unwrap().size, 6);
        assert_eq!(p.style.shading.as_deref(), Some("ECFDF5"));
        assert_eq!(p.style.indent, Indent::symmetric(720));
    }

    #[test]
    fn test_math_in_paragraph() {
        let assembly = assemble("Half is $1/2$ and $x + y$.");
        let p = assembly.document.paragraphs().next().unwrap();
        let math: Vec<_> = p
            .content
            .iter()
            .filter_map(|c| match c {
                Inline::Math(node) => Some(node.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(math, vec![MathNode::fraction("1", "2"), MathNode::run("x + y")]);
        assert_eq!(assembly.stats.math_count, 2);
        assert_eq!(assembly.stats.fraction_count, 1);
    }

    #[test]
    fn test_table_cells() {
        let text = "| Step | Notes |\n|---|---|\n| 1 | Intro<br>> key idea<br>- task |";
        let assembly = assemble(text);
        let table = assembly.document.tables().next().unwrap();

        assert_eq!(table.row_count(), 2);
        assert!(table.rows[0].is_header);
        let cell = &table.rows[1].cells[1];
        assert_eq!(cell.content.len(), 3);
        assert_eq!(cell.vertical_alignment, VerticalAlignment::Center);
        assert_eq!(cell.content[1].style.indent.left, Some(300));
        assert_eq!(cell.content[1].style.shading.as_deref(), Some("F0F8FF"));
        assert_eq!(cell.content[2].plain_text(), "- task");
        assert!(cell.content.iter().all(|p| p.style.spacing.after == Some(100)));
    }

    #[test]
    fn test_dropped_table() {
        let assembly = assemble("|---|---|\n");
        assert!(assembly.document.is_empty());
        assert_eq!(assembly.stats.dropped_table_count, 1);
    }

    #[test]
    fn test_cover_suppresses_title_heading() {
        let meta = LessonMetadata::new("Toán", "6A", "3", "Phân số").with_institution("THCS A");
        let assembler = Assembler::new(AssembleOptions::new().with_academic_year(2024));
        let assembly = assembler.assemble("# Phân số\n## I. Mục tiêu", Some(&meta));

        assert!(assembly.stats.has_cover_page);
        assert_eq!(assembly.stats.suppressed_heading_count, 1);
        assert!(assembly
            .document
            .paragraphs()
            .all(|p| p.heading_level() != Some(1)));
        assert!(matches!(assembly.document.nodes.last(), Some(Node::Table(_))));
    }

    #[test]
    fn test_heading_kept_without_institution() {
        let meta = LessonMetadata::new("Toán", "6A", "3", "Phân số");
        let assembly = Assembler::default().assemble("# Phân số", Some(&meta));
        assert!(!assembly.stats.has_cover_page);
        assert_eq!(assembly.document.paragraphs().next().unwrap().heading_level(), Some(1));
    }
}
