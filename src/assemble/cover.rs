//! Cover page for lesson plans.
//!
//! The cover follows the Vietnamese official document layout: issuing body
//! and national motto on a two-column header line, a centred title block, an
//! info panel and the academic year, then a hard page break.

use super::{AssembleOptions, Theme};
use crate::model::{
    Alignment, BorderLine, Indent, Inline, LessonMetadata, Paragraph, ParagraphBorders,
    ParagraphStyle, TabStop, TextRun,
};

const DEPARTMENT_LINE: &str = "PHÒNG GD&ĐT ....................";
const NATION_LINE: &str = "CỘNG HÒA XÃ HỘI CHỦ NGHĨA VIỆT NAM";
const MOTTO_LINE: &str = "Độc lập - Tự do - Hạnh phúc";
const INSTITUTION_PLACEHOLDER: &str = "TRƯỜNG................";
const PLAN_TITLE: &str = "KẾ HOẠCH BÀI DẠY";

const LONG_PLACEHOLDER: &str = "........................................";
const SHORT_PLACEHOLDER: &str = "....................";

const INFO_INDENT: u32 = 3000;

/// Build the cover page paragraphs.
pub fn cover_page(metadata: &LessonMetadata, options: &AssembleOptions) -> Vec<Paragraph> {
    let mut items = Vec::with_capacity(11);

    items.push(header_line(
        TextRun::bold(DEPARTMENT_LINE),
        TextRun::bold(NATION_LINE),
        9000,
        100,
    ));

    let institution = metadata
        .institution()
        .map(str::to_uppercase)
        .unwrap_or_else(|| INSTITUTION_PLACEHOLDER.to_string());
    items.push(header_line(
        TextRun::bold(institution),
        TextRun::bold(MOTTO_LINE).underlined(),
        9500,
        3000,
    ));

    items.push(title_line(TextRun::bold(PLAN_TITLE).size(40), 400));
    items.push(title_line(
        TextRun::bold(format!("MÔN: {}", metadata.subject.to_uppercase())).size(32),
        200,
    ));
    items.push(title_line(
        TextRun::bold(format!("BÀI: {}", metadata.lesson_title)).size(30),
        1000,
    ));

    let panel = info_panel_borders(&options.theme);
    let rows = [
        ("Giáo viên", metadata.author(), LONG_PLACEHOLDER),
        ("Lớp", non_blank(&metadata.class_label), SHORT_PLACEHOLDER),
        ("Tuần", non_blank(&metadata.week_label), SHORT_PLACEHOLDER),
        ("Ngày dạy", metadata.teaching_date(), SHORT_PLACEHOLDER),
    ];
    for (label, value, placeholder) in rows {
        items.push(info_line(label, value.unwrap_or(placeholder), panel.clone()));
    }

    let year = options.resolve_academic_year();
    items.push(title_line(
        TextRun::italic(format!("Năm học: {} - {}", year, year + 1)),
        0,
    ));

    items.push(Paragraph::page_break().styled(ParagraphStyle::new().space_before(2000)));

    log::debug!("cover page built with {} paragraphs", items.len());
    items
}

fn non_blank(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Left text, then a tab to a right-aligned stop for the right text.
fn header_line(left: TextRun, right: TextRun, tab_position: u32, after: u32) -> Paragraph {
    Paragraph::with_content(vec![Inline::Text(left), Inline::Tab, Inline::Text(right)]).styled(
        ParagraphStyle::new()
            .tab_stop(TabStop::right(tab_position))
            .space_after(after),
    )
}

fn title_line(run: TextRun, after: u32) -> Paragraph {
    Paragraph::with_content(vec![Inline::Text(run)]).styled(
        ParagraphStyle::new()
            .align(Alignment::Center)
            .space_after(after),
    )
}

fn info_line(label: &str, value: &str, borders: ParagraphBorders) -> Paragraph {
    let mut p = Paragraph::new();
    p.add_text(format!("{}: ", label));
    p.add_run(TextRun::bold(value));
    p.styled(
        ParagraphStyle::new()
            .indent(Indent::left(INFO_INDENT))
            .space_after(200)
            .borders(borders),
    )
}

/// Identical borders on consecutive paragraphs join into one box.
fn info_panel_borders(theme: &Theme) -> ParagraphBorders {
    ParagraphBorders::all(BorderLine::single(6, theme.box_border).space(4))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> LessonMetadata {
        LessonMetadata::new("Toán", "6A", "12", "Phân số")
            .with_institution("THCS Lê Lợi")
            .with_author("Nguyễn Văn A")
    }

    #[test]
    fn test_cover_layout() {
        let opts = AssembleOptions::new().with_academic_year(2024);
        let items = cover_page(&metadata(), &opts);

        assert_eq!(items.len(), 11);
        assert!(items[0].plain_text().starts_with(DEPARTMENT_LINE));
        assert!(items[0].plain_text().contains('\t'));
        assert!(items[1].plain_text().starts_with("THCS LÊ LỢI"));
        assert_eq!(items[2].plain_text(), PLAN_TITLE);
        assert_eq!(items[3].plain_text(), "MÔN: TOÁN");
        assert_eq!(items[4].plain_text(), "BÀI: Phân số");
        assert_eq!(items[5].plain_text(), "Giáo viên: Nguyễn Văn A");
        assert_eq!(items[9].plain_text(), "Năm học: 2024 - 2025");
        assert!(items[10].has_page_break());
        assert_eq!(items[10].style.spacing.before, Some(2000));
    }

    #[test]
    fn test_placeholders() {
        let mut meta = metadata();
        meta.author_name = None;
        meta.week_label = String::new();
        let items = cover_page(&meta, &AssembleOptions::new().with_academic_year(2024));

        assert_eq!(items[5].plain_text(), format!("Giáo viên: {}", LONG_PLACEHOLDER));
        assert_eq!(items[7].plain_text(), format!("Tuần: {}", SHORT_PLACEHOLDER));
        assert_eq!(items[8].plain_text(), format!("Ngày dạy: {}", SHORT_PLACEHOLDER));
    }

    #[test]
    fn test_info_panel_bordered() {
        let items = cover_page(&metadata(), &AssembleOptions::new());
        for info in &items[5..9] {
            assert!(info.style.borders.is_some());
            assert_eq!(info.style.indent.left, Some(INFO_INDENT));
        }
    }
}
