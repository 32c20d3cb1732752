//! Signature footer.

use crate::model::{
    Alignment, CellBorders, LessonMetadata, Paragraph, ParagraphStyle, Table, TableCell,
    TableLayout, TableRow, TextRun,
};

const DATE_LINE: &str = "Ngày ...... tháng ...... năm ......";
const APPROVER: &str = "NGƯỜI DUYỆT";
const PREPARER: &str = "NGƯỜI SOẠN";

/// Gap left above the author name for the signature.
const SIGNATURE_GAP: u32 = 1200;

/// Build the footer: a spacer paragraph and a borderless two-column table
/// with the approver and preparer signature blocks.
pub fn signature_footer(metadata: &LessonMetadata) -> (Paragraph, Table) {
    let spacer = Paragraph::new().styled(ParagraphStyle::new().space_before(400));

    let approver = signature_cell(APPROVER, None);
    let preparer = signature_cell(PREPARER, metadata.author());

    let mut table = Table::new();
    table.layout = TableLayout::Fixed;
    table.add_row(TableRow::new(vec![approver, preparer]));
    (spacer, table)
}

fn signature_cell(role: &str, signer: Option<&str>) -> TableCell {
    let centered = || ParagraphStyle::new().align(Alignment::Center);

    let mut content = vec![
        Paragraph::new().styled(centered()),
        Paragraph::new().styled(centered().space_after(100)),
    ];
    content[0].add_run(TextRun::italic(DATE_LINE));
    content[1].add_run(TextRun::bold(role));

    if let Some(name) = signer {
        let mut p = Paragraph::new().styled(centered().space_before(SIGNATURE_GAP));
        p.add_run(TextRun::bold(name));
        content.push(p);
    }

    TableCell::with_content(content).borders(CellBorders::hidden())
}
