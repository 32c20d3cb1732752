//! DOCX (Office Open XML) writer.
//!
//! The document tree is rendered into WordprocessingML parts which are then
//! packed into a zip container. Entries carry a fixed timestamp so that the
//! same document always produces the same bytes.

use std::io::{Cursor, Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::xml::{escape, XML_DECLARATION};
use crate::error::{Error, Result};
use crate::model::{
    Alignment, BorderLine, BorderStyle, CellBorders, CellMargins, Document, Indent, Inline,
    MathNode, Node, Paragraph, ParagraphBorders, ParagraphStyle, Spacing, TabKind, Table,
    TableCell, TableLayout, TableRow, TextRun, VerticalAlignment,
};

/// MIME type of a `.docx` file.
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_M: &str = "http://schemas.openxmlformats.org/officeDocument/2006/math";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Package part names in write order.
pub const PACKAGE_PARTS: [&str; 7] = [
    "[Content_Types].xml",
    "_rels/.rels",
    "docProps/core.xml",
    "docProps/app.xml",
    "word/document.xml",
    "word/styles.xml",
    "word/_rels/document.xml.rels",
];

/// Render a document to `.docx` bytes.
pub fn write_docx(doc: &Document) -> Result<Vec<u8>> {
    let cursor = write_docx_to(doc, Cursor::new(Vec::new()))?;
    Ok(cursor.into_inner())
}

/// Render a document as a `.docx` package into any seekable writer.
pub fn write_docx_to<W: Write + Seek>(doc: &Document, writer: W) -> Result<W> {
    let renderer = DocxRenderer::new(doc);
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    for name in PACKAGE_PARTS {
        let content = renderer.part(name)?;
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())?;
    }

    let writer = zip.finish()?;
    log::debug!("wrote docx package with {} nodes", doc.node_count());
    Ok(writer)
}

/// Render `word/document.xml` alone.
pub fn document_xml(doc: &Document) -> String {
    DocxRenderer::new(doc).document()
}

/// Renders the XML parts of a package.
pub struct DocxRenderer<'a> {
    doc: &'a Document,
}

impl<'a> DocxRenderer<'a> {
    /// Create a renderer for a document.
    pub fn new(doc: &'a Document) -> Self {
        Self { doc }
    }

    /// Render a package part by name.
    pub fn part(&self, name: &str) -> Result<String> {
        let content = match name {
            "[Content_Types].xml" => content_types(),
            "_rels/.rels" => package_rels(),
            "docProps/core.xml" => self.core_properties(),
            "docProps/app.xml" => app_properties(),
            "word/document.xml" => self.document(),
            "word/styles.xml" => self.styles(),
            "word/_rels/document.xml.rels" => document_rels(),
            other => return Err(Error::Render(format!("unknown package part: {}", other))),
        };
        Ok(content)
    }

    /// Render the main document part.
    pub fn document(&self) -> String {
        let mut output = String::with_capacity(4096 + self.doc.node_count() * 512);
        output.push_str(XML_DECLARATION);
        output.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:m="{}" xmlns:r="{}"><w:body>"#,
            NS_W, NS_M, NS_R
        ));

        for node in &self.doc.nodes {
            match node {
                Node::Paragraph(p) => self.render_paragraph(&mut output, p),
                Node::Table(t) => self.render_table(&mut output, t),
            }
        }

        let page = &self.doc.page;
        output.push_str(&format!(
            r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}"/><w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="709" w:footer="709" w:gutter="0"/></w:sectPr>"#,
            page.width,
            page.height,
            page.margin_top,
            page.margin_right,
            page.margin_bottom,
            page.margin_left
        ));
        output.push_str("</w:body></w:document>");
        output
    }

    /// Render the styles part: defaults, `Normal` and three heading styles.
    pub fn styles(&self) -> String {
        let style = &self.doc.default_style;
        let font = escape(&style.font_family);
        let fonts = format!(
            r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:eastAsia="{0}" w:cs="{0}"/>"#,
            font
        );

        let mut output = String::with_capacity(2048);
        output.push_str(XML_DECLARATION);
        output.push_str(&format!(r#"<w:styles xmlns:w="{}">"#, NS_W));
        output.push_str(&format!(
            r#"<w:docDefaults><w:rPrDefault><w:rPr>{}<w:sz w:val="{}"/><w:szCs w:val="{}"/><w:lang w:val="vi-VN"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:line="{}" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults>"#,
            fonts, style.font_size, style.font_size, style.line_spacing
        ));
        output.push_str(&format!(
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="{0}"><w:name w:val="{0}"/><w:qFormat/><w:pPr><w:spacing w:line="{1}" w:lineRule="auto"/></w:pPr><w:rPr>{2}<w:sz w:val="{3}"/><w:szCs w:val="{3}"/></w:rPr></w:style>"#,
            escape(&style.name),
            style.line_spacing,
            fonts,
            style.font_size
        ));
        for level in 1..=3u8 {
            output.push_str(&format!(
                r#"<w:style w:type="paragraph" w:styleId="Heading{0}"><w:name w:val="heading {0}"/><w:basedOn w:val="{1}"/><w:next w:val="{1}"/><w:qFormat/><w:pPr><w:keepNext/><w:outlineLvl w:val="{2}"/></w:pPr><w:rPr><w:b/></w:rPr></w:style>"#,
                level,
                escape(&style.name),
                level - 1
            ));
        }
        output.push_str("</w:styles>");
        output
    }

    fn core_properties(&self) -> String {
        let props = &self.doc.properties;
        let mut output = String::with_capacity(512);
        output.push_str(XML_DECLARATION);
        output.push_str(
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
        );
        if let Some(title) = &props.title {
            output.push_str(&format!("<dc:title>{}</dc:title>", escape(title)));
        }
        if let Some(subject) = &props.subject {
            output.push_str(&format!("<dc:subject>{}</dc:subject>", escape(subject)));
        }
        if let Some(author) = &props.author {
            output.push_str(&format!("<dc:creator>{}</dc:creator>", escape(author)));
        }
        output.push_str("</cp:coreProperties>");
        output
    }

    fn render_paragraph(&self, output: &mut String, p: &Paragraph) {
        output.push_str("<w:p>");
        render_paragraph_properties(output, &p.style);
        for item in &p.content {
            match item {
                Inline::Text(run) => render_run(output, run),
                Inline::Math(node) => render_math(output, node),
                Inline::Tab => output.push_str("<w:r><w:tab/></w:r>"),
                Inline::PageBreak => output.push_str(r#"<w:r><w:br w:type="page"/></w:r>"#),
            }
        }
        output.push_str("</w:p>");
    }

    fn render_table(&self, output: &mut String, table: &Table) {
        let columns = table.column_count().max(1);
        let column_width = self.doc.page.text_width() / columns as u32;

        output.push_str("<w:tbl><w:tblPr>");
        output.push_str(&format!(
            r#"<w:tblW w:w="{}" w:type="pct"/>"#,
            table.width_percent * 50
        ));
        let layout = match table.layout {
            TableLayout::AutoFit => "autofit",
            TableLayout::Fixed => "fixed",
        };
        output.push_str(&format!(r#"<w:tblLayout w:type="{}"/>"#, layout));
        output.push_str("</w:tblPr><w:tblGrid>");
        for _ in 0..columns {
            output.push_str(&format!(r#"<w:gridCol w:w="{}"/>"#, column_width));
        }
        output.push_str("</w:tblGrid>");

        for row in &table.rows {
            self.render_row(output, row, table.layout, column_width);
        }
        output.push_str("</w:tbl>");
    }

    fn render_row(&self, output: &mut String, row: &TableRow, layout: TableLayout, width: u32) {
        output.push_str("<w:tr>");
        if row.is_header {
            output.push_str("<w:trPr><w:tblHeader/></w:trPr>");
        }
        if row.cells.is_empty() {
            // A row must hold at least one cell.
            self.render_cell(output, &TableCell::with_content(Vec::new()), layout, width);
        }
        for cell in &row.cells {
            self.render_cell(output, cell, layout, width);
        }
        output.push_str("</w:tr>");
    }

    fn render_cell(&self, output: &mut String, cell: &TableCell, layout: TableLayout, width: u32) {
        output.push_str("<w:tc><w:tcPr>");
        match layout {
            TableLayout::AutoFit => output.push_str(r#"<w:tcW w:w="0" w:type="auto"/>"#),
            TableLayout::Fixed => {
                output.push_str(&format!(r#"<w:tcW w:w="{}" w:type="dxa"/>"#, width))
            }
        }
        render_cell_borders(output, &cell.borders);
        render_cell_margins(output, &cell.margins);
        let valign = match cell.vertical_alignment {
            VerticalAlignment::Top => "top",
            VerticalAlignment::Center => "center",
            VerticalAlignment::Bottom => "bottom",
        };
        output.push_str(&format!(r#"<w:vAlign w:val="{}"/>"#, valign));
        output.push_str("</w:tcPr>");

        if cell.content.is_empty() {
            output.push_str("<w:p/>");
        }
        for p in &cell.content {
            self.render_paragraph(output, p);
        }
        output.push_str("</w:tc>");
    }
}

fn render_paragraph_properties(output: &mut String, style: &ParagraphStyle) {
    let mut props = String::new();

    if let Some(level) = style.heading_level {
        props.push_str(&format!(r#"<w:pStyle w:val="Heading{}"/>"#, level));
    }
    if let Some(borders) = &style.borders {
        render_paragraph_borders(&mut props, borders);
    }
    if let Some(fill) = &style.shading {
        props.push_str(&shading(fill));
    }
    if !style.tab_stops.is_empty() {
        props.push_str("<w:tabs>");
        for stop in &style.tab_stops {
            let kind = match stop.kind {
                TabKind::Left => "left",
                TabKind::Center => "center",
                TabKind::Right => "right",
            };
            props.push_str(&format!(
                r#"<w:tab w:val="{}" w:pos="{}"/>"#,
                kind, stop.position
            ));
        }
        props.push_str("</w:tabs>");
    }
    if !style.spacing.is_empty() {
        props.push_str(&spacing(&style.spacing));
    }
    if !style.indent.is_empty() {
        props.push_str(&indent(&style.indent));
    }
    if let Some(alignment) = style.alignment {
        let jc = match alignment {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        };
        props.push_str(&format!(r#"<w:jc w:val="{}"/>"#, jc));
    }

    if !props.is_empty() {
        output.push_str("<w:pPr>");
        output.push_str(&props);
        output.push_str("</w:pPr>");
    }
}

fn render_paragraph_borders(output: &mut String, borders: &ParagraphBorders) {
    output.push_str("<w:pBdr>");
    let sides = [
        ("top", &borders.top),
        ("left", &borders.left),
        ("bottom", &borders.bottom),
        ("right", &borders.right),
    ];
    for (side, line) in sides {
        if let Some(line) = line {
            output.push_str(&border(side, line));
        }
    }
    output.push_str("</w:pBdr>");
}

fn render_cell_borders(output: &mut String, borders: &CellBorders) {
    if borders.is_empty() {
        return;
    }
    output.push_str("<w:tcBorders>");
    let sides = [
        ("top", &borders.top),
        ("left", &borders.left),
        ("bottom", &borders.bottom),
        ("right", &borders.right),
    ];
    for (side, line) in sides {
        if let Some(line) = line {
            output.push_str(&border(side, line));
        }
    }
    output.push_str("</w:tcBorders>");
}

fn render_cell_margins(output: &mut String, margins: &CellMargins) {
    if margins.is_empty() {
        return;
    }
    output.push_str("<w:tcMar>");
    let sides = [
        ("top", margins.top),
        ("left", margins.left),
        ("bottom", margins.bottom),
        ("right", margins.right),
    ];
    for (side, value) in sides {
        if let Some(value) = value {
            output.push_str(&format!(r#"<w:{} w:w="{}" w:type="dxa"/>"#, side, value));
        }
    }
    output.push_str("</w:tcMar>");
}

fn border(side: &str, line: &BorderLine) -> String {
    match line.style {
        BorderStyle::Single => format!(
            r#"<w:{} w:val="single" w:sz="{}" w:space="{}" w:color="{}"/>"#,
            side,
            line.size,
            line.space,
            escape(&line.color)
        ),
        BorderStyle::None => format!(r#"<w:{} w:val="nil"/>"#, side),
    }
}

fn shading(fill: &str) -> String {
    format!(
        r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#,
        escape(fill)
    )
}

fn spacing(spacing: &Spacing) -> String {
    let mut attrs = String::new();
    if let Some(before) = spacing.before {
        attrs.push_str(&format!(r#" w:before="{}""#, before));
    }
    if let Some(after) = spacing.after {
        attrs.push_str(&format!(r#" w:after="{}""#, after));
    }
    format!("<w:spacing{}/>", attrs)
}

fn indent(indent: &Indent) -> String {
    let mut attrs = String::new();
    if let Some(left) = indent.left {
        attrs.push_str(&format!(r#" w:left="{}""#, left));
    }
    if let Some(right) = indent.right {
        attrs.push_str(&format!(r#" w:right="{}""#, right));
    }
    if let Some(hanging) = indent.hanging {
        attrs.push_str(&format!(r#" w:hanging="{}""#, hanging));
    }
    format!("<w:ind{}/>", attrs)
}

fn render_run(output: &mut String, run: &TextRun) {
    if run.is_empty() {
        return;
    }

    output.push_str("<w:r>");
    let style = &run.style;
    if style.has_styling() {
        output.push_str("<w:rPr>");
        if style.bold {
            output.push_str("<w:b/>");
        }
        if style.italic {
            output.push_str("<w:i/>");
        }
        if let Some(color) = &style.color {
            output.push_str(&format!(r#"<w:color w:val="{}"/>"#, escape(color)));
        }
        if let Some(size) = style.size {
            output.push_str(&format!(
                r#"<w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#,
                size
            ));
        }
        if style.underline {
            output.push_str(r#"<w:u w:val="single"/>"#);
        }
        output.push_str("</w:rPr>");
    }

    // Tabs inside run text become tab elements.
    for (i, piece) in run.text.split('\t').enumerate() {
        if i > 0 {
            output.push_str("<w:tab/>");
        }
        if !piece.is_empty() {
            output.push_str(&format!(
                r#"<w:t xml:space="preserve">{}</w:t>"#,
                escape(piece)
            ));
        }
    }
    output.push_str("</w:r>");
}

fn render_math(output: &mut String, node: &MathNode) {
    output.push_str("<m:oMath>");
    match node {
        MathNode::Fraction {
            numerator,
            denominator,
        } => {
            output.push_str("<m:f><m:num>");
            output.push_str(&math_run(numerator));
            output.push_str("</m:num><m:den>");
            output.push_str(&math_run(denominator));
            output.push_str("</m:den></m:f>");
        }
        MathNode::Run { text } => output.push_str(&math_run(text)),
    }
    output.push_str("</m:oMath>");
}

fn math_run(text: &str) -> String {
    format!(
        r#"<m:r><m:t xml:space="preserve">{}</m:t></m:r>"#,
        escape(text)
    )
}

fn content_types() -> String {
    let mut output = String::from(XML_DECLARATION);
    output.push_str(concat!(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
        r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
        r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
        r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#,
        "</Types>"
    ));
    output
}

fn package_rels() -> String {
    let mut output = String::from(XML_DECLARATION);
    output.push_str(&format!(r#"<Relationships xmlns="{}">"#, NS_PKG_REL));
    output.push_str(concat!(
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
        r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
        r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>"#,
        "</Relationships>"
    ));
    output
}

fn document_rels() -> String {
    let mut output = String::from(XML_DECLARATION);
    output.push_str(&format!(r#"<Relationships xmlns="{}">"#, NS_PKG_REL));
    output.push_str(
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
    );
    output.push_str("</Relationships>");
    output
}

fn app_properties() -> String {
    let mut output = String::from(XML_DECLARATION);
    output.push_str(&format!(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>mdocx {}</Application></Properties>"#,
        env!("CARGO_PKG_VERSION")
    ));
    output
}
