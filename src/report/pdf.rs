//! Minimal PDF 1.4 writer for exported reports.
//!
//! The output carries no creation date, document id or other varying data,
//! so the same record always renders to the same bytes. Text uses the
//! built-in Helvetica with WinAnsi encoding; page content streams are
//! zlib-compressed at a fixed level.

use std::io::{self, Write};

use flate2::Compression;
use flate2::write::ZlibEncoder;

use crate::model::ReportDetail;
use crate::report::layout::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM, PageLayout, TextLine, layout_report};
use crate::report::metrics::{MM_PER_PT, encode_char};

pub const COMPRESSION_LEVEL: u32 = 6;

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_ID: usize = 3;
const INFO_ID: usize = 4;
const FIRST_PAGE_ID: usize = 5;

pub fn mm_to_pt(mm: f64) -> f64 {
    mm / MM_PER_PT
}

/// Converts a top-down millimetre offset into a bottom-up PDF coordinate.
pub fn to_pdf_y(y_mm: f64) -> f64 {
    mm_to_pt(PAGE_HEIGHT_MM - y_mm)
}

pub fn render_report(detail: &ReportDetail) -> io::Result<Vec<u8>> {
    render_layout(&layout_report(detail))
}

pub fn render_layout(layout: &PageLayout) -> io::Result<Vec<u8>> {
    let mut doc = PdfWriter::new();
    let page_ids: Vec<usize> = (0..layout.page_count)
        .map(|i| FIRST_PAGE_ID + 2 * i)
        .collect();

    doc.object(CATALOG_ID, &format!("<< /Type /Catalog /Pages {PAGES_ID} 0 R >>"));
    let kids: Vec<String> = page_ids.iter().map(|id| format!("{id} 0 R")).collect();
    doc.object(
        PAGES_ID,
        &format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_ids.len()
        ),
    );
    doc.object(
        FONT_ID,
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    );
    doc.object(
        INFO_ID,
        "<< /Title (BioStrata Analysis Report) /Producer (biostrata) >>",
    );

    for (index, page_id) in page_ids.iter().copied().enumerate() {
        let content_id = page_id + 1;
        doc.object(
            page_id,
            &format!(
                "<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 {FONT_ID} 0 R >> >> /Contents {content_id} 0 R >>",
                num(mm_to_pt(PAGE_WIDTH_MM)),
                num(mm_to_pt(PAGE_HEIGHT_MM)),
            ),
        );
        let content = page_content(layout.page(index));
        doc.stream(content_id, &compress(&content)?);
    }

    Ok(doc.finish(INFO_ID))
}

fn page_content<'a>(lines: impl Iterator<Item = &'a TextLine>) -> Vec<u8> {
    let mut out = Vec::new();
    for line in lines {
        let color = line.color;
        out.extend_from_slice(
            format!(
                "BT /F1 {} Tf {} {} {} rg {} {} Td (",
                num(line.size_pt),
                channel(color.0),
                channel(color.1),
                channel(color.2),
                num(mm_to_pt(line.x_mm)),
                num(to_pdf_y(line.y_mm)),
            )
            .as_bytes(),
        );
        out.extend_from_slice(&escape_text(&line.text));
        out.extend_from_slice(b") Tj ET\n");
    }
    out
}

/// Encodes `text` for a literal string: delimiters are escaped and bytes
/// outside printable ASCII are written as octal escapes.
pub fn escape_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match encode_char(c) {
            byte @ (b'(' | b')' | b'\\') => {
                out.push(b'\\');
                out.push(byte);
            }
            byte @ 0x20..=0x7E => out.push(byte),
            byte => out.extend_from_slice(format!("\\{byte:03o}").as_bytes()),
        }
    }
    out
}

fn compress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(COMPRESSION_LEVEL));
    encoder.write_all(data)?;
    encoder.finish()
}

fn num(v: f64) -> String {
    format!("{v:.2}")
}

fn channel(v: u8) -> String {
    format!("{:.3}", f64::from(v) / 255.0)
}

struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    fn begin(&mut self, id: usize) {
        self.offsets.push((id, self.buf.len()));
        self.buf.extend_from_slice(format!("{id} 0 obj\n").as_bytes());
    }

    fn object(&mut self, id: usize, body: &str) {
        self.begin(id);
        self.buf.extend_from_slice(body.as_bytes());
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn stream(&mut self, id: usize, data: &[u8]) {
        self.begin(id);
        self.buf.extend_from_slice(
            format!("<< /Length {} /Filter /FlateDecode >>\nstream\n", data.len()).as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn finish(mut self, info_id: usize) -> Vec<u8> {
        self.offsets.sort_unstable();
        let size = self.offsets.len() + 1;
        let xref_at = self.buf.len();
        let mut table = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for (_, offset) in &self.offsets {
            table.push_str(&format!("{offset:010} 00000 n \n"));
        }
        table.push_str(&format!(
            "trailer\n<< /Size {size} /Root {CATALOG_ID} 0 R /Info {info_id} 0 R >>\nstartxref\n{xref_at}\n%%EOF\n"
        ));
        self.buf.extend_from_slice(table.as_bytes());
        self.buf
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/pdf.rs"]
mod tests;
