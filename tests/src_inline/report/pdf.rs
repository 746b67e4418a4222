use super::*;
use flate2::read::ZlibDecoder;
use std::io::Read;

fn detail() -> ReportDetail {
    ReportDetail {
        analysis_id: "a1".to_string(),
        patient_id: Some("PT-1".to_string()),
        timestamp: "2025-01-02T10:00:00".to_string(),
        risk_category: "High".to_string(),
        risk_score: Some(0.82),
        explanation: Some("Hypoxia (HIF1A) and glycolysis markers are elevated.".to_string()),
        disclaimer: None,
    }
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

/// Decompressed content streams, in file order.
fn page_streams(bytes: &[u8]) -> Vec<String> {
    let mut streams = Vec::new();
    let mut at = 0;
    while let Some(start) = find(bytes, b">>\nstream\n", at) {
        let data_start = start + b">>\nstream\n".len();
        let data_end = find(bytes, b"\nendstream", data_start).unwrap();
        let mut text = String::new();
        ZlibDecoder::new(&bytes[data_start..data_end])
            .read_to_string(&mut text)
            .unwrap();
        streams.push(text);
        at = data_end;
    }
    streams
}

#[test]
fn same_record_renders_identical_bytes() {
    let first = render_report(&detail()).unwrap();
    let second = render_report(&detail()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn different_records_render_different_bytes() {
    let mut other = detail();
    other.risk_category = "Low".to_string();
    assert_ne!(render_report(&detail()).unwrap(), render_report(&other).unwrap());
}

#[test]
fn document_structure_is_well_formed() {
    let bytes = render_report(&detail()).unwrap();
    let text = String::from_utf8_lossy(&bytes);

    assert!(bytes.starts_with(b"%PDF-1.4\n"));
    assert!(text.contains("/BaseFont /Helvetica"));
    assert!(text.contains("/MediaBox [0 0 595.28 841.89]"));
    assert!(text.contains("/Count 1"));
    assert!(!text.contains("/CreationDate"));
    assert!(!text.contains("/ID"));

    let xref_at = find(&bytes, b"xref\n", 0).unwrap();
    assert!(text.contains(&format!("startxref\n{xref_at}\n%%EOF")));
    let catalog_at = find(&bytes, b"1 0 obj\n", 0).unwrap();
    assert!(text.contains(&format!("{catalog_at:010} 00000 n \n")));
}

#[test]
fn content_carries_every_block() {
    let bytes = render_report(&detail()).unwrap();
    let streams = page_streams(&bytes);

    assert_eq!(streams.len(), 1);
    let page = &streams[0];
    assert!(page.contains("(BioStrata Analysis Report) Tj"));
    assert!(page.contains("(Analysis ID: a1) Tj"));
    assert!(page.contains("(Date: 2025-01-02 10:00:00) Tj"));
    assert!(page.contains("(Category: High Risk) Tj"));
    assert!(page.contains("(Probability Score: 82.0%) Tj"));
    assert!(page.contains("Hypoxia \\(HIF1A\\) and"));
    assert!(page.contains("0.063 0.725 0.506 rg"));
}

#[test]
fn disclaimer_sits_at_the_bottom_of_the_first_page() {
    let mut record = detail();
    record.explanation = Some("word ".repeat(2000));
    let bytes = render_report(&record).unwrap();
    let streams = page_streams(&bytes);

    assert!(streams.len() >= 2);
    let anchor = format!(
        "{:.2} {:.2} Td (DISCLAIMER: ",
        mm_to_pt(20.0),
        to_pdf_y(280.0)
    );
    assert!(streams[0].contains(&anchor), "{anchor}");
    assert!(streams.iter().skip(1).all(|s| !s.contains("DISCLAIMER")));
}

#[test]
fn coordinates_convert_from_top_down_millimetres() {
    assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-9);
    assert!((to_pdf_y(0.0) - 841.889_763_779_527_6).abs() < 1e-6);
    assert!((to_pdf_y(280.0) - 48.189).abs() < 1e-3);
}

#[test]
fn text_escaping() {
    assert_eq!(escape_text("a(b)c\\"), b"a\\(b\\)c\\\\".to_vec());
    assert_eq!(escape_text("é"), b"\\351".to_vec());
    assert_eq!(escape_text("€"), b"?".to_vec());
}
