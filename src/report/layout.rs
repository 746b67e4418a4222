use crate::model::ReportDetail;
use crate::report::metrics::{MM_PER_PT, text_width_mm};
use crate::report::{format_percent, format_timestamp};

pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;
pub const MARGIN_X_MM: f64 = 20.0;
pub const TEXT_WIDTH_MM: f64 = 170.0;
pub const TOP_Y_MM: f64 = 20.0;
pub const DISCLAIMER_Y_MM: f64 = 280.0;
/// Last baseline a body line may use before continuing on the next page.
pub const BODY_LIMIT_MM: f64 = 270.0;
pub const BODY_PITCH_MM: f64 = 5.0;
pub const LINE_HEIGHT_FACTOR: f64 = 1.15;

pub const TITLE: &str = "BioStrata Analysis Report";
pub const RESEARCH_NOTICE: &str = "This system is intended for research and clinical decision support only. It does not provide diagnoses or treatment recommendations.";

pub const TITLE_PT: f64 = 22.0;
pub const META_PT: f64 = 10.0;
pub const HEADING_PT: f64 = 14.0;
pub const CATEGORY_PT: f64 = 12.0;
pub const BODY_PT: f64 = 10.0;
pub const DISCLAIMER_PT: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn grey(level: u8) -> Self {
        Rgb(level, level, level)
    }
}

pub const EMERALD: Rgb = Rgb(16, 185, 129);
pub const META_GREY: Rgb = Rgb::grey(100);
pub const DISCLAIMER_GREY: Rgb = Rgb::grey(150);
pub const BLACK: Rgb = Rgb::grey(0);

/// One run of text, positioned by its baseline in millimetres from the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub page: usize,
    pub x_mm: f64,
    pub y_mm: f64,
    pub size_pt: f64,
    pub color: Rgb,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_count: usize,
    pub lines: Vec<TextLine>,
}

impl PageLayout {
    pub fn page(&self, index: usize) -> impl Iterator<Item = &TextLine> {
        self.lines.iter().filter(move |line| line.page == index)
    }

    pub fn find(&self, prefix: &str) -> Option<&TextLine> {
        self.lines.iter().find(|line| line.text.starts_with(prefix))
    }
}

struct Cursor {
    page: usize,
    y: f64,
    size: f64,
    color: Rgb,
    lines: Vec<TextLine>,
}

impl Cursor {
    fn style(&mut self, size: f64, color: Rgb) {
        self.size = size;
        self.color = color;
    }

    fn put(&mut self, y: f64, text: impl Into<String>) {
        self.lines.push(TextLine {
            page: self.page,
            x_mm: MARGIN_X_MM,
            y_mm: y,
            size_pt: self.size,
            color: self.color,
            text: text.into(),
        });
    }

    fn line(&mut self, text: impl Into<String>) {
        let y = self.y;
        self.put(y, text);
    }
}

/// Positions every block of the exported report.
pub fn layout_report(detail: &ReportDetail) -> PageLayout {
    let mut cur = Cursor {
        page: 0,
        y: TOP_Y_MM,
        size: TITLE_PT,
        color: EMERALD,
        lines: Vec::new(),
    };

    cur.line(TITLE);
    cur.y += 15.0;

    cur.style(META_PT, META_GREY);
    cur.line(format!("Analysis ID: {}", detail.analysis_id));
    cur.y += 6.0;
    cur.line(format!("Date: {}", format_timestamp(&detail.timestamp)));
    cur.y += 6.0;
    if let Some(patient) = non_blank(detail.patient_id.as_deref()) {
        cur.line(format!("Patient ID: {patient}"));
        cur.y += 6.0;
    }
    cur.y += 10.0;

    cur.style(HEADING_PT, BLACK);
    cur.line("Risk Assessment");
    cur.y += 10.0;
    cur.style(CATEGORY_PT, BLACK);
    cur.line(format!("Category: {} Risk", detail.risk_category));
    if let Some(score) = detail.risk_score {
        cur.y += 6.0;
        cur.line(format!("Probability Score: {}", format_percent(score)));
    }
    cur.y += 15.0;

    if let Some(explanation) = non_blank(detail.explanation.as_deref()) {
        cur.style(HEADING_PT, BLACK);
        cur.line("Clinical Interpretation");
        cur.y += 10.0;
        cur.style(BODY_PT, BLACK);
        for text in wrap_text(explanation, BODY_PT, TEXT_WIDTH_MM) {
            if cur.y > BODY_LIMIT_MM {
                cur.page += 1;
                cur.y = TOP_Y_MM;
            }
            cur.line(text);
            cur.y += BODY_PITCH_MM;
        }
    }
    let page_count = cur.page + 1;

    let notice = non_blank(detail.disclaimer.as_deref()).unwrap_or(RESEARCH_NOTICE);
    cur.page = 0;
    cur.style(DISCLAIMER_PT, DISCLAIMER_GREY);
    let pitch = DISCLAIMER_PT * LINE_HEIGHT_FACTOR * MM_PER_PT;
    for (i, text) in wrap_text(&format!("DISCLAIMER: {notice}"), DISCLAIMER_PT, TEXT_WIDTH_MM)
        .into_iter()
        .enumerate()
    {
        cur.put(DISCLAIMER_Y_MM + i as f64 * pitch, text);
    }

    PageLayout {
        page_count,
        lines: cur.lines,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Greedy word wrap. Explicit newlines start a new line; a word wider than
/// the box is broken between characters.
pub fn wrap_text(text: &str, size_pt: f64, max_width_mm: f64) -> Vec<String> {
    let fits = |candidate: &str| text_width_mm(candidate, size_pt) <= max_width_mm;
    let mut out = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if fits(&candidate) {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            for c in word.chars() {
                current.push(c);
                if !fits(&current) && current.chars().count() > 1 {
                    current.pop();
                    out.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }
        out.push(current);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/layout.rs"]
mod tests;
