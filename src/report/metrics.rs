//! Helvetica advance widths for text measurement and wrapping.
//!
//! Widths are the standard base-14 AFM values in 1/1000 em for printable
//! ASCII. Other Latin-1 characters use `FALLBACK_WIDTH`. Characters outside
//! Latin-1 cannot be drawn with the WinAnsi-encoded base font and are
//! replaced by `?` before measuring and encoding.

pub const MM_PER_PT: f64 = 25.4 / 72.0;
pub const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,                               // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015,                                              // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,                 // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,                 // 'N'..'Z'
    278, 278, 278, 469, 556, 333,                                                    // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,                 // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,                 // 'n'..'z'
    334, 260, 334, 584,                                                              // '{'..'~'
];

/// Maps a character onto the single-byte encoding used in content streams.
pub fn encode_char(c: char) -> u8 {
    match c as u32 {
        code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
        _ => b'?',
    }
}

pub fn char_width(c: char) -> u16 {
    match encode_char(c) {
        byte @ 0x20..=0x7E => ASCII_WIDTHS[(byte - 0x20) as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// Rendered width of `text` at `size_pt`, in millimetres.
pub fn text_width_mm(text: &str, size_pt: f64) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c))).sum();
    f64::from(units) / 1000.0 * size_pt * MM_PER_PT
}
