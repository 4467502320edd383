//! Glyph width tables for the standard PDF fonts.
//!
//! Widths are in thousandths of an em, indexed by WinAnsi code from 32 to 255.

use crate::encoding::win_ansi_char;
use once_cell::sync::Lazy;

pub const FIRST_CHAR: u8 = 32;
pub const LAST_CHAR: u8 = 255;

/// Printable ASCII (32..=126) advance widths.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const TIMES_ROMAN_ASCII: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

/// Width table plus vertical metrics of a standard font.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardMetrics {
    pub widths: Vec<u16>,
    pub ascent: i16,
    pub descent: i16,
}

fn build(ascii: Option<&[u16; 95]>, fallback: u16, ascent: i16, descent: i16) -> StandardMetrics {
    let widths = (FIRST_CHAR..=LAST_CHAR)
        .map(|code| match (ascii, code) {
            (Some(table), 32..=126) => table[(code - 32) as usize],
            (Some(_), _) => match win_ansi_char(code) {
                Some('\u{2022}') => 350,
                Some('\u{2013}') => 500,
                Some('\u{2014}') => 1000,
                Some(_) => fallback,
                None => 0,
            },
            (None, _) => fallback,
        })
        .collect();
    StandardMetrics {
        widths,
        ascent,
        descent,
    }
}

static HELVETICA: Lazy<StandardMetrics> = Lazy::new(|| build(Some(&HELVETICA_ASCII), 556, 718, -207));
static HELVETICA_BOLD: Lazy<StandardMetrics> =
    Lazy::new(|| build(Some(&HELVETICA_BOLD_ASCII), 556, 718, -207));
static TIMES: Lazy<StandardMetrics> = Lazy::new(|| build(Some(&TIMES_ROMAN_ASCII), 500, 683, -217));
static COURIER: Lazy<StandardMetrics> = Lazy::new(|| build(None, 600, 629, -157));

/// The twelve standard Latin fonts every PDF reader provides.
pub const STANDARD_FONTS: [&str; 12] = [
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-Oblique",
    "Helvetica-BoldOblique",
    "Times-Roman",
    "Times-Bold",
    "Times-Italic",
    "Times-BoldItalic",
    "Courier",
    "Courier-Bold",
    "Courier-Oblique",
    "Courier-BoldOblique",
];

/// Metrics for a standard font name. Oblique and italic faces share the
/// upright widths closely enough for line breaking; Times bold faces use the
/// roman table.
pub fn standard_metrics(name: &str) -> Option<&'static StandardMetrics> {
    match name {
        "Helvetica" | "Helvetica-Oblique" => Some(&HELVETICA),
        "Helvetica-Bold" | "Helvetica-BoldOblique" => Some(&HELVETICA_BOLD),
        "Times-Roman" | "Times-Bold" | "Times-Italic" | "Times-BoldItalic" => Some(&TIMES),
        "Courier" | "Courier-Bold" | "Courier-Oblique" | "Courier-BoldOblique" => Some(&COURIER),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_standard_font_has_metrics() {
        for name in STANDARD_FONTS {
            let metrics = standard_metrics(name).unwrap();
            assert_eq!(metrics.widths.len(), 224);
        }
        assert!(standard_metrics("Lexend").is_none());
    }

    #[test]
    fn test_known_widths() {
        let helv = standard_metrics("Helvetica").unwrap();
        assert_eq!(helv.widths[(b'W' - FIRST_CHAR) as usize], 944);
        assert_eq!(helv.widths[(b'i' - FIRST_CHAR) as usize], 222);
        assert_eq!(helv.widths[(0x95 - FIRST_CHAR) as usize], 350);
        let courier = standard_metrics("Courier-Bold").unwrap();
        assert!(courier.widths.iter().all(|w| *w == 600));
    }
}
