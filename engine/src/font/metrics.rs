//! Advance widths for the standard Times faces.
//!
//! Values are the Adobe AFM widths in 1000 units/em for printable ASCII
//! (0x20..=0x7E), indexed by `code - 0x20`. Characters outside that range
//! that WinAnsi can still encode get an explicit entry in `extra_width`.
//! Characters WinAnsi cannot encode are written as `?`, so they are
//! measured as `?` too.

/// Width table for one standard font.
pub struct StandardFontMetrics {
    ascii: &'static [u16; 95],
    /// Used for encodable characters the tables don't cover.
    default_width: u16,
    bold: bool,
}

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    // 0-9
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    // : ; < = > ? @
    278, 278, 564, 564, 564, 444, 921,
    // A-Z
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
    // [ \ ] ^ _ `
    333, 278, 333, 469, 500, 333,
    // a-z
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
    // { | } ~
    480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    333, 333, 570, 570, 570, 500, 930,
    722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
    722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
    333, 278, 333, 581, 500, 333,
    500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
    556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
    394, 220, 394, 520,
];

pub static TIMES_ROMAN_METRICS: StandardFontMetrics = StandardFontMetrics {
    ascii: &TIMES_ROMAN,
    default_width: 500,
    bold: false,
};

pub static TIMES_BOLD_METRICS: StandardFontMetrics = StandardFontMetrics {
    ascii: &TIMES_BOLD,
    default_width: 500,
    bold: true,
};

impl StandardFontMetrics {
    /// Advance width of `ch` in 1000 units/em.
    pub fn units(&self, ch: char) -> u16 {
        let ch = if super::winansi_byte(ch).is_some() { ch } else { '?' };
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) {
            return self.ascii[(cp - 0x20) as usize];
        }
        self.extra_width(ch).unwrap_or(self.default_width)
    }

    fn extra_width(&self, ch: char) -> Option<u16> {
        let w = match ch {
            '\u{00A0}' => 250,
            '\u{2022}' => 350,
            '\u{2013}' => 500,
            '\u{2014}' => 1000,
            '\u{2018}' | '\u{2019}' => 333,
            '\u{201C}' | '\u{201D}' => {
                if self.bold {
                    500
                } else {
                    444
                }
            }
            '\u{2026}' => 1000,
            '\u{00B7}' => 250,
            _ => return None,
        };
        Some(w)
    }

    /// Width of a single character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        self.units(ch) as f64 / 1000.0 * font_size
    }

    /// Width of a string in points.
    pub fn measure_string(&self, text: &str, font_size: f64) -> f64 {
        let units: u32 = text.chars().map(|c| self.units(c) as u32).sum();
        units as f64 / 1000.0 * font_size
    }
}
