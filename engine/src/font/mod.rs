//! # Font Management
//!
//! Reports are set in a single serif typeface in two weights. We use the
//! standard PDF Times faces, which every viewer ships, so nothing has to be
//! embedded. Measurement uses the AFM advance widths in [`metrics`].

pub mod metrics;

pub use metrics::StandardFontMetrics;

/// Points per millimetre. Layout works in millimetres, fonts in points.
pub const PT_PER_MM: f64 = 72.0 / 25.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// The standard PDF fonts the engine draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    TimesRoman,
    TimesBold,
}

impl StandardFont {
    pub fn for_weight(weight: FontWeight) -> Self {
        match weight {
            FontWeight::Normal => StandardFont::TimesRoman,
            FontWeight::Bold => StandardFont::TimesBold,
        }
    }

    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::TimesRoman => "Times-Roman",
            Self::TimesBold => "Times-Bold",
        }
    }

    pub fn metrics(&self) -> &'static StandardFontMetrics {
        match self {
            Self::TimesRoman => &metrics::TIMES_ROMAN_METRICS,
            Self::TimesBold => &metrics::TIMES_BOLD_METRICS,
        }
    }
}

/// Map a Unicode codepoint to a WinAnsiEncoding byte value.
///
/// WinAnsiEncoding is based on Windows-1252. Most codepoints in
/// 0x20..=0x7E and 0xA0..=0xFF map directly. The 0x80..=0x9F range
/// holds smart quotes, bullets and dashes.
pub fn winansi_byte(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    match cp {
        0x20AC => Some(0x80), // Euro sign
        0x201A => Some(0x82), // Single low-9 quotation mark
        0x0192 => Some(0x83), // Latin small letter f with hook
        0x201E => Some(0x84), // Double low-9 quotation mark
        0x2026 => Some(0x85), // Horizontal ellipsis
        0x2020 => Some(0x86), // Dagger
        0x2021 => Some(0x87), // Double dagger
        0x02C6 => Some(0x88), // Modifier letter circumflex accent
        0x2030 => Some(0x89), // Per mille sign
        0x0160 => Some(0x8A), // Latin capital letter S with caron
        0x2039 => Some(0x8B), // Single left-pointing angle quotation
        0x0152 => Some(0x8C), // Latin capital ligature OE
        0x017D => Some(0x8E), // Latin capital letter Z with caron
        0x2018 => Some(0x91), // Left single quotation mark
        0x2019 => Some(0x92), // Right single quotation mark
        0x201C => Some(0x93), // Left double quotation mark
        0x201D => Some(0x94), // Right double quotation mark
        0x2022 => Some(0x95), // Bullet
        0x2013 => Some(0x96), // En dash
        0x2014 => Some(0x97), // Em dash
        0x02DC => Some(0x98), // Small tilde
        0x2122 => Some(0x99), // Trade mark sign
        0x0161 => Some(0x9A), // Latin small letter s with caron
        0x203A => Some(0x9B), // Single right-pointing angle quotation
        0x0153 => Some(0x9C), // Latin small ligature oe
        0x017E => Some(0x9E), // Latin small letter z with caron
        0x0178 => Some(0x9F), // Latin capital letter Y with diaeresis
        _ => None,
    }
}

/// A font selection: weight plus size in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub weight: FontWeight,
    pub size: f64,
}

impl Font {
    pub fn normal(size: f64) -> Self {
        Self {
            weight: FontWeight::Normal,
            size,
        }
    }

    pub fn bold(size: f64) -> Self {
        Self {
            weight: FontWeight::Bold,
            size,
        }
    }

    pub fn standard(&self) -> StandardFont {
        StandardFont::for_weight(self.weight)
    }
}

/// Shared font context used by layout and PDF serialization.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontContext;

impl FontContext {
    pub fn new() -> Self {
        Self
    }

    /// Width of a string in points.
    pub fn measure_pt(&self, text: &str, font: Font) -> f64 {
        font.standard().metrics().measure_string(text, font.size)
    }

    /// Width of a string in millimetres.
    pub fn measure(&self, text: &str, font: Font) -> f64 {
        self.measure_pt(text, font) / PT_PER_MM
    }

    /// Width of a single character in millimetres.
    pub fn char_width(&self, ch: char, font: Font) -> f64 {
        font.standard().metrics().char_width(ch, font.size) / PT_PER_MM
    }
}
