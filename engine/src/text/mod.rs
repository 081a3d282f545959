//! # Text Layout
//!
//! Line breaking and text measurement.
//!
//! Breaking is greedy and happens only at whitespace; there is no
//! hyphenation. A word that is wider than the whole line on its own is split
//! between characters, so every returned line fits the requested width.
//! Explicit newlines always break.

use crate::font::{Font, FontContext};

/// A line of text after line-breaking.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokenLine {
    pub text: String,
    /// Width of the line in millimetres.
    pub width: f64,
}

impl BrokenLine {
    fn empty() -> Self {
        Self {
            text: String::new(),
            width: 0.0,
        }
    }
}

/// Wrapped text plus the vertical space it needs.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredBlock {
    pub lines: Vec<BrokenLine>,
    pub line_height: f64,
}

impl MeasuredBlock {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// `line_count * line_height`. Never zero: empty text still has one line.
    pub fn height(&self) -> f64 {
        self.lines.len() as f64 * self.line_height
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TextLayout {
    fonts: FontContext,
}

impl TextLayout {
    pub fn new() -> Self {
        Self {
            fonts: FontContext::new(),
        }
    }

    pub fn fonts(&self) -> &FontContext {
        &self.fonts
    }

    /// Wrap `text` to `max_width` and attach a line height.
    pub fn measure(&self, text: &str, max_width: f64, font: Font, line_height: f64) -> MeasuredBlock {
        MeasuredBlock {
            lines: self.break_into_lines(text, max_width, font),
            line_height,
        }
    }

    /// Break a string into lines that fit within `max_width` (mm).
    ///
    /// Runs of whitespace inside a line collapse to a single space. Empty
    /// input produces exactly one empty line so empty fields still reserve
    /// vertical space.
    pub fn break_into_lines(&self, text: &str, max_width: f64, font: Font) -> Vec<BrokenLine> {
        if text.is_empty() {
            return vec![BrokenLine::empty()];
        }

        let space_width = self.fonts.char_width(' ', font);
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let paragraph = paragraph.trim_end_matches('\r');
            let mut current = String::new();
            let mut current_width = 0.0;
            let mut has_words = false;

            for word in paragraph.split_whitespace() {
                has_words = true;
                let word_width = self.fonts.measure(word, font);

                if word_width > max_width {
                    if !current.is_empty() {
                        lines.push(BrokenLine {
                            text: std::mem::take(&mut current),
                            width: current_width,
                        });
                    }
                    let mut pieces = self.split_long_word(word, max_width, font);
                    // The tail of a split word can share its line with what follows.
                    let tail = pieces.pop().unwrap_or_else(BrokenLine::empty);
                    lines.extend(pieces);
                    current = tail.text;
                    current_width = tail.width;
                    continue;
                }

                if current.is_empty() {
                    current.push_str(word);
                    current_width = word_width;
                } else if current_width + space_width + word_width <= max_width {
                    current.push(' ');
                    current.push_str(word);
                    current_width += space_width + word_width;
                } else {
                    lines.push(BrokenLine {
                        text: std::mem::replace(&mut current, word.to_string()),
                        width: current_width,
                    });
                    current_width = word_width;
                }
            }

            if has_words {
                lines.push(BrokenLine {
                    text: current,
                    width: current_width,
                });
            } else {
                lines.push(BrokenLine::empty());
            }
        }

        lines
    }

    /// Split a single over-long word between characters. Each piece holds at
    /// least one character.
    fn split_long_word(&self, word: &str, max_width: f64, font: Font) -> Vec<BrokenLine> {
        let mut pieces = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0;

        for ch in word.chars() {
            let w = self.fonts.char_width(ch, font);
            if current_width + w > max_width && !current.is_empty() {
                pieces.push(BrokenLine {
                    text: std::mem::take(&mut current),
                    width: current_width,
                });
                current_width = 0.0;
            }
            current.push(ch);
            current_width += w;
        }

        if !current.is_empty() {
            pieces.push(BrokenLine {
                text: current,
                width: current_width,
            });
        }
        pieces
    }
}
