//! # Draw Styles
//!
//! The small amount of styling reports need: colors for text, cell fills
//! and borders, and horizontal alignment for single-line text.

use serde::{Deserialize, Serialize};

/// An RGB color with components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };
    /// Fill used for a missing logo.
    pub const PLACEHOLDER: Color = Color {
        r: 0.9,
        g: 0.9,
        b: 0.9,
    };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Build from 0-255 channel values.
    pub fn rgb8([r, g, b]: [u8; 3]) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Horizontal alignment of a single line relative to an anchor x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// The anchor is the left edge of the text.
    #[default]
    Left,
    /// The anchor is the centre of the text.
    Center,
    /// The anchor is the right edge of the text.
    Right,
}
