//! # Table of Contents
//!
//! Page numbers aren't known until the body has been laid out, so the
//! contents page is a blank placeholder during layout. Headings record the
//! page they land on in a [`SectionPageMap`]. Afterwards, [`fill_toc`]
//! draws the entries onto the placeholder.

use log::{debug, warn};

use crate::config::LayoutConfig;
use crate::font::{Font, FontContext};
use crate::style::TextAlign;

use super::LayoutPage;

pub const TOC_TITLE: &str = "Table of Contents";

/// Section title to 1-based page number, in the order sections were drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionPageMap {
    entries: Vec<(String, usize)>,
}

impl SectionPageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where a section heading was drawn. The first record for a
    /// title wins.
    pub fn record(&mut self, title: &str, page: usize) {
        if self.get(title).is_none() {
            debug!("section '{}' starts on page {}", title, page);
            self.entries.push((title.to_string(), page));
        }
    }

    pub fn get(&self, title: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, page)| *page)
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A run of dots filling `available` mm, never fewer than `min_dots`.
pub fn dot_leader(available: f64, dot_width: f64, min_dots: usize) -> String {
    let fit = if dot_width > 0.0 && available > 0.0 {
        (available / dot_width).floor() as usize
    } else {
        0
    };
    ".".repeat(fit.max(min_dots))
}

/// Draw the contents onto the placeholder page at `placeholder_index`
/// (0-based). Returns the pages unchanged if there is no such page.
pub fn fill_toc(
    mut pages: Vec<LayoutPage>,
    placeholder_index: usize,
    sections: &SectionPageMap,
    config: &LayoutConfig,
) -> Vec<LayoutPage> {
    if placeholder_index >= pages.len() {
        warn!(
            "no page {} to hold the table of contents ({} pages)",
            placeholder_index + 1,
            pages.len()
        );
        return pages;
    }
    let page = &mut pages[placeholder_index];

    let geometry = &config.page;
    let fonts = FontContext::new();
    let title_font = Font::bold(config.font_sizes.heading);
    let entry_font = Font::normal(config.font_sizes.body);
    let left = geometry.margin.left;
    let right = geometry.width() - geometry.margin.right;
    let gap = fonts.measure(" ", entry_font);
    let dot_width = fonts.measure(".", entry_font);

    let mut baseline = geometry.margin.top + config.line_height;
    page.push_line(geometry.width() / 2.0, baseline, TOC_TITLE, title_font, TextAlign::Center);
    baseline += config.heading_gap;

    for (title, number) in sections.entries() {
        let number = number.to_string();
        let label_width = fonts.measure(title, entry_font);
        let number_width = fonts.measure(&number, entry_font);
        let dots_start = left + label_width + gap;
        let available = right - number_width - gap - dots_start;

        page.push_line(left, baseline, title, entry_font, TextAlign::Left);
        page.push_line(
            dots_start,
            baseline,
            &dot_leader(available, dot_width, config.toc_min_dots),
            entry_font,
            TextAlign::Left,
        );
        page.push_line(right, baseline, &number, entry_font, TextAlign::Right);
        baseline += config.toc_row_height;
    }

    debug!(
        "filled table of contents on page {} with {} entries",
        placeholder_index + 1,
        sections.len()
    );
    pages
}
