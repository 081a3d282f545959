//! # Page-Aware Layout
//!
//! Reports are laid out straight onto fixed-size pages. There is no tall
//! canvas that gets sliced afterwards. Every block is measured first, then
//! the composer asks "does this fit below the cursor?":
//!
//! 1. If it fits, draw it and move the cursor down by its height.
//! 2. If it doesn't, open a new page, reset the cursor to the top margin and
//!    draw it there.
//! 3. A paragraph taller than a whole page is split between lines, with
//!    orphan/widow control.
//! 4. Tables measure a row before drawing it and repeat their header row on
//!    continuation pages.
//!
//! Coordinates are millimetres from the top-left corner of the page. The PDF
//! writer flips them into PDF space.

pub mod page_break;
pub mod table;
pub mod toc;

use std::sync::Arc;

use log::debug;

use crate::config::LayoutConfig;
use crate::font::{Font, FontContext, PT_PER_MM};
use crate::image_loader::LoadedImage;
use crate::model::PageConfig;
use crate::style::{Color, TextAlign};
use crate::text::{BrokenLine, MeasuredBlock, TextLayout};

pub use page_break::{BreakDecision, Cursor};

/// Cap height of the Times faces, as a fraction of the font size.
const CAP_HEIGHT: f64 = 0.662;
/// Ascent of the Times faces, as a fraction of the font size.
const ASCENT: f64 = 0.683;

/// Default stroke width for borders (mm).
pub const HAIRLINE: f64 = 0.2;

/// A fully laid-out page ready for PDF serialization.
#[derive(Debug, Clone)]
pub struct LayoutPage {
    pub width: f64,
    pub height: f64,
    pub elements: Vec<LayoutElement>,
}

/// A positioned element on a page.
#[derive(Debug, Clone)]
pub struct LayoutElement {
    /// Top-left corner, absolute on the page.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub draw: DrawCommand,
    /// Page furniture drawn outside the flow, such as page-number footers.
    pub fixed: bool,
}

/// What to actually draw for an element.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// A rectangle with optional fill and border.
    Rect {
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    /// One or more lines of text in a single font.
    Text {
        lines: Vec<TextLine>,
        font: Font,
        color: Color,
    },
    /// A decoded raster image scaled to the element box.
    Image { image: Arc<LoadedImage> },
    /// A grey box standing in for an image that wasn't supplied.
    ImagePlaceholder,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// Line width in mm.
    pub width: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: HAIRLINE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Left edge of the line.
    pub x: f64,
    /// Baseline, measured from the top of the page.
    pub y: f64,
    pub text: String,
    pub width: f64,
}

/// Distance from the top of a line box to the baseline, centring the
/// capitals vertically.
pub fn baseline_offset(line_height: f64, font: Font) -> f64 {
    (line_height + CAP_HEIGHT * font.size / PT_PER_MM) / 2.0
}

fn aligned_x(anchor: f64, width: f64, align: TextAlign) -> f64 {
    match align {
        TextAlign::Left => anchor,
        TextAlign::Center => anchor - width / 2.0,
        TextAlign::Right => anchor - width,
    }
}

impl LayoutPage {
    pub fn new(page: &PageConfig) -> Self {
        Self {
            width: page.width(),
            height: page.height(),
            elements: Vec::new(),
        }
    }

    /// Draw one line of text with its baseline at `baseline`. `anchor_x` is
    /// the left edge, centre, or right edge depending on `align`.
    pub fn push_line(&mut self, anchor_x: f64, baseline: f64, text: &str, font: Font, align: TextAlign) {
        let width = FontContext::new().measure(text, font);
        let x = aligned_x(anchor_x, width, align);
        let size_mm = font.size / PT_PER_MM;
        self.elements.push(LayoutElement {
            x,
            y: baseline - ASCENT * size_mm,
            width,
            height: size_mm,
            draw: DrawCommand::Text {
                lines: vec![TextLine {
                    x,
                    y: baseline,
                    text: text.to_string(),
                    width,
                }],
                font,
                color: Color::BLACK,
            },
            fixed: false,
        });
    }

    pub fn push_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Option<Color>, stroke: Option<Stroke>) {
        self.elements.push(LayoutElement {
            x,
            y,
            width,
            height,
            draw: DrawCommand::Rect { fill, stroke },
            fixed: false,
        });
    }

    /// All text lines on the page, in drawing order.
    pub fn text_lines(&self) -> impl Iterator<Item = &TextLine> {
        self.elements.iter().flat_map(|el| match &el.draw {
            DrawCommand::Text { lines, .. } => lines.as_slice(),
            _ => &[][..],
        })
    }

    pub fn texts(&self) -> Vec<&str> {
        self.text_lines().map(|l| l.text.as_str()).collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.text_lines().any(|l| l.text.contains(needle))
    }

    /// The first line whose text is exactly `text`.
    pub fn find_line(&self, text: &str) -> Option<&TextLine> {
        self.text_lines().find(|l| l.text == text)
    }
}

/// The page stack and cursor for one report.
///
/// Every drawing call goes through here so that page breaks are decided in
/// one place. A composer is created per render and consumed by
/// [`Composer::finish`].
pub struct Composer<'a> {
    config: &'a LayoutConfig,
    text: TextLayout,
    pages: Vec<LayoutPage>,
    cursor: Cursor,
}

impl<'a> Composer<'a> {
    /// Start a document with one empty page.
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            text: TextLayout::new(),
            pages: vec![LayoutPage::new(&config.page)],
            cursor: Cursor::start(&config.page),
        }
    }

    pub fn config(&self) -> &'a LayoutConfig {
        self.config
    }

    pub fn page(&self) -> &'a PageConfig {
        &self.config.page
    }

    pub fn text_layout(&self) -> &TextLayout {
        &self.text
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// 1-based number of the page being drawn on.
    pub fn page_number(&self) -> usize {
        self.cursor.page
    }

    pub fn y(&self) -> f64 {
        self.cursor.y
    }

    /// Move the cursor to an absolute position on the current page.
    pub fn set_y(&mut self, y: f64) {
        self.cursor.y = y;
    }

    /// Move the cursor down.
    pub fn advance(&mut self, dy: f64) {
        self.cursor.y += dy;
    }

    pub fn remaining_height(&self) -> f64 {
        self.cursor.remaining(self.page())
    }

    pub fn at_page_top(&self) -> bool {
        self.cursor.at_page_top(self.page())
    }

    /// Open a fresh page and put the cursor at its top margin.
    pub fn new_page(&mut self) {
        self.pages.push(LayoutPage::new(self.page()));
        self.cursor = self.cursor.next_page(self.page());
        debug!("page break: now on page {}", self.cursor.page);
    }

    /// Make sure a block of `height` fits below the cursor, breaking to a new
    /// page if it doesn't. Returns whether a break happened.
    pub fn ensure_space(&mut self, height: f64) -> bool {
        let (next, decision) = page_break::advance(self.cursor, height, self.page());
        match decision {
            BreakDecision::MoveToNextPage => {
                self.new_page();
                debug_assert_eq!(self.cursor, next);
                true
            }
            _ => false,
        }
    }

    pub fn measure(&self, text: &str, max_width: f64, font: Font, line_height: f64) -> MeasuredBlock {
        self.text.measure(text, max_width, font, line_height)
    }

    fn current_page(&mut self) -> &mut LayoutPage {
        let index = self.cursor.page - 1;
        &mut self.pages[index]
    }

    /// Draw one line at an absolute baseline on the current page. The cursor
    /// doesn't move.
    pub fn line_at(&mut self, anchor_x: f64, baseline: f64, text: &str, font: Font, align: TextAlign) {
        self.current_page().push_line(anchor_x, baseline, text, font, align);
    }

    /// Draw already-broken lines in a box starting at `top`. Alignment is
    /// relative to the box `[x, x + width]`. The cursor doesn't move.
    pub fn lines_at(
        &mut self,
        x: f64,
        top: f64,
        width: f64,
        lines: &[BrokenLine],
        font: Font,
        line_height: f64,
        align: TextAlign,
    ) {
        if lines.is_empty() {
            return;
        }
        let offset = baseline_offset(line_height, font);
        let text_lines = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let anchor = match align {
                    TextAlign::Left => x,
                    TextAlign::Center => x + width / 2.0,
                    TextAlign::Right => x + width,
                };
                TextLine {
                    x: aligned_x(anchor, line.width, align),
                    y: top + i as f64 * line_height + offset,
                    text: line.text.clone(),
                    width: line.width,
                }
            })
            .collect();
        self.current_page().elements.push(LayoutElement {
            x,
            y: top,
            width,
            height: lines.len() as f64 * line_height,
            draw: DrawCommand::Text {
                lines: text_lines,
                font,
                color: Color::BLACK,
            },
            fixed: false,
        });
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Option<Color>, stroke: Option<Stroke>) {
        self.current_page().push_rect(x, y, width, height, fill, stroke);
    }

    /// Draw an image, or a grey placeholder of the same size when there is
    /// none. The cursor doesn't move.
    pub fn image(&mut self, x: f64, y: f64, width: f64, height: f64, image: Option<&Arc<LoadedImage>>) {
        let draw = match image {
            Some(image) => DrawCommand::Image {
                image: Arc::clone(image),
            },
            None => DrawCommand::ImagePlaceholder,
        };
        self.current_page().elements.push(LayoutElement {
            x,
            y,
            width,
            height,
            draw,
            fixed: false,
        });
    }

    /// Flow a block of wrapped text at the cursor and move past it.
    ///
    /// A block that doesn't fit moves whole to a new page. Only a block taller
    /// than a full page is split between lines.
    pub fn flow_block(&mut self, x: f64, width: f64, block: &MeasuredBlock, font: Font, align: TextAlign) {
        let height = block.height();
        if height <= self.page().content_height() + 1e-9 {
            self.ensure_space(height);
            let top = self.cursor.y;
            self.lines_at(x, top, width, &block.lines, font, block.line_height, align);
            self.advance(height);
            return;
        }

        let line_height = block.line_height;
        let mut rest: &[BrokenLine] = &block.lines;
        while !rest.is_empty() {
            let heights = vec![line_height; rest.len()];
            let decision = page_break::decide_break(
                self.remaining_height(),
                &heights,
                true,
                self.config.min_orphan_lines,
                self.config.min_widow_lines,
            );
            let take = match decision {
                BreakDecision::Place => rest.len(),
                BreakDecision::Split {
                    items_on_current_page,
                } => items_on_current_page,
                BreakDecision::MoveToNextPage if self.at_page_top() => {
                    ((self.remaining_height() / line_height).floor() as usize).clamp(1, rest.len())
                }
                BreakDecision::MoveToNextPage => {
                    self.new_page();
                    continue;
                }
            };
            let (here, next) = rest.split_at(take);
            let top = self.cursor.y;
            self.lines_at(x, top, width, here, font, line_height, align);
            self.advance(here.len() as f64 * line_height);
            rest = next;
            if !rest.is_empty() {
                self.new_page();
            }
        }
    }

    /// Wrap and flow a paragraph of text.
    pub fn paragraph(&mut self, x: f64, width: f64, text: &str, font: Font, line_height: f64) {
        let block = self.measure(text, width, font, line_height);
        self.flow_block(x, width, &block, font, TextAlign::Left);
    }

    /// Flow a single line centred between the margins.
    pub fn centered_line(&mut self, text: &str, font: Font, line_height: f64) {
        let page = self.page();
        let width = page.content_width();
        let x = page.margin.left;
        let block = self.measure(text, width, font, line_height);
        self.flow_block(x, width, &block, font, TextAlign::Center);
    }

    /// Pages drawn so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn finish(self) -> Vec<LayoutPage> {
        debug!("layout finished with {} page(s)", self.pages.len());
        self.pages
    }
}

/// Draw a centred "Page N of M" footer in the bottom margin of every page
/// from `first_numbered` (0-based) onwards. Numbers are physical page
/// numbers so they agree with the table of contents.
pub fn number_pages(pages: &mut [LayoutPage], config: &LayoutConfig, first_numbered: usize) {
    let total = pages.len();
    let page = &config.page;
    let font = Font::normal(config.font_sizes.footer);
    let baseline = page.bottom_limit() + page.margin.bottom / 2.0;
    let centre = page.width() / 2.0;
    for (index, layout_page) in pages.iter_mut().enumerate().skip(first_numbered) {
        layout_page.push_line(
            centre,
            baseline,
            &format!("Page {} of {}", index + 1, total),
            font,
            TextAlign::Center,
        );
        if let Some(footer) = layout_page.elements.last_mut() {
            footer.fixed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LayoutConfig {
        LayoutConfig::default()
    }

    fn flow_elements_within_margins(pages: &[LayoutPage], config: &LayoutConfig) {
        for (i, page) in pages.iter().enumerate() {
            for el in page.elements.iter().filter(|e| !e.fixed) {
                assert!(
                    el.y + el.height <= config.page.bottom_limit() + 1e-6,
                    "page {}: element at y={:.2} h={:.2} crosses the bottom margin",
                    i + 1,
                    el.y,
                    el.height
                );
            }
        }
    }

    #[test]
    fn paragraph_advances_cursor_by_its_height() {
        let config = config();
        let mut c = Composer::new(&config);
        let start = c.y();
        c.paragraph(25.0, 160.0, "A short sentence.", Font::normal(12.0), 6.0);
        assert!((c.y() - start - 6.0).abs() < 1e-9);
        assert_eq!(c.page_number(), 1);
    }

    #[test]
    fn paragraph_that_does_not_fit_moves_whole() {
        let config = config();
        let mut c = Composer::new(&config);
        c.set_y(270.0);
        c.paragraph(25.0, 160.0, "line one\nline two", Font::normal(12.0), 6.0);
        assert_eq!(c.page_number(), 2);
        assert!((c.y() - (config.page.margin.top + 12.0)).abs() < 1e-9);
        let pages = c.finish();
        assert!(pages[0].texts().is_empty());
        assert_eq!(pages[1].texts(), vec!["line one", "line two"]);
    }

    #[test]
    fn oversized_paragraph_splits_between_lines() {
        let config = config();
        let mut c = Composer::new(&config);
        c.set_y(200.0);
        let text = (1..=60).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
        c.paragraph(25.0, 160.0, &text, Font::normal(12.0), 6.0);
        let pages = c.finish();
        assert!(pages.len() >= 2);
        let all: Vec<String> = pages
            .iter()
            .flat_map(|p| p.texts().into_iter().map(str::to_string))
            .collect();
        assert_eq!(all.len(), 60, "no line lost or duplicated");
        assert_eq!(all[0], "line 1");
        assert_eq!(all[59], "line 60");
        flow_elements_within_margins(&pages, &config);
    }

    #[test]
    fn ensure_space_breaks_only_when_needed() {
        let config = config();
        let mut c = Composer::new(&config);
        c.set_y(250.0);
        assert!(!c.ensure_space(27.0));
        assert!(c.ensure_space(27.1));
        assert_eq!(c.y(), config.page.margin.top);
        assert_eq!(c.page_count(), 2);
    }

    #[test]
    fn placeholder_drawn_without_image() {
        let config = config();
        let mut c = Composer::new(&config);
        c.image(65.0, 190.0, 80.0, 40.0, None);
        let pages = c.finish();
        assert!(matches!(pages[0].elements[0].draw, DrawCommand::ImagePlaceholder));
    }

    #[test]
    fn centered_line_is_centred() {
        let config = config();
        let mut c = Composer::new(&config);
        c.centered_line("NIRMA UNIVERSITY", Font::bold(16.0), 10.0);
        let pages = c.finish();
        let line = pages[0].find_line("NIRMA UNIVERSITY").unwrap();
        let centre = line.x + line.width / 2.0;
        assert!((centre - 105.0).abs() < 1e-6);
    }

    #[test]
    fn baseline_sits_inside_line_box() {
        let font = Font::normal(12.0);
        let offset = baseline_offset(6.0, font);
        assert!(offset > 0.0 && offset < 6.0);
    }

    #[test]
    fn footers_skip_leading_pages() {
        let config = config();
        let mut c = Composer::new(&config);
        c.new_page();
        c.new_page();
        let mut pages = c.finish();
        number_pages(&mut pages, &config, 1);
        assert!(pages[0].texts().is_empty());
        assert_eq!(pages[1].texts(), vec!["Page 2 of 3"]);
        assert_eq!(pages[2].texts(), vec!["Page 3 of 3"]);
        assert!(pages[2].elements[0].fixed);
    }
}
