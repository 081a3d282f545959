//! # Table Layout
//!
//! Bordered tables of wrapped text. A row is measured in full before it is
//! drawn: every cell is wrapped, the tallest cell decides the row height, and
//! all cells are drawn at that height so borders line up.
//!
//! A row that doesn't fit below the cursor moves to a new page and the
//! header row is drawn again above it. Only a row taller than a whole page
//! is split, between lines, with every cell cut at the same line.

use crate::config::TableConfig;
use crate::font::Font;
use crate::style::{Color, TextAlign};
use crate::text::{MeasuredBlock, TextLayout};

use super::page_break::{self, BreakDecision};
use super::{Composer, Stroke};

/// How the cells of one row are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    pub font: Font,
    pub line_height: f64,
    /// Vertical space added to the text height, split evenly above and below.
    pub padding: f64,
    /// Horizontal text inset on each side.
    pub inset: f64,
    pub min_height: f64,
    pub fill: Option<Color>,
}

impl CellStyle {
    pub fn body(config: &TableConfig) -> Self {
        Self {
            font: Font::normal(config.font_size),
            line_height: config.line_height,
            padding: config.padding,
            inset: config.inset,
            min_height: config.min_row_height,
            fill: config.body_fill.map(Color::rgb8),
        }
    }

    /// Bold text on the header fill. A one-line header is exactly
    /// `header_height` tall.
    pub fn header(config: &TableConfig) -> Self {
        Self {
            font: Font::bold(config.font_size),
            line_height: config.line_height,
            padding: (config.header_height - config.line_height).max(0.0),
            inset: config.inset,
            min_height: config.header_height,
            fill: Some(Color::rgb8(config.header_fill)),
        }
    }

    /// `max(min_height, lines * line_height + padding)`
    pub fn cell_height(&self, block: &MeasuredBlock) -> f64 {
        (block.line_count() as f64 * self.line_height + self.padding).max(self.min_height)
    }
}

/// A row whose cells have been wrapped but not drawn.
#[derive(Debug, Clone)]
pub struct MeasuredRow {
    pub cells: Vec<MeasuredBlock>,
    pub height: f64,
}

/// Wrap one cell's text to its column and return the block with its height.
pub fn measure_cell(text_layout: &TextLayout, text: &str, column_width: f64, style: &CellStyle) -> (MeasuredBlock, f64) {
    let text_width = (column_width - 2.0 * style.inset).max(0.0);
    let block = text_layout.measure(text, text_width, style.font, style.line_height);
    let height = style.cell_height(&block);
    (block, height)
}

/// Measure every cell of a row; the row is as tall as its tallest cell.
pub fn measure_row(text_layout: &TextLayout, texts: &[String], widths: &[f64], style: &CellStyle) -> MeasuredRow {
    let mut cells = Vec::with_capacity(widths.len());
    let mut height: f64 = style.min_height;
    for (i, width) in widths.iter().enumerate() {
        let text = texts.get(i).map(String::as_str).unwrap_or("");
        let (block, cell_height) = measure_cell(text_layout, text, *width, style);
        height = height.max(cell_height);
        cells.push(block);
    }
    MeasuredRow { cells, height }
}

impl MeasuredRow {
    /// Lines `start..end` of every cell as a row of their own. Cells with
    /// fewer lines contribute what they have.
    pub fn slice(&self, start: usize, end: usize, style: &CellStyle) -> MeasuredRow {
        let cells = self
            .cells
            .iter()
            .map(|block| {
                let len = block.lines.len();
                MeasuredBlock {
                    lines: block.lines[start.min(len)..end.min(len)].to_vec(),
                    line_height: block.line_height,
                }
            })
            .collect();
        MeasuredRow {
            cells,
            height: (end - start) as f64 * style.line_height + style.padding,
        }
    }

    pub fn line_count(&self) -> usize {
        self.cells.iter().map(MeasuredBlock::line_count).max().unwrap_or(0)
    }
}

/// Draw one cell's box and text at `(x, y)` with the row's height. Returns
/// the height used.
pub fn draw_cell(
    composer: &mut Composer<'_>,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    block: &MeasuredBlock,
    style: &CellStyle,
) -> f64 {
    composer.rect(x, y, width, height, style.fill, Some(Stroke::default()));
    composer.lines_at(
        x + style.inset,
        y + style.padding / 2.0,
        (width - 2.0 * style.inset).max(0.0),
        &block.lines,
        style.font,
        style.line_height,
        TextAlign::Left,
    );
    height
}

/// Draw a measured row at the cursor and move past it. The caller has
/// already made room.
fn draw_row(composer: &mut Composer<'_>, x: f64, widths: &[f64], row: &MeasuredRow, style: &CellStyle) {
    let y = composer.y();
    let mut cell_x = x;
    for (block, width) in row.cells.iter().zip(widths) {
        draw_cell(composer, cell_x, y, *width, row.height, block, style);
        cell_x += width;
    }
    composer.advance(row.height);
}

/// A table with a single header row and any number of body rows.
#[derive(Debug, Clone)]
pub struct Table {
    pub x: f64,
    pub widths: Vec<f64>,
    pub header: Vec<String>,
    pub header_style: CellStyle,
    pub body_style: CellStyle,
    pub repeat_header: bool,
}

impl Table {
    /// Two columns spanning `total_width`: a fixed first column and the rest.
    pub fn two_column(config: &TableConfig, x: f64, total_width: f64, header: [&str; 2], repeat_header: bool) -> Self {
        Self {
            x,
            widths: vec![
                config.first_column_width,
                total_width - config.first_column_width,
            ],
            header: header.iter().map(|h| h.to_string()).collect(),
            header_style: CellStyle::header(config),
            body_style: CellStyle::body(config),
            repeat_header,
        }
    }

    pub fn total_width(&self) -> f64 {
        self.widths.iter().sum()
    }

    /// Lay out the header and `rows` starting at the cursor.
    pub fn layout(&self, composer: &mut Composer<'_>, rows: &[Vec<String>]) {
        let text_layout = *composer.text_layout();
        let header = measure_row(&text_layout, &self.header, &self.widths, &self.header_style);
        let rows: Vec<MeasuredRow> = rows
            .iter()
            .map(|r| measure_row(&text_layout, r, &self.widths, &self.body_style))
            .collect();

        // Tallest row that still fits on a fresh page under the header.
        let mut fresh_room = composer.page().content_height();
        if self.repeat_header {
            fresh_room -= header.height;
        }

        // The header never sits alone at the bottom of a page. An oversized
        // first row only needs its first few lines to come along.
        let keep_with = match rows.first() {
            Some(row) if row.height > fresh_room + 1e-9 => {
                let lines = composer.config().min_orphan_lines.max(1) as f64;
                lines * self.body_style.line_height + self.body_style.padding
            }
            Some(row) => row.height,
            None => 0.0,
        };
        composer.ensure_space(header.height + keep_with);
        draw_row(composer, self.x, &self.widths, &header, &self.header_style);

        for row in &rows {
            if row.height > fresh_room + 1e-9 {
                self.layout_split_row(composer, &header, row);
                continue;
            }
            if composer.ensure_space(row.height) && self.repeat_header {
                draw_row(composer, self.x, &self.widths, &header, &self.header_style);
            }
            draw_row(composer, self.x, &self.widths, row, &self.body_style);
        }
    }

    fn continue_on_next_page(&self, composer: &mut Composer<'_>, header: &MeasuredRow) {
        composer.new_page();
        if self.repeat_header {
            draw_row(composer, self.x, &self.widths, header, &self.header_style);
        }
    }

    /// Draw a row taller than a page in slices. Each slice holds the same
    /// lines of every cell and is drawn at its own height.
    fn layout_split_row(&self, composer: &mut Composer<'_>, header: &MeasuredRow, row: &MeasuredRow) {
        let style = &self.body_style;
        let line_height = style.line_height;
        let config = composer.config();
        let total = row.line_count();
        let mut start = 0;
        let mut fresh = composer.at_page_top();

        while start < total {
            let rest = total - start;
            let room = composer.remaining_height() - style.padding;
            let decision = page_break::decide_break(
                room,
                &vec![line_height; rest],
                true,
                config.min_orphan_lines,
                config.min_widow_lines,
            );
            let take = match decision {
                BreakDecision::Place => rest,
                BreakDecision::Split {
                    items_on_current_page,
                } => items_on_current_page,
                BreakDecision::MoveToNextPage if fresh => {
                    ((room / line_height).floor().max(1.0) as usize).min(rest)
                }
                BreakDecision::MoveToNextPage => {
                    self.continue_on_next_page(composer, header);
                    fresh = true;
                    continue;
                }
            };

            let slice = row.slice(start, start + take, style);
            draw_row(composer, self.x, &self.widths, &slice, style);
            start += take;
            if start < total {
                self.continue_on_next_page(composer, header);
                fresh = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::DrawCommand;

    fn rows(n: usize, task: &str) -> Vec<Vec<String>> {
        (0..n)
            .map(|i| vec![format!("Week {}", i + 1), task.to_string()])
            .collect()
    }

    #[test]
    fn empty_cell_has_min_height() {
        let config = LayoutConfig::default();
        let style = CellStyle::body(&config.worksheet_table);
        let (block, height) = measure_cell(&TextLayout::new(), "", 40.0, &style);
        assert_eq!(block.line_count(), 1);
        assert!((height - 10.0).abs() < 1e-9);
    }

    #[test]
    fn header_is_header_height() {
        let config = LayoutConfig::default();
        let style = CellStyle::header(&config.schedule_table);
        let (_, height) = measure_cell(&TextLayout::new(), "Week", 40.0, &style);
        assert!((height - config.schedule_table.header_height).abs() < 1e-9);
    }

    #[test]
    fn row_takes_tallest_cell() {
        let config = LayoutConfig::default();
        let style = CellStyle::body(&config.worksheet_table);
        let long = "Investigated flaky integration tests in the payments service and \
                    rewrote the retry logic so that timeouts are reported with context";
        let row = measure_row(
            &TextLayout::new(),
            &["2024-03-01".to_string(), long.to_string()],
            &[40.0, 120.0],
            &style,
        );
        assert!(row.cells[1].line_count() > 1);
        let expected = row.cells[1].line_count() as f64 * 6.0 + 4.0;
        assert!((row.height - expected).abs() < 1e-9);
    }

    #[test]
    fn cells_in_a_row_share_height() {
        let config = LayoutConfig::default();
        let mut c = Composer::new(&config);
        let table = Table::two_column(&config.schedule_table, 25.0, 160.0, ["Week", "Task"], true);
        table.layout(&mut c, &rows(1, &"long task text ".repeat(20)));
        let pages = c.finish();
        let rects: Vec<_> = pages[0]
            .elements
            .iter()
            .filter(|e| matches!(e.draw, DrawCommand::Rect { .. }))
            .collect();
        assert_eq!(rects.len(), 4);
        assert_eq!(rects[2].height, rects[3].height);
        assert_eq!(rects[2].y, rects[3].y);
        assert!((rects[3].x - (25.0 + 40.0)).abs() < 1e-9);
    }

    #[test]
    fn header_repeats_on_continuation_pages() {
        let config = LayoutConfig::default();
        let mut c = Composer::new(&config);
        let table = Table::two_column(&config.schedule_table, 25.0, 160.0, ["Week", "Task"], true);
        table.layout(&mut c, &rows(40, "Built the reporting pipeline"));
        let pages = c.finish();
        assert!(pages.len() >= 2);
        for page in &pages {
            assert_eq!(page.texts()[0], "Week", "every page starts with the header");
            for el in &page.elements {
                assert!(el.y + el.height <= config.page.bottom_limit() + 1e-6);
            }
        }
    }

    #[test]
    fn header_not_repeated_when_disabled() {
        let config = LayoutConfig::default();
        let mut c = Composer::new(&config);
        let table = Table::two_column(&config.schedule_table, 25.0, 160.0, ["Week", "Task"], false);
        table.layout(&mut c, &rows(40, "Built the reporting pipeline"));
        let pages = c.finish();
        assert_eq!(pages[1].texts()[0], "Week 17");
    }

    fn oversized_rows() -> Vec<Vec<String>> {
        vec![
            vec!["1 Mar 2024".to_string(), "short".to_string()],
            vec![
                "2 Mar 2024".to_string(),
                "Investigated and documented the payments retry behaviour in detail. ".repeat(80),
            ],
        ]
    }

    #[test]
    fn row_taller_than_a_page_is_split_between_lines() {
        let config = LayoutConfig::default();
        let limit = config.page.bottom_limit();
        let table = Table::two_column(&config.worksheet_table, 25.0, 160.0, ["DATE", "TASK"], true);
        let rows = oversized_rows();
        let expected_lines =
            measure_row(&TextLayout::new(), &rows[1], &table.widths, &table.body_style).cells[1].line_count();

        let mut c = Composer::new(&config);
        table.layout(&mut c, &rows);
        let pages = c.finish();
        assert!(pages.len() >= 3);

        for page in &pages {
            let texts = page.texts();
            assert_eq!(texts[..2], ["DATE", "TASK"]);
            // Header plus at least one slice of the row.
            let rects = page
                .elements
                .iter()
                .filter(|e| matches!(e.draw, DrawCommand::Rect { .. }))
                .count();
            assert!(rects >= 4, "a page holds only the header");
            for el in &page.elements {
                assert!(el.y + el.height <= limit + 1e-6);
            }
        }
        assert_eq!(pages.iter().filter(|p| p.contains_text("2 Mar 2024")).count(), 1);
        let drawn: usize = pages
            .iter()
            .flat_map(|p| p.text_lines())
            .filter(|l| !["DATE", "TASK", "1 Mar 2024", "2 Mar 2024", "short"].contains(&l.text.as_str()))
            .count();
        assert_eq!(drawn, expected_lines);
    }

    #[test]
    fn split_row_cells_share_each_slice_height() {
        let config = LayoutConfig::default();
        let table = Table::two_column(&config.worksheet_table, 25.0, 160.0, ["DATE", "TASK"], false);
        let mut c = Composer::new(&config);
        table.layout(&mut c, &oversized_rows());
        let pages = c.finish();
        assert!(pages.len() >= 2);
        assert_ne!(pages[1].texts()[0], "DATE");
        for page in &pages {
            let rects: Vec<_> = page
                .elements
                .iter()
                .filter(|e| matches!(e.draw, DrawCommand::Rect { .. }))
                .collect();
            assert_eq!(rects.len() % 2, 0);
            for pair in rects.chunks(2) {
                assert_eq!(pair[0].y, pair[1].y);
                assert_eq!(pair[0].height, pair[1].height);
            }
            for el in &page.elements {
                assert!(el.y + el.height <= config.page.bottom_limit() + 1e-6);
            }
        }
    }
}
