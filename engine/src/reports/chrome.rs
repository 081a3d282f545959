//! Shared report furniture: letterheads, cover pages, labeled fields,
//! headings, lists and signature blocks.
//!
//! Everything that flows goes through the composer's check-then-draw path.
//! Cover pages are the exception; their positions are absolute.

use std::sync::Arc;

use log::warn;

use crate::font::Font;
use crate::image_loader::LoadedImage;
use crate::layout::Composer;
use crate::model::ProjectHead;
use crate::style::TextAlign;

/// Upper-case letterhead with a document title underneath, centred.
pub fn letterhead(c: &mut Composer<'_>, title: &str) {
    let config = c.config();
    let font = Font::bold(config.font_sizes.letterhead);
    let pitch = config.field_spacing;
    let head = &config.letterhead;
    for line in [&head.university, &head.institute, &head.department] {
        c.centered_line(&line.to_uppercase(), font, pitch);
    }
    c.centered_line(title, font, pitch);
    c.advance(pitch);
}

/// What a cover page shows.
#[derive(Debug, Clone, Copy)]
pub struct Cover<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub student_name: &'a str,
    pub roll_no: &'a str,
    pub guided_by: &'a str,
    pub department: &'a str,
}

/// Draw a cover page on the current (first) page at fixed positions. The
/// next flowing content should start on a new page.
pub fn cover_page(c: &mut Composer<'_>, cover: &Cover<'_>, logo: Option<&Arc<LoadedImage>>) {
    let config = c.config();
    let sizes = &config.font_sizes;
    let centre = c.page().width() / 2.0;

    let roll = if cover.roll_no.is_empty() {
        String::new()
    } else {
        format!("({})", cover.roll_no)
    };
    let lines = [
        (cover.title, 50.0, Font::bold(sizes.cover_title)),
        (cover.subtitle, 70.0, Font::bold(sizes.cover_subtitle)),
        ("Submitted By", 120.0, Font::bold(sizes.cover_label)),
        (cover.student_name, 130.0, Font::normal(sizes.cover_value)),
        (roll.as_str(), 140.0, Font::normal(sizes.cover_value)),
        ("Guided By", 160.0, Font::bold(sizes.cover_label)),
        (cover.guided_by, 170.0, Font::normal(sizes.cover_value)),
    ];
    for (text, baseline, font) in lines {
        if !text.is_empty() {
            c.line_at(centre, baseline, text, font, TextAlign::Center);
        }
    }

    let logo_box = &config.logo;
    if logo.is_none() {
        warn!("no logo supplied; drawing a placeholder on the cover page");
    }
    c.image(
        centre - logo_box.width / 2.0,
        logo_box.y,
        logo_box.width,
        logo_box.height,
        logo,
    );

    let footer = Font::bold(sizes.cover_footer);
    let department = if cover.department.is_empty() {
        config.letterhead.department.as_str()
    } else {
        cover.department
    };
    let head = &config.letterhead;
    for (text, baseline) in [
        (department, 245.0),
        (head.institute.as_str(), 252.0),
        (head.university.as_str(), 259.0),
        (head.city.as_str(), 266.0),
    ] {
        c.line_at(centre, baseline, text, footer, TextAlign::Center);
    }
}

/// `LABEL : value` on one row. The value wraps within the space right of
/// the colon; the row grows by one line height per extra line.
pub fn field(c: &mut Composer<'_>, label: &str, value: &str) {
    let config = c.config();
    let page = c.page();
    let size = config.font_sizes.body;
    let line_height = config.line_height;
    let left = page.margin.left;
    let colon_x = left + config.label_width;
    let value_x = colon_x + 5.0;
    let value_width = page.width() - page.margin.right - value_x;

    let label_block = c.measure(label, config.label_width - 2.0, Font::bold(size), line_height);
    let value_block = c.measure(value, value_width, Font::normal(size), line_height);
    let lines = label_block.line_count().max(value_block.line_count());
    let row_height = config.field_spacing + (lines - 1) as f64 * line_height;

    let colon = c.measure(":", 5.0, Font::bold(size), line_height);

    c.ensure_space(row_height);
    let top = c.y();
    for (x, width, block, font) in [
        (left, config.label_width, &label_block, Font::bold(size)),
        (colon_x, 5.0, &colon, Font::bold(size)),
        (value_x, value_width, &value_block, Font::normal(size)),
    ] {
        c.lines_at(x, top, width, &block.lines, font, line_height, TextAlign::Left);
    }
    c.advance(row_height);
}

/// A bold section heading at the left margin, kept on the same page as the
/// first `keep_with` mm of what follows. Returns the page it landed on.
pub fn heading(c: &mut Composer<'_>, text: &str, keep_with: f64) -> usize {
    let config = c.config();
    let font = Font::bold(config.font_sizes.heading);
    heading_with(c, text, font, config.heading_gap, keep_with)
}

/// A smaller bold heading, such as a week label or an objective title.
pub fn subheading(c: &mut Composer<'_>, text: &str, keep_with: f64) -> usize {
    let config = c.config();
    let font = Font::bold(config.font_sizes.subheading);
    heading_with(c, text, font, config.field_spacing, keep_with)
}

fn heading_with(c: &mut Composer<'_>, text: &str, font: Font, gap: f64, keep_with: f64) -> usize {
    let page = c.page();
    let width = page.content_width();
    let block = c.measure(text, width, font, c.config().line_height + 2.0);
    let height = gap + (block.line_count() - 1) as f64 * block.line_height;

    c.ensure_space(height + keep_with);
    let top = c.y();
    c.lines_at(page.margin.left, top, width, &block.lines, font, block.line_height, TextAlign::Left);
    c.advance(height);
    c.page_number()
}

/// Body paragraph across the full content width, followed by the paragraph gap.
pub fn paragraph(c: &mut Composer<'_>, text: &str) {
    let config = c.config();
    let page = c.page();
    c.paragraph(
        page.margin.left,
        page.content_width(),
        text,
        Font::normal(config.font_sizes.body),
        config.line_height,
    );
    c.advance(config.paragraph_gap);
}

/// One list entry: `marker` at the left margin, `text` wrapped at the
/// list indent.
pub fn list_item(c: &mut Composer<'_>, marker: &str, text: &str) {
    let config = c.config();
    let page = c.page();
    let font = Font::normal(config.font_sizes.body);
    let text_x = page.margin.left + config.list_indent;
    let width = page.width() - page.margin.right - text_x;
    let block = c.measure(text, width, font, config.line_height);

    c.ensure_space(block.height().min(page.content_height()));
    let top = c.y();
    let marker_line = c.measure(marker, config.list_indent, font, config.line_height);
    c.lines_at(page.margin.left, top, config.list_indent, &marker_line.lines[..1], font, config.line_height, TextAlign::Left);
    c.flow_block(text_x, width, &block, font, TextAlign::Left);
    c.advance(config.item_gap);
}

pub fn bullet_list(c: &mut Composer<'_>, items: &[String]) {
    for item in items {
        list_item(c, "\u{2022}", item);
    }
}

pub fn numbered_list(c: &mut Composer<'_>, items: &[String]) {
    for (i, item) in items.iter().enumerate() {
        list_item(c, &format!("{}.", i + 1), item);
    }
}

/// One line of a signature block.
#[derive(Debug, Clone)]
pub struct SignatureLine {
    pub text: String,
    pub bold: bool,
    /// Space above this line.
    pub gap_before: f64,
}

impl SignatureLine {
    pub fn new(text: impl Into<String>, bold: bool, gap_before: f64) -> Self {
        Self {
            text: text.into(),
            bold,
            gap_before,
        }
    }
}

/// Lines that belong together at the end of a report. The block never
/// splits; if it moves to a new page its leading gap is dropped.
pub fn signature_block(c: &mut Composer<'_>, lines: &[SignatureLine]) {
    let config = c.config();
    let left = c.page().margin.left;
    let width = c.page().content_width();
    let line_height = config.line_height;
    let height: f64 = lines.iter().map(|l| l.gap_before + line_height).sum();

    let broke = c.ensure_space(height);
    for (i, line) in lines.iter().enumerate() {
        if !(broke && i == 0) {
            c.advance(line.gap_before);
        }
        let font = if line.bold {
            Font::bold(config.font_sizes.body)
        } else {
            Font::normal(config.font_sizes.body)
        };
        let block = c.measure(&line.text, width, font, line_height);
        let top = c.y();
        c.lines_at(left, top, width, &block.lines[..1], font, line_height, TextAlign::Left);
        c.advance(line_height);
    }
}

/// `Date: 5 Mar 2024`
pub fn date_line(formatted: &str) -> String {
    format!("Date: {}", formatted)
}

/// The project head's name, designation and date, closing a report.
pub fn head_signature(c: &mut Composer<'_>, head: &ProjectHead, formatted_date: &str) {
    let gap = c.config().signature_gap;
    signature_block(
        c,
        &[
            SignatureLine::new(&head.name, true, gap),
            SignatureLine::new(&head.designation, false, 1.0),
            SignatureLine::new(date_line(formatted_date), true, 9.0),
        ],
    );
}
