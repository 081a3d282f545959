//! Preliminary project information report.
//!
//! Laid out in two passes. The first draws the cover, leaves page 2 blank
//! for the table of contents, flows every section and records the page each
//! section heading lands on. The second fills page 2 from that record.

use chrono::NaiveDate;
use log::debug;

use crate::config::LayoutConfig;
use crate::image_loader::Assets;
use crate::layout::table::Table;
use crate::layout::toc::{fill_toc, SectionPageMap};
use crate::layout::Composer;
use crate::model::date::display_date_or;
use crate::model::{Point, PprData, ReportKind};

use super::chrome::{self, Cover, SignatureLine};
use super::engagement::COVER_TITLE;
use super::LaidOutReport;

pub const OBJECTIVES: &str = "Objectives";
pub const SCOPE: &str = "Scope of Project";
pub const TESTING_QA: &str = "Software Testing and Quality Assurance";
pub const SPECIFICATIONS: &str = "Specifications and Schedule";
pub const TOOLSET: &str = "Toolset Used";
pub const PERSONAL_DETAILS: &str = "Personal Details";

/// Section headings in document order.
pub const SECTIONS: [&str; 6] = [
    OBJECTIVES,
    SCOPE,
    TESTING_QA,
    SPECIFICATIONS,
    TOOLSET,
    PERSONAL_DETAILS,
];

/// 0-based index of the contents page.
pub const TOC_PAGE_INDEX: usize = 1;

fn point_texts(points: &[Point]) -> Vec<String> {
    points.iter().map(|p| p.point.clone()).collect()
}

/// Draw a section heading and note which page it landed on.
fn section(c: &mut Composer<'_>, sections: &mut SectionPageMap, title: &str, keep_with: f64) {
    let page = chrome::heading(c, title, keep_with);
    sections.record(title, page);
}

pub fn layout(data: &PprData, assets: &Assets, config: &LayoutConfig, today: NaiveDate) -> LaidOutReport {
    let mut c = Composer::new(config);
    let mut sections = SectionPageMap::new();
    let line = config.line_height;

    chrome::cover_page(
        &mut c,
        &Cover {
            title: COVER_TITLE,
            subtitle: ReportKind::Ppr.title(),
            student_name: &data.student_name,
            roll_no: &data.roll_no,
            guided_by: &data.guided_by,
            department: &data.department,
        },
        assets.logo.as_ref(),
    );

    // Contents placeholder, filled in once section pages are known.
    c.new_page();
    c.new_page();

    section(&mut c, &mut sections, OBJECTIVES, config.field_spacing + line);
    for objective in &data.objectives {
        chrome::subheading(&mut c, &objective.title, line);
        chrome::bullet_list(&mut c, &objective.points);
        c.advance(config.paragraph_gap);
    }

    section(&mut c, &mut sections, SCOPE, line);
    chrome::bullet_list(&mut c, &point_texts(&data.scope_points));
    c.advance(config.paragraph_gap);

    section(&mut c, &mut sections, TESTING_QA, config.field_spacing + line);
    chrome::subheading(&mut c, "Software Testing", line);
    chrome::bullet_list(&mut c, &point_texts(&data.testing_points));
    chrome::subheading(&mut c, "Quality Assurance", line);
    chrome::bullet_list(&mut c, &point_texts(&data.qa_points));
    c.advance(config.paragraph_gap);

    section(&mut c, &mut sections, SPECIFICATIONS, line);
    chrome::paragraph(&mut c, &data.specifications);
    if let Some(image) = &assets.schedule_image {
        let page = c.page();
        let (mut width, mut height) = image.fit_width(page.content_width());
        if height > page.content_height() {
            width *= page.content_height() / height;
            height = page.content_height();
        }
        c.ensure_space(height);
        let top = c.y();
        c.image(page.margin.left, top, width, height, Some(image));
        c.advance(height + config.paragraph_gap);
    }

    let table_config = &config.schedule_table;
    section(
        &mut c,
        &mut sections,
        TOOLSET,
        table_config.header_height + table_config.min_row_height,
    );
    let page = c.page();
    let table = Table::two_column(
        table_config,
        page.margin.left,
        page.content_width(),
        ["Category", "Tools"],
        config.repeat_table_headers,
    );
    let rows: Vec<Vec<String>> = data
        .toolset
        .iter()
        .map(|t| vec![t.name.clone(), t.tools.join(", ")])
        .collect();
    table.layout(&mut c, &rows);
    c.advance(config.paragraph_gap);

    section(&mut c, &mut sections, PERSONAL_DETAILS, config.field_spacing);
    let details = &data.personal_details;
    chrome::field(&mut c, "Address of Stay", &details.address);
    chrome::field(&mut c, "Distance from Company", &details.distance);
    chrome::field(&mut c, "Mode of Transport", &details.transport);

    chrome::signature_block(
        &mut c,
        &[SignatureLine::new(
            chrome::date_line(&display_date_or(&data.date, today)),
            true,
            config.signature_gap,
        )],
    );

    let pages = c.finish();
    debug!("ppr first pass: {} pages, {} sections", pages.len(), sections.len());
    let pages = fill_toc(pages, TOC_PAGE_INDEX, &sections, config);

    LaidOutReport {
        kind: ReportKind::Ppr,
        pages,
        sections: Some(sections),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::font::Font;
    use crate::image_loader::load_image_bytes;
    use crate::layout::{baseline_offset, DrawCommand, LayoutElement};
    use crate::model::{Objective, PersonalDetails, ToolsetCategory};

    fn data() -> PprData {
        PprData {
            student_name: "Asha Patel".to_string(),
            roll_no: "21BCE001".to_string(),
            guided_by: "Dr. R. Mehta".to_string(),
            department: "Computer Science Engineering".to_string(),
            objectives: vec![
                Objective {
                    title: "Automate invoicing".to_string(),
                    points: vec!["Generate invoices from shipments".to_string()],
                },
                Objective {
                    title: "Reduce manual entry".to_string(),
                    points: vec!["Import carrier rate cards".to_string()],
                },
            ],
            scope_points: vec![Point {
                point: "Billing module of the carrier portal".to_string(),
            }],
            testing_points: vec![Point {
                point: "Unit tests for rate calculation".to_string(),
            }],
            qa_points: vec![Point {
                point: "Code review on every merge request".to_string(),
            }],
            specifications: "Rust services behind a REST gateway.".to_string(),
            toolset: vec![ToolsetCategory {
                name: "Languages".to_string(),
                tools: vec!["Rust".to_string(), "TypeScript".to_string()],
            }],
            personal_details: PersonalDetails {
                address: "Hostel Block C".to_string(),
                distance: "12 km".to_string(),
                transport: "Bus".to_string(),
            },
            date: "2024-02-10".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
    }

    #[test]
    fn toc_page_numbers_match_heading_pages() {
        let report = layout(&data(), &Assets::default(), &LayoutConfig::default(), today());
        let sections = report.sections.as_ref().unwrap();
        assert_eq!(sections.len(), SECTIONS.len());
        for (title, page) in sections.entries() {
            assert!(report.pages[*page - 1].find_line(title).is_some());
            for earlier in &report.pages[TOC_PAGE_INDEX + 1..*page - 1] {
                assert!(earlier.find_line(title).is_none());
            }
        }
        let toc = &report.pages[TOC_PAGE_INDEX];
        for (title, page) in sections.entries() {
            let label = toc.find_line(title).unwrap();
            let number = toc
                .text_lines()
                .find(|l| l.y == label.y && l.text == page.to_string())
                .unwrap();
            assert!(number.x > label.x);
        }
    }

    #[test]
    fn sections_start_after_the_contents_page() {
        let report = layout(&data(), &Assets::default(), &LayoutConfig::default(), today());
        let sections = report.sections.unwrap();
        assert_eq!(sections.get(OBJECTIVES), Some(3));
        assert_eq!(report.pages[0].find_line("Asha Patel").unwrap().y, 130.0);
    }

    #[test]
    fn missing_schedule_image_leaves_no_gap() {
        let config = LayoutConfig::default();
        let report = layout(&data(), &Assets::default(), &config, today());
        let page_index = report.sections.as_ref().unwrap().get(SPECIFICATIONS).unwrap() - 1;
        let page = &report.pages[page_index];
        assert!(!page
            .elements
            .iter()
            .any(|e| matches!(e.draw, DrawCommand::Image { .. })));

        let body = Font::normal(config.font_sizes.body);
        let heading = Font::bold(config.font_sizes.heading);
        let body_line = page.find_line("Rust services behind a REST gateway.").unwrap();
        let toolset = page.find_line(TOOLSET).unwrap();
        let body_bottom = body_line.y - baseline_offset(config.line_height, body) + config.line_height;
        let toolset_top = toolset.y - baseline_offset(config.line_height + 2.0, heading);
        assert!((toolset_top - (body_bottom + config.paragraph_gap)).abs() < 1e-9);
    }

    #[test]
    fn layout_is_deterministic() {
        let config = LayoutConfig::default();
        let a = layout(&data(), &Assets::default(), &config, today());
        let b = layout(&data(), &Assets::default(), &config, today());
        assert_eq!(a.page_count(), b.page_count());
        assert_eq!(a.sections, b.sections);
    }

    fn schedule_chart(width_px: u32, height_px: u32) -> Assets {
        let chart = image::RgbImage::from_pixel(width_px, height_px, image::Rgb([40, 120, 200]));
        let mut png = Vec::new();
        image::DynamicImage::ImageRgb8(chart)
            .write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
            .unwrap();
        Assets::new().with_schedule_image(load_image_bytes(&png).unwrap())
    }

    fn chart_element(report: &LaidOutReport) -> (usize, &LayoutElement) {
        report
            .pages
            .iter()
            .enumerate()
            .find_map(|(i, p)| {
                p.elements
                    .iter()
                    .find(|e| matches!(e.draw, DrawCommand::Image { .. }))
                    .map(|e| (i + 1, e))
            })
            .unwrap()
    }

    fn assert_toc_entry_matches(report: &LaidOutReport, title: &str) {
        let page = report.sections.as_ref().unwrap().get(title).unwrap();
        assert!(report.pages[page - 1].find_line(title).is_some());
        let toc = &report.pages[TOC_PAGE_INDEX];
        let label = toc.find_line(title).unwrap();
        assert!(toc
            .text_lines()
            .any(|l| l.y == label.y && l.text == page.to_string()));
    }

    #[test]
    fn schedule_chart_moves_whole_to_the_next_page() {
        let config = LayoutConfig::default();
        // 158.75 x 238.125 mm at 96 dpi: fits a fresh page, not the rest of one.
        let report = layout(&data(), &schedule_chart(600, 900), &config, today());
        let specs_page = report.sections.as_ref().unwrap().get(SPECIFICATIONS).unwrap();
        let (page, chart) = chart_element(&report);

        assert_eq!(page, specs_page + 1);
        assert!((chart.y - config.page.margin.top).abs() < 1e-9);
        assert!((chart.width - 158.75).abs() < 1e-9);
        assert!((chart.height - 238.125).abs() < 1e-9);

        let toolset = report.sections.as_ref().unwrap().get(TOOLSET).unwrap();
        assert!(toolset >= page);
        assert_toc_entry_matches(&report, TOOLSET);
        assert_toc_entry_matches(&report, PERSONAL_DETAILS);
    }

    #[test]
    fn schedule_chart_is_capped_to_the_content_area() {
        let config = LayoutConfig::default();
        let page = &config.page;
        // 317.5 x 635 mm natural size: scaled to the width, then capped by height.
        let report = layout(&data(), &schedule_chart(1200, 2400), &config, today());
        let (_, chart) = chart_element(&report);

        assert!(chart.width <= page.content_width() + 1e-9);
        assert!((chart.height - page.content_height()).abs() < 1e-9);
        assert!((chart.width / chart.height - 0.5).abs() < 1e-9);
        assert!(chart.y + chart.height <= page.bottom_limit() + 1e-9);
        assert_toc_entry_matches(&report, TOOLSET);
        assert_toc_entry_matches(&report, PERSONAL_DETAILS);
    }
}
