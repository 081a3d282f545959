//! # Report Layouts
//!
//! One orchestrator per report type. Each is a declarative sequence of
//! [`chrome`] calls and table layouts driven through a [`Composer`]; none of
//! them decide page breaks on their own.
//!
//! [`Composer`]: crate::layout::Composer

pub mod activity;
pub mod allotment;
pub mod chrome;
pub mod engagement;
pub mod ppr;
pub mod worksheet;

use chrono::NaiveDate;
use log::debug;

use crate::config::LayoutConfig;
use crate::image_loader::Assets;
use crate::layout::toc::SectionPageMap;
use crate::layout::{number_pages, LayoutPage};
use crate::model::{Report, ReportKind};

/// The pages of one report, ready to serialize.
#[derive(Debug, Clone)]
pub struct LaidOutReport {
    pub kind: ReportKind,
    pub pages: Vec<LayoutPage>,
    /// Where each section heading was drawn. Only reports with a table of
    /// contents track this.
    pub sections: Option<SectionPageMap>,
}

impl LaidOutReport {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// 1-based number of the first page with a line containing `needle`.
    pub fn page_containing(&self, needle: &str) -> Option<usize> {
        self.pages
            .iter()
            .position(|p| p.contains_text(needle))
            .map(|i| i + 1)
    }
}

/// Whether the report opens with a cover page.
pub fn has_cover(kind: ReportKind) -> bool {
    matches!(
        kind,
        ReportKind::Engagement | ReportKind::Allotment | ReportKind::Ppr
    )
}

/// Lay out any report. `today` fills in signature dates left empty.
pub fn layout_report(
    report: &Report,
    assets: &Assets,
    config: &LayoutConfig,
    today: NaiveDate,
) -> LaidOutReport {
    let mut laid_out = match report {
        Report::Worksheet(data) => worksheet::layout(data, config, today),
        Report::Engagement(data) => engagement::layout(data, assets, config, today),
        Report::Activity(data) => activity::layout(data, config, today),
        Report::Allotment(data) => allotment::layout(data, assets, config, today),
        Report::Ppr(data) => ppr::layout(data, assets, config, today),
    };

    if config.page_numbers {
        let first = if has_cover(laid_out.kind) { 1 } else { 0 };
        number_pages(&mut laid_out.pages, config, first);
    }
    debug!(
        "{} laid out on {} page(s)",
        laid_out.kind.name(),
        laid_out.page_count()
    );
    laid_out
}
