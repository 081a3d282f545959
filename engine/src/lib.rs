//! # Folio
//!
//! A paginated PDF generator for academic internship reports.
//!
//! A submitted form is one immutable data object. Folio lays it out onto A4
//! pages and serializes those pages to PDF. Page boundaries are decided
//! while content is placed: every block goes through one cursor that knows
//! the bottom margin, so tables, headings and signatures are never sliced
//! after the fact.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON)
//!       ↓
//!   [model]    Report data per kind, page geometry
//!       ↓
//!   [reports]  One orchestrator per report kind
//!       ↓
//!   [layout]   Composer, page breaks, tables, table of contents
//!       ↓
//!   [pdf]      Serialize to PDF bytes
//! ```

pub mod config;
pub mod error;
pub mod font;
pub mod image_loader;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod reports;
pub mod style;
pub mod text;

#[cfg(feature = "wasm")]
pub mod wasm;

use chrono::{Local, NaiveDate};
use log::info;

pub use config::LayoutConfig;
pub use error::FolioError;
pub use image_loader::Assets;
pub use model::{Report, ReportKind};
pub use reports::{layout_report, LaidOutReport};

use pdf::{Metadata, PdfWriter};

/// Render a report to PDF bytes, dating empty signature dates today.
///
/// This is the primary entry point.
pub fn render(report: &Report, assets: &Assets, config: &LayoutConfig) -> Result<Vec<u8>, FolioError> {
    render_with_date(report, assets, config, Local::now().date_naive())
}

/// Render a report with an explicit generation date. Output depends only on
/// the arguments.
pub fn render_with_date(
    report: &Report,
    assets: &Assets,
    config: &LayoutConfig,
    today: NaiveDate,
) -> Result<Vec<u8>, FolioError> {
    let laid_out = layout_report(report, assets, config, today);
    let kind = report.kind();
    let metadata = Metadata {
        title: Some(kind.title().to_string()),
        author: Some(report.student_name().to_string()),
        creation_date: Some(today.format("D:%Y%m%d000000").to_string()),
    };
    let bytes = PdfWriter::new().write(&laid_out.pages, &metadata)?;
    info!(
        "rendered {} ({} pages, {} bytes)",
        kind.file_name(),
        laid_out.page_count(),
        bytes.len()
    );
    Ok(bytes)
}

/// Render a report whose data object is given as JSON.
pub fn render_json(
    kind: ReportKind,
    json: &str,
    assets: &Assets,
    config: &LayoutConfig,
) -> Result<Vec<u8>, FolioError> {
    let report = Report::from_json(kind, json).map_err(FolioError::from)?;
    render(&report, assets, config)
}
