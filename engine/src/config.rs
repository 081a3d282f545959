//! # Layout Configuration
//!
//! Every constant the report layouts depend on: page geometry, font sizes,
//! line heights, table metrics, gaps and page-break tuning. The defaults are
//! tuned against typical form content; deployments can override any subset
//! from a TOML or JSON file, missing keys keep their default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FolioError;
use crate::model::PageConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page: PageConfig,
    pub letterhead: Letterhead,
    pub font_sizes: FontSizes,

    /// Baseline-to-baseline distance for body paragraphs and list items (mm).
    pub line_height: f64,
    /// Vertical distance between labeled field rows (mm).
    pub field_spacing: f64,
    /// Offset of the `:` separator from the left margin (mm). Values start
    /// 5mm after it.
    pub label_width: f64,
    /// Space after a section heading before its content (mm).
    pub heading_gap: f64,
    /// Space between list items (mm).
    pub item_gap: f64,
    /// Space between a paragraph and whatever follows (mm).
    pub paragraph_gap: f64,
    /// Indent for bulleted and numbered list text (mm).
    pub list_indent: f64,
    /// Gap between the last content block and a signature block (mm).
    pub signature_gap: f64,

    /// Table metrics for the worksheet's DATE | TASK table.
    pub worksheet_table: TableConfig,
    /// Table metrics for the Week | Task and Category | Tools tables.
    pub schedule_table: TableConfig,

    pub logo: LogoPlacement,

    /// Row pitch of table-of-contents entries (mm).
    pub toc_row_height: f64,
    /// Dot leaders never shrink below this many dots.
    pub toc_min_dots: usize,

    /// Minimum lines left at the bottom of a page when a tall paragraph splits.
    pub min_orphan_lines: usize,
    /// Minimum lines carried to the next page when a tall paragraph splits.
    pub min_widow_lines: usize,

    /// Redraw a table's header row at the top of continuation pages.
    pub repeat_table_headers: bool,
    /// Draw "Page N of M" on every page except the cover.
    pub page_numbers: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            letterhead: Letterhead::default(),
            font_sizes: FontSizes::default(),
            line_height: 6.0,
            field_spacing: 10.0,
            label_width: 60.0,
            heading_gap: 15.0,
            item_gap: 2.0,
            paragraph_gap: 4.0,
            list_indent: 6.0,
            signature_gap: 20.0,
            worksheet_table: TableConfig {
                first_column_width: 40.0,
                line_height: 6.0,
                padding: 4.0,
                inset: 5.0,
                min_row_height: 10.0,
                header_height: 10.0,
                font_size: 12.0,
                header_fill: [240, 240, 240],
                body_fill: None,
            },
            schedule_table: TableConfig {
                first_column_width: 40.0,
                line_height: 5.0,
                padding: 6.0,
                inset: 5.0,
                min_row_height: 15.0,
                header_height: 10.0,
                font_size: 11.0,
                header_fill: [230, 245, 245],
                body_fill: Some([245, 245, 245]),
            },
            logo: LogoPlacement::default(),
            toc_row_height: 10.0,
            toc_min_dots: 3,
            min_orphan_lines: 2,
            min_widow_lines: 2,
            repeat_table_headers: true,
            page_numbers: true,
        }
    }
}

/// Institution names printed on letterheads and cover pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Letterhead {
    pub university: String,
    pub institute: String,
    /// Department line of the letterhead (printed upper-case).
    pub department: String,
    pub city: String,
}

impl Default for Letterhead {
    fn default() -> Self {
        Self {
            university: "Nirma University".to_string(),
            institute: "Institute of Technology".to_string(),
            department: "Computer Science Engineering".to_string(),
            city: "Ahmedabad - 382481".to_string(),
        }
    }
}

/// Font sizes in points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub cover_title: f64,
    pub cover_subtitle: f64,
    pub cover_label: f64,
    pub cover_value: f64,
    pub cover_footer: f64,
    pub letterhead: f64,
    pub heading: f64,
    pub subheading: f64,
    pub body: f64,
    pub footer: f64,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            cover_title: 24.0,
            cover_subtitle: 20.0,
            cover_label: 16.0,
            cover_value: 14.0,
            cover_footer: 12.0,
            letterhead: 16.0,
            heading: 16.0,
            subheading: 13.0,
            body: 12.0,
            footer: 9.0,
        }
    }
}

/// Metrics for a two-column bordered table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Width of the left column; the right column takes the rest (mm).
    pub first_column_width: f64,
    pub line_height: f64,
    /// Vertical padding added to the wrapped text height (mm).
    pub padding: f64,
    /// Horizontal text inset on each side of a cell (mm).
    pub inset: f64,
    pub min_row_height: f64,
    pub header_height: f64,
    pub font_size: f64,
    pub header_fill: [u8; 3],
    pub body_fill: Option<[u8; 3]>,
}

/// Where the institutional logo sits on cover pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoPlacement {
    /// Top edge of the logo (mm from the top of the page).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for LogoPlacement {
    fn default() -> Self {
        Self {
            y: 190.0,
            width: 80.0,
            height: 40.0,
        }
    }
}

impl LayoutConfig {
    /// Parse a TOML configuration.
    pub fn from_toml_str(s: &str) -> Result<Self, FolioError> {
        let config: LayoutConfig =
            toml::from_str(s).map_err(|e| FolioError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON configuration.
    pub fn from_json_str(s: &str) -> Result<Self, FolioError> {
        let config: LayoutConfig =
            serde_json::from_str(s).map_err(|e| FolioError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file; `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn from_path(path: &Path) -> Result<Self, FolioError> {
        let contents = std::fs::read_to_string(path).map_err(|source| FolioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    /// Reject geometry that leaves no room for content.
    pub fn validate(&self) -> Result<(), FolioError> {
        if self.page.content_width() <= 0.0 || self.page.content_height() <= 0.0 {
            return Err(FolioError::Config(
                "page margins leave no content area".to_string(),
            ));
        }
        for (name, table) in [
            ("worksheet_table", &self.worksheet_table),
            ("schedule_table", &self.schedule_table),
        ] {
            if table.first_column_width + 2.0 * table.inset >= self.page.content_width() {
                return Err(FolioError::Config(format!(
                    "{}: first column leaves no room for the second",
                    name
                )));
            }
            if table.line_height <= 0.0 {
                return Err(FolioError::Config(format!("{}: line_height must be positive", name)));
            }
        }
        if self.line_height <= 0.0 {
            return Err(FolioError::Config("line_height must be positive".to_string()));
        }
        Ok(())
    }
}
