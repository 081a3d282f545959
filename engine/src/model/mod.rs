//! # Report Model
//!
//! The input representation for the layout engine. Each report type has its
//! own immutable schema, produced once by the form layer and never mutated
//! here. Field names match the form layer's JSON objects (camelCase), so a
//! submitted form deserializes directly.
//!
//! Page geometry also lives here. All lengths are millimetres; the PDF
//! serializer converts to points at the very end.

pub mod date;
pub mod samples;

use serde::{Deserialize, Serialize};

/// The five report types the engine knows how to lay out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    Worksheet,
    Engagement,
    Activity,
    Allotment,
    Ppr,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::Worksheet,
        ReportKind::Engagement,
        ReportKind::Activity,
        ReportKind::Allotment,
        ReportKind::Ppr,
    ];

    /// The fixed file name the generated document is saved under.
    pub fn file_name(&self) -> &'static str {
        match self {
            ReportKind::Worksheet => "daily_worksheet.pdf",
            ReportKind::Engagement => "student_engagement_schedule.pdf",
            ReportKind::Activity => "project_activity_report.pdf",
            ReportKind::Allotment => "project_allotment_letter.pdf",
            ReportKind::Ppr => "preliminary_project_information_report.pdf",
        }
    }

    /// Human-readable document title, used for the PDF /Title entry.
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Worksheet => "Daily Worksheet",
            ReportKind::Engagement => "Student Engagement Schedule",
            ReportKind::Activity => "Project Activity Report",
            ReportKind::Allotment => "Project Allotment Letter",
            ReportKind::Ppr => "Preliminary Project Information Report",
        }
    }

    /// Parse a kind from its kebab-case name (`"worksheet"`, `"ppr"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == name.trim().to_ascii_lowercase())
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::Worksheet => "worksheet",
            ReportKind::Engagement => "engagement",
            ReportKind::Activity => "activity",
            ReportKind::Allotment => "allotment",
            ReportKind::Ppr => "ppr",
        }
    }
}

/// One validated report, ready for layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum Report {
    Worksheet(WorksheetData),
    Engagement(EngagementData),
    Activity(ActivityReportData),
    Allotment(AllotmentData),
    Ppr(PprData),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Report::Worksheet(_) => ReportKind::Worksheet,
            Report::Engagement(_) => ReportKind::Engagement,
            Report::Activity(_) => ReportKind::Activity,
            Report::Allotment(_) => ReportKind::Allotment,
            Report::Ppr(_) => ReportKind::Ppr,
        }
    }

    /// Deserialize the bare data object of the given kind.
    pub fn from_json(kind: ReportKind, json: &str) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            ReportKind::Worksheet => Report::Worksheet(serde_json::from_str(json)?),
            ReportKind::Engagement => Report::Engagement(serde_json::from_str(json)?),
            ReportKind::Activity => Report::Activity(serde_json::from_str(json)?),
            ReportKind::Allotment => Report::Allotment(serde_json::from_str(json)?),
            ReportKind::Ppr => Report::Ppr(serde_json::from_str(json)?),
        })
    }

    /// The student the report belongs to, used as the PDF /Author.
    pub fn student_name(&self) -> &str {
        match self {
            Report::Worksheet(d) => &d.student_name,
            Report::Engagement(d) => &d.student_name,
            Report::Activity(d) => &d.student_name,
            Report::Allotment(d) => &d.student_name,
            Report::Ppr(d) => &d.student_name,
        }
    }
}

// ── Worksheet ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskEntry {
    /// ISO calendar date (`YYYY-MM-DD`).
    pub date: String,
    pub task: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetData {
    pub student_name: String,
    pub roll_no: String,
    pub company_name: String,
    #[serde(default)]
    pub doc_no: String,
    pub entries: Vec<TaskEntry>,
    /// Falls back to the generation date when empty.
    #[serde(default)]
    pub signature_date: String,
}

impl WorksheetData {
    /// Whether entry dates are strictly increasing. The form layer refuses to
    /// submit otherwise; layout itself does not check.
    pub fn dates_in_sequence(&self) -> bool {
        let dates: Vec<_> = self
            .entries
            .iter()
            .map(|e| date::parse_iso(&e.date))
            .collect();
        dates.windows(2).all(|w| match (w[0], w[1]) {
            (Some(a), Some(b)) => b > a,
            _ => false,
        })
    }
}

// ── Engagement schedule ────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTask {
    pub week: String,
    pub task: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyScheduleItem {
    pub item: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHead {
    pub name: String,
    pub designation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementData {
    pub student_name: String,
    pub roll_no: String,
    pub guided_by: String,
    pub department: String,
    pub weekly_tasks: Vec<WeeklyTask>,
    pub daily_schedule: Vec<DailyScheduleItem>,
    pub date: String,
    pub project_head: ProjectHead,
}

// ── Activity report ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyContent {
    pub week: String,
    pub content: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityReportData {
    pub student_name: String,
    pub roll_no: String,
    pub company_name: String,
    #[serde(default)]
    pub doc_no: String,
    pub weekly_content: Vec<WeeklyContent>,
    pub working_approach: String,
    pub date: String,
}

// ── Allotment letter ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyAddress {
    pub old: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipDuration {
    pub start: String,
    pub end: String,
}

/// A single point in a flat list (`{ "point": "..." }` on the wire).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub point: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllotmentData {
    pub student_name: String,
    pub roll_no: String,
    pub guided_by: String,
    pub department: String,
    pub company_name: String,
    pub company_address: CompanyAddress,
    pub internship_duration: InternshipDuration,
    pub about_company: String,
    pub project_points: Vec<Point>,
    pub date: String,
    pub project_head: ProjectHead,
}

// ── Preliminary project information report ─────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub title: String,
    pub points: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsetCategory {
    pub name: String,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    pub address: String,
    pub distance: String,
    pub transport: String,
}

/// PPR input. The schedule chart is not part of the data object: it is
/// decoded up front and passed to layout through [`crate::image_loader::Assets`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PprData {
    pub student_name: String,
    pub roll_no: String,
    pub guided_by: String,
    pub department: String,
    pub objectives: Vec<Objective>,
    pub scope_points: Vec<Point>,
    pub testing_points: Vec<Point>,
    pub qa_points: Vec<Point>,
    pub specifications: String,
    pub toolset: Vec<ToolsetCategory>,
    pub personal_details: PersonalDetails,
    pub date: String,
}

// ── Page geometry ──────────────────────────────────────────────

/// Configuration for a page: size and margins, in millimetres.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub size: PageSize,
    pub margin: Edges,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            margin: Edges {
                top: 20.0,
                right: 25.0,
                bottom: 20.0,
                left: 25.0,
            },
        }
    }
}

impl PageConfig {
    pub fn width(&self) -> f64 {
        self.size.dimensions().0
    }

    pub fn height(&self) -> f64 {
        self.size.dimensions().1
    }

    pub fn content_width(&self) -> f64 {
        self.width() - self.margin.horizontal()
    }

    /// The lowest y a block may reach before it has to move to a new page.
    pub fn bottom_limit(&self) -> f64 {
        self.height() - self.margin.bottom
    }

    /// Usable vertical space on a fresh page.
    pub fn content_height(&self) -> f64 {
        self.bottom_limit() - self.margin.top
    }
}

/// Standard A-series portrait page sizes in millimetres.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    A3,
    A5,
    Custom {
        width: f64,
        height: f64,
    },
}

impl PageSize {
    /// Returns (width, height) in millimetres.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::A3 => (297.0, 420.0),
            PageSize::A5 => (148.0, 210.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Edge values (top, right, bottom, left) used for margins.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }
}
