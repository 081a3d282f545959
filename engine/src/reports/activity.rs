//! Project activity report: letterhead, student fields, bulleted weekly
//! activity, the working approach and a sign-off.

use chrono::NaiveDate;

use crate::config::LayoutConfig;
use crate::layout::Composer;
use crate::model::date::display_date_or;
use crate::model::{ActivityReportData, ReportKind};

use super::chrome::{self, SignatureLine};
use super::worksheet::SIGN_OFF;
use super::LaidOutReport;

pub const TITLE: &str = "PROJECT ACTIVITY REPORT (PAR)";
pub const APPROACH_HEADING: &str = "Working Approach";

pub fn layout(data: &ActivityReportData, config: &LayoutConfig, today: NaiveDate) -> LaidOutReport {
    let mut c = Composer::new(config);

    chrome::letterhead(&mut c, TITLE);
    chrome::field(&mut c, "NAME OF THE STUDENT", &data.student_name);
    chrome::field(&mut c, "ROLL NO.", &data.roll_no);
    chrome::field(&mut c, "NAME OF THE COMPANY", &data.company_name);
    chrome::field(&mut c, "DOC NO.", &data.doc_no);
    c.advance(config.paragraph_gap);

    for week in &data.weekly_content {
        chrome::subheading(&mut c, &week.week, config.line_height);
        chrome::bullet_list(&mut c, &week.content);
        c.advance(config.paragraph_gap);
    }

    chrome::heading(&mut c, APPROACH_HEADING, config.line_height);
    chrome::paragraph(&mut c, &data.working_approach);

    chrome::signature_block(
        &mut c,
        &[
            SignatureLine::new(SIGN_OFF, false, config.signature_gap),
            SignatureLine::new(
                chrome::date_line(&display_date_or(&data.date, today)),
                false,
                config.paragraph_gap,
            ),
        ],
    );

    LaidOutReport {
        kind: ReportKind::Activity,
        pages: c.finish(),
        sections: None,
    }
}
