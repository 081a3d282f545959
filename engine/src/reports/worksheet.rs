//! Daily worksheet: letterhead, student fields, a DATE | TASK table and the
//! engineer-in-charge sign-off.

use chrono::NaiveDate;
use log::warn;

use crate::config::LayoutConfig;
use crate::layout::table::Table;
use crate::layout::Composer;
use crate::model::date::{display_date, display_date_or};
use crate::model::{ReportKind, WorksheetData};

use super::chrome::{self, SignatureLine};
use super::LaidOutReport;

pub const TITLE: &str = "DAILY WORKSHEET (DWS)";
pub const SIGN_OFF: &str = "Sign of Engineer In-charge / Project";

pub fn layout(data: &WorksheetData, config: &LayoutConfig, today: NaiveDate) -> LaidOutReport {
    let mut c = Composer::new(config);

    chrome::letterhead(&mut c, TITLE);
    chrome::field(&mut c, "NAME OF THE STUDENT", &data.student_name);
    chrome::field(&mut c, "ROLL NO.", &data.roll_no);
    chrome::field(&mut c, "NAME OF THE COMPANY", &data.company_name);
    chrome::field(&mut c, "DOC NO.", &data.doc_no);
    c.advance(config.field_spacing);

    if !data.entries.is_empty() && !data.dates_in_sequence() {
        warn!("worksheet entries are not in strictly increasing date order");
    }

    let page = c.page();
    let table = Table::two_column(
        &config.worksheet_table,
        page.margin.left,
        page.content_width(),
        ["DATE", "TASK"],
        config.repeat_table_headers,
    );
    let rows: Vec<Vec<String>> = data
        .entries
        .iter()
        .map(|e| vec![display_date(&e.date), e.task.clone()])
        .collect();
    table.layout(&mut c, &rows);

    chrome::signature_block(
        &mut c,
        &[
            SignatureLine::new(SIGN_OFF, false, config.signature_gap),
            SignatureLine::new(
                chrome::date_line(&display_date_or(&data.signature_date, today)),
                false,
                config.paragraph_gap,
            ),
        ],
    );

    LaidOutReport {
        kind: ReportKind::Worksheet,
        pages: c.finish(),
        sections: None,
    }
}
