//! Project allotment letter: cover page, allotment details, company profile,
//! numbered project definition and the project head's signature.

use chrono::NaiveDate;

use crate::config::LayoutConfig;
use crate::image_loader::Assets;
use crate::layout::Composer;
use crate::model::date::{display_date, display_date_or};
use crate::model::{AllotmentData, InternshipDuration, ReportKind};

use super::chrome::{self, Cover};
use super::engagement::COVER_TITLE;
use super::LaidOutReport;

pub const DETAILS_HEADING: &str = "Project Allotment Details";
pub const ABOUT_HEADING: &str = "About the Company";
pub const DEFINITION_HEADING: &str = "Project Definition";

/// `5 Mar 2024 to 31 May 2024`
pub fn duration_text(duration: &InternshipDuration) -> String {
    format!(
        "{} to {}",
        display_date(&duration.start),
        display_date(&duration.end)
    )
}

pub fn layout(
    data: &AllotmentData,
    assets: &Assets,
    config: &LayoutConfig,
    today: NaiveDate,
) -> LaidOutReport {
    let mut c = Composer::new(config);

    chrome::cover_page(
        &mut c,
        &Cover {
            title: COVER_TITLE,
            subtitle: ReportKind::Allotment.title(),
            student_name: &data.student_name,
            roll_no: &data.roll_no,
            guided_by: &data.guided_by,
            department: &data.department,
        },
        assets.logo.as_ref(),
    );

    c.new_page();
    chrome::heading(&mut c, DETAILS_HEADING, config.field_spacing);
    chrome::field(&mut c, "Company Name", &data.company_name);
    match data.company_address.new.as_deref().map(str::trim) {
        Some(new) if !new.is_empty() => {
            chrome::field(&mut c, "Old Address", &data.company_address.old);
            chrome::field(&mut c, "New Address", new);
        }
        _ => chrome::field(&mut c, "Company Address", &data.company_address.old),
    }
    chrome::field(
        &mut c,
        "Internship Duration",
        &duration_text(&data.internship_duration),
    );
    c.advance(config.paragraph_gap);

    chrome::heading(&mut c, ABOUT_HEADING, config.line_height);
    chrome::paragraph(&mut c, &data.about_company);

    chrome::heading(&mut c, DEFINITION_HEADING, config.line_height);
    let points: Vec<String> = data.project_points.iter().map(|p| p.point.clone()).collect();
    chrome::numbered_list(&mut c, &points);

    chrome::head_signature(&mut c, &data.project_head, &display_date_or(&data.date, today));

    LaidOutReport {
        kind: ReportKind::Allotment,
        pages: c.finish(),
        sections: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CompanyAddress, Point, ProjectHead};

    fn data(new_address: Option<&str>) -> AllotmentData {
        AllotmentData {
            student_name: "Asha Patel".to_string(),
            roll_no: "21BCE001".to_string(),
            guided_by: "Dr. R. Mehta".to_string(),
            department: "Computer Science Engineering".to_string(),
            company_name: "Acme Systems".to_string(),
            company_address: CompanyAddress {
                old: "12 Old Road, Ahmedabad".to_string(),
                new: new_address.map(str::to_string),
            },
            internship_duration: InternshipDuration {
                start: "2024-01-08".to_string(),
                end: "2024-05-31".to_string(),
            },
            about_company: "Acme builds logistics software for regional carriers.".to_string(),
            project_points: vec![
                Point {
                    point: "Design the shipment tracking API".to_string(),
                },
                Point {
                    point: "Build the operator dashboard".to_string(),
                },
            ],
            date: "2024-01-05".to_string(),
            project_head: ProjectHead {
                name: "Prof. K. Shah".to_string(),
                designation: "Project Head".to_string(),
            },
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
    }

    #[test]
    fn duration_reads_start_to_end() {
        let d = data(None);
        assert_eq!(duration_text(&d.internship_duration), "8 Jan 2024 to 31 May 2024");
    }

    #[test]
    fn single_address_without_new() {
        let report = layout(&data(None), &Assets::default(), &LayoutConfig::default(), today());
        let page = &report.pages[1];
        assert!(page.contains_text("Company Address"));
        assert!(!page.contains_text("New Address"));
        assert!(page.texts().contains(&"2."));
    }

    #[test]
    fn old_and_new_addresses() {
        let report = layout(
            &data(Some("Tower B, SG Highway")),
            &Assets::default(),
            &LayoutConfig::default(),
            today(),
        );
        let page = &report.pages[1];
        assert!(page.contains_text("Old Address"));
        assert!(page.contains_text("Tower B, SG Highway"));
        assert!(page.contains_text(DEFINITION_HEADING));
        assert!(page.contains_text("Date: 5 Jan 2024"));
    }
}
