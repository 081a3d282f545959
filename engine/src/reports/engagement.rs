//! Student engagement schedule: cover page, weekly task table, numbered
//! daily schedule and the project head's signature.

use chrono::NaiveDate;

use crate::config::LayoutConfig;
use crate::image_loader::Assets;
use crate::layout::table::Table;
use crate::layout::Composer;
use crate::model::date::display_date_or;
use crate::model::{EngagementData, ReportKind};

use super::chrome::{self, Cover};
use super::LaidOutReport;

pub const COVER_TITLE: &str = "Major Project";
pub const WEEKLY_HEADING: &str = "Week wise tasks";
pub const DAILY_HEADING: &str = "Daily Schedule";

pub fn layout(
    data: &EngagementData,
    assets: &Assets,
    config: &LayoutConfig,
    today: NaiveDate,
) -> LaidOutReport {
    let mut c = Composer::new(config);

    chrome::cover_page(
        &mut c,
        &Cover {
            title: COVER_TITLE,
            subtitle: ReportKind::Engagement.title(),
            student_name: &data.student_name,
            roll_no: &data.roll_no,
            guided_by: &data.guided_by,
            department: &data.department,
        },
        assets.logo.as_ref(),
    );

    c.new_page();
    let table_config = &config.schedule_table;
    chrome::heading(
        &mut c,
        WEEKLY_HEADING,
        table_config.header_height + table_config.min_row_height,
    );
    let page = c.page();
    let table = Table::two_column(
        table_config,
        page.margin.left,
        page.content_width(),
        ["Week", "Task"],
        config.repeat_table_headers,
    );
    let rows: Vec<Vec<String>> = data
        .weekly_tasks
        .iter()
        .map(|t| vec![t.week.clone(), t.task.clone()])
        .collect();
    table.layout(&mut c, &rows);

    c.new_page();
    chrome::heading(&mut c, DAILY_HEADING, config.line_height);
    let items: Vec<String> = data.daily_schedule.iter().map(|d| d.item.clone()).collect();
    chrome::numbered_list(&mut c, &items);

    chrome::head_signature(&mut c, &data.project_head, &display_date_or(&data.date, today));

    LaidOutReport {
        kind: ReportKind::Engagement,
        pages: c.finish(),
        sections: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DailyScheduleItem, ProjectHead, WeeklyTask};

    fn data(weeks: usize, items: usize) -> EngagementData {
        EngagementData {
            student_name: "Asha Patel".to_string(),
            roll_no: "21BCE001".to_string(),
            guided_by: "Dr. R. Mehta".to_string(),
            department: "Computer Science Engineering".to_string(),
            weekly_tasks: (1..=weeks)
                .map(|w| WeeklyTask {
                    week: format!("Week {}", w),
                    task: "Requirement gathering and design review".to_string(),
                })
                .collect(),
            daily_schedule: (1..=items)
                .map(|i| DailyScheduleItem {
                    item: format!("Stand-up and task planning, slot {}", i),
                })
                .collect(),
            date: "2024-03-05".to_string(),
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
    fn sections_start_on_their_own_pages() {
        let report = layout(&data(4, 3), &Assets::default(), &LayoutConfig::default(), today());
        assert_eq!(report.page_count(), 3);
        assert_eq!(report.page_containing(WEEKLY_HEADING), Some(2));
        assert_eq!(report.page_containing(DAILY_HEADING), Some(3));
        assert!(report.pages[2].texts().contains(&"1."));
        assert!(report.pages[2].contains_text("Date: 5 Mar 2024"));
    }

    #[test]
    fn long_schedule_spills_over() {
        let report = layout(&data(4, 60), &Assets::default(), &LayoutConfig::default(), today());
        assert!(report.page_count() > 3);
        assert!(report.pages.last().unwrap().contains_text("Prof. K. Shah"));
    }
}
