//! Sample inputs for each report kind, as the form layer would submit them.
//! Printed by `folio example <kind>`.

use super::ReportKind;

pub fn sample_json(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Worksheet => WORKSHEET,
        ReportKind::Engagement => ENGAGEMENT,
        ReportKind::Activity => ACTIVITY,
        ReportKind::Allotment => ALLOTMENT,
        ReportKind::Ppr => PPR,
    }
}

const WORKSHEET: &str = r##"{
  "studentName": "Asha Patel",
  "rollNo": "21BCE001",
  "companyName": "Acme Systems Pvt. Ltd.",
  "docNo": "DWS-07",
  "entries": [
    { "date": "2024-03-04", "task": "Set up the local development environment and cloned the billing service." },
    { "date": "2024-03-05", "task": "Reviewed the invoice generation module with the team lead." },
    { "date": "2024-03-06", "task": "Wrote unit tests for the tax calculation rules and fixed two rounding bugs found in review." }
  ],
  "signatureDate": "2024-03-08"
}
"##;

const ENGAGEMENT: &str = r##"{
  "studentName": "Asha Patel",
  "rollNo": "21BCE001",
  "guidedBy": "Dr. R. Mehta",
  "department": "Computer Science Engineering",
  "weeklyTasks": [
    { "week": "Week 1", "task": "Orientation and requirement gathering" },
    { "week": "Week 2", "task": "System design and database schema" },
    { "week": "Week 3", "task": "Implementation of the billing API" },
    { "week": "Week 4", "task": "Testing and deployment to staging" }
  ],
  "dailySchedule": [
    { "item": "09:30 Stand-up meeting with the development team" },
    { "item": "10:00 Development work on assigned tasks" },
    { "item": "16:30 Code review and daily progress update" }
  ],
  "date": "2024-01-05",
  "projectHead": { "name": "Prof. K. Shah", "designation": "Project Head" }
}
"##;

const ACTIVITY: &str = r##"{
  "studentName": "Asha Patel",
  "rollNo": "21BCE001",
  "companyName": "Acme Systems Pvt. Ltd.",
  "docNo": "PAR-02",
  "weeklyContent": [
    {
      "week": "Week 1",
      "content": [
        "Onboarding and environment setup",
        "Studied the service architecture documents"
      ]
    },
    {
      "week": "Week 2",
      "content": [
        "Implemented the invoice export endpoint",
        "Added integration tests for the export flow"
      ]
    }
  ],
  "workingApproach": "Work was planned in weekly sprints. Each task was estimated at the sprint start and reviewed with the mentor before merging.",
  "date": "2024-02-16"
}
"##;

const ALLOTMENT: &str = r##"{
  "studentName": "Asha Patel",
  "rollNo": "21BCE001",
  "guidedBy": "Dr. R. Mehta",
  "department": "Computer Science Engineering",
  "companyName": "Acme Systems Pvt. Ltd.",
  "companyAddress": {
    "old": "12 Old Road, Ahmedabad",
    "new": "Tower B, SG Highway, Ahmedabad"
  },
  "internshipDuration": { "start": "2024-01-08", "end": "2024-05-31" },
  "aboutCompany": "Acme Systems builds logistics and billing software for regional carriers.",
  "projectPoints": [
    { "point": "Design the shipment tracking API" },
    { "point": "Build the operator dashboard" },
    { "point": "Automate monthly invoice generation" }
  ],
  "date": "2024-01-05",
  "projectHead": { "name": "Prof. K. Shah", "designation": "Project Head" }
}
"##;

const PPR: &str = r##"{
  "studentName": "Asha Patel",
  "rollNo": "21BCE001",
  "guidedBy": "Dr. R. Mehta",
  "department": "Computer Science Engineering",
  "objectives": [
    {
      "title": "Automate invoicing",
      "points": [
        "Generate invoices from delivered shipments",
        "Email invoices to customers",
        "Track payment status per invoice"
      ]
    },
    {
      "title": "Reduce manual data entry",
      "points": ["Import carrier rate cards from spreadsheets"]
    }
  ],
  "scopePoints": [
    { "point": "Billing module of the carrier portal" },
    { "point": "Operator dashboard for invoice approval" }
  ],
  "testingPoints": [
    { "point": "Unit tests for rate calculation" },
    { "point": "End-to-end tests of the invoice flow" }
  ],
  "qaPoints": [
    { "point": "Code review on every merge request" }
  ],
  "specifications": "The system is built as Rust services behind a REST gateway, with a PostgreSQL database and a React front end.",
  "toolset": [
    { "name": "Languages", "tools": ["Rust", "TypeScript"] },
    { "name": "Infrastructure", "tools": ["PostgreSQL", "Docker"] }
  ],
  "personalDetails": {
    "address": "Hostel Block C, University Campus",
    "distance": "12 km",
    "transport": "Bus"
  },
  "date": "2024-02-10"
}
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Report;

    #[test]
    fn every_sample_parses_as_its_kind() {
        for kind in ReportKind::ALL {
            let report = Report::from_json(kind, sample_json(kind)).unwrap();
            assert_eq!(report.kind(), kind);
            assert_eq!(report.student_name(), "Asha Patel");
        }
    }
}
