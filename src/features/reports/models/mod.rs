mod report;

pub use report::{NewReport, Report, ReportFilter, ReportWithProfile};
