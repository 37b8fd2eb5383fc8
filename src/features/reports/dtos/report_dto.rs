use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::{Report, ReportWithProfile};
use crate::features::users::models::Profile;
use crate::shared::validation::not_blank;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReportDto {
    #[validate(length(max = 10000), custom(function = "not_blank"))]
    pub report: String,

    /// Defaults to "Field Report"
    #[validate(length(max = 100))]
    pub report_type: Option<String>,

    /// Victim request this report is about
    pub request_id: Option<Uuid>,

    /// Volunteer registration this report is about
    pub volunteer_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub report: String,
    pub report_type: Option<String>,
    pub report_date: DateTime<Utc>,
    pub request_id: Option<Uuid>,
    pub volunteer_id: Option<Uuid>,
    /// Author's profile; null when it could not be resolved
    pub profile: Option<Profile>,
}

impl ReportResponseDto {
    fn build(report: Report, profile: Option<Profile>) -> Self {
        Self {
            id: report.id,
            user_id: report.user_id,
            report: report.report,
            report_type: report.report_type,
            report_date: report.report_date,
            request_id: report.request_id,
            volunteer_id: report.volunteer_id,
            profile,
        }
    }
}

impl From<Report> for ReportResponseDto {
    fn from(report: Report) -> Self {
        Self::build(report, None)
    }
}

impl From<ReportWithProfile> for ReportResponseDto {
    fn from(joined: ReportWithProfile) -> Self {
        Self::build(joined.report, joined.profile)
    }
}
