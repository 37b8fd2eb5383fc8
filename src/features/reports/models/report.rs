use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::users::models::Profile;

/// Free-text field activity report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    pub user_id: Uuid,
    pub report: String,
    pub report_type: Option<String>,
    pub report_date: DateTime<Utc>,
    pub request_id: Option<Uuid>,
    pub volunteer_id: Option<Uuid>,
}

/// Data for creating a new report; the store stamps `report_date`
#[derive(Debug, Clone)]
pub struct NewReport {
    pub user_id: Uuid,
    pub report: String,
    pub report_type: Option<String>,
    pub request_id: Option<Uuid>,
    pub volunteer_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub user_id: Option<Uuid>,
}

impl ReportFilter {
    pub fn matches(&self, report: &Report) -> bool {
        self.user_id.is_none_or(|id| report.user_id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportWithProfile {
    pub report: Report,
    pub profile: Option<Profile>,
}
