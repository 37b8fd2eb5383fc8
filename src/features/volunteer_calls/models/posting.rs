use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::status::Severity;

/// An open call for volunteer labour that volunteers apply to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerCallPosting {
    pub id: Uuid,
    pub disaster_name: String,
    pub disaster_location: String,
    pub description: Option<String>,
    pub volunteers_needed: i32,
    pub priority_level: Severity,
    pub call_date: NaiveDate,
    pub required_skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPosting {
    pub disaster_name: String,
    pub disaster_location: String,
    pub description: Option<String>,
    pub volunteers_needed: i32,
    pub priority_level: Severity,
    pub call_date: NaiveDate,
    pub required_skills: Vec<String>,
}
