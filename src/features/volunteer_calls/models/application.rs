use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::users::models::Profile;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    /// Applications are decided once: `pending -> accepted | rejected`.
    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        self == next || self == ApplicationStatus::Pending
    }
}

/// A volunteer's response to a posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerCallApplication {
    pub id: Uuid,
    pub call_id: Uuid,
    pub user_id: Uuid,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub call_id: Uuid,
    pub user_id: Uuid,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationPatch {
    pub status: Option<ApplicationStatus>,
    pub notes: Option<String>,
}

impl VolunteerCallApplication {
    pub fn apply(&mut self, patch: ApplicationPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub call_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

impl ApplicationFilter {
    pub fn matches(&self, application: &VolunteerCallApplication) -> bool {
        self.call_id.is_none_or(|id| application.call_id == id)
            && self.user_id.is_none_or(|id| application.user_id == id)
    }
}

/// Application merged client-side with the applicant's profile
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationWithProfile {
    pub application: VolunteerCallApplication,
    pub profiles: Option<Profile>,
}
