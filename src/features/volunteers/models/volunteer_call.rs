use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Outcome of an outbound contact attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "call_response_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CallResponseStatus {
    Available,
    Busy,
    NotReachable,
    #[default]
    Pending,
}

/// Log entry of an admin calling a volunteer about a disaster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerCall {
    pub id: Uuid,
    pub volunteer_id: Uuid,
    pub disaster_id: Option<Uuid>,
    pub called_by: Uuid,
    pub called_at: DateTime<Utc>,
    pub response_status: CallResponseStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewVolunteerCall {
    pub volunteer_id: Uuid,
    pub disaster_id: Option<Uuid>,
    pub called_by: Uuid,
    pub response_status: CallResponseStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VolunteerCallPatch {
    pub response_status: Option<CallResponseStatus>,
    pub notes: Option<String>,
}

impl VolunteerCall {
    pub fn apply(&mut self, patch: VolunteerCallPatch) {
        if let Some(status) = patch.response_status {
            self.response_status = status;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CallFilter {
    pub volunteer_id: Option<Uuid>,
    pub disaster_id: Option<Uuid>,
}

impl CallFilter {
    pub fn matches(&self, call: &VolunteerCall) -> bool {
        self.volunteer_id.is_none_or(|id| call.volunteer_id == id)
            && self.disaster_id.is_none_or(|id| call.disaster_id == Some(id))
    }
}
