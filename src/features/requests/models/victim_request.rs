use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::users::models::Profile;
use crate::shared::status::{ReviewStatus, Severity};

/// A victim's request for help
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VictimRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub location: String,
    pub description: String,
    pub urgency: Severity,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new victim request
#[derive(Debug, Clone)]
pub struct NewVictimRequest {
    pub user_id: Uuid,
    pub name: String,
    pub location: String,
    pub description: String,
    pub urgency: Severity,
    pub status: ReviewStatus,
}

#[derive(Debug, Clone, Default)]
pub struct VictimRequestPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub urgency: Option<Severity>,
    pub status: Option<ReviewStatus>,
}

impl VictimRequest {
    pub fn apply(&mut self, patch: VictimRequestPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(urgency) = patch.urgency {
            self.urgency = urgency;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    pub user_id: Option<Uuid>,
    pub status: Option<ReviewStatus>,
}

impl RequestFilter {
    pub fn matches(&self, request: &VictimRequest) -> bool {
        self.user_id.is_none_or(|id| request.user_id == id)
            && self.status.is_none_or(|s| request.status == s)
    }
}

/// Victim request joined with the submitter's profile (absent when the profile row is missing)
#[derive(Debug, Clone, PartialEq)]
pub struct VictimRequestWithProfile {
    pub request: VictimRequest,
    pub profile: Option<Profile>,
}
