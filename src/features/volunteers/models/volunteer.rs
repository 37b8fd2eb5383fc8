use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::users::models::Profile;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "volunteer_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VolunteerStatus {
    #[default]
    Active,
    Inactive,
}

/// Volunteer profile. A user holds at most one per disaster, and at most one
/// general profile (no disaster).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Volunteer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub disaster_id: Option<Uuid>,
    pub skills: Vec<String>,
    pub availability: String,
    pub location: String,
    pub contact_info: String,
    pub status: VolunteerStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVolunteer {
    pub user_id: Uuid,
    pub disaster_id: Option<Uuid>,
    pub skills: Vec<String>,
    pub availability: String,
    pub location: String,
    pub contact_info: String,
}

#[derive(Debug, Clone, Default)]
pub struct VolunteerPatch {
    pub skills: Option<Vec<String>>,
    pub availability: Option<String>,
    pub location: Option<String>,
    pub contact_info: Option<String>,
    pub status: Option<VolunteerStatus>,
}

impl Volunteer {
    pub fn apply(&mut self, patch: VolunteerPatch) {
        if let Some(skills) = patch.skills {
            self.skills = skills;
        }
        if let Some(availability) = patch.availability {
            self.availability = availability;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(contact_info) = patch.contact_info {
            self.contact_info = contact_info;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VolunteerFilter {
    pub user_id: Option<Uuid>,
    pub status: Option<VolunteerStatus>,
}

impl VolunteerFilter {
    pub fn matches(&self, volunteer: &Volunteer) -> bool {
        self.user_id.is_none_or(|id| volunteer.user_id == id)
            && self.status.is_none_or(|s| volunteer.status == s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolunteerWithProfile {
    pub volunteer: Volunteer,
    pub profile: Option<Profile>,
}
