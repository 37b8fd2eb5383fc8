use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::Profile;
use crate::features::volunteers::models::{Volunteer, VolunteerStatus, VolunteerWithProfile};
use crate::shared::validation::not_blank;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterVolunteerDto {
    /// Disaster to volunteer for; omit to join the general pool
    pub disaster_id: Option<Uuid>,

    #[serde(default)]
    #[validate(length(max = 50))]
    pub skills: Vec<String>,

    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub availability: String,

    #[validate(length(max = 500), custom(function = "not_blank"))]
    pub location: String,

    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub contact_info: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateVolunteerStatusDto {
    pub status: VolunteerStatus,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct VolunteerListQuery {
    pub status: Option<VolunteerStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VolunteerResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub disaster_id: Option<Uuid>,
    pub skills: Vec<String>,
    pub availability: String,
    pub location: String,
    pub contact_info: String,
    pub status: VolunteerStatus,
    pub created_at: DateTime<Utc>,
    pub profile: Option<Profile>,
}

impl VolunteerResponseDto {
    fn build(volunteer: Volunteer, profile: Option<Profile>) -> Self {
        Self {
            id: volunteer.id,
            user_id: volunteer.user_id,
            disaster_id: volunteer.disaster_id,
            skills: volunteer.skills,
            availability: volunteer.availability,
            location: volunteer.location,
            contact_info: volunteer.contact_info,
            status: volunteer.status,
            created_at: volunteer.created_at,
            profile,
        }
    }
}

impl From<Volunteer> for VolunteerResponseDto {
    fn from(volunteer: Volunteer) -> Self {
        Self::build(volunteer, None)
    }
}

impl From<VolunteerWithProfile> for VolunteerResponseDto {
    fn from(joined: VolunteerWithProfile) -> Self {
        Self::build(joined.volunteer, joined.profile)
    }
}
