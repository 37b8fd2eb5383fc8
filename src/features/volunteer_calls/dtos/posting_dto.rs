use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::Profile;
use crate::features::volunteer_calls::models::{
    ApplicationStatus, ApplicationWithProfile, VolunteerCallApplication, VolunteerCallPosting,
};
use crate::shared::status::Severity;
use crate::shared::validation::not_blank;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePostingDto {
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub disaster_name: String,

    #[validate(length(max = 500), custom(function = "not_blank"))]
    pub disaster_location: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 100000))]
    pub volunteers_needed: i32,

    #[serde(default)]
    pub priority_level: Severity,

    pub call_date: NaiveDate,

    #[serde(default)]
    #[validate(length(max = 50))]
    pub required_skills: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostingResponseDto {
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

impl From<VolunteerCallPosting> for PostingResponseDto {
    fn from(posting: VolunteerCallPosting) -> Self {
        Self {
            id: posting.id,
            disaster_name: posting.disaster_name,
            disaster_location: posting.disaster_location,
            description: posting.description,
            volunteers_needed: posting.volunteers_needed,
            priority_level: posting.priority_level,
            call_date: posting.call_date,
            required_skills: posting.required_skills,
            created_at: posting.created_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct ApplyDto {
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateApplicationStatusDto {
    pub status: ApplicationStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicationResponseDto {
    pub id: Uuid,
    pub call_id: Uuid,
    pub user_id: Uuid,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub applied_at: DateTime<Utc>,
    /// Applicant's profile; null when it could not be resolved
    pub profile: Option<Profile>,
}

impl ApplicationResponseDto {
    fn build(application: VolunteerCallApplication, profile: Option<Profile>) -> Self {
        Self {
            id: application.id,
            call_id: application.call_id,
            user_id: application.user_id,
            status: application.status,
            notes: application.notes,
            applied_at: application.applied_at,
            profile,
        }
    }
}

impl From<VolunteerCallApplication> for ApplicationResponseDto {
    fn from(application: VolunteerCallApplication) -> Self {
        Self::build(application, None)
    }
}

impl From<ApplicationWithProfile> for ApplicationResponseDto {
    fn from(joined: ApplicationWithProfile) -> Self {
        Self::build(joined.application, joined.profiles)
    }
}
