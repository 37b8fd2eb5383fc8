use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::requests::models::{VictimRequest, VictimRequestWithProfile};
use crate::features::users::models::Profile;
use crate::shared::status::{ReviewStatus, Severity};
use crate::shared::validation::not_blank;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRequestDto {
    /// Name of the person needing help
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub name: String,

    #[validate(length(max = 500), custom(function = "not_blank"))]
    pub location: String,

    #[validate(length(max = 5000), custom(function = "not_blank"))]
    pub description: String,

    #[serde(default)]
    pub urgency: Severity,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRequestStatusDto {
    pub status: ReviewStatus,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RequestListQuery {
    /// Only requests in this status
    pub status: Option<ReviewStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RequestResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub location: String,
    pub description: String,
    pub urgency: Severity,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Submitter's profile; null when the profile row is missing
    pub profile: Option<Profile>,
}

impl RequestResponseDto {
    fn build(request: VictimRequest, profile: Option<Profile>) -> Self {
        Self {
            id: request.id,
            user_id: request.user_id,
            name: request.name,
            location: request.location,
            description: request.description,
            urgency: request.urgency,
            status: request.status,
            created_at: request.created_at,
            updated_at: request.updated_at,
            profile,
        }
    }
}

impl From<VictimRequest> for RequestResponseDto {
    fn from(request: VictimRequest) -> Self {
        Self::build(request, None)
    }
}

impl From<VictimRequestWithProfile> for RequestResponseDto {
    fn from(joined: VictimRequestWithProfile) -> Self {
        Self::build(joined.request, joined.profile)
    }
}
