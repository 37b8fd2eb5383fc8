use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::disasters::models::{Disaster, DisasterPatch, DisasterStatus};
use crate::shared::status::Severity;
use crate::shared::validation::not_blank;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDisasterDto {
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub name: String,

    #[validate(length(max = 500), custom(function = "not_blank"))]
    pub location: String,

    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,

    #[serde(default)]
    pub severity: Severity,

    #[serde(default)]
    pub status: DisasterStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDisasterDto {
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub name: Option<String>,

    #[validate(length(max = 500), custom(function = "not_blank"))]
    pub location: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    pub severity: Option<Severity>,
    pub status: Option<DisasterStatus>,
}

impl From<UpdateDisasterDto> for DisasterPatch {
    fn from(dto: UpdateDisasterDto) -> Self {
        Self {
            name: dto.name.map(|s| s.trim().to_string()),
            location: dto.location.map(|s| s.trim().to_string()),
            description: dto.description,
            severity: dto.severity,
            status: dto.status,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DisasterListQuery {
    pub status: Option<DisasterStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DisasterResponseDto {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub description: String,
    pub severity: Severity,
    pub status: DisasterStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Disaster> for DisasterResponseDto {
    fn from(disaster: Disaster) -> Self {
        Self {
            id: disaster.id,
            name: disaster.name,
            location: disaster.location,
            description: disaster.description,
            severity: disaster.severity,
            status: disaster.status,
            created_at: disaster.created_at,
        }
    }
}
