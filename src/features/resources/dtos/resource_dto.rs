use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::resources::models::{Resource, ResourceAllocation, ResourcePatch};
use crate::shared::validation::not_blank;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateResourceDto {
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub name: String,

    #[validate(range(min = 0))]
    pub quantity: i32,

    #[validate(length(max = 50), custom(function = "not_blank"))]
    pub unit: String,

    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub category: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateResourceDto {
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub name: Option<String>,

    /// Stock on hand; may not be set below zero
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,

    #[validate(length(max = 50), custom(function = "not_blank"))]
    pub unit: Option<String>,

    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub category: Option<String>,
}

impl From<UpdateResourceDto> for ResourcePatch {
    fn from(dto: UpdateResourceDto) -> Self {
        Self {
            name: dto.name.map(|s| s.trim().to_string()),
            quantity: dto.quantity,
            unit: dto.unit.map(|s| s.trim().to_string()),
            category: dto.category.map(|s| s.trim().to_string()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResourceResponseDto {
    pub id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub unit: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Resource> for ResourceResponseDto {
    fn from(resource: Resource) -> Self {
        Self {
            id: resource.id,
            name: resource.name,
            quantity: resource.quantity,
            unit: resource.unit,
            category: resource.category,
            created_at: resource.created_at,
            updated_at: resource.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AllocateResourceDto {
    pub resource_id: Uuid,
    pub request_id: Uuid,

    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AllocationListQuery {
    pub resource_id: Option<Uuid>,
    pub request_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AllocationResponseDto {
    pub id: Uuid,
    pub resource_id: Uuid,
    pub request_id: Uuid,
    pub quantity: i32,
    pub allocated_date: DateTime<Utc>,
}

impl From<ResourceAllocation> for AllocationResponseDto {
    fn from(allocation: ResourceAllocation) -> Self {
        Self {
            id: allocation.id,
            resource_id: allocation.resource_id,
            request_id: allocation.request_id,
            quantity: allocation.quantity,
            allocated_date: allocation.allocated_date,
        }
    }
}
