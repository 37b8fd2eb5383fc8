use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A quantity of a resource committed to a victim request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAllocation {
    pub id: Uuid,
    pub resource_id: Uuid,
    pub request_id: Uuid,
    pub quantity: i32,
    pub allocated_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAllocation {
    pub resource_id: Uuid,
    pub request_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, Default)]
pub struct AllocationFilter {
    pub resource_id: Option<Uuid>,
    pub request_id: Option<Uuid>,
}

impl AllocationFilter {
    pub fn matches(&self, allocation: &ResourceAllocation) -> bool {
        self.resource_id.is_none_or(|id| allocation.resource_id == id)
            && self.request_id.is_none_or(|id| allocation.request_id == id)
    }
}
