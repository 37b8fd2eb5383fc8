use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "donation_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DonationType {
    Money,
    Resource,
}

/// A donation against a fundraiser. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub fundraiser_id: Uuid,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub donation_type: DonationType,
    pub resource_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDonation {
    pub user_id: Uuid,
    pub fundraiser_id: Uuid,
    pub amount: Decimal,
    pub donation_type: DonationType,
    pub resource_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DonationFilter {
    pub user_id: Option<Uuid>,
    pub fundraiser_id: Option<Uuid>,
}

impl DonationFilter {
    pub fn matches(&self, donation: &Donation) -> bool {
        self.user_id.is_none_or(|id| donation.user_id == id)
            && self.fundraiser_id.is_none_or(|id| donation.fundraiser_id == id)
    }
}
