use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::fundraisers::models::{Donation, DonationType};
use crate::shared::validation::positive_amount;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDonationDto {
    pub fundraiser_id: Uuid,

    /// Money amount, or item quantity for resource donations
    #[validate(custom(function = "positive_amount"))]
    #[schema(example = "50.00")]
    pub amount: Decimal,

    #[serde(rename = "type")]
    pub donation_type: DonationType,

    /// Required for resource donations
    #[validate(length(max = 255))]
    pub resource_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DonationListQuery {
    pub fundraiser_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DonationResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub fundraiser_id: Uuid,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub donation_type: DonationType,
    pub resource_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Donation> for DonationResponseDto {
    fn from(donation: Donation) -> Self {
        Self {
            id: donation.id,
            user_id: donation.user_id,
            fundraiser_id: donation.fundraiser_id,
            amount: donation.amount,
            donation_type: donation.donation_type,
            resource_name: donation.resource_name,
            created_at: donation.created_at,
        }
    }
}
