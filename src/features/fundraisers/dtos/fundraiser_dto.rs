use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::fundraisers::models::Fundraiser;
use crate::shared::status::ReviewStatus;
use crate::shared::validation::{not_blank, positive_amount};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFundraiserDto {
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,

    #[validate(custom(function = "positive_amount"))]
    #[schema(example = "1000.00")]
    pub goal_amount: Decimal,

    /// Defaults to pending
    #[serde(default)]
    pub status: ReviewStatus,

    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateFundraiserStatusDto {
    pub status: ReviewStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FundraiserResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub goal_amount: Decimal,
    pub current_amount: Decimal,
    /// Raised share of the goal, 0-100
    pub progress_percent: Decimal,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

impl From<Fundraiser> for FundraiserResponseDto {
    fn from(fundraiser: Fundraiser) -> Self {
        let progress_percent = fundraiser.progress_percent();
        Self {
            id: fundraiser.id,
            title: fundraiser.title,
            description: fundraiser.description,
            goal_amount: fundraiser.goal_amount,
            current_amount: fundraiser.current_amount,
            progress_percent,
            status: fundraiser.status,
            created_at: fundraiser.created_at,
            end_date: fundraiser.end_date,
        }
    }
}
