use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::status::ReviewStatus;

/// A funding campaign.
///
/// `current_amount` is derived: it always equals the sum of money-type donations
/// recorded against the fundraiser and is only changed by `record_donation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Fundraiser {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub goal_amount: Decimal,
    pub current_amount: Decimal,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewFundraiser {
    pub title: String,
    pub description: String,
    pub goal_amount: Decimal,
    pub status: ReviewStatus,
    pub end_date: Option<DateTime<Utc>>,
}

/// Partial update; `current_amount` is not patchable
#[derive(Debug, Clone, Default)]
pub struct FundraiserPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub goal_amount: Option<Decimal>,
    pub status: Option<ReviewStatus>,
    pub end_date: Option<DateTime<Utc>>,
}

impl Fundraiser {
    pub fn apply(&mut self, patch: FundraiserPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(goal_amount) = patch.goal_amount {
            self.goal_amount = goal_amount;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if patch.end_date.is_some() {
            self.end_date = patch.end_date;
        }
    }

    /// Raised share of the goal in percent, capped at 100 and rounded to 2 places.
    pub fn progress_percent(&self) -> Decimal {
        if self.goal_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        // Only a raised amount far beyond any goal overflows the product.
        let percent = self
            .current_amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.checked_div(self.goal_amount))
            .unwrap_or(Decimal::ONE_HUNDRED);
        percent.min(Decimal::ONE_HUNDRED).round_dp(2)
    }
}
