use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;

/// Review lifecycle shared by victim requests and fundraisers.
///
/// Admin triage offers `pending -> approved | rejected` and `approved -> completed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "review_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl ReviewStatus {
    /// Whether admin triage may move a record from `self` to `next`.
    /// Re-applying the current status is accepted.
    pub fn can_transition_to(self, next: ReviewStatus) -> bool {
        use ReviewStatus::*;
        self == next
            || matches!(
                (self, next),
                (Pending, Approved) | (Pending, Rejected) | (Approved, Completed)
            )
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewStatus::Pending => write!(f, "pending"),
            ReviewStatus::Approved => write!(f, "approved"),
            ReviewStatus::Rejected => write!(f, "rejected"),
            ReviewStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Urgency of a victim request, severity of a disaster, priority of a call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "severity_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}
