use serde::Serialize;
use utoipa::ToSchema;

use crate::features::requests::dtos::RequestResponseDto;
use crate::features::resources::dtos::ResourceResponseDto;
use crate::shared::view_model::Notification;

/// Headline counts for the admin overview tab.
///
/// A collection that failed to load counts as zero and adds an entry to
/// `notices`.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct DashboardOverviewDto {
    pub total_users: i64,
    pub active_users: i64,
    pub active_disasters: i64,
    pub total_requests: i64,
    pub pending_requests: i64,
    pub total_volunteers: i64,
    pub active_volunteers: i64,
    pub total_resources: i64,
    pub out_of_stock_resources: i64,
    pub total_fundraisers: i64,
    pub pending_fundraisers: i64,
    pub total_donations: i64,
    pub total_reports: i64,
    pub notices: Vec<Notification>,
}

/// Result of adding stock from the dashboard. On failure `created` is null,
/// `resources` is the list as loaded before the attempt and `notices` says
/// why.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResourceQuickAddDto {
    pub created: Option<ResourceResponseDto>,
    pub resources: Vec<ResourceResponseDto>,
    pub notices: Vec<Notification>,
}

/// Request list after a dashboard status change, with its notices.
#[derive(Debug, Serialize, ToSchema)]
pub struct RequestReviewDto {
    pub updated: bool,
    pub requests: Vec<RequestResponseDto>,
    pub notices: Vec<Notification>,
}
