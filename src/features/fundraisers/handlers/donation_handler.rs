use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::fundraisers::dtos::{
    CreateDonationDto, DonationListQuery, DonationResponseDto,
};
use crate::features::fundraisers::services::FundraiserService;
use crate::shared::types::{ApiResponse, Meta};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

/// Donate money or goods to a fundraiser
#[utoipa::path(
    post,
    path = "/api/donations",
    request_body = CreateDonationDto,
    responses(
        (status = 201, description = "Donation recorded", body = ApiResponse<DonationResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "fundraisers",
    security(("bearer_auth" = []))
)]
pub async fn create_donation(
    user: AuthenticatedUser,
    State(service): State<Arc<FundraiserService>>,
    AppJson(dto): AppJson<CreateDonationDto>,
) -> Result<(StatusCode, Json<ApiResponse<DonationResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let donation = service.donate(user.user_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(donation),
            Some("Thank you for your donation".to_string()),
            None,
        )),
    ))
}

/// The caller's donations
#[utoipa::path(
    get,
    path = "/api/donations/mine",
    responses(
        (status = 200, description = "Donations retrieved", body = ApiResponse<Vec<DonationResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "fundraisers",
    security(("bearer_auth" = []))
)]
pub async fn list_my_donations(
    user: AuthenticatedUser,
    State(service): State<Arc<FundraiserService>>,
) -> Result<Json<ApiResponse<Vec<DonationResponseDto>>>> {
    let donations = service.list_my_donations(user.user_id).await?;
    let meta = Meta::total_of(&donations);
    Ok(Json(ApiResponse::success(Some(donations), None, Some(meta))))
}

/// All donations, optionally for one fundraiser (admin)
#[utoipa::path(
    get,
    path = "/api/admin/donations",
    params(DonationListQuery),
    responses(
        (status = 200, description = "Donations retrieved", body = ApiResponse<Vec<DonationResponseDto>>),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-fundraisers",
    security(("bearer_auth" = []))
)]
pub async fn list_all_donations(
    _admin: RequireAdmin,
    State(service): State<Arc<FundraiserService>>,
    Query(query): Query<DonationListQuery>,
) -> Result<Json<ApiResponse<Vec<DonationResponseDto>>>> {
    let donations = service.list_donations(query.fundraiser_id).await?;
    let meta = Meta::total_of(&donations);
    Ok(Json(ApiResponse::success(Some(donations), None, Some(meta))))
}
