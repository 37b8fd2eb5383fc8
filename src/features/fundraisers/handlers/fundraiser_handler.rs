use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::fundraisers::dtos::{
    CreateFundraiserDto, FundraiserResponseDto, UpdateFundraiserStatusDto,
};
use crate::features::fundraisers::services::FundraiserService;
use crate::shared::types::{ApiResponse, Meta};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Approved fundraisers with progress
#[utoipa::path(
    get,
    path = "/api/fundraisers",
    responses(
        (status = 200, description = "Fundraisers retrieved", body = ApiResponse<Vec<FundraiserResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "fundraisers",
    security(("bearer_auth" = []))
)]
pub async fn list_fundraisers(
    State(service): State<Arc<FundraiserService>>,
) -> Result<Json<ApiResponse<Vec<FundraiserResponseDto>>>> {
    let fundraisers = service.list_approved().await?;
    let meta = Meta::total_of(&fundraisers);
    Ok(Json(ApiResponse::success(Some(fundraisers), None, Some(meta))))
}

/// All fundraisers (admin)
#[utoipa::path(
    get,
    path = "/api/admin/fundraisers",
    responses(
        (status = 200, description = "Fundraisers retrieved", body = ApiResponse<Vec<FundraiserResponseDto>>),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-fundraisers",
    security(("bearer_auth" = []))
)]
pub async fn list_all_fundraisers(
    _admin: RequireAdmin,
    State(service): State<Arc<FundraiserService>>,
) -> Result<Json<ApiResponse<Vec<FundraiserResponseDto>>>> {
    let fundraisers = service.list_all().await?;
    let meta = Meta::total_of(&fundraisers);
    Ok(Json(ApiResponse::success(Some(fundraisers), None, Some(meta))))
}

/// Start a fundraiser (admin)
#[utoipa::path(
    post,
    path = "/api/admin/fundraisers",
    request_body = CreateFundraiserDto,
    responses(
        (status = 201, description = "Fundraiser created", body = ApiResponse<FundraiserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-fundraisers",
    security(("bearer_auth" = []))
)]
pub async fn create_fundraiser(
    _admin: RequireAdmin,
    State(service): State<Arc<FundraiserService>>,
    AppJson(dto): AppJson<CreateFundraiserDto>,
) -> Result<(StatusCode, Json<ApiResponse<FundraiserResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let fundraiser = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(fundraiser),
            Some("Fundraiser created successfully".to_string()),
            None,
        )),
    ))
}

/// Approve, reject or complete a fundraiser (admin)
#[utoipa::path(
    patch,
    path = "/api/admin/fundraisers/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Fundraiser ID")
    ),
    request_body = UpdateFundraiserStatusDto,
    responses(
        (status = 200, description = "Fundraiser status updated", body = ApiResponse<FundraiserResponseDto>),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Fundraiser not found"),
        (status = 409, description = "Status transition not allowed")
    ),
    tag = "admin-fundraisers",
    security(("bearer_auth" = []))
)]
pub async fn update_fundraiser_status(
    _admin: RequireAdmin,
    State(service): State<Arc<FundraiserService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateFundraiserStatusDto>,
) -> Result<Json<ApiResponse<FundraiserResponseDto>>> {
    let fundraiser = service.update_status(id, dto.status).await?;
    Ok(Json(ApiResponse::success(
        Some(fundraiser),
        Some(format!("Fundraiser {}", dto.status)),
        None,
    )))
}
