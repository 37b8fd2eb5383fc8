use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::requests::dtos::{
    CreateRequestDto, RequestListQuery, RequestResponseDto, UpdateRequestStatusDto,
};
use crate::features::requests::services::RequestService;
use crate::shared::types::{ApiResponse, Meta};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Submit a request for help
#[utoipa::path(
    post,
    path = "/api/requests",
    request_body = CreateRequestDto,
    responses(
        (status = 201, description = "Request submitted", body = ApiResponse<RequestResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "requests",
    security(("bearer_auth" = []))
)]
pub async fn create_request(
    user: AuthenticatedUser,
    State(service): State<Arc<RequestService>>,
    AppJson(dto): AppJson<CreateRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<RequestResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let request = service.create(user.user_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(request),
            Some("Your request has been submitted".to_string()),
            None,
        )),
    ))
}

/// List the caller's own requests
#[utoipa::path(
    get,
    path = "/api/requests/mine",
    responses(
        (status = 200, description = "Requests retrieved", body = ApiResponse<Vec<RequestResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "requests",
    security(("bearer_auth" = []))
)]
pub async fn list_my_requests(
    user: AuthenticatedUser,
    State(service): State<Arc<RequestService>>,
) -> Result<Json<ApiResponse<Vec<RequestResponseDto>>>> {
    let requests = service.list_mine(user.user_id).await?;
    let meta = Meta::total_of(&requests);
    Ok(Json(ApiResponse::success(Some(requests), None, Some(meta))))
}

/// List all requests with submitter profiles (admin)
#[utoipa::path(
    get,
    path = "/api/admin/requests",
    params(RequestListQuery),
    responses(
        (status = 200, description = "Requests retrieved", body = ApiResponse<Vec<RequestResponseDto>>),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-requests",
    security(("bearer_auth" = []))
)]
pub async fn list_all_requests(
    _admin: RequireAdmin,
    State(service): State<Arc<RequestService>>,
    Query(query): Query<RequestListQuery>,
) -> Result<Json<ApiResponse<Vec<RequestResponseDto>>>> {
    let requests = service.list_all(query.status).await?;
    let meta = Meta::total_of(&requests);
    Ok(Json(ApiResponse::success(Some(requests), None, Some(meta))))
}

/// Approve, reject or complete a request (admin)
#[utoipa::path(
    patch,
    path = "/api/admin/requests/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    request_body = UpdateRequestStatusDto,
    responses(
        (status = 200, description = "Request status updated", body = ApiResponse<RequestResponseDto>),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Status transition not allowed")
    ),
    tag = "admin-requests",
    security(("bearer_auth" = []))
)]
pub async fn update_request_status(
    _admin: RequireAdmin,
    State(service): State<Arc<RequestService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateRequestStatusDto>,
) -> Result<Json<ApiResponse<RequestResponseDto>>> {
    let request = service.update_status(id, dto.status).await?;
    Ok(Json(ApiResponse::success(
        Some(request),
        Some(format!("Request {}", dto.status)),
        None,
    )))
}
