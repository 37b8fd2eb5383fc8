use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::disasters::dtos::{
    CreateDisasterDto, DisasterListQuery, DisasterResponseDto, UpdateDisasterDto,
};
use crate::features::disasters::services::DisasterService;
use crate::shared::types::{ApiResponse, Meta};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// List disasters, optionally filtered by status
#[utoipa::path(
    get,
    path = "/api/disasters",
    params(DisasterListQuery),
    responses(
        (status = 200, description = "Disasters retrieved", body = ApiResponse<Vec<DisasterResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "disasters",
    security(("bearer_auth" = []))
)]
pub async fn list_disasters(
    State(service): State<Arc<DisasterService>>,
    Query(query): Query<DisasterListQuery>,
) -> Result<Json<ApiResponse<Vec<DisasterResponseDto>>>> {
    let disasters = service.list(query.status).await?;
    let meta = Meta::total_of(&disasters);
    Ok(Json(ApiResponse::success(Some(disasters), None, Some(meta))))
}

/// Register a disaster event (admin)
#[utoipa::path(
    post,
    path = "/api/admin/disasters",
    request_body = CreateDisasterDto,
    responses(
        (status = 201, description = "Disaster created", body = ApiResponse<DisasterResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-disasters",
    security(("bearer_auth" = []))
)]
pub async fn create_disaster(
    _admin: RequireAdmin,
    State(service): State<Arc<DisasterService>>,
    AppJson(dto): AppJson<CreateDisasterDto>,
) -> Result<(StatusCode, Json<ApiResponse<DisasterResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let disaster = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(disaster),
            Some("Disaster created successfully".to_string()),
            None,
        )),
    ))
}

/// Update a disaster (admin)
#[utoipa::path(
    patch,
    path = "/api/admin/disasters/{id}",
    params(
        ("id" = Uuid, Path, description = "Disaster ID")
    ),
    request_body = UpdateDisasterDto,
    responses(
        (status = 200, description = "Disaster updated", body = ApiResponse<DisasterResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Disaster not found")
    ),
    tag = "admin-disasters",
    security(("bearer_auth" = []))
)]
pub async fn update_disaster(
    _admin: RequireAdmin,
    State(service): State<Arc<DisasterService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateDisasterDto>,
) -> Result<Json<ApiResponse<DisasterResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let disaster = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(disaster),
        Some("Disaster updated successfully".to_string()),
        None,
    )))
}

/// List disasters (admin)
#[utoipa::path(
    get,
    path = "/api/admin/disasters",
    params(DisasterListQuery),
    responses(
        (status = 200, description = "Disasters retrieved", body = ApiResponse<Vec<DisasterResponseDto>>),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-disasters",
    security(("bearer_auth" = []))
)]
pub async fn admin_list_disasters(
    _admin: RequireAdmin,
    service: State<Arc<DisasterService>>,
    query: Query<DisasterListQuery>,
) -> Result<Json<ApiResponse<Vec<DisasterResponseDto>>>> {
    list_disasters(service, query).await
}
