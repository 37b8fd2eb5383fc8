use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::resources::dtos::{
    AllocateResourceDto, AllocationListQuery, AllocationResponseDto, CreateResourceDto,
    ResourceResponseDto, UpdateResourceDto,
};
use crate::features::resources::models::AllocationFilter;
use crate::features::resources::services::ResourceService;
use crate::shared::types::{ApiResponse, ConfirmQuery, Meta};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[utoipa::path(
    get,
    path = "/api/admin/resources",
    responses(
        (status = 200, description = "Resources retrieved", body = ApiResponse<Vec<ResourceResponseDto>>),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-resources",
    security(("bearer_auth" = []))
)]
pub async fn list_resources(
    _admin: RequireAdmin,
    State(service): State<Arc<ResourceService>>,
) -> Result<Json<ApiResponse<Vec<ResourceResponseDto>>>> {
    let resources = service.list().await?;
    let meta = Meta::total_of(&resources);
    Ok(Json(ApiResponse::success(Some(resources), None, Some(meta))))
}

#[utoipa::path(
    post,
    path = "/api/admin/resources",
    request_body = CreateResourceDto,
    responses(
        (status = 201, description = "Resource added", body = ApiResponse<ResourceResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-resources",
    security(("bearer_auth" = []))
)]
pub async fn create_resource(
    _admin: RequireAdmin,
    State(service): State<Arc<ResourceService>>,
    AppJson(dto): AppJson<CreateResourceDto>,
) -> Result<(StatusCode, Json<ApiResponse<ResourceResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let resource = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(resource),
            Some("Resource added successfully".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/admin/resources/{id}",
    params(
        ("id" = Uuid, Path, description = "Resource ID")
    ),
    request_body = UpdateResourceDto,
    responses(
        (status = 200, description = "Resource updated", body = ApiResponse<ResourceResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Resource not found")
    ),
    tag = "admin-resources",
    security(("bearer_auth" = []))
)]
pub async fn update_resource(
    _admin: RequireAdmin,
    State(service): State<Arc<ResourceService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateResourceDto>,
) -> Result<Json<ApiResponse<ResourceResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let resource = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(resource),
        Some("Resource updated successfully".to_string()),
        None,
    )))
}

/// Delete a resource (requires `?confirm=true`)
#[utoipa::path(
    delete,
    path = "/api/admin/resources/{id}",
    params(
        ("id" = Uuid, Path, description = "Resource ID"),
        ConfirmQuery
    ),
    responses(
        (status = 200, description = "Resource deleted"),
        (status = 400, description = "Confirmation missing"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Resource not found")
    ),
    tag = "admin-resources",
    security(("bearer_auth" = []))
)]
pub async fn delete_resource(
    _admin: RequireAdmin,
    State(service): State<Arc<ResourceService>>,
    Path(id): Path<Uuid>,
    Query(confirm): Query<ConfirmQuery>,
) -> Result<Json<ApiResponse<()>>> {
    confirm.require("delete this resource")?;

    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Resource deleted".to_string()),
        None,
    )))
}

/// Allocate stock to a victim request
#[utoipa::path(
    post,
    path = "/api/admin/allocations",
    request_body = AllocateResourceDto,
    responses(
        (status = 201, description = "Resource allocated", body = ApiResponse<AllocationResponseDto>),
        (status = 400, description = "Validation error or insufficient quantity"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Resource not found")
    ),
    tag = "admin-resources",
    security(("bearer_auth" = []))
)]
pub async fn allocate_resource(
    _admin: RequireAdmin,
    State(service): State<Arc<ResourceService>>,
    AppJson(dto): AppJson<AllocateResourceDto>,
) -> Result<(StatusCode, Json<ApiResponse<AllocationResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let allocation = service.allocate(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(allocation),
            Some("Resource allocated successfully".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/allocations",
    params(AllocationListQuery),
    responses(
        (status = 200, description = "Allocations retrieved", body = ApiResponse<Vec<AllocationResponseDto>>),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-resources",
    security(("bearer_auth" = []))
)]
pub async fn list_allocations(
    _admin: RequireAdmin,
    State(service): State<Arc<ResourceService>>,
    Query(query): Query<AllocationListQuery>,
) -> Result<Json<ApiResponse<Vec<AllocationResponseDto>>>> {
    let filter = AllocationFilter {
        resource_id: query.resource_id,
        request_id: query.request_id,
    };
    let allocations = service.list_allocations(filter).await?;
    let meta = Meta::total_of(&allocations);
    Ok(Json(ApiResponse::success(Some(allocations), None, Some(meta))))
}
