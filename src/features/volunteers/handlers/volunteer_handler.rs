use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::volunteers::dtos::{
    RegisterVolunteerDto, UpdateVolunteerStatusDto, VolunteerListQuery, VolunteerResponseDto,
};
use crate::features::volunteers::services::VolunteerService;
use crate::shared::types::{ApiResponse, Meta};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Register as a volunteer
#[utoipa::path(
    post,
    path = "/api/volunteers",
    request_body = RegisterVolunteerDto,
    responses(
        (status = 201, description = "Registered as volunteer", body = ApiResponse<VolunteerResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Already registered for this disaster")
    ),
    tag = "volunteers",
    security(("bearer_auth" = []))
)]
pub async fn register_volunteer(
    user: AuthenticatedUser,
    State(service): State<Arc<VolunteerService>>,
    AppJson(dto): AppJson<RegisterVolunteerDto>,
) -> Result<(StatusCode, Json<ApiResponse<VolunteerResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let volunteer = service.register(user.user_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(volunteer),
            Some("You are registered as a volunteer".to_string()),
            None,
        )),
    ))
}

/// The caller's volunteer registrations
#[utoipa::path(
    get,
    path = "/api/volunteers/mine",
    responses(
        (status = 200, description = "Registrations retrieved", body = ApiResponse<Vec<VolunteerResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "volunteers",
    security(("bearer_auth" = []))
)]
pub async fn list_my_volunteers(
    user: AuthenticatedUser,
    State(service): State<Arc<VolunteerService>>,
) -> Result<Json<ApiResponse<Vec<VolunteerResponseDto>>>> {
    let volunteers = service.list_mine(user.user_id).await?;
    let meta = Meta::total_of(&volunteers);
    Ok(Json(ApiResponse::success(Some(volunteers), None, Some(meta))))
}

/// List volunteers with profiles (admin)
#[utoipa::path(
    get,
    path = "/api/admin/volunteers",
    params(VolunteerListQuery),
    responses(
        (status = 200, description = "Volunteers retrieved", body = ApiResponse<Vec<VolunteerResponseDto>>),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-volunteers",
    security(("bearer_auth" = []))
)]
pub async fn list_all_volunteers(
    _admin: RequireAdmin,
    State(service): State<Arc<VolunteerService>>,
    Query(query): Query<VolunteerListQuery>,
) -> Result<Json<ApiResponse<Vec<VolunteerResponseDto>>>> {
    let volunteers = service.list_all(query.status).await?;
    let meta = Meta::total_of(&volunteers);
    Ok(Json(ApiResponse::success(Some(volunteers), None, Some(meta))))
}

/// Activate or deactivate a volunteer (admin)
#[utoipa::path(
    patch,
    path = "/api/admin/volunteers/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Volunteer ID")
    ),
    request_body = UpdateVolunteerStatusDto,
    responses(
        (status = 200, description = "Volunteer status updated", body = ApiResponse<VolunteerResponseDto>),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Volunteer not found")
    ),
    tag = "admin-volunteers",
    security(("bearer_auth" = []))
)]
pub async fn update_volunteer_status(
    _admin: RequireAdmin,
    State(service): State<Arc<VolunteerService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateVolunteerStatusDto>,
) -> Result<Json<ApiResponse<VolunteerResponseDto>>> {
    let volunteer = service.update_status(id, dto.status).await?;
    Ok(Json(ApiResponse::success(
        Some(volunteer),
        Some("Volunteer status updated".to_string()),
        None,
    )))
}
