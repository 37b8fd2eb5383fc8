use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{UpdateOwnProfileDto, UpdateUserStatusDto, UserResponseDto};
use crate::features::users::services::UserService;
use crate::shared::types::{ApiResponse, Meta};
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[utoipa::path(
    patch,
    path = "/api/users/me",
    request_body = UpdateOwnProfileDto,
    responses(
        (status = 200, description = "Profile updated successfully", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_own_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<UpdateOwnProfileDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = service.update_own_profile(user.user_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(updated),
        Some("Profile updated successfully".to_string()),
        None,
    )))
}

/// List all users (admin)
#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_users(
    _admin: RequireAdmin,
    State(service): State<Arc<UserService>>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let users = service.list().await?;
    let meta = Meta::total_of(&users);
    Ok(Json(ApiResponse::success(Some(users), None, Some(meta))))
}

/// Activate or deactivate a user (admin)
#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/status",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserStatusDto,
    responses(
        (status = 200, description = "User status updated", body = ApiResponse<UserResponseDto>),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "User not found")
    ),
    tag = "admin-users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_user_status(
    _admin: RequireAdmin,
    State(service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateUserStatusDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let updated = service.set_active(id, dto.is_active).await?;
    let message = if updated.is_active {
        "User activated"
    } else {
        "User deactivated"
    };
    Ok(Json(ApiResponse::success(
        Some(updated),
        Some(message.to_string()),
        None,
    )))
}
