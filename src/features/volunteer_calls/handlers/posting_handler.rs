use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::volunteer_calls::dtos::{
    ApplicationResponseDto, ApplyDto, CreatePostingDto, PostingResponseDto,
    UpdateApplicationStatusDto,
};
use crate::features::volunteer_calls::services::PostingService;
use crate::shared::types::{ApiResponse, ConfirmQuery, Meta};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// List open volunteer call postings
#[utoipa::path(
    get,
    path = "/api/volunteer-calls",
    responses(
        (status = 200, description = "Postings retrieved", body = ApiResponse<Vec<PostingResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "volunteer-calls",
    security(("bearer_auth" = []))
)]
pub async fn list_postings(
    State(service): State<Arc<PostingService>>,
) -> Result<Json<ApiResponse<Vec<PostingResponseDto>>>> {
    let postings = service.list_postings().await?;
    let meta = Meta::total_of(&postings);
    Ok(Json(ApiResponse::success(Some(postings), None, Some(meta))))
}

/// Apply to a posting
#[utoipa::path(
    post,
    path = "/api/volunteer-calls/{id}/applications",
    params(
        ("id" = Uuid, Path, description = "Posting ID")
    ),
    request_body = ApplyDto,
    responses(
        (status = 201, description = "Application submitted", body = ApiResponse<ApplicationResponseDto>),
        (status = 404, description = "Posting not found"),
        (status = 409, description = "Already applied")
    ),
    tag = "volunteer-calls",
    security(("bearer_auth" = []))
)]
pub async fn apply_to_posting(
    user: AuthenticatedUser,
    State(service): State<Arc<PostingService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<ApplyDto>,
) -> Result<(StatusCode, Json<ApiResponse<ApplicationResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let application = service.apply(user.user_id, id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(application),
            Some("Application submitted".to_string()),
            None,
        )),
    ))
}

/// The caller's applications
#[utoipa::path(
    get,
    path = "/api/applications/mine",
    responses(
        (status = 200, description = "Applications retrieved", body = ApiResponse<Vec<ApplicationResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "volunteer-calls",
    security(("bearer_auth" = []))
)]
pub async fn list_my_applications(
    user: AuthenticatedUser,
    State(service): State<Arc<PostingService>>,
) -> Result<Json<ApiResponse<Vec<ApplicationResponseDto>>>> {
    let applications = service.list_my_applications(user.user_id).await?;
    let meta = Meta::total_of(&applications);
    Ok(Json(ApiResponse::success(Some(applications), None, Some(meta))))
}

/// Publish a posting (admin)
#[utoipa::path(
    post,
    path = "/api/admin/volunteer-calls",
    request_body = CreatePostingDto,
    responses(
        (status = 201, description = "Posting created", body = ApiResponse<PostingResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-volunteer-calls",
    security(("bearer_auth" = []))
)]
pub async fn create_posting(
    _admin: RequireAdmin,
    State(service): State<Arc<PostingService>>,
    AppJson(dto): AppJson<CreatePostingDto>,
) -> Result<(StatusCode, Json<ApiResponse<PostingResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let posting = service.create_posting(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(posting),
            Some("Volunteer call created".to_string()),
            None,
        )),
    ))
}

/// Delete a posting and its applications (admin, requires `?confirm=true`)
#[utoipa::path(
    delete,
    path = "/api/admin/volunteer-calls/{id}",
    params(
        ("id" = Uuid, Path, description = "Posting ID"),
        ConfirmQuery
    ),
    responses(
        (status = 200, description = "Posting deleted"),
        (status = 400, description = "Confirmation missing"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Posting not found")
    ),
    tag = "admin-volunteer-calls",
    security(("bearer_auth" = []))
)]
pub async fn delete_posting(
    _admin: RequireAdmin,
    State(service): State<Arc<PostingService>>,
    Path(id): Path<Uuid>,
    Query(confirm): Query<ConfirmQuery>,
) -> Result<Json<ApiResponse<()>>> {
    confirm.require("delete this volunteer call")?;

    service.delete_posting(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Volunteer call deleted".to_string()),
        None,
    )))
}

/// Applications to a posting with applicant profiles (admin)
#[utoipa::path(
    get,
    path = "/api/admin/volunteer-calls/{id}/applications",
    params(
        ("id" = Uuid, Path, description = "Posting ID")
    ),
    responses(
        (status = 200, description = "Applications retrieved", body = ApiResponse<Vec<ApplicationResponseDto>>),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-volunteer-calls",
    security(("bearer_auth" = []))
)]
pub async fn list_posting_applications(
    _admin: RequireAdmin,
    State(service): State<Arc<PostingService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ApplicationResponseDto>>>> {
    let applications = service.list_applications(id).await?;
    let meta = Meta::total_of(&applications);
    Ok(Json(ApiResponse::success(Some(applications), None, Some(meta))))
}

/// Accept or reject an application (admin)
#[utoipa::path(
    patch,
    path = "/api/admin/applications/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationStatusDto,
    responses(
        (status = 200, description = "Application updated", body = ApiResponse<ApplicationResponseDto>),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Application already decided")
    ),
    tag = "admin-volunteer-calls",
    security(("bearer_auth" = []))
)]
pub async fn update_application_status(
    _admin: RequireAdmin,
    State(service): State<Arc<PostingService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateApplicationStatusDto>,
) -> Result<Json<ApiResponse<ApplicationResponseDto>>> {
    let application = service.update_application_status(id, dto.status).await?;
    Ok(Json(ApiResponse::success(Some(application), None, None)))
}

/// List postings (admin)
#[utoipa::path(
    get,
    path = "/api/admin/volunteer-calls",
    responses(
        (status = 200, description = "Postings retrieved", body = ApiResponse<Vec<PostingResponseDto>>),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-volunteer-calls",
    security(("bearer_auth" = []))
)]
pub async fn admin_list_postings(
    _admin: RequireAdmin,
    service: State<Arc<PostingService>>,
) -> Result<Json<ApiResponse<Vec<PostingResponseDto>>>> {
    list_postings(service).await
}
