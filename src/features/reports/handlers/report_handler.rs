use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{CreateReportDto, ReportResponseDto};
use crate::features::reports::services::ReportService;
use crate::shared::types::{ApiResponse, ConfirmQuery, Meta};

/// Submit a field report
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report submitted", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn create_report(
    user: AuthenticatedUser,
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = service.create(user.user_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(report),
            Some("Report submitted".to_string()),
            None,
        )),
    ))
}

/// List reports for the authenticated user
#[utoipa::path(
    get,
    path = "/api/reports/mine",
    responses(
        (status = 200, description = "List of user's reports", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_my_reports(
    user: AuthenticatedUser,
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = service.list_mine(user.user_id).await?;
    let meta = Meta::total_of(&reports);
    Ok(Json(ApiResponse::success(Some(reports), None, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/admin/reports",
    responses(
        (status = 200, description = "All reports with author profiles", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 403, description = "Forbidden - admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "admin-reports"
)]
pub async fn list_all_reports(
    _admin: RequireAdmin,
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = service.list_all().await?;
    let meta = Meta::total_of(&reports);
    Ok(Json(ApiResponse::success(Some(reports), None, Some(meta))))
}

/// Delete a report (requires `?confirm=true`)
#[utoipa::path(
    delete,
    path = "/api/admin/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report ID"),
        ConfirmQuery
    ),
    responses(
        (status = 200, description = "Report deleted"),
        (status = 400, description = "Confirmation missing"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "admin-reports"
)]
pub async fn delete_report(
    _admin: RequireAdmin,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<Uuid>,
    Query(confirm): Query<ConfirmQuery>,
) -> Result<Json<ApiResponse<()>>> {
    confirm.require("delete this report")?;

    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Report deleted".to_string()),
        None,
    )))
}
