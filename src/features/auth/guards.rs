//! Role-based authorization guards.
//!
//! The auth middleware resolves the session's role from the role table;
//! a missing role row or a failed lookup leaves the session as a standard user.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::constants::ADMIN_REQUIRED_MESSAGE;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for admin-only routes.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_admin() {
            tracing::info!("Admin route refused for user {}", user.user_id);
            return Err(AppError::Forbidden(ADMIN_REQUIRED_MESSAGE.to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}
