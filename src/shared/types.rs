use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::error::{AppError, Result};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl Meta {
    pub fn total_of<T>(items: &[T]) -> Self {
        Self {
            total: items.len() as i64,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

// =============================================================================
// CONFIRMATION
// =============================================================================

/// Explicit confirmation for destructive admin actions (`?confirm=true`).
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ConfirmQuery {
    /// Must be `true` for the action to run
    #[serde(default)]
    pub confirm: bool,
}

impl ConfirmQuery {
    pub fn require(&self, action: &str) -> Result<()> {
        if !self.confirm {
            return Err(AppError::BadRequest(format!(
                "Confirmation required to {}: pass ?confirm=true",
                action
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfirmed_action_is_rejected() {
        let query = ConfirmQuery::default();
        assert!(matches!(
            query.require("delete resource"),
            Err(AppError::BadRequest(_))
        ));
        assert!(ConfirmQuery { confirm: true }.require("delete resource").is_ok());
    }
}
