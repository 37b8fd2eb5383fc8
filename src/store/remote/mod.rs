//! Hosted relational store (PostgreSQL).
//!
//! Queries are checked at runtime against the schema in `migrations/`.
//! Partial updates bind every patch field and fall back to the stored value
//! with `COALESCE`, so a single statement covers any subset of fields.

mod entities;

use sqlx::PgPool;

use super::{AllocationPolicy, StoreError};

pub struct PgStore {
    pool: PgPool,
    policy: AllocationPolicy,
}

impl PgStore {
    pub fn new(pool: PgPool, policy: AllocationPolicy) -> Self {
        Self { pool, policy }
    }
}

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";
const NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Domain error for a constraint violation, `None` for anything else.
fn classify_code(code: &str, entity: &str) -> Option<StoreError> {
    match code {
        UNIQUE_VIOLATION => Some(StoreError::Conflict(format!("{} already exists", entity))),
        FOREIGN_KEY_VIOLATION => Some(StoreError::NotFound(format!(
            "{} references a record that does not exist",
            entity
        ))),
        CHECK_VIOLATION | NUMERIC_OUT_OF_RANGE => Some(StoreError::Validation(format!(
            "{} violates a data constraint",
            entity
        ))),
        _ => None,
    }
}

/// Log a failed statement and map it onto the store taxonomy.
fn db_error(action: &'static str, entity: &'static str) -> impl Fn(sqlx::Error) -> StoreError {
    move |e| {
        let code = e
            .as_database_error()
            .and_then(|d| d.code())
            .map(|c| c.into_owned());
        if let Some(mapped) = code.as_deref().and_then(|c| classify_code(c, entity)) {
            tracing::warn!("{} {} rejected by constraint: {:?}", action, entity, e);
            return mapped;
        }
        tracing::error!("Failed to {} {}: {:?}", action, entity.to_lowercase(), e);
        StoreError::Database(e)
    }
}

/// `NotFound` when an update/delete touched no rows.
fn expect_affected(rows: u64, entity: &str, id: uuid::Uuid) -> Result<(), StoreError> {
    if rows == 0 {
        return Err(StoreError::not_found(entity, id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_is_conflict() {
        assert!(matches!(
            classify_code("23505", "Volunteer"),
            Some(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn foreign_key_violation_is_not_found() {
        assert!(matches!(
            classify_code("23503", "Application"),
            Some(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn check_violation_is_validation() {
        assert!(matches!(
            classify_code("23514", "Resource"),
            Some(StoreError::Validation(_))
        ));
    }

    #[test]
    fn numeric_overflow_is_validation() {
        assert!(matches!(
            classify_code("22003", "Fundraiser"),
            Some(StoreError::Validation(_))
        ));
    }

    #[test]
    fn other_codes_pass_through() {
        assert!(classify_code("40001", "Donation").is_none());
    }

    #[test]
    fn zero_rows_is_not_found() {
        let id = uuid::Uuid::now_v7();
        assert!(matches!(
            expect_affected(0, "Report", id),
            Err(StoreError::NotFound(_))
        ));
        assert!(expect_affected(1, "Report", id).is_ok());
    }
}
