//! Entity store: one storage-agnostic port per entity group and two adapters.
//!
//! - [`local::LocalMirrorStore`]: in-memory collections hydrated from and
//!   persisted to a durable key-value snapshot after every mutation.
//! - [`remote::PgStore`]: the hosted relational store (PostgreSQL).
//!
//! The backend is chosen once at startup from `STORE_BACKEND` and handed to
//! every feature service as an `Arc<dyn ReliefStore>`.

pub mod batch;
pub mod local;
pub mod port;
pub mod remote;

mod error;

pub use error::{StoreError, StoreResult};
pub use port::*;

/// How `allocate_resource` treats an allocation larger than the stock on hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationPolicy {
    /// Reject the allocation before any write.
    RejectOverdraw,
    /// Record it and let the quantity go negative.
    AllowNegative,
}

impl AllocationPolicy {
    pub fn from_flag(allow_negative: bool) -> Self {
        if allow_negative {
            AllocationPolicy::AllowNegative
        } else {
            AllocationPolicy::RejectOverdraw
        }
    }

    /// Check an allocation of `requested` units against `available` units.
    pub fn check(&self, available: i32, requested: i32) -> StoreResult<()> {
        if *self == AllocationPolicy::RejectOverdraw && requested > available {
            return Err(StoreError::Validation(format!(
                "Insufficient quantity: requested {}, available {}",
                requested, available
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_overdraw_blocks_larger_allocations() {
        let policy = AllocationPolicy::from_flag(false);
        assert!(policy.check(10, 10).is_ok());
        assert!(matches!(
            policy.check(10, 11),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn allow_negative_accepts_anything() {
        let policy = AllocationPolicy::from_flag(true);
        assert!(policy.check(0, 500).is_ok());
    }
}
