//! Local mirror: all collections held in memory, hydrated once at open and
//! re-persisted after every mutation.
//!
//! A mutation runs against a staged copy of the state. Only the keys it
//! touched are written; if any write fails the keys already written are
//! restored and the in-memory state is left as it was.

mod entities;
mod session;
mod snapshot;
mod state;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

#[cfg(test)]
pub use snapshot::MemorySnapshotStorage;
pub use snapshot::{CollectionKey, FileSnapshotStorage, SnapshotStorage};
pub use state::MirrorState;

use super::{AllocationPolicy, StoreResult};

pub struct LocalMirrorStore {
    storage: Arc<dyn SnapshotStorage>,
    state: RwLock<MirrorState>,
    policy: AllocationPolicy,
    admin_emails: Vec<String>,
}

impl LocalMirrorStore {
    pub async fn open(
        storage: Arc<dyn SnapshotStorage>,
        policy: AllocationPolicy,
        admin_emails: Vec<String>,
    ) -> StoreResult<Self> {
        let state = MirrorState::hydrate(storage.as_ref()).await?;
        tracing::info!(
            "Local mirror hydrated: {} users, {} requests, {} fundraisers, {} resources",
            state.users.len(),
            state.victim_requests.len(),
            state.fundraisers.len(),
            state.resources.len()
        );

        Ok(Self {
            storage,
            state: RwLock::new(state),
            policy,
            admin_emails: admin_emails
                .into_iter()
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        })
    }

    /// Copy of the whole state.
    #[cfg(test)]
    pub async fn snapshot(&self) -> MirrorState {
        self.state.read().await.clone()
    }

    async fn read<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&MirrorState) -> R + Send,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Apply `f` to a staged copy, persist `keys`, then commit.
    async fn mutate<R, F>(&self, keys: &[CollectionKey], f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut MirrorState) -> StoreResult<R> + Send,
        R: Send,
    {
        let mut state = self.state.write().await;
        let mut staged = state.clone();
        let out = f(&mut staged)?;
        self.persist(&state, &staged, keys).await?;
        *state = staged;
        Ok(out)
    }

    async fn persist(
        &self,
        previous: &MirrorState,
        next: &MirrorState,
        keys: &[CollectionKey],
    ) -> StoreResult<()> {
        for (i, key) in keys.iter().enumerate() {
            if let Err(e) = self.write_key(next, *key).await {
                tracing::error!("Failed to persist {}: {:?}", key, e);
                for written in &keys[..i] {
                    if let Err(e) = self.write_key(previous, *written).await {
                        tracing::error!("Failed to restore {} after aborted write: {:?}", written, e);
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }

    async fn write_key(&self, state: &MirrorState, key: CollectionKey) -> StoreResult<()> {
        match state.encode(key)? {
            Some(json) => self.storage.set(key, json).await,
            None => self.storage.remove(key).await,
        }
    }

    fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails.iter().any(|e| e == email)
    }
}

/// Fresh `updated_at` stamp, strictly later than `previous`.
fn touch(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

/// Stable sort, newest first; ties keep insertion order.
fn newest_first<T>(mut items: Vec<T>, at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    items.sort_by_key(|item| std::cmp::Reverse(at(item)));
    items
}
