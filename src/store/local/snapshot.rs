#[cfg(test)]
use std::collections::HashMap;
use std::path::PathBuf;
#[cfg(test)]
use std::sync::Mutex;

use async_trait::async_trait;

use crate::store::{StoreError, StoreResult};

/// One durable entry per entity collection, plus the session user and the
/// password registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Users,
    CurrentUser,
    Passwords,
    UserRoles,
    VictimRequests,
    Disasters,
    Volunteers,
    VolunteerCalls,
    VolunteerCallPostings,
    VolunteerCallApplications,
    Donations,
    Fundraisers,
    Resources,
    ResourceAllocations,
    Reports,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 15] = [
        CollectionKey::Users,
        CollectionKey::CurrentUser,
        CollectionKey::Passwords,
        CollectionKey::UserRoles,
        CollectionKey::VictimRequests,
        CollectionKey::Disasters,
        CollectionKey::Volunteers,
        CollectionKey::VolunteerCalls,
        CollectionKey::VolunteerCallPostings,
        CollectionKey::VolunteerCallApplications,
        CollectionKey::Donations,
        CollectionKey::Fundraisers,
        CollectionKey::Resources,
        CollectionKey::ResourceAllocations,
        CollectionKey::Reports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKey::Users => "users",
            CollectionKey::CurrentUser => "currentUser",
            CollectionKey::Passwords => "passwords",
            CollectionKey::UserRoles => "userRoles",
            CollectionKey::VictimRequests => "victimRequests",
            CollectionKey::Disasters => "disasters",
            CollectionKey::Volunteers => "volunteers",
            CollectionKey::VolunteerCalls => "volunteerCalls",
            CollectionKey::VolunteerCallPostings => "volunteerCallPostings",
            CollectionKey::VolunteerCallApplications => "volunteerCallApplications",
            CollectionKey::Donations => "donations",
            CollectionKey::Fundraisers => "fundraisers",
            CollectionKey::Resources => "resources",
            CollectionKey::ResourceAllocations => "resourceAllocations",
            CollectionKey::Reports => "reports",
        }
    }
}

impl std::fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable key-value storage behind the local mirror. Values are JSON text.
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    async fn get(&self, key: CollectionKey) -> StoreResult<Option<String>>;

    async fn set(&self, key: CollectionKey, value: String) -> StoreResult<()>;

    async fn remove(&self, key: CollectionKey) -> StoreResult<()>;
}

fn write_failed(key: CollectionKey, e: std::io::Error) -> StoreError {
    StoreError::Persistence(format!("write to {} failed: {}", key, e))
}

/// Stores each key as `<dir>/<key>.json`.
pub struct FileSnapshotStorage {
    dir: PathBuf,
}

impl FileSnapshotStorage {
    pub async fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn path_of(&self, key: CollectionKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

#[async_trait]
impl SnapshotStorage for FileSnapshotStorage {
    async fn get(&self, key: CollectionKey) -> StoreResult<Option<String>> {
        match tokio::fs::read_to_string(self.path_of(key)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: CollectionKey, value: String) -> StoreResult<()> {
        let path = self.path_of(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| write_failed(key, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| write_failed(key, e))?;
        Ok(())
    }

    async fn remove(&self, key: CollectionKey) -> StoreResult<()> {
        match tokio::fs::remove_file(self.path_of(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(write_failed(key, e)),
        }
    }
}

/// Process-local storage with injectable write failures.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySnapshotStorage {
    entries: Mutex<HashMap<CollectionKey, String>>,
    failing: Mutex<Option<CollectionKey>>,
}

#[cfg(test)]
impl MemorySnapshotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write to `key` fail until cleared with `None`.
    pub fn fail_writes_to(&self, key: Option<CollectionKey>) {
        if let Ok(mut failing) = self.failing.lock() {
            *failing = key;
        }
    }

    fn entries(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<CollectionKey, String>>> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Persistence("snapshot storage lock poisoned".to_string()))
    }

    fn check_writable(&self, key: CollectionKey) -> StoreResult<()> {
        let failing = self
            .failing
            .lock()
            .map_err(|_| StoreError::Persistence("snapshot storage lock poisoned".to_string()))?;
        if *failing == Some(key) {
            return Err(StoreError::Persistence(format!("write to {} refused", key)));
        }
        Ok(())
    }
}

#[cfg(test)]
#[async_trait]
impl SnapshotStorage for MemorySnapshotStorage {
    async fn get(&self, key: CollectionKey) -> StoreResult<Option<String>> {
        Ok(self.entries()?.get(&key).cloned())
    }

    async fn set(&self, key: CollectionKey, value: String) -> StoreResult<()> {
        self.check_writable(key)?;
        self.entries()?.insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: CollectionKey) -> StoreResult<()> {
        self.check_writable(key)?;
        self.entries()?.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_storage_round_trips_and_removes() {
        let dir = std::env::temp_dir().join(format!("reliefhub-snapshot-{}", uuid::Uuid::now_v7()));
        let storage = FileSnapshotStorage::open(&dir).await.unwrap();

        assert_eq!(storage.get(CollectionKey::Resources).await.unwrap(), None);

        storage
            .set(CollectionKey::Resources, "[]".to_string())
            .await
            .unwrap();
        assert_eq!(
            storage.get(CollectionKey::Resources).await.unwrap().as_deref(),
            Some("[]")
        );
        assert!(dir.join("resources.json").exists());
        assert!(!dir.join("resources.json.tmp").exists());

        storage.remove(CollectionKey::Resources).await.unwrap();
        storage.remove(CollectionKey::Resources).await.unwrap();
        assert_eq!(storage.get(CollectionKey::Resources).await.unwrap(), None);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn file_write_failure_is_a_persistence_error() {
        let dir = std::env::temp_dir().join(format!("reliefhub-snapshot-{}", uuid::Uuid::now_v7()));
        let storage = FileSnapshotStorage::open(&dir).await.unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        let result = storage.set(CollectionKey::Reports, "[]".to_string()).await;
        match result {
            Err(StoreError::Persistence(msg)) => assert!(msg.starts_with("write to reports failed")),
            other => panic!("expected persistence error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn memory_storage_can_refuse_writes() {
        let storage = MemorySnapshotStorage::new();
        storage.fail_writes_to(Some(CollectionKey::Donations));

        assert!(storage
            .set(CollectionKey::Donations, "[]".to_string())
            .await
            .is_err());
        assert!(storage
            .set(CollectionKey::Fundraisers, "[]".to_string())
            .await
            .is_ok());

        storage.fail_writes_to(None);
        assert!(storage
            .set(CollectionKey::Donations, "[]".to_string())
            .await
            .is_ok());
    }

    #[test]
    fn keys_are_distinct() {
        let names: std::collections::HashSet<_> =
            CollectionKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), CollectionKey::ALL.len());
    }
}
