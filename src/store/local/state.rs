use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::snapshot::{CollectionKey, SnapshotStorage};
use crate::features::disasters::models::Disaster;
use crate::features::fundraisers::models::{Donation, Fundraiser};
use crate::features::reports::models::Report;
use crate::features::requests::models::VictimRequest;
use crate::features::resources::models::{Resource, ResourceAllocation};
use crate::features::users::models::{User, UserRole};
use crate::features::volunteer_calls::models::{VolunteerCallApplication, VolunteerCallPosting};
use crate::features::volunteers::models::{Volunteer, VolunteerCall};
use crate::store::StoreResult;

/// Every collection the local mirror owns, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MirrorState {
    pub users: Vec<User>,
    pub current_user: Option<User>,
    /// email -> Argon2 PHC string
    pub passwords: BTreeMap<String, String>,
    pub user_roles: Vec<UserRole>,
    pub victim_requests: Vec<VictimRequest>,
    pub disasters: Vec<Disaster>,
    pub volunteers: Vec<Volunteer>,
    pub volunteer_calls: Vec<VolunteerCall>,
    pub postings: Vec<VolunteerCallPosting>,
    pub applications: Vec<VolunteerCallApplication>,
    pub donations: Vec<Donation>,
    pub fundraisers: Vec<Fundraiser>,
    pub resources: Vec<Resource>,
    pub allocations: Vec<ResourceAllocation>,
    pub reports: Vec<Report>,
}

async fn load<T: DeserializeOwned + Default>(
    storage: &dyn SnapshotStorage,
    key: CollectionKey,
) -> StoreResult<T> {
    match storage.get(key).await? {
        Some(text) => {
            let value = serde_json::from_str(&text).map_err(|e| {
                tracing::error!("Failed to decode snapshot entry {}: {:?}", key, e);
                e
            })?;
            Ok(value)
        }
        None => {
            tracing::debug!("Snapshot entry {} missing, starting empty", key);
            Ok(T::default())
        }
    }
}

fn encode<T: Serialize>(value: &T) -> StoreResult<Option<String>> {
    Ok(Some(serde_json::to_string(value)?))
}

impl MirrorState {
    /// Read every key from `storage`. Missing keys hydrate as empty.
    pub async fn hydrate(storage: &dyn SnapshotStorage) -> StoreResult<Self> {
        Ok(Self {
            users: load(storage, CollectionKey::Users).await?,
            current_user: load(storage, CollectionKey::CurrentUser).await?,
            passwords: load(storage, CollectionKey::Passwords).await?,
            user_roles: load(storage, CollectionKey::UserRoles).await?,
            victim_requests: load(storage, CollectionKey::VictimRequests).await?,
            disasters: load(storage, CollectionKey::Disasters).await?,
            volunteers: load(storage, CollectionKey::Volunteers).await?,
            volunteer_calls: load(storage, CollectionKey::VolunteerCalls).await?,
            postings: load(storage, CollectionKey::VolunteerCallPostings).await?,
            applications: load(storage, CollectionKey::VolunteerCallApplications).await?,
            donations: load(storage, CollectionKey::Donations).await?,
            fundraisers: load(storage, CollectionKey::Fundraisers).await?,
            resources: load(storage, CollectionKey::Resources).await?,
            allocations: load(storage, CollectionKey::ResourceAllocations).await?,
            reports: load(storage, CollectionKey::Reports).await?,
        })
    }

    /// JSON for one key; `None` means the entry should be removed.
    pub fn encode(&self, key: CollectionKey) -> StoreResult<Option<String>> {
        match key {
            CollectionKey::Users => encode(&self.users),
            CollectionKey::CurrentUser => match &self.current_user {
                Some(user) => encode(user),
                None => Ok(None),
            },
            CollectionKey::Passwords => encode(&self.passwords),
            CollectionKey::UserRoles => encode(&self.user_roles),
            CollectionKey::VictimRequests => encode(&self.victim_requests),
            CollectionKey::Disasters => encode(&self.disasters),
            CollectionKey::Volunteers => encode(&self.volunteers),
            CollectionKey::VolunteerCalls => encode(&self.volunteer_calls),
            CollectionKey::VolunteerCallPostings => encode(&self.postings),
            CollectionKey::VolunteerCallApplications => encode(&self.applications),
            CollectionKey::Donations => encode(&self.donations),
            CollectionKey::Fundraisers => encode(&self.fundraisers),
            CollectionKey::Resources => encode(&self.resources),
            CollectionKey::ResourceAllocations => encode(&self.allocations),
            CollectionKey::Reports => encode(&self.reports),
        }
    }
}
