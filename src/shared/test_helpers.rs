#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use axum::{Extension, Router};
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;
#[cfg(test)]
use crate::shared::constants::{ROLE_ADMIN, ROLE_USER};
#[cfg(test)]
use crate::store::local::{LocalMirrorStore, MemorySnapshotStorage};
#[cfg(test)]
use crate::store::AllocationPolicy;

#[cfg(test)]
pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: Uuid::now_v7(),
        email: Some("admin@relief.test".to_string()),
        roles: vec![ROLE_ADMIN.to_string()],
    }
}

#[cfg(test)]
pub fn create_standard_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: Uuid::now_v7(),
        email: Some("user@relief.test".to_string()),
        roles: vec![ROLE_USER.to_string()],
    }
}

/// Every request through `router` is authenticated as `user`.
#[cfg(test)]
pub fn with_auth(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(Extension(user))
}

#[cfg(test)]
pub fn with_admin_auth(router: Router) -> Router {
    with_auth(router, create_admin_user())
}

#[cfg(test)]
pub fn with_user_auth(router: Router) -> Router {
    with_auth(router, create_standard_user())
}

/// Empty local mirror over in-memory storage.
#[cfg(test)]
pub async fn memory_store() -> Arc<LocalMirrorStore> {
    let store = LocalMirrorStore::open(
        Arc::new(MemorySnapshotStorage::new()),
        AllocationPolicy::RejectOverdraw,
        vec!["admin@relief.test".to_string()],
    )
    .await
    .unwrap();
    Arc::new(store)
}
