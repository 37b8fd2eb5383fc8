use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{CollectionKey, LocalMirrorStore};
use crate::features::users::models::{Role, User, UserRole};
use crate::store::{SessionStore, StoreError};

fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash is unreadable: {:?}", e);
            false
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl SessionStore for LocalMirrorStore {
    async fn login(&self, email: &str, password: &str) -> bool {
        let email = normalize_email(email);
        let candidate = self
            .read(|s| {
                let hash = s.passwords.get(&email).cloned();
                let user = s.users.iter().find(|u| u.email == email).cloned();
                hash.zip(user)
            })
            .await;

        let Some((hash, user)) = candidate else {
            tracing::info!("Login rejected: unknown email");
            return false;
        };
        if !verify_password(password, &hash) {
            tracing::info!("Login rejected for user {}: wrong password", user.id);
            return false;
        }
        if !user.is_active {
            tracing::info!("Login rejected for user {}: account inactive", user.id);
            return false;
        }

        let user_id = user.id;
        match self
            .mutate(&[CollectionKey::CurrentUser], move |s| {
                s.current_user = Some(user);
                Ok(())
            })
            .await
        {
            Ok(()) => {
                tracing::info!("User logged in: {}", user_id);
                true
            }
            Err(e) => {
                tracing::error!("Failed to persist session for {}: {:?}", user_id, e);
                false
            }
        }
    }

    async fn register(&self, email: &str, password: &str, name: &str, phone: &str) -> bool {
        let email = normalize_email(email);
        let hash = match hash_password(password) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::error!("Failed to hash password: {:?}", e);
                return false;
            }
        };

        let role = if self.is_admin_email(&email) {
            Role::Admin
        } else {
            Role::User
        };
        let user = User {
            id: Uuid::now_v7(),
            email: email.clone(),
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            is_active: true,
            created_at: Utc::now(),
        };
        let user_id = user.id;

        let keys = [
            CollectionKey::Users,
            CollectionKey::Passwords,
            CollectionKey::UserRoles,
            CollectionKey::CurrentUser,
        ];
        let result = self
            .mutate(&keys, move |s| {
                if s.users.iter().any(|u| u.email == email) {
                    return Err(StoreError::Conflict("Email already registered".to_string()));
                }
                s.passwords.insert(email, hash);
                s.user_roles.push(UserRole {
                    user_id: user.id,
                    role,
                });
                s.current_user = Some(user.clone());
                s.users.push(user);
                Ok(())
            })
            .await;

        match result {
            Ok(()) => {
                tracing::info!("User registered: {} ({})", user_id, role.as_str());
                true
            }
            Err(StoreError::Conflict(_)) => {
                tracing::info!("Registration rejected: email already registered");
                false
            }
            Err(e) => {
                tracing::error!("Failed to register user: {:?}", e);
                false
            }
        }
    }

    async fn logout(&self) {
        if let Err(e) = self
            .mutate(&[CollectionKey::CurrentUser], |s| {
                s.current_user = None;
                Ok(())
            })
            .await
        {
            tracing::error!("Failed to clear session: {:?}", e);
        }
    }

    async fn current_user(&self) -> Option<User> {
        self.read(|s| s.current_user.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    use super::*;
    use crate::features::users::models::UserPatch;
    use crate::store::local::MemorySnapshotStorage;
    use crate::store::{AllocationPolicy, UserStore};

    async fn store(admin_emails: Vec<String>) -> LocalMirrorStore {
        LocalMirrorStore::open(
            Arc::new(MemorySnapshotStorage::new()),
            AllocationPolicy::RejectOverdraw,
            admin_emails,
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn register_then_login_yields_same_user() {
        let store = store(vec![]).await;
        let email: String = SafeEmail().fake();
        let name: String = Name().fake();

        assert!(store.register(&email, "correct horse", &name, "0812").await);
        let registered = store.current_user().await.unwrap();
        assert!(registered.is_active);

        store.logout().await;
        assert_eq!(store.current_user().await, None);

        assert!(store.login(&email, "correct horse").await);
        assert_eq!(store.current_user().await.unwrap().id, registered.id);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let store = store(vec![]).await;
        assert!(store.register("rina@example.org", "right", "Rina", "").await);
        store.logout().await;

        assert!(!store.login("rina@example.org", "wrong").await);
        assert!(!store.login("nobody@example.org", "right").await);
        assert_eq!(store.current_user().await, None);
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let store = store(vec![]).await;
        assert!(store.register("budi@example.org", "pw-one", "Budi", "0811").await);
        assert!(!store.register("Budi@Example.org", "pw-two", "Budi 2", "0822").await);

        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Budi");
    }

    #[tokio::test]
    async fn inactive_user_cannot_log_in() {
        let store = store(vec![]).await;
        assert!(store.register("sari@example.org", "pw", "Sari", "0813").await);
        let user = store.current_user().await.unwrap();
        store.logout().await;

        store
            .update_user(
                user.id,
                UserPatch {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(!store.login("sari@example.org", "pw").await);
        assert_eq!(store.current_user().await, None);
    }

    #[tokio::test]
    async fn updating_session_user_refreshes_session() {
        let store = store(vec![]).await;
        assert!(store.register("tono@example.org", "pw", "Tono", "0814").await);
        let user = store.current_user().await.unwrap();

        store
            .update_user(
                user.id,
                UserPatch {
                    phone: Some("0899".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(store.current_user().await.unwrap().phone, "0899");
    }

    #[tokio::test]
    async fn admin_emails_receive_admin_role() {
        let store = store(vec!["Chief@Relief.org".to_string()]).await;
        assert!(store.register("chief@relief.org", "pw", "Chief", "").await);
        let admin = store.current_user().await.unwrap();
        assert!(store.register("helper@relief.org", "pw", "Helper", "").await);
        let helper = store.current_user().await.unwrap();

        assert_eq!(store.role_of(admin.id).await.unwrap(), Some(Role::Admin));
        assert_eq!(store.role_of(helper.id).await.unwrap(), Some(Role::User));
        assert_eq!(store.role_of(Uuid::now_v7()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn passwords_are_not_stored_in_plaintext() {
        let store = store(vec![]).await;
        assert!(store.register("maya@example.org", "plain-secret", "Maya", "").await);

        let snapshot = store.snapshot().await;
        let stored = snapshot.passwords.get("maya@example.org").unwrap();
        assert_ne!(stored, "plain-secret");
        assert!(stored.starts_with("$argon2"));
    }
}
