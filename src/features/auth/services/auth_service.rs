use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    AuthResponseDto, AuthUserDto, Dashboard, LoginRequestDto, MeResponseDto, RegisterRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::token_service::TokenService;
use crate::features::users::models::{Role, User};
use crate::store::{ReliefStore, SessionStore};
use std::sync::Arc;

fn already_registered() -> AppError {
    AppError::Conflict("This email is already registered".to_string())
}

/// Service for session operations.
///
/// Register, login and logout need the local mirror's session store; with the
/// hosted store those flows belong to the hosted auth subsystem.
pub struct AuthService {
    store: Arc<dyn ReliefStore>,
    session: Option<Arc<dyn SessionStore>>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn ReliefStore>,
        session: Option<Arc<dyn SessionStore>>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            store,
            session,
            token_service,
        }
    }

    fn session(&self) -> Result<&Arc<dyn SessionStore>> {
        self.session.as_ref().ok_or_else(|| {
            AppError::BadRequest("Sign-in is handled by the hosted auth service".to_string())
        })
    }

    /// Register a new user and sign them in
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AuthResponseDto> {
        let session = self.session()?;
        if self.find_by_email(&dto.email).await?.is_some() {
            return Err(already_registered());
        }

        let registered = session
            .register(&dto.email, &dto.password, &dto.name, &dto.phone)
            .await;
        if !registered {
            // A concurrent registration may have claimed the email meanwhile.
            return Err(match self.find_by_email(&dto.email).await? {
                Some(_) => already_registered(),
                None => AppError::Internal("Failed to save registration".to_string()),
            });
        }

        let user = self.user_by_email(&dto.email).await?;
        self.auth_response(user).await
    }

    /// Login with email and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let session = self.session()?;
        if !session.login(&dto.email, &dto.password).await {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        let user = self.user_by_email(&dto.email).await?;
        self.auth_response(user).await
    }

    /// Clears the local session only when it belongs to `user`.
    pub async fn logout(&self, user: &AuthenticatedUser) -> Result<()> {
        let session = self.session()?;
        match session.current_user().await {
            Some(current) if current.id == user.user_id => {
                session.logout().await;
                tracing::info!("User logged out: {}", user.user_id);
            }
            _ => tracing::info!(
                "Logout by {} left the active session untouched",
                user.user_id
            ),
        }
        Ok(())
    }

    /// Current session with profile and dashboard routing
    pub async fn me(&self, user: &AuthenticatedUser) -> Result<MeResponseDto> {
        let profile = match self.store.profiles_by_ids(&[user.user_id]).await {
            Ok(profiles) => profiles.into_iter().next(),
            Err(e) => {
                tracing::warn!("Profile lookup failed for {}: {:?}", user.user_id, e);
                None
            }
        };

        let is_admin = user.is_admin();
        Ok(MeResponseDto {
            user_id: user.user_id,
            email: user.email.clone(),
            profile,
            is_admin,
            dashboard: if is_admin {
                Dashboard::Admin
            } else {
                Dashboard::User
            },
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.trim().to_lowercase();
        Ok(self
            .store
            .list_users()
            .await?
            .into_iter()
            .find(|u| u.email == email))
    }

    async fn user_by_email(&self, email: &str) -> Result<User> {
        self.find_by_email(email).await?.ok_or_else(|| {
            AppError::Internal(format!("User '{}' missing after sign-in", email.trim()))
        })
    }

    async fn auth_response(&self, user: User) -> Result<AuthResponseDto> {
        let token = self.token_service.issue(&user)?;
        let is_admin = match self.store.role_of(user.id).await {
            Ok(role) => role == Some(Role::Admin),
            Err(e) => {
                tracing::warn!("Role lookup failed for {}: {:?}", user.id, e);
                false
            }
        };

        Ok(AuthResponseDto {
            access_token: token.access_token,
            token_type: "Bearer".to_string(),
            expires_in: token.expires_in,
            user: AuthUserDto {
                id: user.id,
                email: user.email,
                name: user.name,
                phone: user.phone,
                is_admin,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AuthConfig;
    use crate::store::local::{CollectionKey, LocalMirrorStore, MemorySnapshotStorage};
    use crate::store::AllocationPolicy;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;
    use std::time::Duration;

    async fn service() -> (AuthService, Arc<LocalMirrorStore>, Arc<MemorySnapshotStorage>) {
        let storage = Arc::new(MemorySnapshotStorage::new());
        let store = Arc::new(
            LocalMirrorStore::open(storage.clone(), AllocationPolicy::RejectOverdraw, vec![])
                .await
                .unwrap(),
        );
        let tokens = Arc::new(TokenService::new(&AuthConfig {
            jwt_secret: "local-secret-for-tests".to_string(),
            jwt_audience: "authenticated".to_string(),
            jwt_leeway: Duration::from_secs(0),
            token_ttl_secs: 300,
        }));
        let session: Arc<dyn SessionStore> = store.clone();
        let service = AuthService::new(store.clone(), Some(session), tokens);
        (service, store, storage)
    }

    fn registration(email: &str) -> RegisterRequestDto {
        RegisterRequestDto {
            email: email.to_string(),
            password: "secret-pass".to_string(),
            name: "Lina".to_string(),
            phone: "08123456789".to_string(),
        }
    }

    fn caller(user_id: uuid::Uuid) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id,
            email: None,
            roles: vec![],
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let (service, _, _) = service().await;
        let email: String = SafeEmail().fake();
        service.register(registration(&email)).await.unwrap();

        let result = service.register(registration(&email.to_uppercase())).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn storage_failure_during_registration_is_internal() {
        let (service, _, storage) = service().await;
        storage.fail_writes_to(Some(CollectionKey::Users));

        let result = service.register(registration("gita@example.org")).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn logout_leaves_another_users_session_alone() {
        let (service, store, _) = service().await;
        let lina = service.register(registration("lina@example.org")).await.unwrap();

        service.logout(&caller(uuid::Uuid::now_v7())).await.unwrap();
        assert_eq!(store.current_user().await.unwrap().id, lina.user.id);

        service.logout(&caller(lina.user.id)).await.unwrap();
        assert_eq!(store.current_user().await, None);
    }
}
