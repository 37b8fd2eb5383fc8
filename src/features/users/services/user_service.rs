use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{UpdateOwnProfileDto, UserResponseDto};
use crate::features::users::models::UserPatch;
use crate::store::ReliefStore;

pub struct UserService {
    store: Arc<dyn ReliefStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn ReliefStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<UserResponseDto>> {
        let users = self.store.list_users().await?;
        Ok(users.into_iter().map(UserResponseDto::from).collect())
    }

    pub async fn update_own_profile(
        &self,
        user_id: Uuid,
        dto: UpdateOwnProfileDto,
    ) -> Result<UserResponseDto> {
        let patch = UserPatch {
            name: dto.name.map(|n| n.trim().to_string()),
            phone: dto.phone.map(|p| p.trim().to_string()),
            is_active: None,
        };
        self.store.update_user(user_id, patch).await?;
        tracing::info!("Profile updated for user {}", user_id);
        self.find(user_id).await
    }

    /// Activation toggle. Deactivated users can no longer sign in.
    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<UserResponseDto> {
        let patch = UserPatch {
            is_active: Some(is_active),
            ..Default::default()
        };
        self.store.update_user(id, patch).await?;
        tracing::info!("User {} active flag set to {}", id, is_active);
        self.find(id).await
    }

    async fn find(&self, id: Uuid) -> Result<UserResponseDto> {
        self.store
            .list_users()
            .await?
            .into_iter()
            .find(|u| u.id == id)
            .map(UserResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))
    }
}
