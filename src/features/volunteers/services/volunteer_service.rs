use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::volunteers::dtos::{RegisterVolunteerDto, VolunteerResponseDto};
use crate::features::volunteers::models::{
    NewVolunteer, VolunteerFilter, VolunteerPatch, VolunteerStatus,
};
use crate::store::ReliefStore;

pub struct VolunteerService {
    store: Arc<dyn ReliefStore>,
}

impl VolunteerService {
    pub fn new(store: Arc<dyn ReliefStore>) -> Self {
        Self { store }
    }

    /// Register the caller as a volunteer. A second registration for the same
    /// disaster (or a second general registration) is a conflict.
    pub async fn register(
        &self,
        user_id: Uuid,
        dto: RegisterVolunteerDto,
    ) -> Result<VolunteerResponseDto> {
        let skills = dto
            .skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let new = NewVolunteer {
            user_id,
            disaster_id: dto.disaster_id,
            skills,
            availability: dto.availability.trim().to_string(),
            location: dto.location.trim().to_string(),
            contact_info: dto.contact_info.trim().to_string(),
        };
        let volunteer = self.store.create_volunteer(new).await?;
        Ok(volunteer.into())
    }

    pub async fn list_mine(&self, user_id: Uuid) -> Result<Vec<VolunteerResponseDto>> {
        let filter = VolunteerFilter {
            user_id: Some(user_id),
            ..Default::default()
        };
        let volunteers = self.store.list_volunteers(filter).await?;
        Ok(volunteers.into_iter().map(VolunteerResponseDto::from).collect())
    }

    pub async fn list_all(
        &self,
        status: Option<VolunteerStatus>,
    ) -> Result<Vec<VolunteerResponseDto>> {
        let filter = VolunteerFilter {
            status,
            ..Default::default()
        };
        let volunteers = self.store.list_volunteers(filter).await?;
        Ok(volunteers.into_iter().map(VolunteerResponseDto::from).collect())
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: VolunteerStatus,
    ) -> Result<VolunteerResponseDto> {
        let patch = VolunteerPatch {
            status: Some(status),
            ..Default::default()
        };
        self.store.update_volunteer(id, patch).await?;
        tracing::info!("Volunteer {} status set to {:?}", id, status);

        self.store
            .list_volunteers(VolunteerFilter::default())
            .await?
            .into_iter()
            .find(|v| v.volunteer.id == id)
            .map(VolunteerResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Volunteer with id '{}' not found", id)))
    }
}
