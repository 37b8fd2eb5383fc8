use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::disasters::dtos::{CreateDisasterDto, DisasterResponseDto, UpdateDisasterDto};
use crate::features::disasters::models::{DisasterFilter, DisasterStatus, NewDisaster};
use crate::store::ReliefStore;

pub struct DisasterService {
    store: Arc<dyn ReliefStore>,
}

impl DisasterService {
    pub fn new(store: Arc<dyn ReliefStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, status: Option<DisasterStatus>) -> Result<Vec<DisasterResponseDto>> {
        let disasters = self.store.list_disasters(DisasterFilter { status }).await?;
        Ok(disasters.into_iter().map(DisasterResponseDto::from).collect())
    }

    pub async fn create(&self, dto: CreateDisasterDto) -> Result<DisasterResponseDto> {
        let new = NewDisaster {
            name: dto.name.trim().to_string(),
            location: dto.location.trim().to_string(),
            description: dto.description,
            severity: dto.severity,
            status: dto.status,
        };
        let disaster = self.store.create_disaster(new).await?;
        tracing::info!("Disaster created: {} ({})", disaster.id, disaster.name);
        Ok(disaster.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateDisasterDto) -> Result<DisasterResponseDto> {
        self.store.update_disaster(id, dto.into()).await?;
        tracing::info!("Disaster updated: {}", id);

        self.store
            .list_disasters(DisasterFilter::default())
            .await?
            .into_iter()
            .find(|d| d.id == id)
            .map(DisasterResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Disaster with id '{}' not found", id)))
    }
}
