use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::resources::dtos::{
    AllocateResourceDto, AllocationResponseDto, CreateResourceDto, ResourceResponseDto,
    UpdateResourceDto,
};
use crate::features::resources::models::{AllocationFilter, NewAllocation, NewResource};
use crate::store::ReliefStore;

pub struct ResourceService {
    store: Arc<dyn ReliefStore>,
}

impl ResourceService {
    pub fn new(store: Arc<dyn ReliefStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<ResourceResponseDto>> {
        let resources = self.store.list_resources().await?;
        Ok(resources.into_iter().map(ResourceResponseDto::from).collect())
    }

    pub async fn create(&self, dto: CreateResourceDto) -> Result<ResourceResponseDto> {
        let new = NewResource {
            name: dto.name.trim().to_string(),
            quantity: dto.quantity,
            unit: dto.unit.trim().to_string(),
            category: dto.category.trim().to_string(),
        };
        let resource = self.store.create_resource(new).await?;
        Ok(resource.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateResourceDto) -> Result<ResourceResponseDto> {
        self.store.update_resource(id, dto.into()).await?;
        tracing::info!("Resource updated: {}", id);
        self.find(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.store.delete_resource(id).await?;
        tracing::info!("Resource deleted: {}", id);
        Ok(())
    }

    /// Commit stock to a victim request. The resource's quantity drops by the
    /// allocated amount in the same store operation.
    pub async fn allocate(&self, dto: AllocateResourceDto) -> Result<AllocationResponseDto> {
        let new = NewAllocation {
            resource_id: dto.resource_id,
            request_id: dto.request_id,
            quantity: dto.quantity,
        };
        let allocation = self.store.allocate_resource(new).await?;
        Ok(allocation.into())
    }

    pub async fn list_allocations(
        &self,
        filter: AllocationFilter,
    ) -> Result<Vec<AllocationResponseDto>> {
        let allocations = self.store.list_allocations(filter).await?;
        Ok(allocations
            .into_iter()
            .map(AllocationResponseDto::from)
            .collect())
    }

    async fn find(&self, id: Uuid) -> Result<ResourceResponseDto> {
        self.store
            .list_resources()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .map(ResourceResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Resource with id '{}' not found", id)))
    }
}
