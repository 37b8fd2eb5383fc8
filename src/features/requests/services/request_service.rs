use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::requests::dtos::{CreateRequestDto, RequestResponseDto};
use crate::features::requests::models::{NewVictimRequest, RequestFilter, VictimRequestPatch};
use crate::shared::status::ReviewStatus;
use crate::store::ReliefStore;

pub struct RequestService {
    store: Arc<dyn ReliefStore>,
}

impl RequestService {
    pub fn new(store: Arc<dyn ReliefStore>) -> Self {
        Self { store }
    }

    /// Submit a request; every new request starts out pending.
    pub async fn create(&self, user_id: Uuid, dto: CreateRequestDto) -> Result<RequestResponseDto> {
        let new = NewVictimRequest {
            user_id,
            name: dto.name.trim().to_string(),
            location: dto.location.trim().to_string(),
            description: dto.description.trim().to_string(),
            urgency: dto.urgency,
            status: ReviewStatus::Pending,
        };

        let request = self.store.create_request(new).await?;
        tracing::info!(
            "Victim request {} submitted by {} ({})",
            request.id,
            user_id,
            request.urgency
        );
        Ok(request.into())
    }

    pub async fn list_mine(&self, user_id: Uuid) -> Result<Vec<RequestResponseDto>> {
        let filter = RequestFilter {
            user_id: Some(user_id),
            ..Default::default()
        };
        let requests = self.store.list_requests(filter).await?;
        Ok(requests.into_iter().map(RequestResponseDto::from).collect())
    }

    pub async fn list_all(&self, status: Option<ReviewStatus>) -> Result<Vec<RequestResponseDto>> {
        let filter = RequestFilter {
            status,
            ..Default::default()
        };
        let requests = self.store.list_requests(filter).await?;
        Ok(requests.into_iter().map(RequestResponseDto::from).collect())
    }

    /// Admin triage: `pending -> approved | rejected`, `approved -> completed`.
    pub async fn update_status(&self, id: Uuid, status: ReviewStatus) -> Result<RequestResponseDto> {
        let current = self.find(id).await?;
        if !current.status.can_transition_to(status) {
            return Err(AppError::Conflict(format!(
                "Cannot move request from {} to {}",
                current.status, status
            )));
        }

        let patch = VictimRequestPatch {
            status: Some(status),
            ..Default::default()
        };
        self.store.update_request(id, patch).await?;
        tracing::info!("Victim request {} moved to {}", id, status);
        self.find(id).await
    }

    async fn find(&self, id: Uuid) -> Result<RequestResponseDto> {
        self.store
            .list_requests(RequestFilter::default())
            .await?
            .into_iter()
            .find(|r| r.request.id == id)
            .map(RequestResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Request with id '{}' not found", id)))
    }
}
