use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::volunteers::dtos::{CallResponseDto, LogCallDto, UpdateCallDto};
use crate::features::volunteers::models::{CallFilter, NewVolunteerCall};
use crate::store::ReliefStore;

/// Admin log of contact attempts to volunteers
pub struct OutreachService {
    store: Arc<dyn ReliefStore>,
}

impl OutreachService {
    pub fn new(store: Arc<dyn ReliefStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: CallFilter) -> Result<Vec<CallResponseDto>> {
        let calls = self.store.list_calls(filter).await?;
        Ok(calls.into_iter().map(CallResponseDto::from).collect())
    }

    /// Log a call made by `admin_id`. The volunteer must exist.
    pub async fn log_call(&self, admin_id: Uuid, dto: LogCallDto) -> Result<CallResponseDto> {
        let new = NewVolunteerCall {
            volunteer_id: dto.volunteer_id,
            disaster_id: dto.disaster_id,
            called_by: admin_id,
            response_status: dto.response_status,
            notes: dto.notes,
        };
        let call = self.store.create_call(new).await?;
        Ok(call.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateCallDto) -> Result<CallResponseDto> {
        self.store.update_call(id, dto.into()).await?;
        tracing::info!("Volunteer call {} updated", id);

        self.store
            .list_calls(CallFilter::default())
            .await?
            .into_iter()
            .find(|c| c.id == id)
            .map(CallResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Volunteer call with id '{}' not found", id)))
    }
}
