use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::volunteers::models::{CallResponseStatus, VolunteerCall, VolunteerCallPatch};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LogCallDto {
    pub volunteer_id: Uuid,
    pub disaster_id: Option<Uuid>,

    #[serde(default)]
    pub response_status: CallResponseStatus,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCallDto {
    pub response_status: Option<CallResponseStatus>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl From<UpdateCallDto> for VolunteerCallPatch {
    fn from(dto: UpdateCallDto) -> Self {
        Self {
            response_status: dto.response_status,
            notes: dto.notes,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct OutreachListQuery {
    pub volunteer_id: Option<Uuid>,
    pub disaster_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CallResponseDto {
    pub id: Uuid,
    pub volunteer_id: Uuid,
    pub disaster_id: Option<Uuid>,
    pub called_by: Uuid,
    pub called_at: DateTime<Utc>,
    pub response_status: CallResponseStatus,
    pub notes: Option<String>,
}

impl From<VolunteerCall> for CallResponseDto {
    fn from(call: VolunteerCall) -> Self {
        Self {
            id: call.id,
            volunteer_id: call.volunteer_id,
            disaster_id: call.disaster_id,
            called_by: call.called_by,
            called_at: call.called_at,
            response_status: call.response_status,
            notes: call.notes,
        }
    }
}
