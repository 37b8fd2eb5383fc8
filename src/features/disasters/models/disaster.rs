use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::status::Severity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "disaster_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DisasterStatus {
    #[default]
    Active,
    Resolved,
}

/// A disaster event, the context volunteers are matched against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Disaster {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub description: String,
    pub severity: Severity,
    pub status: DisasterStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDisaster {
    pub name: String,
    pub location: String,
    pub description: String,
    pub severity: Severity,
    pub status: DisasterStatus,
}

#[derive(Debug, Clone, Default)]
pub struct DisasterPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub severity: Option<Severity>,
    pub status: Option<DisasterStatus>,
}

impl Disaster {
    pub fn apply(&mut self, patch: DisasterPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(severity) = patch.severity {
            self.severity = severity;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DisasterFilter {
    pub status: Option<DisasterStatus>,
}

impl DisasterFilter {
    pub fn matches(&self, disaster: &Disaster) -> bool {
        self.status.is_none_or(|s| disaster.status == s)
    }
}
