//! Repair ticket model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{RepairPriority, RepairStatus};

/// A service record tracking diagnosis and resolution of an asset defect
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RepairTicket {
    /// Unique identifier, format `RPR-###`
    pub id: String,
    /// Asset this ticket refers to
    pub asset_id: String,
    /// Brand/model snapshot of the asset at ticket creation time
    pub asset_model: String,
    pub issue: String,
    pub technician: String,
    /// Estimated or billed cost, non-negative
    pub cost: f64,
    pub priority: RepairPriority,
    pub status: RepairStatus,
    pub created_at: DateTime<Utc>,
    /// Set when the ticket enters `completed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Create repair ticket request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRepair {
    #[validate(length(min = 1, message = "Asset id is required"))]
    pub asset_id: String,
    #[validate(length(min = 1, message = "Issue description is required"))]
    pub issue: String,
    #[validate(length(min = 1, message = "Technician is required"))]
    pub technician: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub priority: RepairPriority,
}

/// Query filter for repair ticket listings
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RepairFilter {
    /// Exact status match
    pub status: Option<RepairStatus>,
    /// Case-insensitive substring over asset id, asset model, issue and technician
    pub q: Option<String>,
}

impl RepairFilter {
    pub fn matches(&self, ticket: &RepairTicket) -> bool {
        if let Some(status) = self.status {
            if ticket.status != status {
                return false;
            }
        }
        match self.q.as_deref() {
            None => true,
            Some(q) => {
                let q = q.to_lowercase();
                ticket.asset_id.to_lowercase().contains(&q)
                    || ticket.asset_model.to_lowercase().contains(&q)
                    || ticket.issue.to_lowercase().contains(&q)
                    || ticket.technician.to_lowercase().contains(&q)
            }
        }
    }
}
