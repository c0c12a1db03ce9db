//! Handout (assignment) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::HandoutStatus;

/// A time-bounded assignment of one asset to one holder
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Handout {
    /// Unique identifier, format `HO-###`
    pub id: String,
    /// Asset this handout refers to
    pub asset_id: String,
    /// Brand/model snapshot of the asset at handout time
    pub asset_model: String,
    /// Person holding the asset
    pub holder: String,
    pub department: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    pub opened_at: DateTime<Utc>,
    /// Set exactly once, when the handout is returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    pub status: HandoutStatus,
}

/// Create handout request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateHandout {
    #[validate(length(min = 1, message = "Asset id is required"))]
    pub asset_id: String,
    #[validate(length(min = 1, message = "Holder is required"))]
    pub holder: String,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    pub purpose: Option<String>,
}

/// Query filter for handout listings
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct HandoutFilter {
    /// Exact status match
    pub status: Option<HandoutStatus>,
    /// Case-insensitive substring over asset id, holder, department and purpose
    pub q: Option<String>,
}

impl HandoutFilter {
    pub fn matches(&self, handout: &Handout) -> bool {
        if let Some(status) = self.status {
            if handout.status != status {
                return false;
            }
        }
        match self.q.as_deref() {
            None => true,
            Some(q) => {
                let q = q.to_lowercase();
                handout.asset_id.to_lowercase().contains(&q)
                    || handout.holder.to_lowercase().contains(&q)
                    || handout.department.to_lowercase().contains(&q)
                    || handout
                        .purpose
                        .as_deref()
                        .is_some_and(|p| p.to_lowercase().contains(&q))
            }
        }
    }
}
