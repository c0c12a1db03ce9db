//! Asset (laptop) model and related types

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::AssetStatus;

/// A tracked laptop unit
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Asset {
    /// Unique identifier, format `LP-###`
    pub id: String,
    pub brand: String,
    pub model: String,
    /// Serial number, unique across the fleet
    pub serial: String,
    /// Free-text hardware description
    pub specs: String,
    /// Free-text condition (e.g. "Excellent", "Good")
    pub condition: String,
    pub status: AssetStatus,
    /// Current holder; present iff status is `handed-out`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

impl Asset {
    /// Display label combining brand and model, used for ledger snapshots
    pub fn label(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

/// Create asset request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAsset {
    /// Optional caller-supplied id (`LP-###`); allocated by the registry when absent
    pub id: Option<String>,
    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,
    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,
    #[validate(length(min = 1, message = "Serial number is required"))]
    pub serial: String,
    #[serde(default)]
    pub specs: String,
    #[serde(default)]
    pub condition: String,
    /// Initial status for seeded inventory; defaults to `available`.
    /// `handed-out` is rejected, an assignment can only come from a handout.
    pub status: Option<AssetStatus>,
}

/// Query filter for asset listings
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AssetFilter {
    /// Exact status match
    pub status: Option<AssetStatus>,
    /// Case-insensitive substring over id, brand, model and serial
    pub q: Option<String>,
}

impl AssetFilter {
    pub fn matches(&self, asset: &Asset) -> bool {
        if let Some(status) = self.status {
            if asset.status != status {
                return false;
            }
        }
        match self.q.as_deref() {
            None => true,
            Some(q) => {
                let q = q.to_lowercase();
                asset.id.to_lowercase().contains(&q)
                    || asset.brand.to_lowercase().contains(&q)
                    || asset.model.to_lowercase().contains(&q)
                    || asset.serial.to_lowercase().contains(&q)
            }
        }
    }
}
