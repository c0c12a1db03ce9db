//! Record stores: asset registry and the handout/repair ledgers
//!
//! Each store exclusively owns its record collection; cross-entity
//! consistency is enforced by the lifecycle coordinator, which is the
//! only caller of the mutating entry points.

pub mod assets;
pub mod handouts;
pub mod repairs;

use crate::{
    error::AppResult,
    models::{AssetStatus, CreateAsset, CreateHandout, CreateRepair, RepairStatus},
};

/// Container for all record stores
#[derive(Clone, Default)]
pub struct Registry {
    pub assets: assets::AssetRegistry,
    pub handouts: handouts::HandoutLedger,
    pub repairs: repairs::RepairLedger,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the demo fleet from the original mock data, reconciled so the
    /// seeded records satisfy the engine invariants.
    pub async fn seed_demo(&self) -> AppResult<()> {
        let demo_assets = [
            ("LP-001", "Dell", "Latitude 7420", "DL7420001", "Intel i7, 16GB RAM, 512GB SSD", "Excellent"),
            ("LP-002", "Lenovo", "ThinkPad X1 Carbon", "LV1XC002", "Intel i5, 8GB RAM, 256GB SSD", "Good"),
            ("LP-003", "HP", "EliteBook 840", "HP840003", "Intel i7, 32GB RAM, 1TB SSD", "Excellent"),
            ("LP-004", "Apple", "MacBook Pro 14", "MBP14004", "M2 Pro, 16GB RAM, 512GB SSD", "Like New"),
        ];
        for (id, brand, model, serial, specs, condition) in demo_assets {
            self.assets
                .add(CreateAsset {
                    id: Some(id.to_string()),
                    brand: brand.to_string(),
                    model: model.to_string(),
                    serial: serial.to_string(),
                    specs: specs.to_string(),
                    condition: condition.to_string(),
                    status: None,
                })
                .await?;
        }

        // LP-002 handed out to Alice Johnson (Marketing)
        let asset = self.assets.get("LP-002").await?;
        let handout = self
            .handouts
            .open(
                &CreateHandout {
                    asset_id: asset.id.clone(),
                    holder: "Alice Johnson".to_string(),
                    department: "Marketing".to_string(),
                    purpose: Some("Quarterly presentation preparation".to_string()),
                },
                &asset,
            )
            .await?;
        self.assets
            .set_status(&asset.id, AssetStatus::HandedOut, Some(handout.holder))
            .await?;

        // LP-003 under repair (screen flickering, John Smith)
        let asset = self.assets.get("LP-003").await?;
        let ticket = self
            .repairs
            .open(
                &CreateRepair {
                    asset_id: asset.id.clone(),
                    issue: "Screen flickering, possible LCD cable issue".to_string(),
                    technician: "John Smith".to_string(),
                    cost: 150.0,
                    priority: crate::models::RepairPriority::High,
                },
                &asset,
            )
            .await?;
        self.repairs
            .advance(&ticket.id, RepairStatus::InProgress)
            .await?;
        self.assets
            .set_status(&asset.id, AssetStatus::UnderRepair, None)
            .await?;

        Ok(())
    }
}

/// Format a zero-padded sequential id such as `LP-007`
pub(crate) fn format_id(prefix: &str, seq: u32) -> String {
    format!("{}-{:03}", prefix, seq)
}

/// Parse the numeric suffix of a caller-supplied id so sequence counters
/// stay ahead of seeded ids and never re-issue one.
pub(crate) fn id_sequence(prefix: &str, id: &str) -> Option<u32> {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .and_then(|digits| digits.parse().ok())
}
