//! Asset registry: the single source of truth for asset status

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Asset, AssetFilter, AssetStatus, CreateAsset},
};

use super::{format_id, id_sequence};

const ID_PREFIX: &str = "LP";

#[derive(Default)]
struct AssetStore {
    records: IndexMap<String, Asset>,
    /// serial (lowercased) -> asset id, for uniqueness checks
    serials: HashMap<String, String>,
    next_seq: u32,
}

/// Owns the canonical asset records, including `status` and `assigned_to`
#[derive(Clone, Default)]
pub struct AssetRegistry {
    store: Arc<RwLock<AssetStore>>,
}

impl AssetRegistry {
    /// Register a new asset. The initial status defaults to `available`;
    /// `handed-out` is rejected because an assignment must come from a handout.
    pub async fn add(&self, data: CreateAsset) -> AppResult<Asset> {
        let status = data.status.unwrap_or(AssetStatus::Available);
        if status == AssetStatus::HandedOut {
            return Err(AppError::Validation(
                "An asset cannot be created as handed-out; open a handout instead".to_string(),
            ));
        }

        let mut store = self.store.write().await;

        let serial_key = data.serial.to_lowercase();
        if store.serials.contains_key(&serial_key) {
            return Err(AppError::DuplicateSerial(data.serial));
        }

        let id = match data.id {
            Some(id) => {
                if store.records.contains_key(&id) {
                    return Err(AppError::DuplicateId(id));
                }
                if let Some(seq) = id_sequence(ID_PREFIX, &id) {
                    store.next_seq = store.next_seq.max(seq);
                }
                id
            }
            None => {
                store.next_seq += 1;
                format_id(ID_PREFIX, store.next_seq)
            }
        };

        let asset = Asset {
            id: id.clone(),
            brand: data.brand,
            model: data.model,
            serial: data.serial,
            specs: data.specs,
            condition: data.condition,
            status,
            assigned_to: None,
        };
        store.serials.insert(serial_key, id.clone());
        store.records.insert(id, asset.clone());
        Ok(asset)
    }

    /// Get an asset by id
    pub async fn get(&self, id: &str) -> AppResult<Asset> {
        self.store
            .read()
            .await
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    /// Write the canonical status. Invoked solely by the lifecycle
    /// coordinator; business legality is validated there. This only
    /// enforces the structural rule: `assigned_to` is present iff the
    /// status is `handed-out`.
    pub(crate) async fn set_status(
        &self,
        id: &str,
        status: AssetStatus,
        assigned_to: Option<String>,
    ) -> AppResult<Asset> {
        if assigned_to.is_some() != (status == AssetStatus::HandedOut) {
            return Err(AppError::InvariantViolation(format!(
                "Asset {}: assigned_to must be present iff status is handed-out (got {} with assignee {:?})",
                id, status, assigned_to
            )));
        }

        let mut store = self.store.write().await;
        let asset = store
            .records
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))?;
        asset.status = status;
        asset.assigned_to = assigned_to;
        Ok(asset.clone())
    }

    /// List assets, newest last, optionally filtered
    pub async fn list(&self, filter: &AssetFilter) -> Vec<Asset> {
        self.store
            .read()
            .await
            .records
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect()
    }

    /// Count assets per status (total, available, handed-out, under-repair, out-of-order)
    pub async fn status_counts(&self) -> (i64, i64, i64, i64, i64) {
        let store = self.store.read().await;
        let mut counts = (store.records.len() as i64, 0, 0, 0, 0);
        for asset in store.records.values() {
            match asset.status {
                AssetStatus::Available => counts.1 += 1,
                AssetStatus::HandedOut => counts.2 += 1,
                AssetStatus::UnderRepair => counts.3 += 1,
                AssetStatus::OutOfOrder => counts.4 += 1,
            }
        }
        counts
    }
}
