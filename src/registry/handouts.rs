//! Handout ledger: append-only assignment history

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Asset, CreateHandout, Handout, HandoutFilter, HandoutStatus},
};

use super::format_id;

const ID_PREFIX: &str = "HO";

#[derive(Default)]
struct HandoutStore {
    records: IndexMap<String, Handout>,
    /// asset id -> id of its single active handout
    active: HashMap<String, String>,
    next_seq: u32,
}

/// Owns the handout records; records reach `returned` exactly once and
/// are never deleted.
#[derive(Clone, Default)]
pub struct HandoutLedger {
    store: Arc<RwLock<HandoutStore>>,
}

impl HandoutLedger {
    /// Open a handout for an asset the coordinator has already resolved.
    /// Guards against a second active handout for the same asset even
    /// though the coordinator checks availability first.
    pub async fn open(&self, data: &CreateHandout, asset: &Asset) -> AppResult<Handout> {
        let mut store = self.store.write().await;
        if store.active.contains_key(&asset.id) {
            return Err(AppError::AlreadyActive(asset.id.clone()));
        }

        store.next_seq += 1;
        let id = format_id(ID_PREFIX, store.next_seq);
        let handout = Handout {
            id: id.clone(),
            asset_id: asset.id.clone(),
            asset_model: asset.label(),
            holder: data.holder.clone(),
            department: data.department.clone(),
            purpose: data.purpose.clone(),
            opened_at: Utc::now(),
            closed_at: None,
            status: HandoutStatus::Active,
        };
        store.active.insert(asset.id.clone(), id.clone());
        store.records.insert(id, handout.clone());
        Ok(handout)
    }

    /// Close a handout: `active -> returned`, setting `closed_at`
    pub async fn close(&self, id: &str) -> AppResult<Handout> {
        let mut store = self.store.write().await;
        let handout = store
            .records
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Handout {} not found", id)))?;
        if handout.status == HandoutStatus::Returned {
            return Err(AppError::AlreadyClosed(id.to_string()));
        }
        handout.status = HandoutStatus::Returned;
        handout.closed_at = Some(Utc::now());
        let handout = handout.clone();
        store.active.remove(&handout.asset_id);
        Ok(handout)
    }

    /// Get a handout by id
    pub async fn get(&self, id: &str) -> AppResult<Handout> {
        self.store
            .read()
            .await
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Handout {} not found", id)))
    }

    /// The single active handout for an asset, if any
    pub async fn active_for(&self, asset_id: &str) -> Option<Handout> {
        let store = self.store.read().await;
        let id = store.active.get(asset_id)?;
        store.records.get(id).cloned()
    }

    /// List handouts in creation order, optionally filtered
    pub async fn list(&self, filter: &HandoutFilter) -> Vec<Handout> {
        self.store
            .read()
            .await
            .records
            .values()
            .filter(|h| filter.matches(h))
            .cloned()
            .collect()
    }

    /// Count active handouts and distinct departments across all records
    pub async fn activity_counts(&self) -> (i64, i64, i64) {
        let store = self.store.read().await;
        let departments: std::collections::HashSet<&str> = store
            .records
            .values()
            .map(|h| h.department.as_str())
            .collect();
        (
            store.records.len() as i64,
            store.active.len() as i64,
            departments.len() as i64,
        )
    }

    /// Remove a handout created earlier in the same coordinator operation.
    /// Compensation path only; committed records are never deleted.
    pub(crate) async fn rollback_open(&self, id: &str) {
        let mut store = self.store.write().await;
        if let Some(handout) = store.records.shift_remove(id) {
            store.active.remove(&handout.asset_id);
        }
    }
}
