//! Repair ledger: append-only service history

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Asset, CreateRepair, RepairFilter, RepairStatus, RepairTicket},
};

use super::format_id;

const ID_PREFIX: &str = "RPR";

#[derive(Default)]
struct RepairStore {
    records: IndexMap<String, RepairTicket>,
    /// asset id -> id of its single non-terminal ticket
    open: HashMap<String, String>,
    next_seq: u32,
}

/// Owns the repair ticket records; tickets move to a terminal state
/// exactly once and are never deleted.
#[derive(Clone, Default)]
pub struct RepairLedger {
    store: Arc<RwLock<RepairStore>>,
}

impl RepairLedger {
    /// Open a ticket for an asset the coordinator has already resolved.
    /// Guards against a second non-terminal ticket for the same asset.
    pub async fn open(&self, data: &CreateRepair, asset: &Asset) -> AppResult<RepairTicket> {
        if data.cost.is_nan() || data.cost < 0.0 {
            return Err(AppError::InvalidCost(data.cost));
        }

        let mut store = self.store.write().await;
        if store.open.contains_key(&asset.id) {
            return Err(AppError::RepairInProgress(asset.id.clone()));
        }

        store.next_seq += 1;
        let id = format_id(ID_PREFIX, store.next_seq);
        let ticket = RepairTicket {
            id: id.clone(),
            asset_id: asset.id.clone(),
            asset_model: asset.label(),
            issue: data.issue.clone(),
            technician: data.technician.clone(),
            cost: data.cost,
            priority: data.priority,
            status: RepairStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
        };
        store.open.insert(asset.id.clone(), id.clone());
        store.records.insert(id, ticket.clone());
        Ok(ticket)
    }

    /// Advance a ticket along the legal transitions:
    /// `pending -> in-progress`, `pending -> cancelled`,
    /// `in-progress -> completed`, `in-progress -> cancelled`.
    pub async fn advance(&self, id: &str, new_status: RepairStatus) -> AppResult<RepairTicket> {
        let mut store = self.store.write().await;
        let ticket = store
            .records
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Repair ticket {} not found", id)))?;

        let legal = matches!(
            (ticket.status, new_status),
            (RepairStatus::Pending, RepairStatus::InProgress)
                | (RepairStatus::Pending, RepairStatus::Cancelled)
                | (RepairStatus::InProgress, RepairStatus::Completed)
                | (RepairStatus::InProgress, RepairStatus::Cancelled)
        );
        if !legal {
            return Err(AppError::illegal_transition(
                "advance repair ticket",
                id,
                ticket.status,
                new_status,
            ));
        }

        ticket.status = new_status;
        if new_status == RepairStatus::Completed {
            ticket.completed_at = Some(Utc::now());
        }
        let ticket = ticket.clone();
        if new_status.is_terminal() {
            store.open.remove(&ticket.asset_id);
        }
        Ok(ticket)
    }

    /// Get a ticket by id
    pub async fn get(&self, id: &str) -> AppResult<RepairTicket> {
        self.store
            .read()
            .await
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Repair ticket {} not found", id)))
    }

    /// The single non-terminal ticket for an asset, if any
    pub async fn open_for(&self, asset_id: &str) -> Option<RepairTicket> {
        let store = self.store.read().await;
        let id = store.open.get(asset_id)?;
        store.records.get(id).cloned()
    }

    /// List tickets in creation order, optionally filtered
    pub async fn list(&self, filter: &RepairFilter) -> Vec<RepairTicket> {
        self.store
            .read()
            .await
            .records
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect()
    }

    /// Count tickets and sum repair cost over non-cancelled tickets
    pub async fn cost_counts(&self) -> (i64, i64, f64) {
        let store = self.store.read().await;
        let total_cost = store
            .records
            .values()
            .filter(|t| t.status != RepairStatus::Cancelled)
            .map(|t| t.cost)
            .sum();
        (
            store.records.len() as i64,
            store.open.len() as i64,
            total_cost,
        )
    }

    /// Remove a ticket created earlier in the same coordinator operation.
    /// Compensation path only; committed records are never deleted.
    pub(crate) async fn rollback_open(&self, id: &str) {
        let mut store = self.store.write().await;
        if let Some(ticket) = store.records.shift_remove(id) {
            store.open.remove(&ticket.asset_id);
        }
    }
}
