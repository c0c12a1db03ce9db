//! Lifecycle coordinator: the only write path into the record stores
//!
//! Every mutating operation validates the requested transition against
//! the current asset state before touching the registry or a ledger, and
//! serializes writes per asset so two concurrent commands on the same
//! asset cannot both pass the legality check.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        Asset, AssetFilter, AssetStatus, CreateAsset, CreateHandout, CreateRepair, Handout,
        HandoutFilter, RepairFilter, RepairOutcome, RepairStatus, RepairTicket,
    },
    registry::Registry,
};

#[derive(Clone)]
pub struct LifecycleService {
    registry: Registry,
    /// One mutex per asset id; guards the read-validate-write sequence
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl LifecycleService {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            locks: Arc::new(DashMap::new()),
        }
    }

    async fn lock_asset(&self, asset_id: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(asset_id.to_string())
            .or_default()
            .clone();
        lock.lock_owned().await
    }

    // -- Commands --------------------------------------------------------

    /// Register a new asset in the inventory
    pub async fn add_asset(&self, data: CreateAsset) -> AppResult<Asset> {
        data.validate()?;
        let asset = self.registry.assets.add(data).await?;
        tracing::info!(asset = %asset.id, serial = %asset.serial, "Asset added to inventory");
        Ok(asset)
    }

    /// Hand an available asset out to a holder
    pub async fn hand_out(&self, data: CreateHandout) -> AppResult<Handout> {
        data.validate()?;
        let _guard = self.lock_asset(&data.asset_id).await;

        let asset = self.registry.assets.get(&data.asset_id).await?;
        if asset.status != AssetStatus::Available {
            return Err(AppError::illegal_transition(
                "hand out",
                &asset.id,
                asset.status,
                AssetStatus::HandedOut,
            ));
        }

        let handout = self.registry.handouts.open(&data, &asset).await?;
        if let Err(e) = self
            .registry
            .assets
            .set_status(&asset.id, AssetStatus::HandedOut, Some(handout.holder.clone()))
            .await
        {
            // Keep the operation atomic: undo the ledger entry before reporting
            self.registry.handouts.rollback_open(&handout.id).await;
            return Err(e);
        }

        tracing::info!(
            asset = %asset.id,
            handout = %handout.id,
            holder = %handout.holder,
            department = %handout.department,
            "Asset handed out"
        );
        Ok(handout)
    }

    /// Return a handed-out asset, closing its handout
    pub async fn return_asset(&self, handout_id: &str) -> AppResult<Handout> {
        let handout = self.registry.handouts.get(handout_id).await?;
        let _guard = self.lock_asset(&handout.asset_id).await;

        // Re-read under the lock; a concurrent return may have won
        let handout = self.registry.handouts.get(handout_id).await?;
        if handout.closed_at.is_some() {
            return Err(AppError::AlreadyClosed(handout_id.to_string()));
        }

        let asset = self.registry.assets.get(&handout.asset_id).await?;
        if asset.status != AssetStatus::HandedOut {
            return Err(AppError::illegal_transition(
                "return",
                &asset.id,
                asset.status,
                AssetStatus::Available,
            ));
        }

        let handout = self.registry.handouts.close(handout_id).await?;
        self.registry
            .assets
            .set_status(&asset.id, AssetStatus::Available, None)
            .await?;

        tracing::info!(asset = %asset.id, handout = %handout.id, "Asset returned");
        Ok(handout)
    }

    /// Open a repair ticket. Legal from `available` and `handed-out`;
    /// in the latter case the active handout is force-closed so the
    /// mutual-exclusion invariant holds.
    pub async fn open_repair(&self, data: CreateRepair) -> AppResult<RepairTicket> {
        data.validate()?;
        let _guard = self.lock_asset(&data.asset_id).await;

        let asset = self.registry.assets.get(&data.asset_id).await?;
        // An existing open ticket is the more specific refusal than the
        // under-repair status it implies
        if self.registry.repairs.open_for(&asset.id).await.is_some() {
            return Err(AppError::RepairInProgress(asset.id));
        }
        if !matches!(asset.status, AssetStatus::Available | AssetStatus::HandedOut) {
            return Err(AppError::illegal_transition(
                "open repair for",
                &asset.id,
                asset.status,
                AssetStatus::UnderRepair,
            ));
        }

        let ticket = self.registry.repairs.open(&data, &asset).await?;

        if let Some(active) = self.registry.handouts.active_for(&asset.id).await {
            if let Err(e) = self.registry.handouts.close(&active.id).await {
                self.registry.repairs.rollback_open(&ticket.id).await;
                return Err(e);
            }
            tracing::info!(
                asset = %asset.id,
                handout = %active.id,
                holder = %active.holder,
                "Active handout force-closed by repair intake"
            );
        }

        if let Err(e) = self
            .registry
            .assets
            .set_status(&asset.id, AssetStatus::UnderRepair, None)
            .await
        {
            self.registry.repairs.rollback_open(&ticket.id).await;
            return Err(e);
        }

        tracing::info!(
            asset = %asset.id,
            ticket = %ticket.id,
            technician = %ticket.technician,
            priority = %ticket.priority,
            "Repair ticket opened"
        );
        Ok(ticket)
    }

    /// Move a pending ticket to `in-progress`. The asset stays `under-repair`.
    pub async fn start_repair(&self, ticket_id: &str) -> AppResult<RepairTicket> {
        let ticket = self.registry.repairs.get(ticket_id).await?;
        let _guard = self.lock_asset(&ticket.asset_id).await;

        let ticket = self
            .registry
            .repairs
            .advance(ticket_id, RepairStatus::InProgress)
            .await?;
        tracing::info!(asset = %ticket.asset_id, ticket = %ticket.id, "Repair started");
        Ok(ticket)
    }

    /// Close a repair ticket. Both outcomes restore the asset to `available`;
    /// cancellation restores the availability the repair interrupted.
    pub async fn close_repair(
        &self,
        ticket_id: &str,
        outcome: RepairOutcome,
    ) -> AppResult<RepairTicket> {
        let ticket = self.registry.repairs.get(ticket_id).await?;
        let _guard = self.lock_asset(&ticket.asset_id).await;

        let ticket = self.registry.repairs.get(ticket_id).await?;
        if ticket.status.is_terminal() {
            return Err(AppError::illegal_transition(
                "close repair ticket",
                ticket_id,
                ticket.status,
                RepairStatus::from(outcome),
            ));
        }

        let asset = self.registry.assets.get(&ticket.asset_id).await?;
        if asset.status != AssetStatus::UnderRepair {
            return Err(AppError::illegal_transition(
                "close repair for",
                &asset.id,
                asset.status,
                AssetStatus::Available,
            ));
        }

        // Completion of a ticket that was never started passes through
        // in-progress so the ledger sees only legal transitions.
        if outcome == RepairOutcome::Completed && ticket.status == RepairStatus::Pending {
            self.registry
                .repairs
                .advance(ticket_id, RepairStatus::InProgress)
                .await?;
        }
        let ticket = self
            .registry
            .repairs
            .advance(ticket_id, outcome.into())
            .await?;

        self.registry
            .assets
            .set_status(&asset.id, AssetStatus::Available, None)
            .await?;

        tracing::info!(
            asset = %asset.id,
            ticket = %ticket.id,
            outcome = %ticket.status,
            "Repair ticket closed"
        );
        Ok(ticket)
    }

    /// Mark an asset out of order. Legal from `available` and `under-repair`;
    /// a non-terminal repair ticket is cancelled as a side effect.
    pub async fn mark_out_of_order(
        &self,
        asset_id: &str,
        reason: &str,
        actor: &str,
    ) -> AppResult<Asset> {
        let _guard = self.lock_asset(asset_id).await;

        let asset = self.registry.assets.get(asset_id).await?;
        if !matches!(asset.status, AssetStatus::Available | AssetStatus::UnderRepair) {
            return Err(AppError::illegal_transition(
                "mark out of order",
                &asset.id,
                asset.status,
                AssetStatus::OutOfOrder,
            ));
        }

        if let Some(ticket) = self.registry.repairs.open_for(asset_id).await {
            self.registry
                .repairs
                .advance(&ticket.id, RepairStatus::Cancelled)
                .await?;
            tracing::info!(asset = %asset.id, ticket = %ticket.id, "Open repair ticket cancelled");
        }

        let asset = self
            .registry
            .assets
            .set_status(asset_id, AssetStatus::OutOfOrder, None)
            .await?;
        tracing::warn!(asset = %asset.id, %reason, %actor, "Asset marked out of order");
        Ok(asset)
    }

    /// Administrative retirement: legal from any non-retired state. An
    /// active handout is force-closed and a non-terminal repair ticket
    /// cancelled so no open record references a retired asset.
    pub async fn retire(
        &self,
        asset_id: &str,
        reason: Option<&str>,
        actor: &str,
    ) -> AppResult<Asset> {
        let _guard = self.lock_asset(asset_id).await;

        let asset = self.registry.assets.get(asset_id).await?;
        if asset.status == AssetStatus::OutOfOrder {
            return Err(AppError::illegal_transition(
                "retire",
                &asset.id,
                asset.status,
                AssetStatus::OutOfOrder,
            ));
        }

        if let Some(active) = self.registry.handouts.active_for(asset_id).await {
            self.registry.handouts.close(&active.id).await?;
            tracing::info!(asset = %asset.id, handout = %active.id, "Active handout force-closed by retirement");
        }
        if let Some(ticket) = self.registry.repairs.open_for(asset_id).await {
            self.registry
                .repairs
                .advance(&ticket.id, RepairStatus::Cancelled)
                .await?;
            tracing::info!(asset = %asset.id, ticket = %ticket.id, "Open repair ticket cancelled by retirement");
        }

        let asset = self
            .registry
            .assets
            .set_status(asset_id, AssetStatus::OutOfOrder, None)
            .await?;
        tracing::warn!(
            asset = %asset.id,
            reason = reason.unwrap_or("none given"),
            %actor,
            "Asset retired"
        );
        Ok(asset)
    }

    /// Administrative reinstatement of a retired asset
    pub async fn reinstate(&self, asset_id: &str, actor: &str) -> AppResult<Asset> {
        let _guard = self.lock_asset(asset_id).await;

        let asset = self.registry.assets.get(asset_id).await?;
        if asset.status != AssetStatus::OutOfOrder {
            return Err(AppError::illegal_transition(
                "reinstate",
                &asset.id,
                asset.status,
                AssetStatus::Available,
            ));
        }

        let asset = self
            .registry
            .assets
            .set_status(asset_id, AssetStatus::Available, None)
            .await?;
        tracing::warn!(asset = %asset.id, %actor, "Asset reinstated");
        Ok(asset)
    }

    // -- Queries ---------------------------------------------------------

    pub async fn get_asset(&self, id: &str) -> AppResult<Asset> {
        self.registry.assets.get(id).await
    }

    pub async fn list_assets(&self, filter: &AssetFilter) -> Vec<Asset> {
        self.registry.assets.list(filter).await
    }

    pub async fn get_handout(&self, id: &str) -> AppResult<Handout> {
        self.registry.handouts.get(id).await
    }

    pub async fn list_handouts(&self, filter: &HandoutFilter) -> Vec<Handout> {
        self.registry.handouts.list(filter).await
    }

    pub async fn get_repair(&self, id: &str) -> AppResult<RepairTicket> {
        self.registry.repairs.get(id).await
    }

    pub async fn list_repairs(&self, filter: &RepairFilter) -> Vec<RepairTicket> {
        self.registry.repairs.list(filter).await
    }
}
