//! Fleet statistics service

use crate::{
    api::stats::{AssetCounts, FleetStatsResponse, HandoutCounts, RepairCounts},
    error::AppResult,
    registry::Registry,
};

#[derive(Clone)]
pub struct StatsService {
    registry: Registry,
}

impl StatsService {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Derive the dashboard aggregates from the current record sets.
    /// Nothing is materialized; each call recomputes from the stores.
    pub async fn get_stats(&self) -> AppResult<FleetStatsResponse> {
        let (total, available, handed_out, under_repair, out_of_order) =
            self.registry.assets.status_counts().await;
        let (handouts_total, active, departments) =
            self.registry.handouts.activity_counts().await;
        let (repairs_total, open, total_cost) = self.registry.repairs.cost_counts().await;

        Ok(FleetStatsResponse {
            assets: AssetCounts {
                total,
                available,
                handed_out,
                under_repair,
                out_of_order,
            },
            handouts: HandoutCounts {
                total: handouts_total,
                active,
                departments,
            },
            repairs: RepairCounts {
                total: repairs_total,
                open,
                total_cost,
            },
        })
    }
}
