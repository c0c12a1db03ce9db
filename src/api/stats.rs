//! Fleet statistics endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Asset counts per status
#[derive(Serialize, ToSchema)]
pub struct AssetCounts {
    pub total: i64,
    pub available: i64,
    pub handed_out: i64,
    pub under_repair: i64,
    pub out_of_order: i64,
}

/// Handout activity counts
#[derive(Serialize, ToSchema)]
pub struct HandoutCounts {
    pub total: i64,
    pub active: i64,
    /// Distinct departments across all handout records
    pub departments: i64,
}

/// Repair activity counts
#[derive(Serialize, ToSchema)]
pub struct RepairCounts {
    pub total: i64,
    pub open: i64,
    /// Summed cost over non-cancelled tickets
    pub total_cost: f64,
}

/// Aggregate fleet statistics
#[derive(Serialize, ToSchema)]
pub struct FleetStatsResponse {
    pub assets: AssetCounts,
    pub handouts: HandoutCounts,
    pub repairs: RepairCounts,
}

/// Get fleet statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Fleet statistics", body = FleetStatsResponse)
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
) -> AppResult<Json<FleetStatsResponse>> {
    let stats = state.services.stats.get_stats().await?;
    Ok(Json(stats))
}
