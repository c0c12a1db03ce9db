//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{assets, handouts, health, repairs, stats};
use crate::error::ErrorResponse;
use crate::models::{
    asset::{Asset, CreateAsset},
    enums::{AssetStatus, HandoutStatus, RepairOutcome, RepairPriority, RepairStatus},
    handout::{CreateHandout, Handout},
    repair::{CreateRepair, RepairTicket},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LaptopMS API",
        version = "0.3.0",
        description = "Laptop Fleet Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Assets
        assets::list_assets,
        assets::get_asset,
        assets::create_asset,
        assets::mark_out_of_order,
        assets::retire_asset,
        assets::reinstate_asset,
        // Handouts
        handouts::list_handouts,
        handouts::get_handout,
        handouts::create_handout,
        handouts::return_handout,
        // Repairs
        repairs::list_repairs,
        repairs::get_repair,
        repairs::create_repair,
        repairs::start_repair,
        repairs::close_repair,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            Asset,
            CreateAsset,
            Handout,
            CreateHandout,
            RepairTicket,
            CreateRepair,
            AssetStatus,
            HandoutStatus,
            RepairStatus,
            RepairPriority,
            RepairOutcome,
            assets::OutOfOrderRequest,
            assets::RetireRequest,
            repairs::CloseRepairRequest,
            health::HealthResponse,
            stats::AssetCounts,
            stats::HandoutCounts,
            stats::RepairCounts,
            stats::FleetStatsResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "assets", description = "Inventory and asset lifecycle"),
        (name = "handouts", description = "Assignment ledger"),
        (name = "repairs", description = "Repair ledger"),
        (name = "stats", description = "Derived fleet statistics")
    )
)]
pub struct ApiDoc;

/// Build the Swagger UI router serving the generated document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
