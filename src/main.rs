//! LaptopMS Server - Laptop Fleet Management System
//!
//! REST API server for the laptop inventory, handout and repair workflow.

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use laptopms_server::{api, config::AppConfig, registry::Registry, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("laptopms_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LaptopMS Server v{}", env!("CARGO_PKG_VERSION"));

    // Create record stores
    let registry = Registry::new();
    if config.inventory.seed_demo_data {
        registry
            .seed_demo()
            .await
            .expect("Failed to seed demo inventory");
        tracing::info!("Demo inventory seeded");
    }

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create services
    let services = Services::new(registry);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Assets (inventory)
        .route("/assets", get(api::assets::list_assets))
        .route("/assets", post(api::assets::create_asset))
        .route("/assets/:id", get(api::assets::get_asset))
        .route("/assets/:id/out-of-order", post(api::assets::mark_out_of_order))
        .route("/assets/:id/retire", post(api::assets::retire_asset))
        .route("/assets/:id/reinstate", post(api::assets::reinstate_asset))
        // Handouts
        .route("/handouts", get(api::handouts::list_handouts))
        .route("/handouts", post(api::handouts::create_handout))
        .route("/handouts/:id", get(api::handouts::get_handout))
        .route("/handouts/:id/return", post(api::handouts::return_handout))
        // Repairs
        .route("/repairs", get(api::repairs::list_repairs))
        .route("/repairs", post(api::repairs::create_repair))
        .route("/repairs/:id", get(api::repairs::get_repair))
        .route("/repairs/:id/start", post(api::repairs::start_repair))
        .route("/repairs/:id/close", post(api::repairs::close_repair))
        // Statistics
        .route("/stats", get(api::stats::get_stats))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
