//! Asset inventory endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{Asset, AssetFilter, CreateAsset},
};

use super::Caller;

/// Mark-out-of-order request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OutOfOrderRequest {
    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
}

/// Retire request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RetireRequest {
    pub reason: Option<String>,
}

/// List assets
#[utoipa::path(
    get,
    path = "/assets",
    tag = "assets",
    params(AssetFilter),
    responses(
        (status = 200, description = "Asset list", body = Vec<Asset>)
    )
)]
pub async fn list_assets(
    State(state): State<crate::AppState>,
    Query(filter): Query<AssetFilter>,
) -> AppResult<Json<Vec<Asset>>> {
    let assets = state.services.lifecycle.list_assets(&filter).await;
    Ok(Json(assets))
}

/// Get an asset by id
#[utoipa::path(
    get,
    path = "/assets/{id}",
    tag = "assets",
    params(("id" = String, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset details", body = Asset),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn get_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Asset>> {
    let asset = state.services.lifecycle.get_asset(&id).await?;
    Ok(Json(asset))
}

/// Add an asset to the inventory
#[utoipa::path(
    post,
    path = "/assets",
    tag = "assets",
    request_body = CreateAsset,
    responses(
        (status = 201, description = "Asset created", body = Asset),
        (status = 400, description = "Missing required fields"),
        (status = 409, description = "Duplicate id or serial number")
    )
)]
pub async fn create_asset(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateAsset>,
) -> AppResult<(StatusCode, Json<Asset>)> {
    let asset = state.services.lifecycle.add_asset(data).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// Mark an asset out of order
#[utoipa::path(
    post,
    path = "/assets/{id}/out-of-order",
    tag = "assets",
    params(("id" = String, Path, description = "Asset ID")),
    request_body = OutOfOrderRequest,
    responses(
        (status = 200, description = "Asset marked out of order", body = Asset),
        (status = 404, description = "Asset not found"),
        (status = 422, description = "Illegal transition")
    )
)]
pub async fn mark_out_of_order(
    State(state): State<crate::AppState>,
    Caller(actor): Caller,
    Path(id): Path<String>,
    Json(data): Json<OutOfOrderRequest>,
) -> AppResult<Json<Asset>> {
    data.validate()?;
    let asset = state
        .services
        .lifecycle
        .mark_out_of_order(&id, &data.reason, &actor)
        .await?;
    Ok(Json(asset))
}

/// Retire an asset (administrative override)
#[utoipa::path(
    post,
    path = "/assets/{id}/retire",
    tag = "assets",
    params(("id" = String, Path, description = "Asset ID")),
    request_body = RetireRequest,
    responses(
        (status = 200, description = "Asset retired", body = Asset),
        (status = 404, description = "Asset not found"),
        (status = 422, description = "Asset is already out of order")
    )
)]
pub async fn retire_asset(
    State(state): State<crate::AppState>,
    Caller(actor): Caller,
    Path(id): Path<String>,
    Json(data): Json<RetireRequest>,
) -> AppResult<Json<Asset>> {
    let asset = state
        .services
        .lifecycle
        .retire(&id, data.reason.as_deref(), &actor)
        .await?;
    Ok(Json(asset))
}

/// Reinstate a retired asset (administrative override)
#[utoipa::path(
    post,
    path = "/assets/{id}/reinstate",
    tag = "assets",
    params(("id" = String, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset reinstated", body = Asset),
        (status = 404, description = "Asset not found"),
        (status = 422, description = "Asset is not out of order")
    )
)]
pub async fn reinstate_asset(
    State(state): State<crate::AppState>,
    Caller(actor): Caller,
    Path(id): Path<String>,
) -> AppResult<Json<Asset>> {
    let asset = state.services.lifecycle.reinstate(&id, &actor).await?;
    Ok(Json(asset))
}
