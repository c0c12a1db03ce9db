//! Repair ticket endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{CreateRepair, RepairFilter, RepairOutcome, RepairTicket},
};

/// Close-repair request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CloseRepairRequest {
    pub outcome: RepairOutcome,
}

/// List repair tickets
#[utoipa::path(
    get,
    path = "/repairs",
    tag = "repairs",
    params(RepairFilter),
    responses(
        (status = 200, description = "Repair ticket list", body = Vec<RepairTicket>)
    )
)]
pub async fn list_repairs(
    State(state): State<crate::AppState>,
    Query(filter): Query<RepairFilter>,
) -> AppResult<Json<Vec<RepairTicket>>> {
    let tickets = state.services.lifecycle.list_repairs(&filter).await;
    Ok(Json(tickets))
}

/// Get a repair ticket by id
#[utoipa::path(
    get,
    path = "/repairs/{id}",
    tag = "repairs",
    params(("id" = String, Path, description = "Repair ticket ID")),
    responses(
        (status = 200, description = "Repair ticket details", body = RepairTicket),
        (status = 404, description = "Repair ticket not found")
    )
)]
pub async fn get_repair(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<RepairTicket>> {
    let ticket = state.services.lifecycle.get_repair(&id).await?;
    Ok(Json(ticket))
}

/// Open a repair ticket
#[utoipa::path(
    post,
    path = "/repairs",
    tag = "repairs",
    request_body = CreateRepair,
    responses(
        (status = 201, description = "Repair ticket created", body = RepairTicket),
        (status = 400, description = "Missing required fields or invalid cost"),
        (status = 404, description = "Asset not found"),
        (status = 409, description = "Asset already has an open repair"),
        (status = 422, description = "Asset is out of order")
    )
)]
pub async fn create_repair(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateRepair>,
) -> AppResult<(StatusCode, Json<RepairTicket>)> {
    let ticket = state.services.lifecycle.open_repair(data).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Start work on a pending repair ticket
#[utoipa::path(
    post,
    path = "/repairs/{id}/start",
    tag = "repairs",
    params(("id" = String, Path, description = "Repair ticket ID")),
    responses(
        (status = 200, description = "Repair started", body = RepairTicket),
        (status = 404, description = "Repair ticket not found"),
        (status = 422, description = "Ticket is not pending")
    )
)]
pub async fn start_repair(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<RepairTicket>> {
    let ticket = state.services.lifecycle.start_repair(&id).await?;
    Ok(Json(ticket))
}

/// Close a repair ticket as completed or cancelled
#[utoipa::path(
    post,
    path = "/repairs/{id}/close",
    tag = "repairs",
    params(("id" = String, Path, description = "Repair ticket ID")),
    request_body = CloseRepairRequest,
    responses(
        (status = 200, description = "Repair closed", body = RepairTicket),
        (status = 404, description = "Repair ticket not found"),
        (status = 422, description = "Ticket already terminal or asset not under repair")
    )
)]
pub async fn close_repair(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(data): Json<CloseRepairRequest>,
) -> AppResult<Json<RepairTicket>> {
    let ticket = state
        .services
        .lifecycle
        .close_repair(&id, data.outcome)
        .await?;
    Ok(Json(ticket))
}
