//! Handout endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{CreateHandout, Handout, HandoutFilter},
};

/// List handouts
#[utoipa::path(
    get,
    path = "/handouts",
    tag = "handouts",
    params(HandoutFilter),
    responses(
        (status = 200, description = "Handout list", body = Vec<Handout>)
    )
)]
pub async fn list_handouts(
    State(state): State<crate::AppState>,
    Query(filter): Query<HandoutFilter>,
) -> AppResult<Json<Vec<Handout>>> {
    let handouts = state.services.lifecycle.list_handouts(&filter).await;
    Ok(Json(handouts))
}

/// Get a handout by id
#[utoipa::path(
    get,
    path = "/handouts/{id}",
    tag = "handouts",
    params(("id" = String, Path, description = "Handout ID")),
    responses(
        (status = 200, description = "Handout details", body = Handout),
        (status = 404, description = "Handout not found")
    )
)]
pub async fn get_handout(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Handout>> {
    let handout = state.services.lifecycle.get_handout(&id).await?;
    Ok(Json(handout))
}

/// Hand an asset out
#[utoipa::path(
    post,
    path = "/handouts",
    tag = "handouts",
    request_body = CreateHandout,
    responses(
        (status = 201, description = "Handout created", body = Handout),
        (status = 400, description = "Missing required fields"),
        (status = 404, description = "Asset not found"),
        (status = 422, description = "Asset is not available")
    )
)]
pub async fn create_handout(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateHandout>,
) -> AppResult<(StatusCode, Json<Handout>)> {
    let handout = state.services.lifecycle.hand_out(data).await?;
    Ok((StatusCode::CREATED, Json(handout)))
}

/// Return a handed-out asset
#[utoipa::path(
    post,
    path = "/handouts/{id}/return",
    tag = "handouts",
    params(("id" = String, Path, description = "Handout ID")),
    responses(
        (status = 200, description = "Asset returned", body = Handout),
        (status = 404, description = "Handout not found"),
        (status = 409, description = "Handout already returned")
    )
)]
pub async fn return_handout(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Handout>> {
    let handout = state.services.lifecycle.return_asset(&id).await?;
    Ok(Json(handout))
}
