//! API handlers for the LaptopMS REST endpoints

pub mod assets;
pub mod handouts;
pub mod health;
pub mod openapi;
pub mod repairs;
pub mod stats;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::AppState;

/// Already-authorized caller identity, taken from the `x-actor` header.
/// Authentication is enforced upstream of this service; the name is only
/// used to attribute administrative actions in the logs.
pub struct Caller(pub String);

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor = parts
            .headers
            .get("x-actor")
            .and_then(|value| value.to_str().ok())
            .filter(|s| !s.is_empty())
            .unwrap_or("anonymous")
            .to_string();
        Ok(Caller(actor))
    }
}
