//! LaptopMS - Laptop Fleet Management System
//!
//! A REST JSON API for tracking an organization's laptop fleet. The core
//! is the asset lifecycle engine: the registry and ledgers own the record
//! sets, and the lifecycle coordinator is the single validated write path
//! keeping assets, handouts and repair tickets mutually consistent.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
