//! Business logic services

pub mod lifecycle;
pub mod stats;

use crate::registry::Registry;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub lifecycle: lifecycle::LifecycleService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services over the given record stores
    pub fn new(registry: Registry) -> Self {
        Self {
            lifecycle: lifecycle::LifecycleService::new(registry.clone()),
            stats: stats::StatsService::new(registry),
        }
    }
}
