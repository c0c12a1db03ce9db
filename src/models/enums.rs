//! Shared domain enums (wire names match the browser UI)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// AssetStatus
// ---------------------------------------------------------------------------

/// Canonical lifecycle state of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AssetStatus {
    Available,
    HandedOut,
    UnderRepair,
    OutOfOrder,
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AssetStatus::Available => "available",
            AssetStatus::HandedOut => "handed-out",
            AssetStatus::UnderRepair => "under-repair",
            AssetStatus::OutOfOrder => "out-of-order",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// HandoutStatus
// ---------------------------------------------------------------------------

/// Handout record state; transitions `active -> returned` exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum HandoutStatus {
    Active,
    Returned,
}

impl std::fmt::Display for HandoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            HandoutStatus::Active => "active",
            HandoutStatus::Returned => "returned",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// RepairStatus
// ---------------------------------------------------------------------------

/// Repair ticket state; `completed` and `cancelled` are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RepairStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl RepairStatus {
    /// Whether no further transition may leave this state
    pub fn is_terminal(&self) -> bool {
        matches!(self, RepairStatus::Completed | RepairStatus::Cancelled)
    }
}

impl std::fmt::Display for RepairStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RepairStatus::Pending => "pending",
            RepairStatus::InProgress => "in-progress",
            RepairStatus::Completed => "completed",
            RepairStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// RepairPriority
// ---------------------------------------------------------------------------

/// Repair ticket priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RepairPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl std::fmt::Display for RepairPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RepairPriority::Low => "low",
            RepairPriority::Medium => "medium",
            RepairPriority::High => "high",
            RepairPriority::Urgent => "urgent",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// RepairOutcome
// ---------------------------------------------------------------------------

/// Allowed outcome when closing a repair through the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RepairOutcome {
    Completed,
    Cancelled,
}

impl From<RepairOutcome> for RepairStatus {
    fn from(o: RepairOutcome) -> Self {
        match o {
            RepairOutcome::Completed => RepairStatus::Completed,
            RepairOutcome::Cancelled => RepairStatus::Cancelled,
        }
    }
}
