//! Data models for LaptopMS

pub mod asset;
pub mod enums;
pub mod handout;
pub mod repair;

// Re-export commonly used types
pub use asset::{Asset, AssetFilter, CreateAsset};
pub use enums::{AssetStatus, HandoutStatus, RepairOutcome, RepairPriority, RepairStatus};
pub use handout::{CreateHandout, Handout, HandoutFilter};
pub use repair::{CreateRepair, RepairFilter, RepairTicket};
