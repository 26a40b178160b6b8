pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod navigator;
pub mod structures;

pub use config::{EngineConfig, RoundingMode};
pub use data::{Island, IslandId};
pub use error::AllocationError;
pub use navigator::{Assignment, CrewAllocator, CrewAssignment, DailyRaidSimulator, IdleReason};
