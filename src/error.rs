use std::fmt;

use crate::data::island::IslandId;

/// Caller contract violations raised by the allocation engines.
///
/// None of these are recovered internally: absorbing them would leave the
/// ratio store or the raid heap ordered by stale keys.
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationError {
    /// The island cannot be indexed: zero marines, or money that is negative or not finite.
    InvalidTarget { name: String, reason: &'static str },
    /// No entry exists under this ratio key.
    KeyNotFound { ratio: f64 },
    /// The id does not name an island owned by this engine.
    UnknownIsland { id: IslandId },
    /// A crew size below zero reached a signed boundary.
    NegativeCrew { value: i64 },
    /// A crew size that does not fit the engines' unsigned count.
    CrewTooLarge { value: i64 },
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTarget { name, reason } => {
                write!(f, "island '{name}' cannot be indexed: {reason}")
            }
            Self::KeyNotFound { ratio } => write!(f, "no island stored under ratio {ratio}"),
            Self::UnknownIsland { id } => write!(f, "unknown island {id}"),
            Self::NegativeCrew { value } => write!(f, "crew size must not be negative, got {value}"),
            Self::CrewTooLarge { value } => {
                write!(f, "crew size {value} exceeds the maximum of {}", u32::MAX)
            }
        }
    }
}

impl std::error::Error for AllocationError {}

/// Convert a signed crew count from an outer boundary (CLI, dataset) into the
/// unsigned count the engines work with.
pub fn crew_from_signed(value: i64) -> Result<u32, AllocationError> {
    if value < 0 {
        return Err(AllocationError::NegativeCrew { value });
    }
    u32::try_from(value).map_err(|_| AllocationError::CrewTooLarge { value })
}
