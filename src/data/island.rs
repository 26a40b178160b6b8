//! Island record: a raidable target with money and defending marines.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AllocationError;

/// Position of an island inside the engine that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IslandId(pub usize);

impl fmt::Display for IslandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Island {
    pub name: String,
    pub money: f64,
    pub marines: u32,
}

impl Island {
    pub fn new(name: impl Into<String>, money: f64, marines: u32) -> Self {
        Self {
            name: name.into(),
            money,
            marines,
        }
    }

    /// Money per defending marine. `None` when the island has no marines.
    pub fn ratio(&self) -> Option<f64> {
        if self.marines == 0 {
            None
        } else {
            Some(self.money / self.marines as f64)
        }
    }

    /// Ratio of an island that passed [Island::validate].
    pub(crate) fn ratio_unchecked(&self) -> f64 {
        self.money / self.marines as f64
    }

    /// Check that the island can be keyed by its ratio.
    pub fn validate(&self) -> Result<(), AllocationError> {
        check_fields(&self.name, self.money, self.marines)
    }
}

pub(crate) fn check_fields(name: &str, money: f64, marines: u32) -> Result<(), AllocationError> {
    let reason = if marines == 0 {
        "marines must be greater than zero"
    } else if !money.is_finite() {
        "money must be finite"
    } else if money < 0.0 {
        "money must not be negative"
    } else {
        return Ok(());
    };
    Err(AllocationError::InvalidTarget {
        name: name.to_string(),
        reason,
    })
}
