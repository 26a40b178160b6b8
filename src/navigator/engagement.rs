use crate::config::RoundingMode;

/// Result of one crew attacking one island.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Engagement {
    /// Money taken, already rounded.
    pub plunder: f64,
    /// Crew spent fighting the island's marines.
    pub engaged: u32,
}

/// Plunder a crew of `crew` takes from an island holding `money` behind
/// `marines` defenders: `round(min(crew * money / marines, money))`.
///
/// `marines` must be non-zero.
pub fn engage(crew: u32, money: f64, marines: u32, rounding: RoundingMode) -> Engagement {
    debug_assert!(marines > 0, "engage requires a defended island");
    Engagement {
        plunder: rounded_plunder(crew, money, marines, rounding),
        engaged: crew.min(marines),
    }
}

/// Rounded share of `money`, never more than the island holds (half-up
/// rounding of a fractional remainder would otherwise overshoot it).
pub fn rounded_plunder(crew: u32, money: f64, marines: u32, rounding: RoundingMode) -> f64 {
    rounding.apply(obtainable(crew, money, marines)).min(money)
}

/// Money a crew of `crew` could take from an untouched island, unrounded.
pub fn obtainable(crew: u32, money: f64, marines: u32) -> f64 {
    ((crew as f64 * money) / marines as f64).min(money)
}
