pub mod crew;
pub mod engagement;
pub mod raid;

pub use crew::{CrewAllocator, CrewAssignment};
pub use engagement::{engage, obtainable, rounded_plunder, Engagement};
pub use raid::{Assignment, DailyRaidSimulator, IdleReason};
