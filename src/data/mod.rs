pub mod island;
pub mod loader;
pub mod validate;

pub use island::{Island, IslandId};
pub use loader::{load_islands, usable_islands, LoadError, RawIsland};
pub use validate::{validate_islands, DatasetReport, Finding, Level};
