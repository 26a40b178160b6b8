pub mod max_heap;
pub mod ratio_store;

pub use max_heap::MaxPriorityHeap;
pub use ratio_store::{Direction, OrderedRatioStore, RatioKey, StoreIter};
