//! Named timezone slots and the ordering store that decides which one is in
//! focus.

mod core;

pub use core::{OrderingSnapshot, OrderingStore, ResolvedSlot, SwapOutcome, TimezoneSlot};
