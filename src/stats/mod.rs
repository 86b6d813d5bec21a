//! System resource sampling for the dashboard footer.
//!
//! A background poller samples CPU and memory usage on its own interval and
//! publishes whole snapshots into a single-slot mailbox that the render path
//! reads once per frame.

mod core;

pub use core::{StatsMailbox, StatsPoller, StatsSampler, StatsSnapshot, SysinfoSampler};
