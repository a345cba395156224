#![deny(warnings)]

//! Async runtime for the governance simulation: a pausable play clock
//! and a tokio task that owns the engine and maps real time onto
//! simulated days.

pub mod clock;
pub mod scheduler;

pub use clock::{Clock, ManualTimeSource, SystemTimeSource, TimeSource};
pub use scheduler::{spawn, RuntimeError, SimHandle};
