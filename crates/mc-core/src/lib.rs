//! mc-core: Shared types and utilities for Mind Circus
//!
//! This crate provides the foundational types used across all Mind Circus crates:
//! the system error type and the millisecond clocks that drive round timers.

mod error;
mod time;

pub use error::*;
pub use time::*;
