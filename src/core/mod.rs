//! Core infrastructure
//!
//! Logging macros and the synchronization primitive that hands data-ready
//! interrupts off to the acquisition task.

pub mod logging;
pub mod sync;
