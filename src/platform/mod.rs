//! Platform abstraction layer
//!
//! This module provides the hardware interfaces the drivers are written
//! against. Board crates supply the real implementations; a mock platform is
//! bundled for host tests.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{DelaySource, SpiBus};
