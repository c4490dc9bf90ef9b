//! Platform interface traits

pub mod delay;
pub mod spi;

pub use delay::DelaySource;
pub use spi::SpiBus;

#[cfg(feature = "embassy")]
pub use delay::EmbassyDelay;
