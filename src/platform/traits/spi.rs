//! Shared SPI bus interface
//!
//! The IMU shares its SPI bus with other peripherals. Exclusive ownership is
//! arbitrated with claim/release and the chip-select line picks the slave;
//! platform implementations provide this interface over the real bus driver.

use crate::platform::Result;

/// Port onto a shared SPI bus.
///
/// Methods take `&self`: the bus is a shared resource and claim/release is
/// the synchronization discipline, so implementations arbitrate internally.
///
/// # Invariants
///
/// - Every transfer must be bracketed by `claim`/`release` with the chip
///   select asserted in between; no transfer may run outside a claim.
/// - `claim` blocks until the bus is available; other users may hold it for
///   whole transactions, never across them.
/// - The chip select must be fully deasserted before `release`, so no other
///   bus user can observe a half-asserted slave.
pub trait SpiBus {
    /// Identifier of the bound bus. Zero means the port is not bound.
    fn bus_id(&self) -> u32;

    /// Acquire exclusive ownership of the bus, blocking until available.
    fn claim(&self) -> Result<()>;

    /// Release exclusive ownership of the bus.
    fn release(&self) -> Result<()>;

    /// Set the bus clock frequency in Hz.
    fn set_frequency(&self, hz: u32) -> Result<()>;

    /// Transfer a single byte full-duplex and return the received byte.
    fn transfer_byte(&self, out: u8) -> Result<u8>;

    /// Transfer a block full-duplex. Both buffers must have the same length.
    fn transfer(&self, tx: &[u8], rx: &mut [u8]) -> Result<()>;

    /// Drive the chip-select line for one slave.
    fn chip_select(&self, slave: u8, asserted: bool) -> Result<()>;
}
