//! Mock SPI bus implementation for testing

use crate::platform::{
    error::{PlatformError, SpiError},
    traits::SpiBus,
    Result,
};
use core::cell::{Cell, RefCell};
use std::vec::Vec;

/// Bus transaction record for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusTransaction {
    /// Exclusive ownership acquired
    Claim,
    /// Exclusive ownership released
    Release,
    /// Clock frequency changed
    SetFrequency(u32),
    /// Chip-select line driven
    ChipSelect { slave: u8, asserted: bool },
    /// Single-byte full-duplex transfer
    Byte { out: u8, reply: u8 },
    /// Block full-duplex transfer
    Block { tx: Vec<u8>, rx: Vec<u8> },
}

/// Mock shared SPI bus.
///
/// Records every operation in a transaction log for verification and replays
/// scripted reply bytes and block read data. Claiming an already-claimed bus
/// fails, which surfaces missing releases in the code under test.
pub struct MockSpiBus {
    bus_id: u32,
    frequency: Cell<u32>,
    claimed: Cell<bool>,
    fail_claim: Cell<bool>,
    fail_transfer: Cell<bool>,
    byte_replies: RefCell<heapless::Deque<u8, 64>>,
    read_data: RefCell<Vec<u8>>,
    transactions: RefCell<Vec<BusTransaction>>,
}

impl MockSpiBus {
    /// Create a mock port bound to bus `bus_id`.
    pub fn new(bus_id: u32) -> Self {
        Self {
            bus_id,
            frequency: Cell::new(0),
            claimed: Cell::new(false),
            fail_claim: Cell::new(false),
            fail_transfer: Cell::new(false),
            byte_replies: RefCell::new(heapless::Deque::new()),
            read_data: RefCell::new(Vec::new()),
            transactions: RefCell::new(Vec::new()),
        }
    }

    /// Create a mock port that is not bound to any bus (id 0).
    pub fn unbound() -> Self {
        Self::new(0)
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> Vec<BusTransaction> {
        self.transactions.borrow().clone()
    }

    /// Clear transaction log
    pub fn clear_transactions(&self) {
        self.transactions.borrow_mut().clear();
    }

    /// Queue a reply for an upcoming single-byte transfer (FIFO; default 0).
    pub fn push_byte_reply(&self, reply: u8) {
        self.byte_replies
            .borrow_mut()
            .push_back(reply)
            .expect("byte reply script full");
    }

    /// Queue replies for upcoming single-byte transfers.
    pub fn push_byte_replies(&self, replies: &[u8]) {
        for &reply in replies {
            self.push_byte_reply(reply);
        }
    }

    /// Set data to return for block transfers.
    pub fn set_read_data(&self, data: &[u8]) {
        *self.read_data.borrow_mut() = data.to_vec();
    }

    /// Make subsequent claims fail.
    pub fn set_claim_fails(&self, fail: bool) {
        self.fail_claim.set(fail);
    }

    /// Make subsequent transfers fail.
    pub fn set_transfer_fails(&self, fail: bool) {
        self.fail_transfer.set(fail);
    }

    /// True while the bus is claimed.
    pub fn is_claimed(&self) -> bool {
        self.claimed.get()
    }

    /// Current clock frequency.
    pub fn frequency(&self) -> u32 {
        self.frequency.get()
    }
}

impl SpiBus for MockSpiBus {
    fn bus_id(&self) -> u32 {
        self.bus_id
    }

    fn claim(&self) -> Result<()> {
        if self.fail_claim.get() || self.claimed.get() {
            return Err(PlatformError::ResourceUnavailable);
        }
        self.claimed.set(true);
        self.transactions.borrow_mut().push(BusTransaction::Claim);
        Ok(())
    }

    fn release(&self) -> Result<()> {
        self.claimed.set(false);
        self.transactions.borrow_mut().push(BusTransaction::Release);
        Ok(())
    }

    fn set_frequency(&self, hz: u32) -> Result<()> {
        self.frequency.set(hz);
        self.transactions
            .borrow_mut()
            .push(BusTransaction::SetFrequency(hz));
        Ok(())
    }

    fn transfer_byte(&self, out: u8) -> Result<u8> {
        if self.fail_transfer.get() {
            return Err(PlatformError::Spi(SpiError::TransferFailed));
        }
        let reply = self.byte_replies.borrow_mut().pop_front().unwrap_or(0);
        self.transactions
            .borrow_mut()
            .push(BusTransaction::Byte { out, reply });
        Ok(reply)
    }

    fn transfer(&self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        if self.fail_transfer.get() {
            return Err(PlatformError::Spi(SpiError::TransferFailed));
        }
        if tx.len() != rx.len() {
            return Err(PlatformError::InvalidConfig);
        }

        let mut read_data = self.read_data.borrow_mut();
        let to_read = core::cmp::min(rx.len(), read_data.len());
        rx[..to_read].copy_from_slice(&read_data[..to_read]);
        read_data.drain(..to_read);

        self.transactions.borrow_mut().push(BusTransaction::Block {
            tx: tx.to_vec(),
            rx: rx.to_vec(),
        });
        Ok(())
    }

    fn chip_select(&self, slave: u8, asserted: bool) -> Result<()> {
        self.transactions
            .borrow_mut()
            .push(BusTransaction::ChipSelect { slave, asserted });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_byte_transfers_with_scripted_replies() {
        let spi = MockSpiBus::new(1);
        spi.push_byte_replies(&[0xAA, 0xBB]);

        assert_eq!(spi.transfer_byte(0x01).unwrap(), 0xAA);
        assert_eq!(spi.transfer_byte(0x02).unwrap(), 0xBB);
        // Script exhausted: replies default to zero.
        assert_eq!(spi.transfer_byte(0x03).unwrap(), 0x00);

        assert_eq!(
            spi.transactions(),
            vec![
                BusTransaction::Byte { out: 0x01, reply: 0xAA },
                BusTransaction::Byte { out: 0x02, reply: 0xBB },
                BusTransaction::Byte { out: 0x03, reply: 0x00 },
            ]
        );
    }

    #[test]
    fn block_transfer_replays_read_data() {
        let spi = MockSpiBus::new(1);
        spi.set_read_data(&[0x12, 0x34]);

        let mut rx = [0u8; 2];
        spi.transfer(&[0xA0, 0xB0], &mut rx).unwrap();
        assert_eq!(rx, [0x12, 0x34]);

        assert_eq!(
            spi.transactions(),
            vec![BusTransaction::Block {
                tx: vec![0xA0, 0xB0],
                rx: vec![0x12, 0x34],
            }]
        );
    }

    #[test]
    fn block_transfer_rejects_mismatched_lengths() {
        let spi = MockSpiBus::new(1);
        let mut rx = [0u8; 1];
        assert_eq!(
            spi.transfer(&[0x00, 0x00], &mut rx),
            Err(PlatformError::InvalidConfig)
        );
    }

    #[test]
    fn reentrant_claim_fails() {
        let spi = MockSpiBus::new(1);
        spi.claim().unwrap();
        assert!(spi.is_claimed());
        assert_eq!(spi.claim(), Err(PlatformError::ResourceUnavailable));

        spi.release().unwrap();
        assert!(!spi.is_claimed());
        spi.claim().unwrap();
    }

    #[test]
    fn injected_failures() {
        let spi = MockSpiBus::new(1);

        spi.set_claim_fails(true);
        assert_eq!(spi.claim(), Err(PlatformError::ResourceUnavailable));
        spi.set_claim_fails(false);

        spi.set_transfer_fails(true);
        assert_eq!(
            spi.transfer_byte(0x00),
            Err(PlatformError::Spi(SpiError::TransferFailed))
        );
        let mut rx = [0u8; 1];
        assert_eq!(
            spi.transfer(&[0x00], &mut rx),
            Err(PlatformError::Spi(SpiError::TransferFailed))
        );
    }

    #[test]
    fn tracks_frequency() {
        let spi = MockSpiBus::new(1);
        spi.set_frequency(1_000_000).unwrap();
        assert_eq!(spi.frequency(), 1_000_000);
        spi.set_frequency(20_000_000).unwrap();
        assert_eq!(spi.frequency(), 20_000_000);
    }
}
