//! Delay interface
//!
//! Abstracts the timer so configuration sequences can run in host tests
//! without a hardware time driver.

/// Asynchronous millisecond delay provider.
#[allow(async_fn_in_trait)]
pub trait DelaySource {
    /// Suspend the caller for at least `ms` milliseconds.
    async fn delay_ms(&self, ms: u32);
}

// ============================================================================
// Embassy Implementation
// ============================================================================

/// Embassy-backed delay for embedded targets.
#[cfg(feature = "embassy")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyDelay;

#[cfg(feature = "embassy")]
impl DelaySource for EmbassyDelay {
    async fn delay_ms(&self, ms: u32) {
        embassy_time::Timer::after_millis(ms as u64).await;
    }
}

// ============================================================================
// Mock Implementation (for host tests)
// ============================================================================

/// Mock delay for host tests: returns immediately and records each request.
#[cfg(any(test, feature = "mock"))]
#[derive(Default)]
pub struct MockDelay {
    requested: core::cell::RefCell<std::vec::Vec<u32>>,
}

#[cfg(any(test, feature = "mock"))]
impl MockDelay {
    /// Create a mock delay with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in order, in milliseconds.
    pub fn requested(&self) -> std::vec::Vec<u32> {
        self.requested.borrow().clone()
    }

    /// Total requested delay in milliseconds.
    pub fn total_ms(&self) -> u64 {
        self.requested.borrow().iter().map(|&ms| ms as u64).sum()
    }
}

#[cfg(any(test, feature = "mock"))]
impl DelaySource for MockDelay {
    async fn delay_ms(&self, ms: u32) {
        self.requested.borrow_mut().push(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::block_on;

    #[test]
    fn mock_delay_records_requests() {
        let delay = MockDelay::new();

        block_on(delay.delay_ms(5));
        block_on(delay.delay_ms(25));

        assert_eq!(delay.requested(), vec![5, 25]);
        assert_eq!(delay.total_ms(), 30);
    }
}
