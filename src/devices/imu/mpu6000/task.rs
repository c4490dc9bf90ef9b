//! Data-ready interrupt entry and the acquisition task
//!
//! The interrupt boundary: the platform's external-interrupt facility calls
//! [`data_ready_isr`] on every data-ready edge and routes the returned yield
//! hint into its post-interrupt reschedule decision. The firmware spawns
//! [`run`] as a dedicated high-priority task per device instance.

use embassy_futures::select::{select, Either};

use super::driver::Mpu6000Driver;
use crate::platform::traits::{DelaySource, SpiBus};

/// Upper bound on one data-ready wait. Not expected to elapse in normal
/// operation; it lets the loop recover if an interrupt edge is lost.
const DATA_READY_TIMEOUT_MS: u32 = 100;

/// Interrupt-side entry point, called on every data-ready edge.
///
/// Performs no bus I/O and completes in bounded time: it validates the
/// handle and gives the handoff. The return value tells the interrupt
/// epilogue whether a context switch is likely needed.
pub fn data_ready_isr<B: SpiBus>(dev: Option<&Mpu6000Driver<'_, B>>) -> bool {
    match Mpu6000Driver::validate_handle(dev) {
        Ok(dev) => dev.data_ready().signal_from_isr(),
        Err(_) => false,
    }
}

/// Acquisition task body. Runs until device or system reset.
///
/// Blocks on the data-ready handoff, performs one acquisition cycle per
/// wake, and treats every per-cycle failure as skip-and-continue. Interrupt
/// edges that arrive while a cycle is in flight coalesce into a single
/// wake; the next cycle reads current hardware state, so nothing is lost at
/// the protocol level.
pub async fn run<B: SpiBus, D: DelaySource>(dev: &Mpu6000Driver<'_, B>, delay: &D) {
    loop {
        // Wait for the data-ready interrupt
        match select(dev.data_ready().wait(), delay.delay_ms(DATA_READY_TIMEOUT_MS)).await {
            Either::First(()) => {}
            Either::Second(()) => continue,
        }

        if let Err(err) = dev.acquire_once() {
            crate::log_warn!("acquisition cycle skipped: {:?}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::config::Mpu6000Config;
    use super::*;
    use crate::platform::mock::MockSpiBus;

    fn driver(bus: MockSpiBus) -> Mpu6000Driver<'static, MockSpiBus> {
        Mpu6000Driver::new(bus, 0, Mpu6000Config::default(), None)
    }

    #[test]
    fn isr_rejects_missing_handle() {
        assert!(!data_ready_isr::<MockSpiBus>(None));
    }

    #[test]
    fn isr_rejects_unbound_handle() {
        let dev = driver(MockSpiBus::unbound());
        assert!(!data_ready_isr(Some(&dev)));
        assert!(!dev.data_ready().is_pending());
    }

    #[test]
    fn isr_signals_the_handoff() {
        let dev = driver(MockSpiBus::new(1));
        data_ready_isr(Some(&dev));
        assert!(dev.data_ready().is_pending());
    }

    #[test]
    fn isr_edges_coalesce_into_one_wake() {
        let dev = driver(MockSpiBus::new(1));

        data_ready_isr(Some(&dev));
        data_ready_isr(Some(&dev));
        data_ready_isr(Some(&dev));

        assert!(dev.data_ready().try_take());
        assert!(!dev.data_ready().try_take());
    }
}
