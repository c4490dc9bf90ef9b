//! Interrupt-to-task handoff
//!
//! A single-slot signal used to wake the acquisition task from the
//! data-ready interrupt: non-blocking on the interrupt side, blocking on the
//! task side. The slot is a presence flag, not a counter; edges that arrive
//! before the task drains it coalesce into one wake.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Single-slot handoff between an interrupt-context producer and one waiting
/// task-context consumer.
pub struct DataReadySignal {
    signal: Signal<CriticalSectionRawMutex, ()>,
    /// Advisory: a task is parked in `wait`. Read by the interrupt side so
    /// its epilogue can decide whether a context switch is likely needed.
    waiting: AtomicBool,
}

impl DataReadySignal {
    /// Create an empty handoff slot.
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
            waiting: AtomicBool::new(false),
        }
    }

    /// Interrupt-side give. Never blocks, completes in bounded time.
    ///
    /// Returns true when a task is likely parked in [`wait`](Self::wait), so
    /// the interrupt epilogue can yield promptly.
    pub fn signal_from_isr(&self) -> bool {
        let parked = self.waiting.load(Ordering::Relaxed);
        self.signal.signal(());
        parked
    }

    /// Task-side take. Blocks until the slot holds a signal, then drains it.
    pub async fn wait(&self) {
        self.waiting.store(true, Ordering::Relaxed);
        self.signal.wait().await;
        self.waiting.store(false, Ordering::Relaxed);
    }

    /// Non-blocking take. Returns true when a pending signal was drained.
    pub fn try_take(&self) -> bool {
        self.signal.try_take().is_some()
    }

    /// True when a signal is pending.
    pub fn is_pending(&self) -> bool {
        self.signal.signaled()
    }
}

impl Default for DataReadySignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::block_on;

    #[test]
    fn signal_then_take() {
        let handoff = DataReadySignal::new();
        assert!(!handoff.is_pending());

        assert!(!handoff.signal_from_isr());
        assert!(handoff.is_pending());
        assert!(handoff.try_take());
        assert!(!handoff.is_pending());
    }

    #[test]
    fn coalesces_multiple_signals_into_one_wake() {
        let handoff = DataReadySignal::new();

        handoff.signal_from_isr();
        handoff.signal_from_isr();
        handoff.signal_from_isr();

        assert!(handoff.try_take());
        assert!(!handoff.try_take());
    }

    #[test]
    fn wait_drains_pending_signal() {
        let handoff = DataReadySignal::new();
        handoff.signal_from_isr();

        block_on(handoff.wait());
        assert!(!handoff.is_pending());
    }

    #[test]
    fn yield_hint_reflects_parked_task() {
        use core::future::Future;
        use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn dummy_raw_waker() -> RawWaker {
            fn no_op(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                dummy_raw_waker()
            }
            const VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
            RawWaker::new(core::ptr::null(), &VTABLE)
        }

        let handoff = DataReadySignal::new();

        // No task parked yet: the hint must be false.
        assert!(!handoff.signal_from_isr());
        assert!(handoff.try_take());

        // Park a waiter by polling `wait` to Pending, then signal.
        let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut fut = core::pin::pin!(handoff.wait());
        assert_eq!(fut.as_mut().poll(&mut cx), Poll::Pending);

        assert!(handoff.signal_from_isr());
        assert_eq!(fut.as_mut().poll(&mut cx), Poll::Ready(()));

        // The waiter has left; the hint drops back to false.
        assert!(!handoff.signal_from_isr());
    }
}
