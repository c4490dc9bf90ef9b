//! Sensor capability tracking
//!
//! Downstream consumers (rate controllers, estimators) size their limits
//! from the strongest sensor present. Drivers publish their configured
//! capability here when a tracker is attached at construction; there is no
//! global instance.

use core::sync::atomic::{AtomicU32, Ordering};

/// Tracks the maximum angular rate the active gyro can report.
pub struct SensorLimits {
    max_gyro_rate_dps: AtomicU32,
}

impl SensorLimits {
    /// Create a tracker with no capability reported yet.
    pub const fn new() -> Self {
        Self {
            max_gyro_rate_dps: AtomicU32::new(0),
        }
    }

    /// Publish the configured gyro full-scale rate in °/s.
    pub fn set_max_gyro_rate(&self, dps: u32) {
        self.max_gyro_rate_dps.store(dps, Ordering::Relaxed);
    }

    /// Maximum gyro rate in °/s, or `None` when no gyro has reported yet.
    pub fn max_gyro_rate(&self) -> Option<u32> {
        match self.max_gyro_rate_dps.load(Ordering::Relaxed) {
            0 => None,
            dps => Some(dps),
        }
    }
}

impl Default for SensorLimits {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unreported() {
        let limits = SensorLimits::new();
        assert_eq!(limits.max_gyro_rate(), None);
    }

    #[test]
    fn reports_latest_rate() {
        let limits = SensorLimits::new();
        limits.set_max_gyro_rate(500);
        assert_eq!(limits.max_gyro_rate(), Some(500));

        limits.set_max_gyro_rate(2000);
        assert_eq!(limits.max_gyro_rate(), Some(2000));
    }
}
