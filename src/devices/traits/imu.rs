//! IMU sample types and errors
//!
//! Value types handed off from the acquisition task to downstream
//! state-estimation consumers, and the driver error taxonomy. Samples are in
//! the vehicle body frame:
//! - X: forward (bow)
//! - Y: right (starboard)
//! - Z: down

use nalgebra::Vector3;

/// Depth of each bounded sample delivery queue.
///
/// Two entries bound the acquisition task's worst-case latency; when a
/// consumer stalls, new samples are dropped rather than blocking the task.
pub const SAMPLE_QUEUE_DEPTH: usize = 2;

/// IMU driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImuError {
    /// No driver handle was supplied
    MissingHandle,
    /// The handle failed its magic-tag check
    CorruptHandle,
    /// The handle is not bound to a bus
    UnboundBus,
    /// Exclusive bus ownership could not be acquired
    BusClaim,
    /// A bus transfer failed mid-transaction
    Transfer,
    /// The bus flagged an error while the register address was shifted out
    AddressPhase,
    /// The bus flagged an error while the register value was shifted out
    DataPhase,
    /// The identity register returned an unexpected value (contains the value read)
    WrongDevice(u8),
    /// The requested sample channel is not present in this configuration
    ChannelUnavailable,
}

/// Angular-rate sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GyroSample {
    /// Angular rate: °/s, vehicle body frame
    pub rate: Vector3<f32>,
    /// Die temperature: °C
    pub temperature: f32,
}

/// Acceleration sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelSample {
    /// Acceleration: m/s², vehicle body frame, includes gravity
    pub accel: Vector3<f32>,
    /// Die temperature: °C
    pub temperature: f32,
}
