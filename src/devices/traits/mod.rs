//! Device trait definitions and data types

pub mod imu;

pub use imu::{AccelSample, GyroSample, ImuError, SAMPLE_QUEUE_DEPTH};
