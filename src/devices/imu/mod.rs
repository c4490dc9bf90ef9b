//! IMU Drivers
//!
//! ## Available Drivers
//!
//! - `mpu6000`: MPU-6000 6-axis gyro/accel over shared SPI

pub mod mpu6000;

pub use mpu6000::{Mpu6000Config, Mpu6000Driver};
