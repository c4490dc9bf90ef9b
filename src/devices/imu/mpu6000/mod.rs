//! MPU-6000 6-axis gyro/accel driver
//!
//! Interrupt-driven SPI driver: the data-ready interrupt wakes a dedicated
//! acquisition task which burst-reads the output block in one bus
//! transaction, remaps it into the vehicle frame for the configured mounting
//! orientation, scales it to physical units and queues one sample per
//! enabled channel.
//!
//! Control-register sessions drop the bus to a low clock rate; register
//! programming is unreliable at the sampling clock on some hardware
//! revisions. Data sessions always run at the sampling clock.

pub mod config;
pub mod registers;
pub mod task;

mod driver;

pub use config::{
    AccelRange, ClockSource, GyroRange, InitSequence, LowPassFilter, Mpu6000Config, Orientation,
    SensorChannels,
};
pub use driver::{AccelReceiver, GyroReceiver, Mpu6000Driver};
pub use task::data_ready_isr;
