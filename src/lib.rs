#![cfg_attr(not(test), no_std)]

//! kestrel-fc - sensor-acquisition core for the Kestrel flight controller
//!
//! This library provides the interrupt-driven MPU-6000 gyro/accel driver and
//! the platform abstraction it is written against. The data-ready interrupt
//! wakes a dedicated acquisition task which burst-reads the sensor over a
//! shared SPI bus and delivers orientation-normalized, scaled samples to
//! downstream state-estimation consumers through bounded queues.

// Platform abstraction layer (bus and delay traits, mocks for host tests)
pub mod platform;

// Device drivers using platform abstraction
pub mod devices;

// Core infrastructure (logging, interrupt-to-task handoff)
pub mod core;
