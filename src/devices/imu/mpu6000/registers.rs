//! MPU-6000 Register Definitions
//!
//! Based on the MPU-6000/MPU-6050 Register Map (RM-MPU-6000A-00 rev 4.2).

#![allow(dead_code)]

// ============================================================================
// SPI address byte flags
// ============================================================================

/// Read flag, set in the high bit of the address byte
pub const READ_FLAG: u8 = 0x80;

/// Mask clearing the read flag for write transactions
pub const REG_ADDR_MASK: u8 = 0x7F;

// ============================================================================
// MPU-6000 Registers
// ============================================================================

/// Sample rate divider: SAMPLE_RATE = Internal_Sample_Rate / (1 + SMPLRT_DIV)
pub const SMPLRT_DIV: u8 = 0x19;

/// Configuration register (DLPF, FSYNC)
pub const DLPF_CONFIG: u8 = 0x1A;

/// Gyroscope configuration (full-scale range, self-test)
pub const GYRO_CONFIG: u8 = 0x1B;

/// Accelerometer configuration (full-scale range, self-test)
pub const ACCEL_CONFIG: u8 = 0x1C;

/// FIFO enable register
pub const FIFO_EN: u8 = 0x23;

/// Interrupt pin configuration
pub const INT_PIN_CFG: u8 = 0x37;

/// Interrupt enable
pub const INT_ENABLE: u8 = 0x38;

/// Interrupt status
pub const INT_STATUS: u8 = 0x3A;

/// Accelerometer measurements (high byte first)
pub const ACCEL_XOUT_H: u8 = 0x3B;
pub const ACCEL_XOUT_L: u8 = 0x3C;
pub const ACCEL_YOUT_H: u8 = 0x3D;
pub const ACCEL_YOUT_L: u8 = 0x3E;
pub const ACCEL_ZOUT_H: u8 = 0x3F;
pub const ACCEL_ZOUT_L: u8 = 0x40;

/// Temperature measurement (high byte first)
pub const TEMP_OUT_H: u8 = 0x41;
pub const TEMP_OUT_L: u8 = 0x42;

/// Gyroscope measurements (high byte first)
pub const GYRO_XOUT_H: u8 = 0x43;
pub const GYRO_XOUT_L: u8 = 0x44;
pub const GYRO_YOUT_H: u8 = 0x45;
pub const GYRO_YOUT_L: u8 = 0x46;
pub const GYRO_ZOUT_H: u8 = 0x47;
pub const GYRO_ZOUT_L: u8 = 0x48;

/// User control register
pub const USER_CTRL: u8 = 0x6A;

/// Power management 1
pub const PWR_MGMT_1: u8 = 0x6B;

/// Power management 2
pub const PWR_MGMT_2: u8 = 0x6C;

/// FIFO count registers
pub const FIFO_COUNTH: u8 = 0x72;
pub const FIFO_COUNTL: u8 = 0x73;

/// FIFO read/write
pub const FIFO_R_W: u8 = 0x74;

/// Device ID
pub const WHO_AM_I: u8 = 0x75;

/// Length of the contiguous output block: accel X/Y/Z, temperature,
/// gyro X/Y/Z, each a big-endian 16-bit pair
pub const SENSOR_DATA_LEN: usize = 14;

// ============================================================================
// MPU-6000 Register Values
// ============================================================================

/// WHO_AM_I expected value
pub const WHO_AM_I_VALUE: u8 = 0x68;

/// PWR_MGMT_1 bits
pub const PWR_MGMT_1_DEVICE_RESET: u8 = 0x80;
pub const PWR_MGMT_1_SLEEP: u8 = 0x40;

/// PWR_MGMT_1 clock source selection (CLKSEL[2:0])
pub const CLKSEL_INTERNAL: u8 = 0x00;
pub const CLKSEL_PLL_GYRO_X: u8 = 0x01;
pub const CLKSEL_PLL_GYRO_Y: u8 = 0x02;
pub const CLKSEL_PLL_GYRO_Z: u8 = 0x03;

/// USER_CTRL bits
pub const USER_CTRL_DMP_RESET: u8 = 0x80;
pub const USER_CTRL_FIFO_EN: u8 = 0x40;
pub const USER_CTRL_I2C_MST_EN: u8 = 0x20;
pub const USER_CTRL_I2C_IF_DIS: u8 = 0x10;
pub const USER_CTRL_FIFO_RESET: u8 = 0x04;
pub const USER_CTRL_I2C_MST_RESET: u8 = 0x02;
pub const USER_CTRL_SIG_COND_RESET: u8 = 0x01;

/// Self-clearing USER_CTRL reset bits polled by the full init sequence
pub const USER_CTRL_RESET_MASK: u8 =
    USER_CTRL_FIFO_RESET | USER_CTRL_I2C_MST_RESET | USER_CTRL_SIG_COND_RESET;

/// INT_PIN_CFG bits
pub const INT_PIN_CFG_ACTIVE_LOW: u8 = 0x80;
pub const INT_PIN_CFG_OPEN_DRAIN: u8 = 0x40;
pub const INT_PIN_CFG_LATCH_EN: u8 = 0x20;
pub const INT_PIN_CFG_CLEAR_ON_ANY_READ: u8 = 0x10;

/// INT_ENABLE bits
pub const INT_ENABLE_FIFO_OVERFLOW: u8 = 0x10;
pub const INT_ENABLE_DATA_RDY: u8 = 0x01;

// ============================================================================
// Gyroscope Full Scale Range
// ============================================================================

/// Gyroscope full scale range bits (GYRO_CONFIG[4:3])
pub const GYRO_FS_SEL_250DPS: u8 = 0x00;
pub const GYRO_FS_SEL_500DPS: u8 = 0x08;
pub const GYRO_FS_SEL_1000DPS: u8 = 0x10;
pub const GYRO_FS_SEL_2000DPS: u8 = 0x18;

// ============================================================================
// Accelerometer Full Scale Range
// ============================================================================

/// Accelerometer full scale range bits (ACCEL_CONFIG[4:3])
pub const ACCEL_FS_SEL_2G: u8 = 0x00;
pub const ACCEL_FS_SEL_4G: u8 = 0x08;
pub const ACCEL_FS_SEL_8G: u8 = 0x10;
pub const ACCEL_FS_SEL_16G: u8 = 0x18;

// ============================================================================
// Digital Low Pass Filter (DLPF) Configuration
// ============================================================================

/// DLPF bandwidth settings (DLPF_CONFIG[2:0]). The widest setting runs the
/// gyro sample clock at 8 kHz; every other setting runs it at 1 kHz.
pub const DLPF_CFG_256HZ: u8 = 0x00;
pub const DLPF_CFG_188HZ: u8 = 0x01;
pub const DLPF_CFG_98HZ: u8 = 0x02;
pub const DLPF_CFG_42HZ: u8 = 0x03;
pub const DLPF_CFG_20HZ: u8 = 0x04;
pub const DLPF_CFG_10HZ: u8 = 0x05;
pub const DLPF_CFG_5HZ: u8 = 0x06;

// ============================================================================
// Scaling Constants
// ============================================================================

/// Gyroscope sensitivity (LSB per °/s) for each range
pub const GYRO_SENSITIVITY_250DPS: f32 = 131.0;
pub const GYRO_SENSITIVITY_500DPS: f32 = 65.5;
pub const GYRO_SENSITIVITY_1000DPS: f32 = 32.8;
pub const GYRO_SENSITIVITY_2000DPS: f32 = 16.4;

/// Accelerometer sensitivity (LSB per g) for each range
pub const ACCEL_SENSITIVITY_2G: f32 = 16384.0;
pub const ACCEL_SENSITIVITY_4G: f32 = 8192.0;
pub const ACCEL_SENSITIVITY_8G: f32 = 4096.0;
pub const ACCEL_SENSITIVITY_16G: f32 = 2048.0;

/// Temperature conversion: temp_C = 35 + (raw + 512) / 340
pub const TEMP_OFFSET_C: f32 = 35.0;
pub const TEMP_OFFSET_LSB: f32 = 512.0;
pub const TEMP_SENSITIVITY: f32 = 340.0; // LSB/°C

/// Gravity constant (m/s²)
pub const GRAVITY: f32 = 9.80665;
