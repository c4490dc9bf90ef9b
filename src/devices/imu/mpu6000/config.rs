//! MPU-6000 Configuration
//!
//! Range, filter, orientation and channel settings, the driver configuration
//! struct, and the register-programming sequences executed by the driver.

use super::registers;

/// Gyroscope full scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
    /// ±250 °/s
    Dps250,
    /// ±500 °/s (default)
    #[default]
    Dps500,
    /// ±1000 °/s
    Dps1000,
    /// ±2000 °/s
    Dps2000,
}

impl GyroRange {
    /// Get the register value for this range
    pub fn register_value(self) -> u8 {
        match self {
            GyroRange::Dps250 => registers::GYRO_FS_SEL_250DPS,
            GyroRange::Dps500 => registers::GYRO_FS_SEL_500DPS,
            GyroRange::Dps1000 => registers::GYRO_FS_SEL_1000DPS,
            GyroRange::Dps2000 => registers::GYRO_FS_SEL_2000DPS,
        }
    }

    /// Get the sensitivity (LSB per °/s) for this range
    pub fn sensitivity(self) -> f32 {
        match self {
            GyroRange::Dps250 => registers::GYRO_SENSITIVITY_250DPS,
            GyroRange::Dps500 => registers::GYRO_SENSITIVITY_500DPS,
            GyroRange::Dps1000 => registers::GYRO_SENSITIVITY_1000DPS,
            GyroRange::Dps2000 => registers::GYRO_SENSITIVITY_2000DPS,
        }
    }

    /// Get scale factor to convert raw value to °/s
    pub fn scale_dps_per_lsb(self) -> f32 {
        1.0 / self.sensitivity()
    }

    /// Maximum rate this range can report, in °/s
    pub fn max_rate_dps(self) -> u32 {
        match self {
            GyroRange::Dps250 => 250,
            GyroRange::Dps500 => 500,
            GyroRange::Dps1000 => 1000,
            GyroRange::Dps2000 => 2000,
        }
    }
}

/// Accelerometer full scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    /// ±2 g
    G2,
    /// ±4 g
    G4,
    /// ±8 g (default)
    #[default]
    G8,
    /// ±16 g
    G16,
}

impl AccelRange {
    /// Get the register value for this range
    pub fn register_value(self) -> u8 {
        match self {
            AccelRange::G2 => registers::ACCEL_FS_SEL_2G,
            AccelRange::G4 => registers::ACCEL_FS_SEL_4G,
            AccelRange::G8 => registers::ACCEL_FS_SEL_8G,
            AccelRange::G16 => registers::ACCEL_FS_SEL_16G,
        }
    }

    /// Get the sensitivity (LSB per g) for this range
    pub fn sensitivity(self) -> f32 {
        match self {
            AccelRange::G2 => registers::ACCEL_SENSITIVITY_2G,
            AccelRange::G4 => registers::ACCEL_SENSITIVITY_4G,
            AccelRange::G8 => registers::ACCEL_SENSITIVITY_8G,
            AccelRange::G16 => registers::ACCEL_SENSITIVITY_16G,
        }
    }

    /// Get scale factor to convert raw value to m/s²
    pub fn scale_m_s2_per_lsb(self) -> f32 {
        registers::GRAVITY / self.sensitivity()
    }
}

/// Digital Low Pass Filter bandwidth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LowPassFilter {
    /// 256 Hz bandwidth, 8 kHz internal sample clock (default)
    #[default]
    Bw256Hz,
    /// 188 Hz bandwidth
    Bw188Hz,
    /// 98 Hz bandwidth
    Bw98Hz,
    /// 42 Hz bandwidth
    Bw42Hz,
    /// 20 Hz bandwidth
    Bw20Hz,
    /// 10 Hz bandwidth
    Bw10Hz,
    /// 5 Hz bandwidth
    Bw5Hz,
}

impl LowPassFilter {
    /// Get the register value for this bandwidth
    pub fn register_value(self) -> u8 {
        match self {
            LowPassFilter::Bw256Hz => registers::DLPF_CFG_256HZ,
            LowPassFilter::Bw188Hz => registers::DLPF_CFG_188HZ,
            LowPassFilter::Bw98Hz => registers::DLPF_CFG_98HZ,
            LowPassFilter::Bw42Hz => registers::DLPF_CFG_42HZ,
            LowPassFilter::Bw20Hz => registers::DLPF_CFG_20HZ,
            LowPassFilter::Bw10Hz => registers::DLPF_CFG_10HZ,
            LowPassFilter::Bw5Hz => registers::DLPF_CFG_5HZ,
        }
    }

    /// Internal sample clock this bandwidth runs the sensor at, in Hz.
    /// The sample-rate divisor divides down from this base.
    pub fn base_sample_rate_hz(self) -> u16 {
        match self {
            LowPassFilter::Bw256Hz => 8000,
            _ => 1000,
        }
    }
}

/// Compute the sample-rate divisor for a requested rate in Hz.
///
/// The sensor's output rate is `base / (1 + divisor)` where `base` is the
/// filter's internal sample clock. The request is clamped to the base, the
/// divisor rounded half-up and clamped to the 8-bit register range.
pub fn sample_rate_divisor(filter: LowPassFilter, rate_hz: u16) -> u8 {
    let base = filter.base_sample_rate_hz();
    let rate = rate_hz.min(base);
    let divisor = ((base as f32 / rate as f32) + 0.5) as i32 - 1;
    divisor.clamp(0, 0xFF) as u8
}

/// PWR_MGMT_1 clock source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// Internal 8 MHz oscillator
    Internal,
    /// PLL with X-axis gyro reference (default)
    #[default]
    PllGyroX,
    /// PLL with Y-axis gyro reference
    PllGyroY,
    /// PLL with Z-axis gyro reference
    PllGyroZ,
}

impl ClockSource {
    /// Get the register value for this clock source
    pub fn register_value(self) -> u8 {
        match self {
            ClockSource::Internal => registers::CLKSEL_INTERNAL,
            ClockSource::PllGyroX => registers::CLKSEL_PLL_GYRO_X,
            ClockSource::PllGyroY => registers::CLKSEL_PLL_GYRO_Y,
            ClockSource::PllGyroZ => registers::CLKSEL_PLL_GYRO_Z,
        }
    }
}

/// Which sample channels the device produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorChannels {
    /// Gyro samples only
    GyroOnly,
    /// Gyro and accelerometer samples (default)
    #[default]
    GyroAccel,
}

impl SensorChannels {
    /// True when the accelerometer channel is enabled
    pub fn has_accel(self) -> bool {
        matches!(self, SensorChannels::GyroAccel)
    }
}

// ============================================================================
// Mounting orientation
// ============================================================================

/// Mounting orientation of the sensor relative to the vehicle body frame.
///
/// The sensor's native frame has X to the right and Y forward; the vehicle
/// convention transposes the pair and carries Z down. Each orientation is a
/// fixed signed axis swap, enumerated explicitly in [`Orientation::remap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// Top-mounted, 0° yaw (default)
    #[default]
    Top0,
    /// Top-mounted, rotated 90°
    Top90,
    /// Top-mounted, rotated 180°
    Top180,
    /// Top-mounted, rotated 270°
    Top270,
    /// Bottom-mounted, 0° yaw
    Bottom0,
    /// Bottom-mounted, rotated 90°
    Bottom90,
    /// Bottom-mounted, rotated 180°
    Bottom180,
    /// Bottom-mounted, rotated 270°
    Bottom270,
}

/// Signed axis swap: `out[i] = sign[i] * native[source[i]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRemap {
    source: [usize; 3],
    sign: [i32; 3],
}

impl AxisRemap {
    /// Apply the swap to one native X/Y/Z triple, widening to i32 so
    /// negating i16::MIN cannot overflow.
    pub fn apply(&self, native: [i16; 3]) -> [i32; 3] {
        [
            self.sign[0] * native[self.source[0]] as i32,
            self.sign[1] * native[self.source[1]] as i32,
            self.sign[2] * native[self.source[2]] as i32,
        ]
    }
}

impl Orientation {
    /// Axis swap for this mounting position, applied identically to the
    /// accel and gyro triples.
    pub fn remap(self) -> AxisRemap {
        match self {
            Orientation::Top0 => AxisRemap {
                source: [1, 0, 2],
                sign: [1, 1, -1],
            },
            Orientation::Top90 => AxisRemap {
                source: [0, 1, 2],
                sign: [1, -1, -1],
            },
            Orientation::Top180 => AxisRemap {
                source: [1, 0, 2],
                sign: [-1, -1, -1],
            },
            Orientation::Top270 => AxisRemap {
                source: [0, 1, 2],
                sign: [-1, 1, -1],
            },
            Orientation::Bottom0 => AxisRemap {
                source: [1, 0, 2],
                sign: [1, -1, 1],
            },
            Orientation::Bottom90 => AxisRemap {
                source: [0, 1, 2],
                sign: [-1, 1, 1],
            },
            Orientation::Bottom180 => AxisRemap {
                source: [1, 0, 2],
                sign: [-1, 1, 1],
            },
            Orientation::Bottom270 => AxisRemap {
                source: [0, 1, 2],
                sign: [1, -1, 1],
            },
        }
    }
}

// ============================================================================
// Configuration sequences
// ============================================================================

/// One step of a configuration sequence.
///
/// Sequences are data: the driver executes them with one generic routine, so
/// the short and full variants differ only in their step lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigStep {
    /// Claim the bus at low speed, hold the chip select for a moment,
    /// release.
    WakeBus,
    /// Write the power-management register with the device-reset bit set;
    /// `with_clock` also selects the configured clock source in the same
    /// write.
    ResetDevice {
        /// OR the clock source bits into the reset write
        with_clock: bool,
    },
    /// Poll the power-management register until the reset bit clears.
    AwaitResetClear,
    /// Write the user-control signal-path reset bits. The full variant also
    /// resets the FIFO and I2C master and is followed by
    /// `AwaitSignalPathClear`.
    ResetSignalPath {
        /// Reset FIFO and I2C master paths as well
        full: bool,
    },
    /// Poll the user-control register until its self-clearing reset bits
    /// read back as zero.
    AwaitSignalPathClear,
    /// Program the configured clock source.
    SetClockSource,
    /// Program the configured user-control value.
    SetUserControl,
    /// Program the digital low-pass filter. Must precede `SetSampleRate`:
    /// the divisor base depends on the filter bandwidth.
    SetLowPassFilter,
    /// Compute and program the sample-rate divisor.
    SetSampleRate,
    /// Program the gyro full-scale range.
    SetGyroRange,
    /// Program the accel full-scale range (skipped on gyro-only devices).
    SetAccelRange,
    /// Program the interrupt pin configuration.
    SetInterruptConfig,
    /// Program the interrupt-enable register.
    SetInterruptEnable,
    /// Let the device settle.
    Settle {
        /// Settle time in milliseconds
        ms: u32,
    },
}

/// Short sequence: assumes registers power up in their documented state.
const SHORT_SEQUENCE: &[ConfigStep] = &[
    ConfigStep::ResetDevice { with_clock: false },
    ConfigStep::ResetSignalPath { full: false },
    ConfigStep::Settle { ms: 10 },
    ConfigStep::SetClockSource,
    ConfigStep::SetUserControl,
    ConfigStep::SetLowPassFilter,
    ConfigStep::SetSampleRate,
    ConfigStep::SetGyroRange,
    ConfigStep::SetAccelRange,
    ConfigStep::SetInterruptConfig,
    ConfigStep::SetInterruptEnable,
];

/// Full sequence: resets the chip and signal paths and polls both resets to
/// completion. Several tail writes repeat; the redundancy is kept because it
/// is what proved reliable across hardware revisions.
const FULL_SEQUENCE: &[ConfigStep] = &[
    ConfigStep::WakeBus,
    ConfigStep::Settle { ms: 10 },
    ConfigStep::ResetDevice { with_clock: true },
    ConfigStep::AwaitResetClear,
    ConfigStep::Settle { ms: 25 },
    ConfigStep::ResetSignalPath { full: true },
    ConfigStep::AwaitSignalPathClear,
    ConfigStep::Settle { ms: 25 },
    ConfigStep::SetClockSource,
    ConfigStep::SetInterruptConfig,
    ConfigStep::SetInterruptEnable,
    ConfigStep::SetAccelRange,
    ConfigStep::SetLowPassFilter,
    ConfigStep::SetSampleRate,
    ConfigStep::SetGyroRange,
    ConfigStep::SetUserControl,
    ConfigStep::SetClockSource,
    ConfigStep::SetInterruptConfig,
    ConfigStep::SetInterruptEnable,
];

/// Which register-programming sequence `configure` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitSequence {
    /// Trust the power-up register state and program only what differs
    Short,
    /// Reset the chip and signal paths and poll the resets to completion
    /// (default)
    #[default]
    Full,
}

impl InitSequence {
    /// Step list for this sequence.
    pub fn steps(self) -> &'static [ConfigStep] {
        match self {
            InitSequence::Short => SHORT_SEQUENCE,
            InitSequence::Full => FULL_SEQUENCE,
        }
    }
}

// ============================================================================
// Driver configuration
// ============================================================================

/// MPU-6000 driver configuration
#[derive(Debug, Clone, Copy)]
pub struct Mpu6000Config {
    /// Register-programming sequence to run
    pub init_sequence: InitSequence,

    /// Sample channels to produce
    pub channels: SensorChannels,

    /// Mounting orientation
    pub orientation: Orientation,

    /// Clock source programmed into PWR_MGMT_1
    pub clock_source: ClockSource,

    /// USER_CTRL register value (board-specific; SPI boards disable the
    /// I2C interface)
    pub user_control: u8,

    /// INT_PIN_CFG register value (edge/level, latch behavior)
    pub interrupt_config: u8,

    /// INT_ENABLE register value
    pub interrupt_enable: u8,

    /// Gyroscope full scale range
    pub gyro_range: GyroRange,

    /// Accelerometer full scale range
    pub accel_range: AccelRange,

    /// Digital low-pass filter bandwidth
    pub filter: LowPassFilter,

    /// Requested output rate in Hz, clamped to the filter's base clock
    pub sample_rate_hz: u16,

    /// Bus clock for control-register sessions
    pub low_speed_hz: u32,

    /// Bus clock for data sessions
    pub high_speed_hz: u32,
}

impl Default for Mpu6000Config {
    fn default() -> Self {
        Self {
            init_sequence: InitSequence::Full,
            channels: SensorChannels::GyroAccel,
            orientation: Orientation::Top0,
            clock_source: ClockSource::PllGyroX,
            user_control: registers::USER_CTRL_I2C_IF_DIS,
            interrupt_config: registers::INT_PIN_CFG_LATCH_EN
                | registers::INT_PIN_CFG_CLEAR_ON_ANY_READ,
            interrupt_enable: registers::INT_ENABLE_DATA_RDY,
            gyro_range: GyroRange::Dps500,
            accel_range: AccelRange::G8,
            filter: LowPassFilter::Bw256Hz,
            sample_rate_hz: 1000,
            low_speed_hz: 1_000_000,
            high_speed_hz: 20_000_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gyro_range_register_values() {
        assert_eq!(GyroRange::Dps250.register_value(), 0x00);
        assert_eq!(GyroRange::Dps500.register_value(), 0x08);
        assert_eq!(GyroRange::Dps1000.register_value(), 0x10);
        assert_eq!(GyroRange::Dps2000.register_value(), 0x18);
    }

    #[test]
    fn gyro_scale_factors() {
        // 500 °/s: raw 655 reads as 10 °/s
        let scale = GyroRange::Dps500.scale_dps_per_lsb();
        assert!((655.0 * scale - 10.0).abs() < 1e-3);

        assert!((GyroRange::Dps250.scale_dps_per_lsb() - 1.0 / 131.0).abs() < 1e-9);
        assert!((GyroRange::Dps1000.scale_dps_per_lsb() - 1.0 / 32.8).abs() < 1e-9);
        assert!((GyroRange::Dps2000.scale_dps_per_lsb() - 1.0 / 16.4).abs() < 1e-9);
    }

    #[test]
    fn accel_scale_factors() {
        // 8 g: raw 4096 reads as exactly 1 g
        let scale = AccelRange::G8.scale_m_s2_per_lsb();
        assert!((4096.0 * scale - registers::GRAVITY).abs() < 1e-4);

        assert!((AccelRange::G2.scale_m_s2_per_lsb() - registers::GRAVITY / 16384.0).abs() < 1e-9);
        assert!((AccelRange::G16.scale_m_s2_per_lsb() - registers::GRAVITY / 2048.0).abs() < 1e-9);
    }

    #[test]
    fn max_rates_follow_range() {
        assert_eq!(GyroRange::Dps250.max_rate_dps(), 250);
        assert_eq!(GyroRange::Dps2000.max_rate_dps(), 2000);
    }

    #[test]
    fn filter_base_rates() {
        assert_eq!(LowPassFilter::Bw256Hz.base_sample_rate_hz(), 8000);
        assert_eq!(LowPassFilter::Bw188Hz.base_sample_rate_hz(), 1000);
        assert_eq!(LowPassFilter::Bw5Hz.base_sample_rate_hz(), 1000);
    }

    #[test]
    fn divisor_round_half_up() {
        // 8 kHz base, 500 Hz requested: round(16) - 1
        assert_eq!(sample_rate_divisor(LowPassFilter::Bw256Hz, 500), 15);
        // 1 kHz base, 1000 Hz requested: divisor 0
        assert_eq!(sample_rate_divisor(LowPassFilter::Bw188Hz, 1000), 0);
        // Requests above the base clamp to it first
        assert_eq!(sample_rate_divisor(LowPassFilter::Bw188Hz, 20000), 0);
    }

    #[test]
    fn divisor_clamps_to_register_range() {
        // 8 kHz base, 8 kHz requested
        assert_eq!(sample_rate_divisor(LowPassFilter::Bw256Hz, 8000), 0);
        // 1 kHz base, 1 Hz requested: divisor 999 clamps to 255
        assert_eq!(sample_rate_divisor(LowPassFilter::Bw188Hz, 1), 255);
        // Degenerate request saturates rather than dividing by zero
        assert_eq!(sample_rate_divisor(LowPassFilter::Bw256Hz, 0), 255);
    }

    #[test]
    fn remap_all_eight_orientations() {
        let native = [100i16, 200, 300];

        let cases = [
            (Orientation::Top0, [200, 100, -300]),
            (Orientation::Top90, [100, -200, -300]),
            (Orientation::Top180, [-200, -100, -300]),
            (Orientation::Top270, [-100, 200, -300]),
            (Orientation::Bottom0, [200, -100, 300]),
            (Orientation::Bottom90, [-100, 200, 300]),
            (Orientation::Bottom180, [-200, 100, 300]),
            (Orientation::Bottom270, [100, -200, 300]),
        ];

        for (orientation, expected) in cases {
            assert_eq!(
                orientation.remap().apply(native),
                expected,
                "orientation {:?}",
                orientation
            );
        }
    }

    #[test]
    fn remap_widens_before_negating() {
        let out = Orientation::Top180.remap().apply([i16::MIN; 3]);
        assert_eq!(out, [32768, 32768, 32768]);
    }

    #[test]
    fn sequences_program_filter_before_sample_rate() {
        for sequence in [InitSequence::Short, InitSequence::Full] {
            let steps = sequence.steps();
            let filter = steps
                .iter()
                .position(|s| *s == ConfigStep::SetLowPassFilter)
                .unwrap();
            let rate = steps
                .iter()
                .position(|s| *s == ConfigStep::SetSampleRate)
                .unwrap();
            assert!(filter < rate, "sequence {:?}", sequence);
        }
    }

    #[test]
    fn full_sequence_polls_both_resets() {
        let steps = InitSequence::Full.steps();
        assert!(steps.contains(&ConfigStep::AwaitResetClear));
        assert!(steps.contains(&ConfigStep::AwaitSignalPathClear));
        // The short variant trusts power-up state and never polls.
        let steps = InitSequence::Short.steps();
        assert!(!steps.contains(&ConfigStep::AwaitResetClear));
        assert!(!steps.contains(&ConfigStep::AwaitSignalPathClear));
    }

    #[test]
    fn config_defaults() {
        let config = Mpu6000Config::default();
        assert_eq!(config.gyro_range, GyroRange::Dps500);
        assert_eq!(config.accel_range, AccelRange::G8);
        assert_eq!(config.channels, SensorChannels::GyroAccel);
        assert_eq!(config.init_sequence, InitSequence::Full);
        assert_eq!(config.low_speed_hz, 1_000_000);
        assert_eq!(config.high_speed_hz, 20_000_000);
    }
}
