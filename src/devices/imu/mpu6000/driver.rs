//! MPU-6000 driver core
//!
//! Owns the bus port and the sample delivery queues, runs the configuration
//! sequences, and performs one burst acquisition per data-ready wake. All
//! methods take `&self` so a single instance can be shared between the
//! interrupt context and the acquisition task.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::{Channel, Receiver};
use nalgebra::Vector3;

use super::config::{
    sample_rate_divisor, AccelRange, ConfigStep, GyroRange, LowPassFilter, Mpu6000Config,
};
use super::registers;
use crate::core::sync::DataReadySignal;
use crate::devices::sensors::SensorLimits;
use crate::devices::traits::{AccelSample, GyroSample, ImuError, SAMPLE_QUEUE_DEPTH};
use crate::platform::traits::{DelaySource, SpiBus};

/// Tag checked by every operation to catch stale or clobbered handles.
const DEVICE_MAGIC: u32 = 0x9DA9_B3ED;

/// Interval between reset-status polls during the full init sequence.
const RESET_POLL_MS: u32 = 5;

/// Queue endpoint delivering gyro samples to one consumer.
pub type GyroReceiver<'a> = Receiver<'a, CriticalSectionRawMutex, GyroSample, SAMPLE_QUEUE_DEPTH>;

/// Queue endpoint delivering accel samples to one consumer.
pub type AccelReceiver<'a> = Receiver<'a, CriticalSectionRawMutex, AccelSample, SAMPLE_QUEUE_DEPTH>;

/// Mutable driver state. Replaced as one value under a critical section and
/// read as one snapshot per acquisition cycle, so a range change never lands
/// in the middle of a transform.
#[derive(Clone, Copy)]
struct SensorState {
    gyro_range: GyroRange,
    accel_range: AccelRange,
    filter: LowPassFilter,
    configured: bool,
}

/// The decoded output block of one burst read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawSensorFrame {
    accel: [i16; 3],
    temp: i16,
    gyro: [i16; 3],
}

impl RawSensorFrame {
    /// Decode the 14-byte output block: accel X/Y/Z, temperature, gyro
    /// X/Y/Z, each a big-endian signed 16-bit pair.
    fn decode(data: &[u8]) -> Self {
        let pair = |i: usize| i16::from_be_bytes([data[2 * i], data[2 * i + 1]]);
        Self {
            accel: [pair(0), pair(1), pair(2)],
            temp: pair(3),
            gyro: [pair(4), pair(5), pair(6)],
        }
    }

    /// Die temperature in °C.
    fn temperature_c(&self) -> f32 {
        registers::TEMP_OFFSET_C
            + (self.temp as f32 + registers::TEMP_OFFSET_LSB) / registers::TEMP_SENSITIVITY
    }
}

/// MPU-6000 device handle.
///
/// Created once at startup, configured before the acquisition task starts,
/// and never torn down. The handle owns both sample queues and the
/// data-ready handoff; consumers attach through [`gyro_samples`] and
/// [`accel_samples`].
///
/// [`gyro_samples`]: Mpu6000Driver::gyro_samples
/// [`accel_samples`]: Mpu6000Driver::accel_samples
pub struct Mpu6000Driver<'l, B: SpiBus> {
    magic: u32,
    bus: B,
    slave: u8,
    config: Mpu6000Config,
    state: Mutex<CriticalSectionRawMutex, Cell<SensorState>>,
    data_ready: DataReadySignal,
    gyro_queue: Channel<CriticalSectionRawMutex, GyroSample, SAMPLE_QUEUE_DEPTH>,
    accel_queue: Channel<CriticalSectionRawMutex, AccelSample, SAMPLE_QUEUE_DEPTH>,
    limits: Option<&'l SensorLimits>,
}

impl<'l, B: SpiBus> Mpu6000Driver<'l, B> {
    /// Create a driver over a bus port and chip-select slot.
    ///
    /// The device produces nothing until [`configure`](Self::configure)
    /// completes. `limits`, when given, receives the gyro's rate capability
    /// as ranges are programmed.
    pub fn new(bus: B, slave: u8, config: Mpu6000Config, limits: Option<&'l SensorLimits>) -> Self {
        Self {
            magic: DEVICE_MAGIC,
            bus,
            slave,
            config,
            state: Mutex::new(Cell::new(SensorState {
                gyro_range: config.gyro_range,
                accel_range: config.accel_range,
                filter: config.filter,
                configured: false,
            })),
            data_ready: DataReadySignal::new(),
            gyro_queue: Channel::new(),
            accel_queue: Channel::new(),
            limits,
        }
    }

    /// Check a possibly-absent handle, then the handle itself.
    pub fn validate_handle(dev: Option<&Self>) -> Result<&Self, ImuError> {
        let dev = dev.ok_or(ImuError::MissingHandle)?;
        dev.validate()?;
        Ok(dev)
    }

    /// Reject clobbered handles and unbound bus ports.
    fn validate(&self) -> Result<(), ImuError> {
        if self.magic != DEVICE_MAGIC {
            return Err(ImuError::CorruptHandle);
        }
        if self.bus.bus_id() == 0 {
            return Err(ImuError::UnboundBus);
        }
        Ok(())
    }

    /// Claim the shared bus and select the chip.
    ///
    /// `low_speed` drops the clock for control-register access; data
    /// sessions keep the sampling clock. On failure the bus is left
    /// unclaimed and no transfer has happened.
    fn claim_bus(&self, low_speed: bool) -> Result<(), ImuError> {
        self.validate()?;
        self.bus.claim().map_err(|_| ImuError::BusClaim)?;

        if low_speed && self.bus.set_frequency(self.config.low_speed_hz).is_err() {
            let _ = self.bus.release();
            return Err(ImuError::BusClaim);
        }
        if self.bus.chip_select(self.slave, true).is_err() {
            let _ = self.bus.release();
            return Err(ImuError::BusClaim);
        }
        Ok(())
    }

    /// Deselect the chip, restore the sampling clock when a low-speed
    /// session ends, and release the bus.
    fn release_bus(&self, low_speed: bool) -> Result<(), ImuError> {
        self.validate()?;
        let _ = self.bus.chip_select(self.slave, false);
        if low_speed {
            let _ = self.bus.set_frequency(self.config.high_speed_hz);
        }
        self.bus.release().map_err(|_| ImuError::BusClaim)
    }

    /// Read one register in a low-speed session.
    fn read_register(&self, reg: u8) -> Result<u8, ImuError> {
        self.claim_bus(true)?;
        let value = self
            .bus
            .transfer_byte(reg | registers::READ_FLAG)
            .and_then(|_| self.bus.transfer_byte(0));
        self.release_bus(true)?;
        value.map_err(|_| ImuError::Transfer)
    }

    /// Write one register in a low-speed session.
    ///
    /// A non-zero reply to either shifted byte means the bus flagged the
    /// write; the session is closed before the error returns.
    fn write_register(&self, reg: u8, value: u8) -> Result<(), ImuError> {
        self.claim_bus(true)?;

        match self.bus.transfer_byte(reg & registers::REG_ADDR_MASK) {
            Ok(0) => {}
            Ok(_) => {
                self.release_bus(true)?;
                return Err(ImuError::AddressPhase);
            }
            Err(_) => {
                self.release_bus(true)?;
                return Err(ImuError::Transfer);
            }
        }

        match self.bus.transfer_byte(value) {
            Ok(0) => {}
            Ok(_) => {
                self.release_bus(true)?;
                return Err(ImuError::DataPhase);
            }
            Err(_) => {
                self.release_bus(true)?;
                return Err(ImuError::Transfer);
            }
        }

        self.release_bus(true)
    }

    /// Run the configured register-programming sequence.
    ///
    /// The bus drops to the control-register clock for the duration and is
    /// restored afterwards. Runs once, before the acquisition task starts.
    ///
    /// The full sequence's reset polls retry forever at 5 ms intervals; a
    /// device that never clears its reset bits hangs this call, so callers
    /// that need a startup deadline must bound it themselves.
    pub async fn configure<D: DelaySource>(&self, delay: &D) -> Result<(), ImuError> {
        self.validate()?;
        self.bus
            .set_frequency(self.config.low_speed_hz)
            .map_err(|_| ImuError::BusClaim)?;

        let result = self
            .apply_sequence(self.config.init_sequence.steps(), delay)
            .await;

        self.bus
            .set_frequency(self.config.high_speed_hz)
            .map_err(|_| ImuError::BusClaim)?;
        result?;

        self.state.lock(|s| {
            let mut state = s.get();
            state.configured = true;
            s.set(state);
        });
        crate::log_info!("MPU6000 configured");
        Ok(())
    }

    /// Execute one sequence step list.
    async fn apply_sequence<D: DelaySource>(
        &self,
        steps: &[ConfigStep],
        delay: &D,
    ) -> Result<(), ImuError> {
        for step in steps {
            match *step {
                ConfigStep::WakeBus => {
                    self.claim_bus(true)?;
                    delay.delay_ms(1).await;
                    self.release_bus(true)?;
                }
                ConfigStep::ResetDevice { with_clock } => {
                    let mut value = registers::PWR_MGMT_1_DEVICE_RESET;
                    if with_clock {
                        value |= self.config.clock_source.register_value();
                    }
                    self.write_register(registers::PWR_MGMT_1, value)?;
                }
                ConfigStep::AwaitResetClear => {
                    self.poll_clear(
                        registers::PWR_MGMT_1,
                        registers::PWR_MGMT_1_DEVICE_RESET,
                        delay,
                    )
                    .await?;
                }
                ConfigStep::ResetSignalPath { full } => {
                    let value = if full {
                        registers::USER_CTRL_DMP_RESET | registers::USER_CTRL_RESET_MASK
                    } else {
                        registers::USER_CTRL_SIG_COND_RESET
                    };
                    self.write_register(registers::USER_CTRL, value)?;
                }
                ConfigStep::AwaitSignalPathClear => {
                    self.poll_clear(registers::USER_CTRL, registers::USER_CTRL_RESET_MASK, delay)
                        .await?;
                }
                ConfigStep::SetClockSource => {
                    self.write_register(
                        registers::PWR_MGMT_1,
                        self.config.clock_source.register_value(),
                    )?;
                }
                ConfigStep::SetUserControl => {
                    self.write_register(registers::USER_CTRL, self.config.user_control)?;
                }
                ConfigStep::SetLowPassFilter => {
                    self.set_low_pass_filter(self.config.filter)?;
                }
                ConfigStep::SetSampleRate => {
                    self.set_sample_rate(self.config.sample_rate_hz)?;
                }
                ConfigStep::SetGyroRange => {
                    self.set_gyro_range(self.config.gyro_range)?;
                }
                ConfigStep::SetAccelRange => {
                    if self.config.channels.has_accel() {
                        self.set_accel_range(self.config.accel_range)?;
                    }
                }
                ConfigStep::SetInterruptConfig => {
                    self.write_register(registers::INT_PIN_CFG, self.config.interrupt_config)?;
                }
                ConfigStep::SetInterruptEnable => {
                    self.write_register(registers::INT_ENABLE, self.config.interrupt_enable)?;
                }
                ConfigStep::Settle { ms } => delay.delay_ms(ms).await,
            }
        }
        Ok(())
    }

    /// Poll `reg` until `mask` reads back clear.
    async fn poll_clear<D: DelaySource>(
        &self,
        reg: u8,
        mask: u8,
        delay: &D,
    ) -> Result<(), ImuError> {
        loop {
            delay.delay_ms(RESET_POLL_MS).await;
            if self.read_register(reg)? & mask == 0 {
                return Ok(());
            }
        }
    }

    /// Program the gyro full-scale range and record it for scaling.
    ///
    /// Takes effect on the acquisition path at the next cycle boundary and
    /// publishes the new rate capability to the attached limits tracker.
    pub fn set_gyro_range(&self, range: GyroRange) -> Result<(), ImuError> {
        self.write_register(registers::GYRO_CONFIG, range.register_value())?;

        if let Some(limits) = self.limits {
            limits.set_max_gyro_rate(range.max_rate_dps());
        }

        self.state.lock(|s| {
            let mut state = s.get();
            state.gyro_range = range;
            s.set(state);
        });
        Ok(())
    }

    /// Program the accel full-scale range and record it for scaling.
    ///
    /// Takes effect on the acquisition path at the next cycle boundary.
    pub fn set_accel_range(&self, range: AccelRange) -> Result<(), ImuError> {
        self.write_register(registers::ACCEL_CONFIG, range.register_value())?;

        self.state.lock(|s| {
            let mut state = s.get();
            state.accel_range = range;
            s.set(state);
        });
        Ok(())
    }

    /// Program the digital low-pass filter.
    ///
    /// Set the filter before the sample rate: the divisor base depends on
    /// the filter bandwidth.
    pub fn set_low_pass_filter(&self, filter: LowPassFilter) -> Result<(), ImuError> {
        self.write_register(registers::DLPF_CONFIG, filter.register_value())?;

        self.state.lock(|s| {
            let mut state = s.get();
            state.filter = filter;
            s.set(state);
        });
        Ok(())
    }

    /// Program the nearest divisor for a requested output rate in Hz.
    pub fn set_sample_rate(&self, rate_hz: u16) -> Result<(), ImuError> {
        let filter = self.state.lock(|s| s.get().filter);
        self.write_register(registers::SMPLRT_DIV, sample_rate_divisor(filter, rate_hz))
    }

    /// Read the identity register and check it against the expected id.
    ///
    /// A failed read propagates as a transfer error, distinct from the
    /// wrong-device result.
    pub fn self_test(&self) -> Result<(), ImuError> {
        let id = self.read_register(registers::WHO_AM_I)?;
        if id != registers::WHO_AM_I_VALUE {
            crate::log_error!("unexpected device identity: {:#x}", id);
            return Err(ImuError::WrongDevice(id));
        }
        Ok(())
    }

    /// True once a configuration sequence has completed.
    pub fn is_configured(&self) -> bool {
        self.state.lock(|s| s.get().configured)
    }

    /// Handoff signalled by the data-ready interrupt.
    pub(crate) fn data_ready(&self) -> &DataReadySignal {
        &self.data_ready
    }

    /// Obtain the gyro sample queue endpoint.
    ///
    /// Consumers dequeue at their own pace and must tolerate gaps: the queue
    /// drops new samples when full.
    pub fn gyro_samples(&self) -> GyroReceiver<'_> {
        self.gyro_queue.receiver()
    }

    /// Obtain the accel sample queue endpoint, if the channel is built in.
    pub fn accel_samples(&self) -> Result<AccelReceiver<'_>, ImuError> {
        if !self.config.channels.has_accel() {
            return Err(ImuError::ChannelUnavailable);
        }
        Ok(self.accel_queue.receiver())
    }

    /// Run one acquisition cycle: burst-read the output block at the
    /// sampling clock, remap it to the vehicle frame, scale it, and queue
    /// the results.
    ///
    /// A failed cycle produces no sample; the task loop skips it and keeps
    /// running.
    pub fn acquire_once(&self) -> Result<(), ImuError> {
        let mut tx = [0u8; 1 + registers::SENSOR_DATA_LEN];
        let mut rx = [0u8; 1 + registers::SENSOR_DATA_LEN];
        tx[0] = registers::ACCEL_XOUT_H | registers::READ_FLAG;

        self.claim_bus(false)?;
        let transfer = self.bus.transfer(&tx, &mut rx);
        self.release_bus(false)?;
        if transfer.is_err() {
            return Err(ImuError::Transfer);
        }

        let frame = RawSensorFrame::decode(&rx[1..]);
        let state = self.state.lock(|s| s.get());
        let remap = self.config.orientation.remap();
        let temperature = frame.temperature_c();

        let gyro = remap.apply(frame.gyro);
        let gyro_scale = state.gyro_range.scale_dps_per_lsb();
        let gyro_sample = GyroSample {
            rate: Vector3::new(gyro[0] as f32, gyro[1] as f32, gyro[2] as f32) * gyro_scale,
            temperature,
        };

        // Zero-wait sends: a stalled consumer costs samples, never latency.
        let _ = self.gyro_queue.try_send(gyro_sample);

        if self.config.channels.has_accel() {
            let accel = remap.apply(frame.accel);
            let accel_scale = state.accel_range.scale_m_s2_per_lsb();
            let accel_sample = AccelSample {
                accel: Vector3::new(accel[0] as f32, accel[1] as f32, accel[2] as f32)
                    * accel_scale,
                temperature,
            };
            let _ = self.accel_queue.try_send(accel_sample);
        }

        Ok(())
    }
}
