use core::fmt::Write;

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin, PinState},
};
use heapless::String;

use crate::clock::MonotonicClock;
use crate::convert;
use crate::error::DhtError;

/// Minimum gap between physical sensor reads, in milliseconds.
///
/// The DHT11 needs time to recover between conversions; reads issued
/// sooner than this are served from the cached result.
const MIN_READ_INTERVAL_MS: u32 = 2000;

/// Settle time with the line released before a read, in milliseconds.
const IDLE_SETTLE_MS: u32 = 250;

/// Duration of the host start signal (line held low), in milliseconds.
const START_LOW_MS: u32 = 20;

/// Line driven high after the start signal, in microseconds.
const START_HIGH_US: u32 = 40;

/// Wait for the sensor to take over the line, in microseconds.
const SENSOR_TAKEOVER_US: u32 = 10;

/// Failed attempts tolerated by `read`/`read_all` before giving up.
const MAX_ATTEMPTS: u32 = 10;

/// Delay between read attempts, in milliseconds.
const RETRY_DELAY_MS: u32 = 100;

/// Raw 40-bit frame received from the sensor.
///
/// Byte layout: humidity integral, humidity fraction, temperature
/// integral, temperature fraction, checksum. The fraction bytes are
/// reserved on this sensor variant: they are transmitted and covered by
/// the checksum but always read as zero.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    bytes: [u8; 5],
}

impl Frame {
    /// Integral relative humidity in percent (byte 0).
    pub fn humidity_integral(&self) -> u8 {
        self.bytes[0]
    }

    /// Fractional humidity (byte 1). Reserved, unused on this variant.
    pub fn humidity_fraction(&self) -> u8 {
        self.bytes[1]
    }

    /// Integral temperature in degrees Celsius (byte 2).
    pub fn temperature_integral(&self) -> u8 {
        self.bytes[2]
    }

    /// Fractional temperature (byte 3). Reserved, unused on this variant.
    pub fn temperature_fraction(&self) -> u8 {
        self.bytes[3]
    }

    /// Checksum byte as transmitted (byte 4).
    pub fn checksum(&self) -> u8 {
        self.bytes[4]
    }

    /// Whether the transmitted checksum matches the payload bytes.
    pub fn checksum_ok(&self) -> bool {
        self.checksum() == self.computed_checksum()
    }

    fn computed_checksum(&self) -> u8 {
        self.bytes[..4]
            .iter()
            .fold(0u8, |sum, v| sum.wrapping_add(*v))
    }

    fn clear(&mut self) {
        self.bytes = [0; 5];
    }

    /// Interprets 40 low/high pulse count pairs as bits, MSB first.
    ///
    /// A high count greater than its paired low count reads as a one;
    /// less than or equal (a weird case) reads as a zero. Returns `None`
    /// if any count is the timeout sentinel.
    fn decode(cycles: &[u32; 80]) -> Option<Self> {
        let mut bytes = [0u8; 5];

        for i in 0..40 {
            let low = cycles[2 * i];
            let high = cycles[2 * i + 1];
            if low == 0 || high == 0 {
                return None;
            }
            bytes[i / 8] <<= 1;
            if high > low {
                bytes[i / 8] |= 1;
            }
        }

        Some(Frame { bytes })
    }
}

/// Reading returned by the DHT11 sensor.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub relative_humidity: f32,
}

/// Driver for the DHT11 temperature and humidity sensor.
pub struct Dht11<PIN, DELAY, CLOCK> {
    pin: PIN,
    delay: DELAY,
    clock: CLOCK,
    max_cycles: u32,
    frame: Frame,
    last_read_ms: u32,
    last_result: bool,
}

impl<PIN, DELAY, CLOCK, E> Dht11<PIN, DELAY, CLOCK>
where
    PIN: InputPin<Error = E> + OutputPin<Error = E>,
    DELAY: DelayNs,
    CLOCK: MonotonicClock,
{
    /// Creates a new instance of the DHT11 driver.
    ///
    /// # Arguments
    ///
    /// * `pin` - The GPIO pin connected to the DHT11 data line. Must support
    ///   both input and output; the line needs an external or internal
    ///   pull-up so it idles high when released.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    /// * `clock` - Millisecond timestamp source for the re-read interval gate.
    /// * `cycles_per_ms` - Poll-loop iterations the target CPU gets through
    ///   in one millisecond; bounds every pulse wait. Pulse decoding itself
    ///   only compares counts against each other, so the calibration does
    ///   not have to be exact.
    pub fn new(pin: PIN, delay: DELAY, clock: CLOCK, cycles_per_ms: u32) -> Self {
        #[cfg(feature = "defmt")]
        defmt::debug!("max cycles per pulse: {=u32}", cycles_per_ms);

        Dht11 {
            pin,
            delay,
            clock,
            max_cycles: cycles_per_ms,
            frame: Frame::default(),
            // Biased so now - last_read_ms is already past the minimum
            // interval on the very first call. The assignment wraps, but so
            // does the subtraction.
            last_read_ms: 0u32.wrapping_sub(MIN_READ_INTERVAL_MS),
            last_result: false,
        }
    }

    /// Reads the sensor and formats the temperature in degrees Fahrenheit.
    ///
    /// Failed attempts are retried with a short delay in between; once the
    /// retry budget is exhausted the read is abandoned with
    /// [`DhtError::ReadExhausted`].
    pub fn read(&mut self) -> Result<String<32>, DhtError<E>> {
        self.read_checked()?;

        let mut out = String::new();
        let _ = write!(out, "{:.1}", self.temperature_fahrenheit());
        Ok(out)
    }

    /// Reads the sensor and formats both temperature and humidity.
    ///
    /// Same retry behavior as [`read`](Self::read).
    pub fn read_all(&mut self) -> Result<String<32>, DhtError<E>> {
        self.read_checked()?;

        let mut out = String::new();
        let _ = write!(
            out,
            "Temp: {:.1}  Humidity: {:.1}",
            self.temperature_fahrenheit(),
            self.humidity()
        );
        Ok(out)
    }

    /// Runs read attempts until one succeeds or the retry budget runs out.
    fn read_checked(&mut self) -> Result<(), DhtError<E>> {
        let mut failures = 0;
        while !self.try_read()? {
            failures += 1;
            self.delay.delay_ms(RETRY_DELAY_MS);
            if failures > MAX_ATTEMPTS {
                return Err(DhtError::ReadExhausted);
            }
        }
        Ok(())
    }

    /// Performs one gated read attempt and returns the attempt outcome.
    ///
    /// Within the minimum re-read interval of the previous attempt the cached
    /// outcome is returned and the line is left untouched. `Ok(false)`
    /// covers pulse timeouts and checksum mismatches; `Err` is reserved for
    /// GPIO faults.
    pub fn try_read(&mut self) -> Result<bool, DhtError<E>> {
        let now = self.clock.now_ms();
        if now.wrapping_sub(self.last_read_ms) < MIN_READ_INTERVAL_MS {
            return Ok(self.last_result);
        }
        self.last_read_ms = now;
        self.frame.clear();

        // Release the line and let the pull-up raise it so the sensor sees
        // a clean falling edge on the start signal.
        self.pin.set_high()?;
        self.delay.delay_ms(IDLE_SETTLE_MS);

        // Host start signal: hold the line low.
        self.pin.set_low()?;
        self.delay.delay_ms(START_LOW_MS);

        let mut cycles = [0u32; 80];

        // The rest of the exchange is timing critical; an interrupt in the
        // middle of a pulse would skew the counts. The critical section is
        // released on every exit path, early failure returns included.
        let acked = critical_section::with(|_| -> Result<bool, DhtError<E>> {
            // End the start signal, then hand the line back to the sensor.
            self.pin.set_high()?;
            self.delay.delay_us(START_HIGH_US);
            self.delay.delay_us(SENSOR_TAKEOVER_US);

            // Sensor acknowledges with ~80us low followed by ~80us high.
            if self.expect_pulse(PinState::Low)? == 0 {
                #[cfg(feature = "defmt")]
                defmt::debug!("timeout waiting for ack low pulse");
                return Ok(false);
            }
            if self.expect_pulse(PinState::High)? == 0 {
                #[cfg(feature = "defmt")]
                defmt::debug!("timeout waiting for ack high pulse");
                return Ok(false);
            }

            // 40 bits, each a fixed-width low pulse followed by a variable
            // width high pulse. Only raw counts are collected here; they are
            // interpreted after interrupts are restored.
            for pair in cycles.chunks_exact_mut(2) {
                pair[0] = self.expect_pulse(PinState::Low)?;
                pair[1] = self.expect_pulse(PinState::High)?;
            }

            Ok(true)
        })?;

        if !acked {
            self.last_result = false;
            return Ok(self.last_result);
        }

        let Some(frame) = Frame::decode(&cycles) else {
            #[cfg(feature = "defmt")]
            defmt::debug!("timeout waiting for pulse");
            self.last_result = false;
            return Ok(self.last_result);
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("received {} =? {=u8:#x}", frame, frame.computed_checksum());

        self.frame = frame;
        if frame.checksum_ok() {
            self.last_result = true;
        } else {
            #[cfg(feature = "defmt")]
            defmt::debug!("checksum failure");
            self.last_result = false;
        }
        Ok(self.last_result)
    }

    /// Temperature of the last successful read, in degrees Celsius.
    pub fn temperature(&self) -> f32 {
        self.frame.temperature_integral() as f32
    }

    /// Temperature of the last successful read, in degrees Fahrenheit.
    pub fn temperature_fahrenheit(&self) -> f32 {
        convert::celsius_to_fahrenheit(self.temperature())
    }

    /// Relative humidity of the last successful read, in percent.
    pub fn humidity(&self) -> f32 {
        self.frame.humidity_integral() as f32
    }

    /// Temperature and humidity of the last successful read.
    pub fn reading(&self) -> Reading {
        Reading {
            temperature: self.temperature(),
            relative_humidity: self.humidity(),
        }
    }

    /// Raw frame bytes captured by the last read attempt.
    pub fn raw_frame(&self) -> Frame {
        self.frame
    }

    /// Counts poll-loop iterations while the line sits at `level`.
    ///
    /// The count is a relative timing proxy, not an absolute duration; bit
    /// decoding only ever compares two counts from the same capture.
    /// Returns zero when `max_cycles` iterations elapse without a
    /// transition, reserving zero as the timeout sentinel (a real pulse
    /// always spans at least a few iterations).
    fn expect_pulse(&mut self, level: PinState) -> Result<u32, DhtError<E>> {
        let mut count: u32 = 0;
        loop {
            let at_level = match level {
                PinState::High => self.pin.is_high()?,
                PinState::Low => self.pin.is_low()?,
            };
            if !at_level {
                return Ok(count);
            }
            count += 1;
            if count >= self.max_cycles {
                return Ok(0);
            }
        }
    }
}
