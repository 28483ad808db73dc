//! DHT11 Sensor Driver for Embedded Rust
//!
//! This crate provides a platform-agnostic driver for the DHT11 temperature
//! and humidity sensor, built on top of the [`embedded-hal`] traits.
//!
//! The DHT11 speaks a single-wire protocol where every bit is encoded in the
//! width of a high pulse relative to the fixed low pulse that precedes it.
//! The driver issues the start sequence, captures all 80 pulses inside a
//! critical section (an interrupt in the middle of a pulse would skew the
//! counts), decodes them into a 5-byte frame and validates the checksum.
//! Results are cached so the sensor's minimum two second re-read interval is
//! respected transparently.
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - Designed for `no_std` environments
//! - Pulse timing via relative cycle counts, self-adjusting to CPU speed
//! - Optional logging support via `defmt`
//!
//! # Dependencies
//! This driver depends on the following `embedded-hal` traits:
//! - [`InputPin`] and [`OutputPin`] for GPIO access
//! - [`DelayNs`] for accurate timing
//!
//! plus a crate-local [`MonotonicClock`] millisecond timestamp source for the
//! minimum re-read interval gate.
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` for logging support and traces the
//!   raw frame bytes and checksum comparison of every decode
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod convert;
pub mod dht11;
pub mod error;
pub mod notify;

pub use clock::MonotonicClock;
pub use dht11::{Dht11, Frame, Reading};
pub use error::DhtError;
pub use notify::{Event, Notification};
