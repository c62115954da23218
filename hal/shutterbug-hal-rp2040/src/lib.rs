//! RP2040-specific HAL for the accessory port decoder
//!
//! This crate provides RP2040 implementations of the shared
//! `shutterbug-hal` traits:
//!
//! - Capture receiver over a buffered UART (implements `shutterbug_hal::UartRx`)
//! - Async console transmitter over a buffered UART
//! - UART configuration and error mapping
//! - Millisecond clock backed by `embassy-time` (implements `shutterbug_hal::Clock`)

#![no_std]

pub mod clock;
pub mod uart;

// Re-export shared traits from shutterbug-hal for convenience
pub use shutterbug_hal::{Clock, UartConfig, UartRx};
