//! Shutterbug Hardware Abstraction Layer
//!
//! This crate defines the traits the decoder needs from a board: a serial
//! line to capture from and a millisecond clock.
//! Chip-specific crates implement them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (shutterbug-firmware)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  shutterbug-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌────────────────┐
//!             │ shutterbug-hal-│
//!             │    rp2040      │
//!             └────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartRx`] - Non-blocking serial receive
//! - [`clock::Clock`] - Monotonic millisecond time

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use uart::{UartConfig, UartRx};
