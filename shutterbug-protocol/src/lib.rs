//! MJX Bugs 3H Accessory Port Protocol
//!
//! The Bugs 3H pushes short bursts of bytes out of its micro-USB port whenever
//! something happens on the transmitter or the drone. There is no start byte,
//! length or checksum: a burst ends when the line goes quiet.
//!
//! # Protocol Overview
//!
//! ```text
//!  bytes ─┬─┬─┬─┬─┬─┬─┬─┬─┬─┐            ┌─┬─┬─┬─ ...
//!         │ │ │ │ │ │ │ │ │ │  ≥ 10 ms   │ │ │ │
//!  ───────┴─┴─┴─┴─┴─┴─┴─┴─┴─┴────────────┴─┴─┴─┴───
//!         └──────── frame ───────┘ gap   └─ next frame
//! ```
//!
//! Each closed frame is matched against five known opcodes (see [`Opcode`])
//! using full, prefix and suffix comparison in a fixed priority order, which
//! tolerates a corrupted byte at either edge of the camera-button opcodes.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod accumulator;
pub mod baud;
pub mod classify;
pub mod frame;
pub mod matcher;
pub mod opcode;

pub use accumulator::{FrameAccumulator, OverflowPolicy, GAP_THRESHOLD_MS};
pub use baud::{BaudProfile, LinkQuality};
pub use classify::{classify, Classification};
pub use frame::{Frame, FrameError, FRAME_CAPACITY};
pub use matcher::MatchRule;
pub use opcode::Opcode;
