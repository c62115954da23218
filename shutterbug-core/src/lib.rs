//! Board-agnostic decoder logic
//!
//! This crate wraps the protocol classifier with everything that does not
//! depend on a specific chip:
//!
//! - Configuration types and the `shutterbug.toml` parser
//! - Event handler trait and dispatch
//! - Decoder driver (accumulator + handler + statistics)
//! - Console report formatting

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod decoder;
pub mod report;
pub mod stats;
pub mod traits;

pub use decoder::Decoder;
pub use stats::DecoderStats;
pub use traits::EventHandler;
