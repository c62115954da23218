//! Configuration types
//!
//! Decoder settings parsed from the `shutterbug.toml` subset.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
