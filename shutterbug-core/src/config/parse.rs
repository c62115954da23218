//! Minimal TOML parser for decoder configuration
//!
//! Handles only the subset `shutterbug.toml` uses and needs no allocator.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = value` pairs (string, integer, boolean)
//! - Integers with `_` separators
//! - Comments (# ...)
//!
//! NOT supported:
//! - Dotted keys or nested tables
//! - Arrays and inline tables
//! - Multi-line or escaped strings

use shutterbug_protocol::OverflowPolicy;

use super::types::DecoderConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed section header
    InvalidSection,
    /// Section name not recognised
    UnknownSection,
    /// Key not valid in the current section
    UnknownKey,
    /// Line is not a header and has no `=`
    MissingValue,
    /// Value has the wrong type or is out of range
    InvalidValue,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Capture,
    Console,
    Framing,
}

/// Parse TOML configuration into a [`DecoderConfig`]
///
/// Keys that are absent keep their default values.
pub fn parse_config(input: &str) -> Result<DecoderConfig, ParseError> {
    let mut config = DecoderConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') || line.len() < 2 {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(line[1..line.len() - 1].trim())?;
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::MissingValue)?;
        let key = key.trim();
        let value = value.trim();

        match section {
            Section::Root => return Err(ParseError::UnknownKey),
            Section::Capture => match key {
                "baud" => config.capture.baudrate = parse_u32(value)?,
                _ => return Err(ParseError::UnknownKey),
            },
            Section::Console => match key {
                "enabled" => config.console.enabled = parse_bool(value)?,
                "baud" => config.console.baudrate = parse_u32(value)?,
                _ => return Err(ParseError::UnknownKey),
            },
            Section::Framing => match key {
                "gap_ms" => config.framing.gap_ms = parse_u32(value)?,
                "tick_ms" => config.framing.tick_ms = parse_u32(value)?,
                "overflow" => config.framing.overflow = parse_overflow(value)?,
                _ => return Err(ParseError::UnknownKey),
            },
        }
    }

    Ok(config)
}

fn parse_section_header(name: &str) -> Result<Section, ParseError> {
    if name.is_empty() {
        return Err(ParseError::InvalidSection);
    }
    match name {
        "capture" => Ok(Section::Capture),
        "console" => Ok(Section::Console),
        "framing" => Ok(Section::Framing),
        _ => Err(ParseError::UnknownSection),
    }
}

/// Drop a trailing `#` comment that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_u32(value: &str) -> Result<u32, ParseError> {
    if value.is_empty() || value.starts_with('_') || value.ends_with('_') {
        return Err(ParseError::InvalidValue);
    }

    let mut result: u32 = 0;
    for b in value.bytes() {
        match b {
            b'_' => continue,
            b'0'..=b'9' => {
                result = result
                    .checked_mul(10)
                    .and_then(|r| r.checked_add((b - b'0') as u32))
                    .ok_or(ParseError::InvalidValue)?;
            }
            _ => return Err(ParseError::InvalidValue),
        }
    }
    Ok(result)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_string(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}

fn parse_overflow(value: &str) -> Result<OverflowPolicy, ParseError> {
    match parse_string(value)? {
        "truncate" => Ok(OverflowPolicy::Truncate),
        "discard" => Ok(OverflowPolicy::Discard),
        _ => Err(ParseError::InvalidValue),
    }
}
