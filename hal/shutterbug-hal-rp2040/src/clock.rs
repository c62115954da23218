//! Millisecond clock backed by the embassy time driver

use embassy_time::Instant;
use shutterbug_hal::Clock;

/// Clock reading the RP2040 timer through embassy-time
///
/// Milliseconds are truncated to `u32`, so the value wraps after ~49 days.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl EmbassyClock {
    /// Create a clock
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
