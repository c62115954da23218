//! Decoder driver
//!
//! Owns the frame accumulator, the application's handler and the counters.
//! The caller feeds it bytes and ticks from a single loop; nothing here
//! blocks or needs locking.

use shutterbug_hal::{Clock, UartRx};
use shutterbug_protocol::{Classification, FrameAccumulator, FrameError};

use crate::config::FramingConfig;
use crate::stats::DecoderStats;
use crate::traits::{dispatch, EventHandler};

/// Upper bound on bytes drained by one [`Decoder::poll`] call
pub const MAX_BYTES_PER_POLL: usize = 64;

/// Accessory port decoder
#[derive(Debug)]
pub struct Decoder<H> {
    accumulator: FrameAccumulator,
    handler: H,
    stats: DecoderStats,
}

impl<H: EventHandler> Decoder<H> {
    /// Create a decoder with default framing
    pub fn new(handler: H) -> Self {
        Self::with_config(&FramingConfig::default(), handler)
    }

    /// Create a decoder with the given framing settings
    pub fn with_config(framing: &FramingConfig, handler: H) -> Self {
        Self {
            accumulator: framing.accumulator(),
            handler,
            stats: DecoderStats::default(),
        }
    }

    /// Feed one received byte
    ///
    /// Overflow is already contained by the accumulator's policy; the error
    /// is returned so the caller can log it.
    pub fn on_byte(&mut self, byte: u8, now_ms: u32) -> Result<(), FrameError> {
        self.stats.bytes_received = self.stats.bytes_received.saturating_add(1);

        let result = self.accumulator.on_byte_received(byte, now_ms);
        if result.is_err() {
            self.stats.bytes_refused = self.stats.bytes_refused.saturating_add(1);
        }
        result
    }

    /// Check for end of frame and dispatch it to the handler
    pub fn on_tick(&mut self, now_ms: u32) -> Option<Classification> {
        let was_discarding = self.accumulator.is_discarding();

        match self.accumulator.on_tick(now_ms) {
            Some(classification) => {
                self.stats.record(&classification);
                dispatch(&mut self.handler, &classification);
                Some(classification)
            }
            None => {
                if was_discarding && !self.accumulator.is_discarding() {
                    self.stats.frames_discarded = self.stats.frames_discarded.saturating_add(1);
                    self.handler.discarded();
                }
                None
            }
        }
    }

    /// Run one iteration of the polling loop
    ///
    /// Drains the bytes already waiting on `rx` (at most
    /// [`MAX_BYTES_PER_POLL`]), stamping each with the clock, then runs the
    /// gap check. Must be called more often than the gap threshold.
    pub fn poll<R, C>(
        &mut self,
        rx: &mut R,
        clock: &C,
    ) -> Result<Option<Classification>, R::Error>
    where
        R: UartRx,
        C: Clock,
    {
        for _ in 0..MAX_BYTES_PER_POLL {
            match rx.try_read_byte()? {
                Some(byte) => {
                    // Counted in stats; the accumulator policy handles the rest
                    let _ = self.on_byte(byte, clock.now_ms());
                }
                None => break,
            }
        }

        Ok(self.on_tick(clock.now_ms()))
    }

    /// Counters since creation
    pub fn stats(&self) -> &DecoderStats {
        &self.stats
    }

    /// Underlying accumulator
    pub fn accumulator(&self) -> &FrameAccumulator {
        &self.accumulator
    }

    /// The application's handler
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Mutable access to the handler
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }
}
