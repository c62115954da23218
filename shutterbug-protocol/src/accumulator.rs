//! Gap-delimited frame accumulator
//!
//! Bytes are collected until the line has been silent for
//! [`GAP_THRESHOLD_MS`]; the next tick after that closes the frame,
//! classifies it and starts over.
//!
//! ```text
//!          on_byte_received
//!        ┌──────────────────┐
//!        ▼                  │
//!   ┌─────────┐  gap   ┌────┴────┐
//!   │ Filling │───────▶│  Idle   │
//!   └─────────┘on_tick └─────────┘
//! ```

use crate::classify::{classify, Classification};
use crate::frame::{Frame, FrameError};

/// Minimum line silence that closes a frame (milliseconds)
pub const GAP_THRESHOLD_MS: u32 = 10;

/// What happens to a frame that outgrows its buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverflowPolicy {
    /// Keep the bytes that fit and classify them at the next gap
    #[default]
    Truncate,
    /// Drop the whole frame and ignore the line until the next gap
    Discard,
}

/// Accumulator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccumulatorState {
    /// Bytes received since the last gap
    Filling,
    /// Gap processed, waiting for the next byte
    Idle,
}

/// Frame accumulator and classifier
#[derive(Debug, Clone)]
pub struct FrameAccumulator {
    frame: Frame,
    last_byte_ms: u32,
    /// Set once the current silence has been processed
    gap_handled: bool,
    /// Current frame overflowed under [`OverflowPolicy::Discard`]
    discarding: bool,
    gap_ms: u32,
    policy: OverflowPolicy,
}

impl Default for FrameAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameAccumulator {
    /// Create an accumulator with the default gap and overflow policy
    pub fn new() -> Self {
        Self::with_config(GAP_THRESHOLD_MS, OverflowPolicy::default())
    }

    /// Create an accumulator with a custom gap threshold and overflow policy
    ///
    /// Starts idle, so nothing is classified before the first byte arrives.
    pub fn with_config(gap_ms: u32, policy: OverflowPolicy) -> Self {
        Self {
            frame: Frame::new(),
            last_byte_ms: 0,
            gap_handled: true,
            discarding: false,
            gap_ms,
            policy,
        }
    }

    /// Record a byte received at `now_ms`
    ///
    /// The timestamp and gap flag are updated even when the byte is refused,
    /// since the line was not silent.
    pub fn on_byte_received(&mut self, byte: u8, now_ms: u32) -> Result<(), FrameError> {
        self.last_byte_ms = now_ms;
        self.gap_handled = false;

        if self.discarding {
            return Err(FrameError::BufferOverflow);
        }

        match self.frame.push(byte) {
            Ok(()) => Ok(()),
            Err(e) => {
                if self.policy == OverflowPolicy::Discard {
                    self.frame.clear();
                    self.discarding = true;
                }
                Err(e)
            }
        }
    }

    /// Check for end of frame at `now_ms`
    ///
    /// Returns the classification of the frame closed by this tick, or `None`
    /// if the line is still busy, the gap was already handled, or the frame
    /// was discarded after an overflow.
    pub fn on_tick(&mut self, now_ms: u32) -> Option<Classification> {
        if self.gap_handled || now_ms.wrapping_sub(self.last_byte_ms) < self.gap_ms {
            return None;
        }

        self.gap_handled = true;

        let result = if self.discarding {
            None
        } else {
            Some(classify(&self.frame))
        };

        self.frame.clear();
        self.discarding = false;
        result
    }

    /// Current state
    pub fn state(&self) -> AccumulatorState {
        if self.gap_handled {
            AccumulatorState::Idle
        } else {
            AccumulatorState::Filling
        }
    }

    /// Bytes collected so far in the open frame
    pub fn pending(&self) -> &[u8] {
        &self.frame
    }

    /// Returns true if the open frame is being dropped after an overflow
    pub fn is_discarding(&self) -> bool {
        self.discarding
    }

    /// Gap threshold in milliseconds
    pub fn gap_ms(&self) -> u32 {
        self.gap_ms
    }

    /// Overflow policy
    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FRAME_CAPACITY;
    use crate::matcher::MatchRule;
    use crate::opcode::Opcode;
    use proptest::prelude::*;

    fn feed(acc: &mut FrameAccumulator, bytes: &[u8], start_ms: u32) -> u32 {
        let mut now = start_ms;
        for &byte in bytes {
            acc.on_byte_received(byte, now).unwrap();
            now += 1;
        }
        now
    }

    #[test]
    fn test_starts_idle() {
        let mut acc = FrameAccumulator::new();
        assert_eq!(acc.state(), AccumulatorState::Idle);
        assert_eq!(acc.on_tick(1000), None);
    }

    #[test]
    fn test_frame_closes_after_gap() {
        let mut acc = FrameAccumulator::new();
        let end = feed(&mut acc, Opcode::PhotoShort.pattern(), 100);
        let last = end - 1;

        assert_eq!(acc.state(), AccumulatorState::Filling);
        assert_eq!(acc.on_tick(last + GAP_THRESHOLD_MS - 1), None);
        assert_eq!(
            acc.on_tick(last + GAP_THRESHOLD_MS).and_then(|c| c.matched_by()),
            Some((Opcode::PhotoShort, MatchRule::Full))
        );
        assert_eq!(acc.state(), AccumulatorState::Idle);
        assert!(acc.pending().is_empty());
    }

    #[test]
    fn test_repeated_ticks_do_not_refire() {
        let mut acc = FrameAccumulator::new();
        feed(&mut acc, Opcode::DroneIdle.pattern(), 0);

        assert!(acc.on_tick(50).is_some());
        for t in 51..200 {
            assert_eq!(acc.on_tick(t), None);
        }
    }

    #[test]
    fn test_next_byte_starts_fresh_frame() {
        let mut acc = FrameAccumulator::new();
        feed(&mut acc, &[1, 2, 3], 0);
        assert!(matches!(acc.on_tick(20), Some(Classification::Unmatched(_))));

        acc.on_byte_received(9, 30).unwrap();
        assert_eq!(acc.pending(), &[9]);
        match acc.on_tick(40) {
            Some(Classification::Unmatched(raw)) => assert_eq!(raw.as_slice(), &[9]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unmatched_carries_bytes_and_resets() {
        let mut acc = FrameAccumulator::new();
        let bytes = [5, 6, 7, 8, 9];
        feed(&mut acc, &bytes, 0);

        match acc.on_tick(100) {
            Some(Classification::Unmatched(raw)) => assert_eq!(raw.as_slice(), &bytes),
            other => panic!("unexpected {:?}", other),
        }
        assert!(acc.pending().is_empty());
    }

    #[test]
    fn test_bytes_inside_gap_extend_frame() {
        let mut acc = FrameAccumulator::new();
        let pattern = Opcode::PhotoLong.pattern();

        acc.on_byte_received(pattern[0], 0).unwrap();
        assert_eq!(acc.on_tick(5), None);
        for (i, &byte) in pattern[1..].iter().enumerate() {
            acc.on_byte_received(byte, 9 + i as u32).unwrap();
        }

        assert_eq!(acc.on_tick(20), None);
        assert_eq!(
            acc.on_tick(27).and_then(|c| c.opcode()),
            Some(Opcode::PhotoLong)
        );
    }

    #[test]
    fn test_timestamp_wraparound() {
        let mut acc = FrameAccumulator::new();
        let start = u32::MAX - 4;
        for (i, &byte) in Opcode::TransmitterOff.pattern().iter().enumerate() {
            acc.on_byte_received(byte, start.wrapping_add(i as u32)).unwrap();
        }
        // Last byte at u32::MAX - 4 + 8 = 3 (wrapped)
        assert_eq!(acc.on_tick(12), None);
        assert_eq!(
            acc.on_tick(13).and_then(|c| c.opcode()),
            Some(Opcode::TransmitterOff)
        );
    }

    #[test]
    fn test_overflow_truncate() {
        let mut acc = FrameAccumulator::with_config(GAP_THRESHOLD_MS, OverflowPolicy::Truncate);
        for _ in 0..FRAME_CAPACITY {
            acc.on_byte_received(0x55, 0).unwrap();
        }
        assert_eq!(acc.on_byte_received(0x55, 1), Err(FrameError::BufferOverflow));
        assert_eq!(acc.pending().len(), FRAME_CAPACITY);

        match acc.on_tick(11) {
            Some(Classification::Unmatched(raw)) => assert_eq!(raw.len(), FRAME_CAPACITY),
            other => panic!("unexpected {:?}", other),
        }
        assert!(acc.pending().is_empty());
    }

    #[test]
    fn test_overflow_truncate_keeps_matching_prefix() {
        let mut acc = FrameAccumulator::new();
        feed(&mut acc, Opcode::PhotoShort.pattern(), 0);
        for _ in Opcode::PhotoShort.pattern().len()..FRAME_CAPACITY + 3 {
            let _ = acc.on_byte_received(0, 10);
        }

        assert_eq!(
            acc.on_tick(20).and_then(|c| c.matched_by()),
            Some((Opcode::PhotoShort, MatchRule::Prefix))
        );
    }

    #[test]
    fn test_refused_bytes_keep_line_busy() {
        let mut acc = FrameAccumulator::new();
        for &byte in Opcode::PhotoLong.pattern() {
            acc.on_byte_received(byte, 10).unwrap();
        }
        for _ in Opcode::PhotoLong.pattern().len()..FRAME_CAPACITY {
            acc.on_byte_received(0, 10).unwrap();
        }
        assert_eq!(acc.on_byte_received(0, 15), Err(FrameError::BufferOverflow));
        assert_eq!(acc.on_byte_received(0, 15), Err(FrameError::BufferOverflow));
        assert_eq!(acc.state(), AccumulatorState::Filling);

        // Silence is measured from the last refused byte, not the last kept one
        assert_eq!(acc.on_tick(20), None);
        assert_eq!(acc.on_tick(24), None);
        assert_eq!(
            acc.on_tick(25).and_then(|c| c.matched_by()),
            Some((Opcode::PhotoLong, MatchRule::Prefix))
        );
    }

    #[test]
    fn test_refused_bytes_keep_discarded_frame_open() {
        let mut acc = FrameAccumulator::with_config(GAP_THRESHOLD_MS, OverflowPolicy::Discard);
        for _ in 0..=FRAME_CAPACITY {
            let _ = acc.on_byte_received(0x55, 0);
        }
        assert!(acc.is_discarding());
        assert_eq!(acc.on_byte_received(0x55, 15), Err(FrameError::BufferOverflow));

        assert_eq!(acc.on_tick(20), None);
        assert!(acc.is_discarding());
        assert_eq!(acc.on_tick(25), None);
        assert!(!acc.is_discarding());
        assert_eq!(acc.state(), AccumulatorState::Idle);
    }

    #[test]
    fn test_overflow_discard() {
        let mut acc = FrameAccumulator::with_config(GAP_THRESHOLD_MS, OverflowPolicy::Discard);
        for _ in 0..FRAME_CAPACITY {
            acc.on_byte_received(0x55, 0).unwrap();
        }
        assert_eq!(acc.on_byte_received(0x55, 1), Err(FrameError::BufferOverflow));
        assert!(acc.is_discarding());
        assert!(acc.pending().is_empty());

        // Rest of the burst is refused too
        assert_eq!(acc.on_byte_received(0x01, 2), Err(FrameError::BufferOverflow));

        assert_eq!(acc.on_tick(12), None);
        assert_eq!(acc.state(), AccumulatorState::Idle);
        assert!(!acc.is_discarding());

        // Next burst decodes normally
        feed(&mut acc, Opcode::DroneMotorsOn.pattern(), 100);
        assert_eq!(
            acc.on_tick(200).and_then(|c| c.opcode()),
            Some(Opcode::DroneMotorsOn)
        );
    }

    #[test]
    fn test_custom_gap() {
        let mut acc = FrameAccumulator::with_config(3, OverflowPolicy::Truncate);
        acc.on_byte_received(1, 0).unwrap();
        assert_eq!(acc.on_tick(2), None);
        assert!(acc.on_tick(3).is_some());
        assert_eq!(acc.gap_ms(), 3);
    }

    proptest! {
        #[test]
        fn prop_one_classification_per_burst(
            bursts in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 1..20), 1..10)
        ) {
            let mut acc = FrameAccumulator::new();
            let mut now = 0u32;
            let mut emitted = 0usize;

            for burst in &bursts {
                for &byte in burst {
                    acc.on_byte_received(byte, now).unwrap();
                    prop_assert!(acc.on_tick(now).is_none());
                    now += 1;
                }
                // Tick every millisecond through a long silence
                for _ in 0..(GAP_THRESHOLD_MS * 3) {
                    if acc.on_tick(now).is_some() {
                        emitted += 1;
                    }
                    now += 1;
                }
                prop_assert!(acc.pending().is_empty());
            }

            prop_assert_eq!(emitted, bursts.len());
        }
    }
}
