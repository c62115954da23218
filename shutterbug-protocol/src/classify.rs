//! Frame classification
//!
//! Rules are tried in a fixed order and the first match wins. The camera
//! button opcodes get exact matching first, then prefix and suffix fallbacks
//! so a single corrupted byte at either edge still decodes. Flight-state
//! opcodes only ever use prefix matching.

use crate::frame::Frame;
use crate::matcher::MatchRule;
use crate::opcode::Opcode;

/// Classification rules in priority order
pub const RULES: [(Opcode, MatchRule); 9] = [
    (Opcode::PhotoShort, MatchRule::Full),
    (Opcode::PhotoLong, MatchRule::Full),
    (Opcode::PhotoShort, MatchRule::Prefix),
    (Opcode::PhotoShort, MatchRule::Suffix),
    (Opcode::PhotoLong, MatchRule::Prefix),
    (Opcode::PhotoLong, MatchRule::Suffix),
    (Opcode::DroneIdle, MatchRule::Prefix),
    (Opcode::TransmitterOff, MatchRule::Prefix),
    (Opcode::DroneMotorsOn, MatchRule::Prefix),
];

/// Outcome of classifying one closed frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Classification {
    /// Frame matched a known opcode
    Matched {
        /// Opcode recognised
        opcode: Opcode,
        /// Rule that produced the match
        rule: MatchRule,
        /// Bytes of the frame, for the console dump
        frame: Frame,
    },
    /// No rule matched; carries the raw frame for tuning
    Unmatched(Frame),
}

impl Classification {
    /// Recognised opcode, if any
    pub fn opcode(&self) -> Option<Opcode> {
        match self {
            Classification::Matched { opcode, .. } => Some(*opcode),
            Classification::Unmatched(_) => None,
        }
    }

    /// Opcode and rule of a match
    pub fn matched_by(&self) -> Option<(Opcode, MatchRule)> {
        match self {
            Classification::Matched { opcode, rule, .. } => Some((*opcode, *rule)),
            Classification::Unmatched(_) => None,
        }
    }

    /// Bytes of the classified frame
    pub fn frame(&self) -> &Frame {
        match self {
            Classification::Matched { frame, .. } => frame,
            Classification::Unmatched(frame) => frame,
        }
    }

    /// Returns true if the frame matched an opcode
    pub fn is_matched(&self) -> bool {
        matches!(self, Classification::Matched { .. })
    }

    /// Handler name used in console output
    pub fn name(&self) -> &'static str {
        match self {
            Classification::Matched { opcode, .. } => opcode.name(),
            Classification::Unmatched(_) => "unmatched",
        }
    }
}

/// Classify a closed frame
pub fn classify(frame: &Frame) -> Classification {
    RULES
        .iter()
        .find(|(opcode, rule)| rule.matches(frame, opcode.pattern()))
        .map(|&(opcode, rule)| Classification::Matched {
            opcode,
            rule,
            frame: frame.clone(),
        })
        .unwrap_or_else(|| Classification::Unmatched(frame.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    use std::vec::Vec;

    fn frame(bytes: &[u8]) -> Frame {
        Frame::from_slice(bytes).unwrap()
    }

    fn concat(a: &[u8], b: &[u8]) -> Frame {
        let mut f = frame(a);
        for &byte in b {
            f.push(byte).unwrap();
        }
        f
    }

    fn matched(opcode: Opcode, rule: MatchRule) -> Option<(Opcode, MatchRule)> {
        Some((opcode, rule))
    }

    #[test]
    fn test_exact_photo_codes() {
        assert_eq!(
            classify(&frame(Opcode::PhotoShort.pattern())).matched_by(),
            matched(Opcode::PhotoShort, MatchRule::Full)
        );
        assert_eq!(
            classify(&frame(Opcode::PhotoLong.pattern())).matched_by(),
            matched(Opcode::PhotoLong, MatchRule::Full)
        );
    }

    #[test]
    fn test_photo_short_trailing_byte() {
        let f = frame(&[224, 28, 252, 0, 0, 28, 0, 224, 0, 28, 99]);
        assert_eq!(classify(&f).matched_by(), matched(Opcode::PhotoShort, MatchRule::Prefix));
    }

    #[test]
    fn test_photo_short_leading_byte() {
        let f = concat(&[99], Opcode::PhotoShort.pattern());
        assert_eq!(classify(&f).matched_by(), matched(Opcode::PhotoShort, MatchRule::Suffix));
    }

    #[test]
    fn test_photo_long_fallbacks() {
        let f = concat(Opcode::PhotoLong.pattern(), &[5]);
        assert_eq!(classify(&f).matched_by(), matched(Opcode::PhotoLong, MatchRule::Prefix));

        let f = concat(&[5], Opcode::PhotoLong.pattern());
        assert_eq!(classify(&f).matched_by(), matched(Opcode::PhotoLong, MatchRule::Suffix));
    }

    #[test]
    fn test_flight_state_codes() {
        let f = frame(&[224, 28, 252, 28, 224, 252, 0, 224, 28, 252]);
        assert_eq!(classify(&f).matched_by(), matched(Opcode::DroneIdle, MatchRule::Prefix));

        let f = frame(Opcode::TransmitterOff.pattern());
        assert_eq!(
            classify(&f).matched_by(),
            matched(Opcode::TransmitterOff, MatchRule::Prefix)
        );

        let f = frame(Opcode::DroneMotorsOn.pattern());
        assert_eq!(
            classify(&f).matched_by(),
            matched(Opcode::DroneMotorsOn, MatchRule::Prefix)
        );
    }

    #[test]
    fn test_flight_state_codes_have_no_suffix_fallback() {
        let f = concat(&[1], Opcode::DroneIdle.pattern());
        assert!(!classify(&f).is_matched());
    }

    #[test]
    fn test_photo_short_suffix_beats_photo_long_prefix() {
        let f = concat(Opcode::PhotoLong.pattern(), Opcode::PhotoShort.pattern());
        assert_eq!(classify(&f).matched_by(), matched(Opcode::PhotoShort, MatchRule::Suffix));
    }

    #[test]
    fn test_photo_short_prefix_beats_photo_long_suffix() {
        let f = concat(Opcode::PhotoShort.pattern(), Opcode::PhotoLong.pattern());
        assert_eq!(classify(&f).matched_by(), matched(Opcode::PhotoShort, MatchRule::Prefix));
    }

    #[test]
    fn test_short_frame_is_unmatched() {
        let f = frame(&[224, 28, 252, 28, 224, 252, 0, 252]);
        assert_eq!(classify(&f), Classification::Unmatched(f.clone()));

        let empty = Frame::new();
        assert_eq!(classify(&empty), Classification::Unmatched(Frame::new()));
    }

    #[test]
    fn test_single_corrupt_middle_byte_is_unmatched() {
        let mut bytes: Vec<u8> = Opcode::PhotoShort.pattern().to_vec();
        bytes[5] ^= 0xFF;
        let f = frame(&bytes);
        assert_eq!(classify(&f).opcode(), None);
    }

    #[test]
    fn test_matched_keeps_frame_bytes() {
        let f = concat(Opcode::TransmitterOff.pattern(), &[3, 4]);
        let result = classify(&f);
        assert_eq!(result.opcode(), Some(Opcode::TransmitterOff));
        assert_eq!(result.frame().as_slice(), f.as_slice());
    }

    #[test]
    fn test_classification_name() {
        let f = frame(Opcode::PhotoLong.pattern());
        assert_eq!(classify(&f).name(), "photo_long");
        assert_eq!(classify(&frame(&[1, 2, 3])).name(), "unmatched");
    }

    proptest! {
        #[test]
        fn prop_unknown_frames_unmatched(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            // Every pattern starts with 224 and the photo codes end with 28
            prop_assume!(bytes.first() != Some(&224));
            prop_assume!(bytes.last() != Some(&28));

            let f = frame(&bytes);
            match classify(&f) {
                Classification::Unmatched(raw) => prop_assert_eq!(raw.as_slice(), bytes.as_slice()),
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }

        #[test]
        fn prop_photo_short_with_trailing_noise(tail in proptest::collection::vec(any::<u8>(), 1..32)) {
            let f = concat(Opcode::PhotoShort.pattern(), &tail);
            prop_assert_eq!(
                classify(&f).matched_by(),
                matched(Opcode::PhotoShort, MatchRule::Prefix)
            );
        }

        #[test]
        fn prop_photo_long_with_leading_noise(
            first in any::<u8>().prop_filter("not a pattern start", |b| *b != 224),
            rest in proptest::collection::vec(any::<u8>(), 0..32),
        ) {
            let mut head = Vec::with_capacity(rest.len() + 1);
            head.push(first);
            head.extend_from_slice(&rest);

            let f = concat(&head, Opcode::PhotoLong.pattern());
            prop_assert_eq!(
                classify(&f).matched_by(),
                matched(Opcode::PhotoLong, MatchRule::Suffix)
            );
        }

        #[test]
        fn prop_classify_is_total(bytes in proptest::collection::vec(any::<u8>(), 0..=crate::FRAME_CAPACITY)) {
            let f = frame(&bytes);
            let result = classify(&f);
            prop_assert_eq!(result.frame(), &f);
        }
    }
}
