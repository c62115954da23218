//! Frame-to-pattern comparison rules

/// How a frame was compared against a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatchRule {
    /// Same length, every byte equal
    Full,
    /// Frame starts with the pattern
    Prefix,
    /// Frame ends with the pattern
    Suffix,
}

impl MatchRule {
    /// Apply this rule to a frame
    pub fn matches(self, frame: &[u8], pattern: &[u8]) -> bool {
        match self {
            MatchRule::Full => match_full(frame, pattern),
            MatchRule::Prefix => match_prefix(frame, pattern),
            MatchRule::Suffix => match_suffix(frame, pattern),
        }
    }
}

/// Frame and pattern are identical
pub fn match_full(frame: &[u8], pattern: &[u8]) -> bool {
    frame == pattern
}

/// The first `pattern.len()` bytes of the frame equal the pattern
pub fn match_prefix(frame: &[u8], pattern: &[u8]) -> bool {
    pattern.len() <= frame.len() && frame[..pattern.len()] == *pattern
}

/// The last `pattern.len()` bytes of the frame equal the pattern
///
/// Compared tail to tail. Bench captures indexed the pattern by the frame's
/// length, which only agrees with this when both lengths are equal.
pub fn match_suffix(frame: &[u8], pattern: &[u8]) -> bool {
    pattern.len() <= frame.len() && frame[frame.len() - pattern.len()..] == *pattern
}
