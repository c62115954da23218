//! Capture baud rates and how well they decode
//!
//! The accessory port's line rate was never documented, so each standard rate
//! was tried on the bench with a 10 ms gap. At several rates the tail of the
//! transmitter-off burst reads as the photo opcode, which the suffix rule then
//! reports as a camera press.

/// How a capture rate behaved on the bench
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkQuality {
    /// Opcodes decode reliably
    Clean,
    /// Opcodes decode with occasional corruption
    Noisy,
    /// Output is too corrupted to rely on
    Unreliable,
    /// Nothing classifies
    Unclassifiable,
    /// Rate was not tested
    Unknown,
}

/// Bench results for one capture rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaudProfile {
    /// Line rate in bits per second
    pub baudrate: u32,
    /// Decode quality
    pub quality: LinkQuality,
    /// Transmitter-off tail is mistaken for the photo opcode
    pub photo_alias: bool,
}

const fn profile(baudrate: u32, quality: LinkQuality, photo_alias: bool) -> BaudProfile {
    BaudProfile {
        baudrate,
        quality,
        photo_alias,
    }
}

/// Every rate tried on the bench
pub const BENCH_PROFILES: [BaudProfile; 15] = [
    profile(300, LinkQuality::Unclassifiable, false),
    profile(1_200, LinkQuality::Unclassifiable, false),
    profile(2_400, LinkQuality::Unclassifiable, false),
    profile(4_800, LinkQuality::Unreliable, false),
    profile(9_600, LinkQuality::Clean, true),
    profile(19_200, LinkQuality::Noisy, false),
    profile(38_400, LinkQuality::Noisy, false),
    profile(57_600, LinkQuality::Clean, true),
    profile(74_880, LinkQuality::Noisy, false),
    profile(115_200, LinkQuality::Clean, true),
    profile(230_400, LinkQuality::Clean, true),
    profile(250_000, LinkQuality::Clean, true),
    profile(500_000, LinkQuality::Unclassifiable, false),
    profile(1_000_000, LinkQuality::Unclassifiable, false),
    profile(2_000_000, LinkQuality::Unclassifiable, false),
];

/// Rate the firmware captures at by default
pub const DEFAULT_CAPTURE_BAUD: u32 = 115_200;

impl BaudProfile {
    /// Look up the bench result for a rate
    pub fn lookup(baudrate: u32) -> Self {
        BENCH_PROFILES
            .iter()
            .copied()
            .find(|p| p.baudrate == baudrate)
            .unwrap_or(profile(baudrate, LinkQuality::Unknown, false))
    }

    /// Returns true if opcodes were seen to classify at this rate
    pub fn classifies(&self) -> bool {
        matches!(self.quality, LinkQuality::Clean | LinkQuality::Noisy)
    }

    /// Returns true if the rate is known not to work
    pub fn is_rejected(&self) -> bool {
        self.quality == LinkQuality::Unclassifiable
    }
}
