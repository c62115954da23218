//! Known opcodes sent by the drone
//!
//! Captured at 115200 baud with a 10 ms gap. The camera-button opcodes are
//! stable to roughly one error in a thousand frames; the flight-state opcodes
//! become unreliable when the drone battery is low.

/// Opcodes recognised on the accessory port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Opcode {
    /// Camera button pressed briefly
    PhotoShort,
    /// Camera button held
    PhotoLong,
    /// Drone powered and linked, motors stopped
    DroneIdle,
    /// Transmitter switched off
    TransmitterOff,
    /// Motors started
    DroneMotorsOn,
}

// Wire sequences
const PHOTO_SHORT_CODE: [u8; 10] = [224, 28, 252, 0, 0, 28, 0, 224, 0, 28];
const PHOTO_LONG_CODE: [u8; 10] = [224, 28, 252, 28, 0, 28, 0, 252, 0, 28];
const DRONE_IDLE_CODE: [u8; 10] = [224, 28, 252, 28, 224, 252, 0, 224, 28, 252];
const TRANSMITTER_OFF_CODE: [u8; 9] = [224, 28, 252, 28, 224, 252, 0, 252, 252];
const DRONE_MOTORS_ON_CODE: [u8; 10] = [224, 28, 252, 28, 224, 252, 0, 28, 224, 252];

impl Opcode {
    /// All opcodes, in declaration order
    pub const ALL: [Opcode; 5] = [
        Opcode::PhotoShort,
        Opcode::PhotoLong,
        Opcode::DroneIdle,
        Opcode::TransmitterOff,
        Opcode::DroneMotorsOn,
    ];

    /// Byte sequence the drone sends for this opcode
    pub fn pattern(self) -> &'static [u8] {
        match self {
            Opcode::PhotoShort => &PHOTO_SHORT_CODE,
            Opcode::PhotoLong => &PHOTO_LONG_CODE,
            Opcode::DroneIdle => &DRONE_IDLE_CODE,
            Opcode::TransmitterOff => &TRANSMITTER_OFF_CODE,
            Opcode::DroneMotorsOn => &DRONE_MOTORS_ON_CODE,
        }
    }

    /// Handler name used in console output
    pub fn name(self) -> &'static str {
        match self {
            Opcode::PhotoShort => "photo_short",
            Opcode::PhotoLong => "photo_long",
            Opcode::DroneIdle => "drone_idle",
            Opcode::TransmitterOff => "transmitter_off",
            Opcode::DroneMotorsOn => "drone_motors_on",
        }
    }

    /// Returns true for camera-button opcodes
    pub fn is_photo(self) -> bool {
        matches!(self, Opcode::PhotoShort | Opcode::PhotoLong)
    }

    /// Length of the shortest known pattern
    pub fn min_pattern_len() -> usize {
        Self::ALL.iter().map(|op| op.pattern().len()).min().unwrap_or(0)
    }
}
