//! Decoder counters
//!
//! Counts are useful when tuning the capture rate: a rising unmatched or
//! refused count usually means the rate or gap is wrong.

use shutterbug_protocol::{Classification, Opcode};

/// Running totals since boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderStats {
    pub photo_short: u32,
    pub photo_long: u32,
    pub drone_idle: u32,
    pub transmitter_off: u32,
    pub drone_motors_on: u32,
    /// Frames that matched no opcode
    pub unmatched: u32,
    /// Bytes received, including refused ones
    pub bytes_received: u32,
    /// Bytes that did not fit in the frame
    pub bytes_refused: u32,
    /// Frames dropped after an overflow
    pub frames_discarded: u32,
}

impl DecoderStats {
    /// Count a classified frame
    pub fn record(&mut self, classification: &Classification) {
        let counter = match classification.opcode() {
            Some(Opcode::PhotoShort) => &mut self.photo_short,
            Some(Opcode::PhotoLong) => &mut self.photo_long,
            Some(Opcode::DroneIdle) => &mut self.drone_idle,
            Some(Opcode::TransmitterOff) => &mut self.transmitter_off,
            Some(Opcode::DroneMotorsOn) => &mut self.drone_motors_on,
            None => &mut self.unmatched,
        };
        *counter = counter.saturating_add(1);
    }

    /// Count for one opcode
    pub fn count(&self, opcode: Opcode) -> u32 {
        match opcode {
            Opcode::PhotoShort => self.photo_short,
            Opcode::PhotoLong => self.photo_long,
            Opcode::DroneIdle => self.drone_idle,
            Opcode::TransmitterOff => self.transmitter_off,
            Opcode::DroneMotorsOn => self.drone_motors_on,
        }
    }

    /// Frames that matched an opcode
    pub fn matched(&self) -> u32 {
        Opcode::ALL
            .iter()
            .fold(0u32, |acc, &op| acc.saturating_add(self.count(op)))
    }

    /// Frames closed by a gap, classified or discarded
    pub fn frames(&self) -> u32 {
        self.matched()
            .saturating_add(self.unmatched)
            .saturating_add(self.frames_discarded)
    }
}
