//! Event handler trait
//!
//! One method per opcode, all defaulting to no-ops, so an application only
//! implements the events it cares about.

use shutterbug_protocol::{Classification, Opcode};

/// Receives decoded accessory port events
pub trait EventHandler {
    /// Camera button pressed briefly
    fn photo_short(&mut self) {}

    /// Camera button held
    fn photo_long(&mut self) {}

    /// Drone linked with motors stopped
    fn drone_idle(&mut self) {}

    /// Transmitter switched off
    fn transmitter_off(&mut self) {}

    /// Motors started
    fn drone_motors_on(&mut self) {}

    /// Frame matched no opcode
    fn unmatched(&mut self, frame: &[u8]) {
        let _ = frame;
    }

    /// A frame was dropped after outgrowing the buffer
    fn discarded(&mut self) {}
}

/// Call the handler method for a classification
pub fn dispatch<H: EventHandler + ?Sized>(handler: &mut H, classification: &Classification) {
    match classification {
        Classification::Matched { opcode, .. } => match opcode {
            Opcode::PhotoShort => handler.photo_short(),
            Opcode::PhotoLong => handler.photo_long(),
            Opcode::DroneIdle => handler.drone_idle(),
            Opcode::TransmitterOff => handler.transmitter_off(),
            Opcode::DroneMotorsOn => handler.drone_motors_on(),
        },
        Classification::Unmatched(frame) => handler.unmatched(frame),
    }
}

impl<H: EventHandler + ?Sized> EventHandler for &mut H {
    fn photo_short(&mut self) {
        (**self).photo_short()
    }

    fn photo_long(&mut self) {
        (**self).photo_long()
    }

    fn drone_idle(&mut self) {
        (**self).drone_idle()
    }

    fn transmitter_off(&mut self) {
        (**self).transmitter_off()
    }

    fn drone_motors_on(&mut self) {
        (**self).drone_motors_on()
    }

    fn unmatched(&mut self, frame: &[u8]) {
        (**self).unmatched(frame)
    }

    fn discarded(&mut self) {
        (**self).discarded()
    }
}
