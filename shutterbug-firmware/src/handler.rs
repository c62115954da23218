//! Event handler that logs decoded events over RTT

use defmt::*;

use shutterbug_core::EventHandler;

/// Logs every decoded event
pub struct LogHandler;

impl EventHandler for LogHandler {
    fn photo_short(&mut self) {
        info!("photo_short()");
    }

    fn photo_long(&mut self) {
        info!("photo_long()");
    }

    fn drone_idle(&mut self) {
        info!("drone_idle()");
    }

    fn transmitter_off(&mut self) {
        info!("transmitter_off()");
    }

    fn drone_motors_on(&mut self) {
        info!("drone_motors_on()");
    }

    fn unmatched(&mut self, frame: &[u8]) {
        warn!("Unmatched frame ({} bytes): {=[u8]}", frame.len(), frame);
    }

    fn discarded(&mut self) {
        warn!("Oversized frame discarded");
    }
}
