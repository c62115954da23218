//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use shutterbug_protocol::Classification;

/// Channel capacity for console reports
const REPORT_CHANNEL_SIZE: usize = 4;

/// Classified frames waiting to be printed on the console
pub static REPORT_CHANNEL: Channel<CriticalSectionRawMutex, Classification, REPORT_CHANNEL_SIZE> =
    Channel::new();
