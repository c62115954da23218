//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod capture;
pub mod console;

pub use capture::capture_task;
pub use console::console_task;
