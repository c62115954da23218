//! Traits implemented by the application

pub mod handler;

pub use handler::{dispatch, EventHandler};
