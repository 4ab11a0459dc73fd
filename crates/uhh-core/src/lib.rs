//! Domain layer of the filler word counter.
//!
//! Sessions, filler word events, the statistics engine and the traits the
//! infrastructure layer implements. Nothing in this crate touches the file
//! system.

pub mod clock;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod session;
pub mod storage;

// Re-export common error type
pub use error::{Result, UhhError};
