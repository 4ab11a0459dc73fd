//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`, `FillerWordEvent`)
//! - `repository`: Repository trait for session persistence
//! - `stats`: Statistics engine (`compute_stats`, `SessionStats`)
//! - `display`: Formatting helpers for durations, clocks and rates

pub mod display;
mod model;
mod repository;
mod stats;

pub use model::{FillerWordEvent, FillerWordKind, Session, find_active_session};
pub use repository::SessionRepository;
pub use stats::{MAX_HISTOGRAM_MINUTES, MS_PER_MINUTE, MinuteBucket, SessionStats, compute_stats};
