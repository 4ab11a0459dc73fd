//! Application layer of the filler word counter.
//!
//! Use cases and lifecycle rules that coordinate the domain and
//! infrastructure layers, plus the wiring and logging setup a host needs.

pub mod bootstrap;
pub mod lifecycle;
pub mod session_usecase;
pub mod telemetry;

pub use bootstrap::{App, AppBootstrap};
pub use lifecycle::LifecyclePolicy;
pub use session_usecase::{SessionOverview, SessionUseCase};
pub use telemetry::init_tracing;
