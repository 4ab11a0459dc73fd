//! Data Transfer Objects (DTOs) for persistence.
//!
//! DTOs are versioned separately from the domain model so the stored format
//! can evolve without touching `uhh-core`.

mod session;

pub use session::{
    MAX_TIMESTAMP_MS, SESSION_SCHEMA_MARKER, SessionRecord, SessionV1, decode_records,
    encode_sessions, session_index,
};
