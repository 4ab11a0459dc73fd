//! Persistence adapters and the logical session store on top of them.

mod atomic_toml;
mod memory;
mod session_store;
mod toml_file_store;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub use memory::InMemoryStore;
pub use session_store::SessionStore;
pub use toml_file_store::TomlFileStore;
