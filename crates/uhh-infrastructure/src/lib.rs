pub mod config_service;
pub mod dto;
pub mod kv_session_repository;
pub mod migration;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::kv_session_repository::KvSessionRepository;
pub use crate::migration::SchemaMigrator;
pub use crate::paths::UhhPaths;
