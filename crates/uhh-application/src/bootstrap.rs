//! Application wiring.
//!
//! Builds the store, migrator, repository, use case and lifecycle policy from
//! a [`UhhConfig`].

use crate::lifecycle::LifecyclePolicy;
use crate::session_usecase::SessionUseCase;
use std::sync::Arc;
use uhh_core::clock::ClockHandle;
use uhh_core::config::{StorageBackend, UhhConfig};
use uhh_core::error::Result;
use uhh_core::lifecycle::LaunchContext;
use uhh_core::session::SessionRepository;
use uhh_core::storage::KeyValueStore;
use uhh_infrastructure::storage::{InMemoryStore, SessionStore, TomlFileStore};
use uhh_infrastructure::{KvSessionRepository, SchemaMigrator, UhhPaths};

/// Everything a host needs, wired together.
pub struct App {
    pub session_usecase: Arc<SessionUseCase>,
    pub lifecycle: LifecyclePolicy,
    /// One per process; pass it to `lifecycle.on_launch`.
    pub launch_context: LaunchContext,
}

impl App {
    /// Runs the first-launch rule against this app's own launch context.
    pub fn launch(&self) -> Result<Option<String>> {
        self.lifecycle.on_launch(&self.launch_context)
    }
}

pub struct AppBootstrap;

impl AppBootstrap {
    pub fn from_config(config: &UhhConfig) -> Result<App> {
        Self::from_config_with_clock(config, ClockHandle::system())
    }

    /// Same as [`AppBootstrap::from_config`] with an explicit time source.
    pub fn from_config_with_clock(config: &UhhConfig, clock: ClockHandle) -> Result<App> {
        let backend: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::Memory => {
                tracing::info!("[Bootstrap] Using in-memory storage");
                Arc::new(InMemoryStore::new())
            }
            StorageBackend::File => {
                let path = match &config.storage.path {
                    Some(path) => path.clone(),
                    None => UhhPaths::store_file()?,
                };
                tracing::info!("[Bootstrap] Using file storage at {:?}", path);
                Arc::new(TomlFileStore::new(path))
            }
        };
        let store = SessionStore::new(backend);

        let session_repository: Arc<dyn SessionRepository> = Arc::new(KvSessionRepository::new(
            store.clone(),
            Arc::new(SchemaMigrator::new()),
            clock.clone(),
        ));

        let session_usecase = Arc::new(SessionUseCase::new(
            session_repository.clone(),
            clock.clone(),
            config.sessions.on_start_with_active,
        ));
        let lifecycle = LifecyclePolicy::new(session_repository, store, clock);

        Ok(App {
            session_usecase,
            lifecycle,
            launch_context: LaunchContext::new(),
        })
    }
}
