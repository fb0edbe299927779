//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::PostService;
use blog_infra::InMemoryPostStore;

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use blog_infra::{PostgresPostStore, database::connect};
#[cfg(feature = "postgres")]
use migration::{Migrator, MigratorTrait};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    /// Which store backs `posts`, reported by the health endpoint.
    pub storage: &'static str,
}

impl AppState {
    /// State over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self {
            posts: PostService::new(Arc::new(InMemoryPostStore::new())),
            storage: "memory",
        }
    }

    /// Build the application state, falling back to memory when the database is unusable.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let state = match &config.database {
            Some(db_config) => match connect(db_config).await {
                Ok(db) => {
                    if config.run_migrations {
                        tracing::info!("Applying pending migrations...");
                        if let Err(e) = Migrator::up(&db, None).await {
                            tracing::error!("Migration failed: {}", e);
                        }
                    }
                    Self {
                        posts: PostService::new(Arc::new(PostgresPostStore::new(db))),
                        storage: "postgres",
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("Database not configured. Running with in-memory store.");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            if config.database.is_some() {
                tracing::warn!("Built without postgres feature - database settings ignored");
            }
            Self::in_memory()
        };

        tracing::info!(storage = state.storage, "Application state initialized");
        state
    }
}
