//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::batch::BatchOrchestrator;
use crate::core::rest::{ResourceRegistry, RestDispatcher};
use crate::storage::Database;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// Orchestrator wired to the SeaORM database and the REST dispatcher
pub type Orchestrator = BatchOrchestrator<Database, RestDispatcher>;

/// HTTP server state shared across handlers
///
/// Every field is behind an `Arc`, so cloning the state per worker is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Connection pool
    pub database: Arc<Database>,
    /// Handler chain shared by direct requests and batch sub-requests
    pub dispatcher: Arc<RestDispatcher>,
    /// Batch executor
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    /// Connect to the configured database and build the state around it
    pub async fn connect(config: Config) -> Result<Self> {
        let database = Database::new(&config.storage().database).await?;
        Ok(Self::new(config, Arc::new(database)))
    }

    /// Build the state over an existing database handle
    pub fn new(config: Config, database: Arc<Database>) -> Self {
        let registry = Arc::new(ResourceRegistry::from_config(config.resources()));
        info!("Serving {} resource collection(s)", registry.len());

        let dispatcher = Arc::new(RestDispatcher::new(
            Arc::clone(&database),
            registry,
            config.server().normalized_prefix(),
            config.auth().clone(),
        ));

        let orchestrator = Arc::new(
            BatchOrchestrator::new(Arc::clone(&database), Arc::clone(&dispatcher))
                .with_timeout(config.batch().timeout())
                .with_max_requests(config.batch().max_requests),
        );

        Self {
            config: Arc::new(config),
            database,
            dispatcher,
            orchestrator,
        }
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
