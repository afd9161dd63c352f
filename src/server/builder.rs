//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{ApiError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| ApiError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

/// Build the server for `config` and run it until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    let server = ServerBuilder::new().with_config(config).build().await?;
    let state = server.state();

    info!("Server starting at: http://{}", server.config().address());
    info!("   GET  /health - Health check");
    info!("   POST {} - Batch requests", state.config.batch_endpoint());
    for name in state.dispatcher.registry().names() {
        info!(
            "   *    {}/{} - Resource collection",
            server.config().normalized_prefix(),
            name
        );
    }

    server.start().await
}
