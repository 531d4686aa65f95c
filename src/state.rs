use std::sync::Arc;

use crate::client::{ItemCreator, MondayClient};
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Item-creation collaborator (shared across requests)
    pub creator: Arc<dyn ItemCreator>,
}

impl ServerState {
    /// Create new server state with the production board client
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let creator = MondayClient::new(&config.monday)
            .map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self {
            config: Arc::new(config),
            creator: Arc::new(creator),
        })
    }

    /// Create state with an injected collaborator. Used by tests.
    pub fn with_creator(config: ServerConfig, creator: Arc<dyn ItemCreator>) -> Self {
        Self {
            config: Arc::new(config),
            creator,
        }
    }
}
