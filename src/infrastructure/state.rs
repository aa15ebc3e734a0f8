//! Shared application state

use std::sync::Arc;

use crate::application::ports::outbound::GenerationOraclePort;
use crate::application::services::{CommandDispatcher, GenerationService};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::oracle_client::ChallengeOracleClient;
use crate::infrastructure::session::PageRegistry;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    /// Open pages
    pub pages: PageRegistry,
    // Application services
    pub generation_service: GenerationService,
    pub commands: CommandDispatcher,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let oracle: Arc<dyn GenerationOraclePort> =
            Arc::new(ChallengeOracleClient::new(&config.oracle_base_url));
        Self::with_oracle(config, oracle)
    }

    /// Build the state around any oracle implementation
    pub fn with_oracle(config: AppConfig, oracle: Arc<dyn GenerationOraclePort>) -> Self {
        Self {
            pages: PageRegistry::new(config.max_pages),
            generation_service: GenerationService::new(Arc::clone(&oracle)),
            commands: CommandDispatcher::new(oracle),
            config,
        }
    }
}
