//! Shared application state.

use lexicore_core::LexiCoreConfig;
use lexicore_review::{OpenRouterClient, Reviewer};
use lexicore_store::ProjectStore;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: LexiCoreConfig,
    pub store: ProjectStore,
    pub reviewer: Reviewer<OpenRouterClient>,
}

impl AppState {
    pub fn new(config: LexiCoreConfig, client: OpenRouterClient) -> Self {
        let store = ProjectStore::open(&config.data_paths.projects_file);
        let reviewer = Reviewer::new(client, &config.data_paths.uploads);
        Self {
            config,
            store,
            reviewer,
        }
    }
}
