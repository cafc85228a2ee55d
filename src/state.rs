use std::sync::Arc;

use crate::config::Config;
use crate::store::ArticleStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<ArticleStore>,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        // Create the row store with its header on first launch
        let store = ArticleStore::open(config.store_path());
        store.init()?;

        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(config.fetch_timeout_secs))
            .build()?;

        Ok(Self {
            config,
            store: Arc::new(store),
            http_client,
        })
    }
}
