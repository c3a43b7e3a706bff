//! Application state wiring the infra implementations together.
//!
//! The assist gateway is built on demand so commands that never call the
//! model (history, templates) work without an API key.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use artisan_infra::assist::LlmAssistGateway;
use artisan_infra::config::load_global_config;
use artisan_infra::filesystem::resolve_data_dir;
use artisan_infra::llm::{API_KEY_ENV, BASE_URL_ENV, api_key_from_env, create_provider};
use artisan_infra::sqlite::history::SqliteHistoryStore;
use artisan_infra::sqlite::pool::DatabasePool;
use artisan_types::config::GlobalConfig;

/// Shared application state for CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub history: Arc<SqliteHistoryStore>,
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Resolve the data directory, load config and open the database.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_global_config(&data_dir).await;

        let db_pool = DatabasePool::open(&data_dir)
            .await
            .with_context(|| format!("failed to open database in {}", data_dir.display()))?;

        tracing::debug!(data_dir = %data_dir.display(), "application state ready");

        Ok(Self {
            history: Arc::new(SqliteHistoryStore::new(db_pool)),
            config,
            data_dir,
        })
    }

    /// Build the LLM-backed assist gateway from the environment.
    pub fn assist_gateway(&self) -> anyhow::Result<Arc<LlmAssistGateway>> {
        let api_key = api_key_from_env()
            .with_context(|| format!("set {API_KEY_ENV} to use AI assistance"))?;
        let base_url = std::env::var(BASE_URL_ENV).ok();
        let provider = create_provider(api_key, base_url.as_deref());
        Ok(Arc::new(LlmAssistGateway::new(
            provider,
            self.config.assist.clone(),
        )))
    }
}
