//! Application context: the one place that owns the store, the API key and
//! the clustering pipeline for the life of a process.

use std::sync::Arc;

use tabclust_core::{ApiKey, EmbeddingSource, GroupSummary, Settings};
use tabclust_embeddings::{EmbeddingClient, PageTextFetcher};
use tabclust_llm::{LlmClient, LlmGroupNamer};
use tabclust_storage::{GroupStore, Storage};

use crate::{
    GroupService, ServiceError, StaticTabSource, StoredTabSource, TabGrouper, TabSource,
};

pub struct AppContext {
    settings: Settings,
    api_key: ApiKey,
    storage: Option<Storage>,
    groups: GroupService,
    grouper: TabGrouper,
    stored_tabs: StoredTabSource,
    open_tabs: Arc<dyn TabSource>,
}

impl AppContext {
    /// Opens the store at `settings.db_path` (creating the directory) and
    /// wires the HTTP-backed embedder and namer.
    pub fn init(settings: Settings) -> Result<Self, ServiceError> {
        if let Some(parent) = settings.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let storage = Storage::with_pool_size(&settings.db_path, settings.db_pool_size)?;
        let api_key = ApiKey::new(settings.api_key.clone());

        let embedder = EmbeddingClient::new(api_key.clone(), &settings.api_url)
            .map_err(|e| ServiceError::NotConfigured(e.to_string()))?
            .with_model(settings.embedding_model.clone())
            .with_max_words(settings.max_words);
        let llm = LlmClient::new(api_key.clone(), &settings.api_url)
            .map_err(|e| ServiceError::NotConfigured(e.to_string()))?;
        let namer = LlmGroupNamer::new(llm)
            .with_model(settings.completion_model.clone())
            .with_sampling(settings.name_max_tokens, settings.name_temperature);

        let mut grouper = TabGrouper::new(Arc::new(embedder), Arc::new(namer))
            .with_threshold(settings.similarity_threshold)
            .with_max_concurrency(settings.max_concurrency);
        if settings.embedding_source == EmbeddingSource::Page {
            let fetcher = PageTextFetcher::new()
                .map_err(|e| ServiceError::NotConfigured(e.to_string()))?
                .with_max_words(settings.max_words);
            grouper = grouper.with_page_text(fetcher);
        }

        tracing::info!(
            db = %settings.db_path.display(),
            threshold = settings.similarity_threshold,
            source = %settings.embedding_source,
            api_key_set = api_key.is_set(),
            "Application context initialized"
        );

        let store: Arc<dyn GroupStore> = Arc::new(storage.clone());
        let mut ctx = Self::new(settings, api_key, store, grouper);
        ctx.storage = Some(storage);
        Ok(ctx)
    }

    /// Context over an arbitrary store and pipeline. Used by tests and by
    /// hosts that bring their own collaborators.
    #[must_use]
    pub fn new(
        settings: Settings,
        api_key: ApiKey,
        store: Arc<dyn GroupStore>,
        grouper: TabGrouper,
    ) -> Self {
        Self {
            settings,
            api_key,
            storage: None,
            groups: GroupService::new(Arc::clone(&store)),
            grouper,
            stored_tabs: StoredTabSource::new(store),
            open_tabs: Arc::new(StaticTabSource::default()),
        }
    }

    #[must_use]
    pub fn with_open_tabs(mut self, source: Arc<dyn TabSource>) -> Self {
        self.open_tabs = source;
        self
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub const fn groups(&self) -> &GroupService {
        &self.groups
    }

    #[must_use]
    pub const fn grouper(&self) -> &TabGrouper {
        &self.grouper
    }

    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        self.api_key.get()
    }

    /// Replaces the key both service clients read on their next request.
    pub fn set_api_key(&self, key: &str) {
        self.api_key.set(key);
        tracing::info!(api_key_set = self.api_key.is_set(), "API key updated");
    }

    /// Suggestions clustered over every persisted tab.
    pub async fn suggest_stored_groups(&self) -> Result<Vec<GroupSummary>, ServiceError> {
        self.grouper.suggest_from(&self.stored_tabs).await
    }

    /// Suggestions clustered over the live open-tab set.
    pub async fn suggest_open_groups(&self) -> Result<Vec<GroupSummary>, ServiceError> {
        self.grouper.suggest_from(self.open_tabs.as_ref()).await
    }

    /// Checkpoints and closes the store if this context opened it.
    pub fn shutdown(self) {
        if let Some(storage) = self.storage {
            storage.close();
        }
        tracing::info!("Application context shut down");
    }
}
