//! Clustering pipeline: embed, build the similarity graph, cluster, drop
//! singletons, name.
//!
//! Each stage waits for its whole batch before the next starts. Inside a
//! stage, embedding and naming calls run concurrently up to
//! `max_concurrency`, and results keep input order.


use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use futures_util::stream::{self, StreamExt};
use tabclust_cluster::{Clusterer, SimilarityGraph};
use tabclust_core::constants::{
    DEFAULT_MAX_CONCURRENCY, DEFAULT_SIMILARITY_THRESHOLD, MIN_SUGGESTED_GROUP_SIZE,
};
use tabclust_core::{Embedding, EmbeddingSource, GroupSummary, Tab, TabKey};
use tabclust_embeddings::{EmbeddingProvider, PageTextFetcher};
use tabclust_llm::GroupNamer;

use crate::{ServiceError, TabSource};

pub struct TabGrouper {
    embedder: Arc<dyn EmbeddingProvider>,
    namer: Arc<dyn GroupNamer>,
    page_fetcher: Option<Arc<PageTextFetcher>>,
    source: EmbeddingSource,
    threshold: f32,
    max_concurrency: usize,
    /// Successful embeddings by tab key. Failures are retried next time.
    /// Entries are never evicted: the cache grows with every distinct key
    /// seen during the context's lifetime, and a `serve` session holds one
    /// vector per distinct title (or URL) it has clustered.
    cache: Mutex<HashMap<String, Embedding>>,
}

impl TabGrouper {
    #[must_use]
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, namer: Arc<dyn GroupNamer>) -> Self {
        Self {
            embedder,
            namer,
            page_fetcher: None,
            source: EmbeddingSource::Title,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            cache: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Embed page text fetched from each tab's URL instead of its title.
    #[must_use]
    pub fn with_page_text(mut self, fetcher: PageTextFetcher) -> Self {
        self.source = EmbeddingSource::Page;
        self.page_fetcher = Some(Arc::new(fetcher));
        self
    }

    #[must_use]
    pub const fn key(&self) -> TabKey {
        self.source.key()
    }

    #[must_use]
    pub const fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn cached_embeddings(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Suggestions over whatever `source` currently holds.
    pub async fn suggest_from(
        &self,
        source: &dyn TabSource,
    ) -> Result<Vec<GroupSummary>, ServiceError> {
        let tabs = source.tabs().await?;
        Ok(self.suggest_groups(&tabs).await)
    }

    /// Named groups of two or more similar tabs. Never fails: missing
    /// embeddings score 0 and failed names fall back to the default label.
    pub async fn suggest_groups(&self, tabs: &[Tab]) -> Vec<GroupSummary> {
        if tabs.is_empty() {
            return Vec::new();
        }

        let clusters: Vec<Vec<Tab>> = self
            .cluster(tabs)
            .await
            .into_iter()
            .filter(|c| c.len() >= MIN_SUGGESTED_GROUP_SIZE)
            .collect();

        let groups: Vec<GroupSummary> = stream::iter(clusters)
            .map(|tabs| async move {
                let group_name = self.namer.suggest_name(&tabs).await;
                GroupSummary { group_name, tabs }
            })
            .buffered(self.max_concurrency)
            .collect()
            .await;

        tracing::info!(tabs = tabs.len(), groups = groups.len(), "Suggested tab groups");
        groups
    }

    /// Every component, singletons included, in BFS seed order.
    pub async fn cluster(&self, tabs: &[Tab]) -> Vec<Vec<Tab>> {
        let key = self.key();
        let embeddings = self.embeddings_for(tabs).await;
        let graph = SimilarityGraph::build(tabs, key, |tab| {
            embeddings.get(key.of(tab)).map(Vec::as_slice)
        });
        Clusterer::new(self.threshold).cluster(&graph)
    }

    /// Embeddings keyed by tab key, served from the cache where possible.
    /// Tabs whose embedding could not be produced are simply absent.
    async fn embeddings_for(&self, tabs: &[Tab]) -> HashMap<String, Embedding> {
        let key = self.key();
        let mut found: HashMap<String, Embedding> = HashMap::with_capacity(tabs.len());
        let mut pending: Vec<&Tab> = Vec::new();
        {
            let mut seen: HashSet<&str> = HashSet::with_capacity(tabs.len());
            let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            for tab in tabs {
                let k = key.of(tab);
                if !seen.insert(k) {
                    continue;
                }
                match cache.get(k) {
                    Some(embedding) => {
                        found.insert(k.to_owned(), embedding.clone());
                    },
                    None => pending.push(tab),
                }
            }
        }

        let fresh: Vec<(String, Option<Embedding>)> = stream::iter(pending)
            .map(|tab| async move { (key.of(tab).to_owned(), self.embed_tab(tab).await) })
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        for (k, embedding) in fresh {
            if let Some(embedding) = embedding {
                cache.insert(k.clone(), embedding.clone());
                found.insert(k, embedding);
            }
        }
        found
    }

    async fn embed_tab(&self, tab: &Tab) -> Option<Embedding> {
        let text = self.representative_text(tab).await?;
        match self.embedder.embed(&text).await {
            Ok(embedding) => Some(embedding),
            Err(e) => {
                tracing::warn!(url = %tab.url, error = %e, "Embedding unavailable, tab scores 0");
                None
            },
        }
    }

    async fn representative_text(&self, tab: &Tab) -> Option<String> {
        match (self.source, &self.page_fetcher) {
            (EmbeddingSource::Page, Some(fetcher)) => match fetcher.fetch(&tab.url).await {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::warn!(url = %tab.url, error = %e, "Page text unavailable");
                    None
                },
            },
            (EmbeddingSource::Page, None) => {
                tracing::warn!(url = %tab.url, "Page embedding source without a fetcher");
                None
            },
            (EmbeddingSource::Title, _) => Some(tab.title.clone()),
        }
    }
}
