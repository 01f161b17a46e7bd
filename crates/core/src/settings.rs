//! Runtime configuration assembled from environment variables.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_COMPLETION_MODEL, DEFAULT_DB_POOL_SIZE, DEFAULT_EMBEDDING_MODEL,
    DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_WORDS, DEFAULT_NAME_MAX_TOKENS, DEFAULT_NAME_TEMPERATURE,
    DEFAULT_SIMILARITY_THRESHOLD,
};
use crate::env_config::{first_non_empty, parse_or_default};
use crate::{CoreError, TabKey};

/// Text a tab is embedded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbeddingSource {
    /// The tab title; tabs are keyed by title.
    #[default]
    Title,
    /// Paragraph text fetched from the tab URL; tabs are keyed by URL.
    Page,
}

impl EmbeddingSource {
    #[must_use]
    pub const fn key(self) -> TabKey {
        match self {
            Self::Title => TabKey::Title,
            Self::Page => TabKey::Url,
        }
    }
}

impl FromStr for EmbeddingSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "page" | "content" => Ok(Self::Page),
            other => Err(CoreError::UnknownEmbeddingSource(other.to_owned())),
        }
    }
}

impl fmt::Display for EmbeddingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Title => "title",
            Self::Page => "page",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub similarity_threshold: f32,
    pub embedding_source: EmbeddingSource,
    pub embedding_model: String,
    pub completion_model: String,
    pub api_url: String,
    pub api_key: Option<String>,
    pub max_words: usize,
    pub max_concurrency: usize,
    pub name_max_tokens: u32,
    pub name_temperature: f32,
    pub db_pool_size: u32,
    pub db_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            embedding_source: EmbeddingSource::default(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_owned(),
            completion_model: DEFAULT_COMPLETION_MODEL.to_owned(),
            api_url: DEFAULT_API_URL.to_owned(),
            api_key: None,
            max_words: DEFAULT_MAX_WORDS,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            name_max_tokens: DEFAULT_NAME_MAX_TOKENS,
            name_temperature: DEFAULT_NAME_TEMPERATURE,
            db_pool_size: DEFAULT_DB_POOL_SIZE,
            db_path: default_db_path(),
        }
    }
}

impl Settings {
    /// Reads `TABCLUST_*` variables from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable lookup. Unset or invalid
    /// values fall back to the defaults in [`crate::constants`].
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let string_or = |var: &str, default: String| {
            first_non_empty(&lookup, &[var]).unwrap_or(default)
        };

        Self {
            similarity_threshold: parse_or_default(
                "TABCLUST_SIMILARITY_THRESHOLD",
                lookup("TABCLUST_SIMILARITY_THRESHOLD"),
                defaults.similarity_threshold,
            ),
            embedding_source: parse_or_default(
                "TABCLUST_EMBEDDING_SOURCE",
                lookup("TABCLUST_EMBEDDING_SOURCE"),
                defaults.embedding_source,
            ),
            embedding_model: string_or("TABCLUST_EMBEDDING_MODEL", defaults.embedding_model),
            completion_model: string_or("TABCLUST_COMPLETION_MODEL", defaults.completion_model),
            api_url: string_or("TABCLUST_API_URL", defaults.api_url)
                .trim_end_matches('/')
                .to_owned(),
            api_key: first_non_empty(&lookup, &["TABCLUST_API_KEY", "OPENAI_API_KEY"]),
            max_words: parse_or_default(
                "TABCLUST_MAX_WORDS",
                lookup("TABCLUST_MAX_WORDS"),
                defaults.max_words,
            )
            .max(1),
            max_concurrency: parse_or_default(
                "TABCLUST_MAX_CONCURRENCY",
                lookup("TABCLUST_MAX_CONCURRENCY"),
                defaults.max_concurrency,
            )
            .max(1),
            name_max_tokens: parse_or_default(
                "TABCLUST_NAME_MAX_TOKENS",
                lookup("TABCLUST_NAME_MAX_TOKENS"),
                defaults.name_max_tokens,
            ),
            name_temperature: parse_or_default(
                "TABCLUST_NAME_TEMPERATURE",
                lookup("TABCLUST_NAME_TEMPERATURE"),
                defaults.name_temperature,
            ),
            db_pool_size: parse_or_default(
                "TABCLUST_DB_POOL_SIZE",
                lookup("TABCLUST_DB_POOL_SIZE"),
                defaults.db_pool_size,
            )
            .max(1),
            db_path: first_non_empty(&lookup, &["TABCLUST_DB_PATH"])
                .map_or(defaults.db_path, PathBuf::from),
        }
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tabclust")
        .join("groups.db")
}
