//! Shared constants for tabclust.
//!
//! Defaults for every tunable live here; `Settings` reads overrides from the environment.

/// Default similarity threshold. An edge exists only when the score is strictly greater.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.3;

/// Default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Default completion model used for group naming.
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo-instruct";

/// Default base URL shared by the embedding and completion services.
pub const DEFAULT_API_URL: &str = "https://api.openai.com";

/// Embedding input is cut to this many whitespace-separated words.
pub const DEFAULT_MAX_WORDS: usize = 100;

/// Number of `<p>` elements read when embedding page text.
pub const PAGE_TEXT_MAX_PARAGRAPHS: usize = 10;

/// Concurrent service calls issued per batch (embeddings or names).
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// `max_tokens` sent with naming requests.
pub const DEFAULT_NAME_MAX_TOKENS: u32 = 50;

/// `temperature` sent with naming requests.
pub const DEFAULT_NAME_TEMPERATURE: f32 = 0.4;

/// Label used whenever the naming service cannot produce one.
pub const FALLBACK_GROUP_NAME: &str = "Unnamed Group";

/// SQLite connection pool size.
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;

/// Groups with fewer tabs than this are not suggested.
pub const MIN_SUGGESTED_GROUP_SIZE: usize = 2;
