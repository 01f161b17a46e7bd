//! Group naming via text completion.

use async_trait::async_trait;
use tabclust_core::Tab;
use tabclust_core::constants::{
    DEFAULT_COMPLETION_MODEL, DEFAULT_NAME_MAX_TOKENS, DEFAULT_NAME_TEMPERATURE,
    FALLBACK_GROUP_NAME,
};

use crate::{CompletionRequest, LlmClient, truncate};

/// Longest label kept from a completion, in bytes.
const MAX_NAME_LEN: usize = 60;

/// Produces a short label for a cluster of tabs.
///
/// Never returns an empty string. Names are not unique across calls.
#[async_trait]
pub trait GroupNamer: Send + Sync {
    async fn suggest_name(&self, tabs: &[Tab]) -> String;
}

/// Prompt listing the tab titles, one per line.
#[must_use]
pub fn naming_prompt(tabs: &[Tab]) -> String {
    let titles = tabs.iter().map(|t| t.title.as_str()).collect::<Vec<_>>().join("\n");
    format!(
        "Provide an appropriate name (whatever you do make sure you don't return an empty string) \
         for a Chrome tab group consisting of the following tabs:\n{titles}\n"
    )
}

/// Reduces raw completion text to a label: first non-blank line, surrounding
/// quotes and trailing period removed. `None` when nothing is left.
#[must_use]
pub fn clean_generated_name(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    let line = line.strip_prefix("Name:").map_or(line, str::trim);
    let name = line
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '“' | '”'))
        .trim_end_matches('.')
        .trim();
    let name = truncate(name, MAX_NAME_LEN).trim_end();
    if name.is_empty() { None } else { Some(name.to_owned()) }
}

/// [`GroupNamer`] backed by [`LlmClient`]. Any failure yields the fallback label.
#[derive(Debug, Clone)]
pub struct LlmGroupNamer {
    client: LlmClient,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl LlmGroupNamer {
    #[must_use]
    pub fn new(client: LlmClient) -> Self {
        Self {
            client,
            model: DEFAULT_COMPLETION_MODEL.to_owned(),
            max_tokens: DEFAULT_NAME_MAX_TOKENS,
            temperature: DEFAULT_NAME_TEMPERATURE,
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl GroupNamer for LlmGroupNamer {
    async fn suggest_name(&self, tabs: &[Tab]) -> String {
        if tabs.is_empty() {
            return FALLBACK_GROUP_NAME.to_owned();
        }

        let request = CompletionRequest {
            model: self.model.clone(),
            prompt: naming_prompt(tabs),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        match self.client.completion(&request).await {
            Ok(text) => clean_generated_name(&text).unwrap_or_else(|| {
                tracing::warn!(tabs = tabs.len(), "naming service returned blank text, using fallback");
                FALLBACK_GROUP_NAME.to_owned()
            }),
            Err(e) => {
                tracing::warn!(tabs = tabs.len(), error = %e, "group naming failed, using fallback");
                FALLBACK_GROUP_NAME.to_owned()
            },
        }
    }
}
