//! Tab and group domain types.

use serde::{Deserialize, Serialize};

use crate::{CoreError, Result};

/// Fixed-length embedding vector for a tab's representative text.
pub type Embedding = Vec<f32>;

/// A browsing unit. Identity for dedup is the URL (exact, case-sensitive);
/// the title is descriptive only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tab {
    pub title: String,
    pub url: String,
}

impl Tab {
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self { title: title.into(), url: url.into() }
    }

    /// Rejects tabs that cannot be persisted (empty URL).
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(CoreError::InvalidInput(format!("tab '{}' has an empty url", self.title)));
        }
        Ok(())
    }
}

/// Which tab field identifies a tab during similarity lookup and clustering.
///
/// The embedding cache, the similarity graph and the visited set all use the
/// same key so a tab is never looked up under one field and tracked under another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabKey {
    #[default]
    Title,
    Url,
}

impl TabKey {
    #[must_use]
    pub fn of<'a>(&self, tab: &'a Tab) -> &'a str {
        match self {
            Self::Title => &tab.title,
            Self::Url => &tab.url,
        }
    }
}

/// A named, ordered, URL-deduplicated collection of tabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(default)]
    pub tabs: Vec<Tab>,
}

impl Group {
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self { name: name.into(), tabs: Vec::new() }
    }
}

/// A stored tab record. Each record is owned by exactly one group; the same
/// URL saved under two groups is two independent records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTab {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub group: String,
}

impl PersistedTab {
    #[must_use]
    pub fn into_tab(self) -> Tab {
        Tab { title: self.title, url: self.url }
    }
}

/// Group name plus its tabs, the shape returned to callers for both stored
/// groups and clustering suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub group_name: String,
    pub tabs: Vec<Tab>,
}
