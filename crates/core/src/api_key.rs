//! Runtime-replaceable API key shared by the service clients.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Cloneable handle to the current API key. Clients read it per request, so
/// a key set at runtime applies to the next call without rebuilding anything.
#[derive(Clone, Default)]
pub struct ApiKey {
    inner: Arc<RwLock<Option<String>>>,
}

impl ApiKey {
    #[must_use]
    pub fn new(initial: Option<String>) -> Self {
        Self { inner: Arc::new(RwLock::new(initial.filter(|k| !k.trim().is_empty()))) }
    }

    /// Current key, `None` when unset.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replaces the key. A blank key clears it.
    pub fn set(&self, key: impl Into<String>) {
        let key = key.into();
        let value = if key.trim().is_empty() { None } else { Some(key.trim().to_owned()) };
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = value;
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey").field("set", &self.is_set()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_key() {
        let key = ApiKey::new(None);
        let clone = key.clone();
        key.set("sk-abc");
        assert_eq!(clone.get().as_deref(), Some("sk-abc"));
    }

    #[test]
    fn test_blank_key_clears() {
        let key = ApiKey::new(Some("sk-abc".to_owned()));
        key.set("   ");
        assert!(!key.is_set());
        assert!(!ApiKey::new(Some(String::new())).is_set());
    }

    #[test]
    fn test_debug_hides_value() {
        let key = ApiKey::new(Some("sk-secret".to_owned()));
        assert!(!format!("{key:?}").contains("sk-secret"));
    }
}
