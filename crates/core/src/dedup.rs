//! URL-keyed dedup helpers for group membership.
//!
//! Pure functions shared by the store's merge-write and its manifest update,
//! so the storage layer only handles transactions.

use std::collections::HashSet;

use crate::Tab;

/// Incoming tabs whose URL is neither in `existing` nor repeated earlier in `incoming`.
/// Input order is preserved.
#[must_use]
pub fn net_new_tabs(existing: &[Tab], incoming: &[Tab]) -> Vec<Tab> {
    let mut seen: HashSet<&str> = existing.iter().map(|t| t.url.as_str()).collect();
    incoming.iter().filter(|t| seen.insert(t.url.as_str())).cloned().collect()
}

/// Union of both slices by URL: existing tabs first, then new ones in input order.
#[must_use]
pub fn merge_tabs(existing: &[Tab], incoming: &[Tab]) -> Vec<Tab> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut result = Vec::with_capacity(existing.len().saturating_add(incoming.len()));
    for tab in existing.iter().chain(incoming.iter()) {
        if seen.insert(tab.url.as_str()) {
            result.push(tab.clone());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(url: &str) -> Tab {
        Tab::new(format!("title {url}"), url)
    }

    fn urls(tabs: &[Tab]) -> Vec<&str> {
        tabs.iter().map(|t| t.url.as_str()).collect()
    }

    #[test]
    fn test_net_new_skips_existing_and_repeated() {
        let existing = vec![tab("a"), tab("b")];
        let incoming = vec![tab("b"), tab("c"), tab("c")];
        assert_eq!(urls(&net_new_tabs(&existing, &incoming)), vec!["c"]);
    }

    #[test]
    fn test_merge_keeps_existing_first() {
        let existing = vec![tab("c"), tab("a")];
        let incoming = vec![tab("d"), tab("a"), tab("e")];
        assert_eq!(urls(&merge_tabs(&existing, &incoming)), vec!["c", "a", "d", "e"]);
    }

    #[test]
    fn test_url_match_is_case_sensitive() {
        let tabs = vec![tab("https://A"), tab("https://a"), tab("https://A")];
        assert_eq!(urls(&net_new_tabs(&[], &tabs)), vec!["https://A", "https://a"]);
    }

    #[test]
    fn test_first_occurrence_title_wins() {
        let incoming = vec![Tab::new("first", "u"), Tab::new("second", "u")];
        let merged = merge_tabs(&[], &incoming);
        assert_eq!(merged, vec![Tab::new("first", "u")]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(merge_tabs(&[], &[]).is_empty());
        assert!(net_new_tabs(&[tab("a")], &[]).is_empty());
    }
}
