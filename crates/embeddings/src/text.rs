/// Keeps the first `max_words` whitespace-separated words, joined by single spaces.
#[must_use]
pub fn truncate_words(text: &str, max_words: usize) -> String {
    text.split_whitespace().take(max_words).collect::<Vec<_>>().join(" ")
}
