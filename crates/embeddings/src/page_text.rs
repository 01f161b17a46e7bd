//! Paragraph text extraction for embedding a page instead of its title.

use std::sync::LazyLock;

use regex::Regex;
use tabclust_core::constants::{DEFAULT_MAX_WORDS, PAGE_TEXT_MAX_PARAGRAPHS};

use crate::{EmbeddingError, truncate_words};

#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static PARAGRAPH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p(?:\s[^>]*)?>(.*?)</p\s*>").unwrap());

#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

/// Text of the first `max_paragraphs` `<p>` elements with tags stripped,
/// cut to `max_words` words.
#[must_use]
pub fn extract_paragraph_text(html: &str, max_paragraphs: usize, max_words: usize) -> String {
    let text = PARAGRAPH_REGEX
        .captures_iter(html)
        .take(max_paragraphs)
        .filter_map(|c| c.get(1))
        .map(|m| decode_entities(&TAG_REGEX.replace_all(m.as_str(), " ")))
        .collect::<Vec<_>>()
        .join(" ");
    truncate_words(&text, max_words)
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Fetches a page and reduces it to its leading paragraph text.
#[derive(Debug, Clone)]
pub struct PageTextFetcher {
    client: reqwest::Client,
    max_words: usize,
}

impl PageTextFetcher {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, EmbeddingError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .map_err(|e| EmbeddingError::ClientInit(e.to_string()))?;
        Ok(Self { client, max_words: DEFAULT_MAX_WORDS })
    }

    #[must_use]
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words.max(1);
        self
    }

    /// # Errors
    /// Fails on transport errors, non-success status, or a page without paragraph text.
    pub async fn fetch(&self, url: &str) -> Result<String, EmbeddingError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EmbeddingError::HttpStatus {
                code: status.as_u16(),
                body: format!("fetching {url}"),
            });
        }
        let html = response.text().await?;
        let text = extract_paragraph_text(&html, PAGE_TEXT_MAX_PARAGRAPHS, self.max_words);
        if text.is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn test_extracts_paragraphs_and_strips_tags() {
        let html = r#"<html><body><h1>Title</h1>
            <p class="lead">Cats are <b>great</b> pets.</p>
            <div>ignored</div>
            <P>Dogs &amp; cats</P></body></html>"#;
        assert_eq!(extract_paragraph_text(html, 10, 100), "Cats are great pets. Dogs & cats");
    }

    #[test]
    fn test_does_not_match_other_p_tags() {
        let html = "<pre>code</pre><param value=1><p>kept</p>";
        assert_eq!(extract_paragraph_text(html, 10, 100), "kept");
    }

    #[test]
    fn test_respects_paragraph_and_word_limits() {
        let html = "<p>a b c</p><p>d e</p><p>f</p>";
        assert_eq!(extract_paragraph_text(html, 2, 100), "a b c d e");
        assert_eq!(extract_paragraph_text(html, 10, 4), "a b c d");
    }

    #[test]
    fn test_no_paragraphs() {
        assert_eq!(extract_paragraph_text("<div>nothing</div>", 10, 100), "");
    }

    #[tokio::test]
    async fn test_fetch_page_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/article"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<p>Stock markets rallied today.</p>"),
            )
            .mount(&server)
            .await;

        let fetcher = PageTextFetcher::new().unwrap();
        let text = fetcher.fetch(&format!("{}/article", server.uri())).await.unwrap();
        assert_eq!(text, "Stock markets rallied today.");
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = PageTextFetcher::new().unwrap();
        let err = fetcher.fetch(&format!("{}/missing", server.uri())).await.unwrap_err();
        assert!(matches!(err, EmbeddingError::HttpStatus { code: 404, .. }));
    }
}
