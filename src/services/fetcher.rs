use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur while downloading a website
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Website returned status {0}")]
    Status(u16),
}

/// Downloads the HTML of the page being analyzed
pub struct WebsiteFetcher {
    client: Client,
    max_content_chars: usize,
}

impl WebsiteFetcher {
    pub fn new(
        timeout: Duration,
        user_agent: &str,
        max_content_chars: usize,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            max_content_chars,
        })
    }

    /// GET the page and return its body, truncated to the configured size
    pub async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        tracing::debug!("Fetching website content from {}", url);

        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(truncate_chars(body, self.max_content_chars))
    }
}

/// Cut `text` to at most `max` characters on a char boundary
pub fn truncate_chars(mut text: String, max: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(max) {
        tracing::debug!("Truncating website content to {} characters", max);
        text.truncate(idx);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo".to_string(), 2), "hé");
        assert_eq!(truncate_chars("short".to_string(), 100), "short");
        assert_eq!(truncate_chars("abc".to_string(), 3), "abc");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = WebsiteFetcher::new(Duration::from_secs(5), "test-agent", 1000).unwrap();
        let url = Url::parse(&format!("{}/missing", server.url())).unwrap();

        let result = fetcher.fetch(&url).await;
        assert!(matches!(result, Err(FetchError::Status(404))));
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_header("user-agent", "test-agent")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body>Acme</body></html>")
            .create_async()
            .await;

        let fetcher = WebsiteFetcher::new(Duration::from_secs(5), "test-agent", 1000).unwrap();
        let url = Url::parse(&server.url()).unwrap();

        let body = fetcher.fetch(&url).await.unwrap();
        assert_eq!(body, "<html><body>Acme</body></html>");
    }
}
