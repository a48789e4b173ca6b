//! Web fetchers for the remote-content tools and resources.
//!
//! Three flavors: JSON API responses, page titles scraped from HTML, and
//! GitHub repository listings. All requests go through the shared retry
//! policy for transient network failures.

use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{DataSourceError, RetryPolicy};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const AGENT: &str = concat!("llm-mcp-server/", env!("CARGO_PKG_VERSION"));

fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(AGENT)
        .build()
        .unwrap_or_default()
}

/// Fetches JSON documents from arbitrary HTTP APIs.
pub struct ApiFetcher {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl ApiFetcher {
    pub fn new() -> Self {
        Self {
            client: build_client(),
            retry: RetryPolicy::http(),
        }
    }

    /// GET the URL and parse the body as JSON.
    pub async fn fetch_json(&self, url: &str) -> Result<Value, DataSourceError> {
        self.retry
            .run("api fetch", || async {
                let response = self
                    .client
                    .get(url)
                    .header(ACCEPT, "application/json")
                    .send()
                    .await
                    .map_err(|e| DataSourceError::Fetch(e.to_string()))?;

                if !response.status().is_success() {
                    return Err(DataSourceError::Fetch(format!(
                        "HTTP {} from {}",
                        response.status(),
                        url
                    )));
                }

                response
                    .json::<Value>()
                    .await
                    .map_err(|e| DataSourceError::Fetch(format!("invalid JSON: {}", e)))
            })
            .await
    }
}

impl Default for ApiFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetches web pages and extracts their `<title>`.
pub struct PageFetcher {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl PageFetcher {
    pub fn new() -> Self {
        Self {
            client: build_client(),
            retry: RetryPolicy::http(),
        }
    }

    /// GET the URL and return the page title, or an error if none is found.
    pub async fn fetch_title(&self, url: &str) -> Result<String, DataSourceError> {
        let body = self
            .retry
            .run("page fetch", || async {
                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| DataSourceError::Fetch(e.to_string()))?;

                if !response.status().is_success() {
                    return Err(DataSourceError::Fetch(format!(
                        "HTTP {} from {}",
                        response.status(),
                        url
                    )));
                }

                response
                    .text()
                    .await
                    .map_err(|e| DataSourceError::Fetch(e.to_string()))
            })
            .await?;

        extract_title(&body).ok_or_else(|| {
            DataSourceError::Fetch(format!("no <title> element found at {}", url))
        })
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the text of the first `<title>` element, case-insensitively.
///
/// Scans bytes of the original string rather than lowercasing a copy, so
/// offsets stay valid for multi-byte text around the tags.
fn extract_title(html: &str) -> Option<String> {
    let bytes = html.as_bytes();
    let open = find_ascii_ci(bytes, b"<title")?;
    let content_start = open + bytes[open..].iter().position(|&b| b == b'>')? + 1;
    let content_end = content_start + find_ascii_ci(&bytes[content_start..], b"</title")?;
    let title = html[content_start..content_end].trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
fn find_ascii_ci(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

/// Fetches repository content listings from the GitHub API.
///
/// Requests are authenticated with `GITHUB_TOKEN` when present, which
/// raises the rate limit but is not required.
pub struct GitHubFetcher {
    client: reqwest::Client,
    token: Option<String>,
    retry: RetryPolicy,
}

impl GitHubFetcher {
    pub fn new() -> Self {
        let token = std::env::var("GITHUB_TOKEN").ok();
        if token.is_some() {
            debug!("GitHub requests will be authenticated");
        }
        Self {
            client: build_client(),
            token,
            retry: RetryPolicy::http(),
        }
    }

    /// List the top-level contents of `owner/repo`.
    pub async fn fetch_contents(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Value, DataSourceError> {
        let url = format!("https://api.github.com/repos/{}/{}/contents", owner, repo);

        self.retry
            .run("github fetch", || {
                let url = url.clone();
                async move {
                    let mut request = self
                        .client
                        .get(&url)
                        .header(USER_AGENT, AGENT)
                        .header(ACCEPT, "application/vnd.github+json");
                    if let Some(token) = &self.token {
                        request = request.header(AUTHORIZATION, format!("Bearer {}", token));
                    }

                    let response = request
                        .send()
                        .await
                        .map_err(|e| DataSourceError::Fetch(e.to_string()))?;

                    if !response.status().is_success() {
                        return Err(DataSourceError::Fetch(format!(
                            "HTTP {} from {}",
                            response.status(),
                            url
                        )));
                    }

                    response
                        .json::<Value>()
                        .await
                        .map_err(|e| DataSourceError::Fetch(format!("invalid JSON: {}", e)))
                }
            })
            .await
    }
}

impl Default for GitHubFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title_basic() {
        let html = "<html><head><title>Example Domain</title></head></html>";
        assert_eq!(extract_title(html).unwrap(), "Example Domain");
    }

    #[test]
    fn test_extract_title_case_and_attributes() {
        let html = r#"<HTML><HEAD><TITLE lang="en"> Spaced Out </TITLE></HEAD>"#;
        assert_eq!(extract_title(html).unwrap(), "Spaced Out");
    }

    #[test]
    fn test_extract_title_multibyte_text_around_tags() {
        let html = format!("{}<TITLE>Başlık</TITLE>", "İ".repeat(20));
        assert_eq!(extract_title(&html).unwrap(), "Başlık");

        let html = "<html>日本語のページ<title>見出し</title></html>";
        assert_eq!(extract_title(html).unwrap(), "見出し");
    }

    #[test]
    fn test_extract_title_missing_or_empty() {
        assert!(extract_title("<html><body>no head</body></html>").is_none());
        assert!(extract_title("<title></title>").is_none());
        assert!(extract_title("<title>   </title>").is_none());
    }

    // Integration tests (require network access, run with: cargo test -- --ignored)
    #[ignore]
    #[tokio::test]
    async fn test_fetch_title_example_com() {
        let fetcher = PageFetcher::new();
        let title = fetcher.fetch_title("https://example.com").await.unwrap();
        assert!(title.contains("Example"));
    }

    #[ignore]
    #[tokio::test]
    async fn test_fetch_github_contents() {
        let fetcher = GitHubFetcher::new();
        let listing = fetcher
            .fetch_contents("rust-lang", "rust")
            .await
            .unwrap();
        assert!(listing.is_array());
    }
}
