//! Client for the local Ollama inference runtime.
//!
//! Talks to Ollama's HTTP API. Generation uses the streaming
//! `/api/generate` endpoint: the response body is newline-delimited JSON
//! objects whose `response` fields are concatenated into the final text.

use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::config::OllamaConfig;

/// Errors from the Ollama client.
#[derive(Debug, Error)]
pub enum OllamaError {
    /// The model took too long to respond.
    #[error("Timeout: the model took too long to respond")]
    Timeout,

    /// Ollama returned a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Network-level failure reaching the runtime.
    #[error("Request error: {0}")]
    Connection(String),

    /// The stream completed without yielding any content.
    #[error("No content received from model")]
    NoContent,

    /// Malformed response payload.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Request body for `/api/generate`.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// A single NDJSON chunk from the generation stream. Chunks carry more
/// fields (model, timings, a `done` flag) but only the text is needed.
#[derive(Debug, Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
}

/// Client for the Ollama HTTP API.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    config: OllamaConfig,
    client: Client,
}

impl OllamaClient {
    /// Create a new client from configuration.
    pub fn new(config: OllamaConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self { config, client }
    }

    /// The model used when a call does not specify one.
    pub fn default_model(&self) -> &str {
        &self.config.default_model
    }

    /// Resolve an optional per-call model override.
    pub fn resolve_model<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(m) if !m.is_empty() => m,
            _ => self.default_model(),
        }
    }

    /// Check if the runtime is reachable.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.config.base_url);
        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// List models installed in the runtime.
    pub async fn list_models(&self) -> Result<Vec<String>, OllamaError> {
        #[derive(Deserialize)]
        struct TagsResponse {
            models: Vec<ModelInfo>,
        }

        #[derive(Deserialize)]
        struct ModelInfo {
            name: String,
        }

        let url = format!("{}/api/tags", self.config.base_url);
        let resp = self.client.get(&url).send().await.map_err(map_send_error)?;

        if !resp.status().is_success() {
            return Err(OllamaError::Status {
                status: resp.status().as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        let tags: TagsResponse = resp
            .json()
            .await
            .map_err(|e| OllamaError::Parse(e.to_string()))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Send a prompt and accumulate the streamed response into one string.
    ///
    /// Lines that are not valid JSON are logged and skipped; an SSE-style
    /// `data:` prefix is tolerated. An entirely empty stream is an error.
    pub async fn generate(&self, prompt: &str, model: &str) -> Result<String, OllamaError> {
        let url = format!("{}/api/generate", self.config.base_url);
        debug!("Generating with model '{}' via {}", model, url);

        let resp = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model,
                prompt,
                stream: true,
            })
            .send()
            .await
            .map_err(map_send_error)?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(OllamaError::Status {
                status,
                body: body.trim().to_string(),
            });
        }

        let mut stream = resp.bytes_stream();
        let mut pending = String::new();
        let mut output = String::new();
        let mut received = false;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_send_error)?;
            pending.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(newline) = pending.find('\n') {
                let line: String = pending.drain(..=newline).collect();
                if consume_line(line.trim(), &mut output) {
                    received = true;
                }
            }
        }

        // A final line without a trailing newline
        if consume_line(pending.trim(), &mut output) {
            received = true;
        }

        if !received {
            return Err(OllamaError::NoContent);
        }

        Ok(output.trim().to_string())
    }
}

/// Parse one NDJSON line and append its content. Returns true if any
/// content was appended.
fn consume_line(line: &str, output: &mut String) -> bool {
    if line.is_empty() {
        return false;
    }

    let line = line.strip_prefix("data:").map(str::trim).unwrap_or(line);

    match serde_json::from_str::<GenerateChunk>(line) {
        Ok(chunk) => {
            if chunk.response.is_empty() {
                false
            } else {
                output.push_str(&chunk.response);
                true
            }
        }
        Err(_) => {
            warn!("Non-JSON response chunk: {}", line);
            false
        }
    }
}

fn map_send_error(e: reqwest::Error) -> OllamaError {
    if e.is_timeout() {
        OllamaError::Timeout
    } else {
        OllamaError::Connection(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> OllamaClient {
        OllamaClient::new(OllamaConfig::default())
    }

    #[test]
    fn test_resolve_model_default() {
        let client = test_client();
        assert_eq!(client.resolve_model(None), "llama3");
        assert_eq!(client.resolve_model(Some("")), "llama3");
    }

    #[test]
    fn test_resolve_model_override() {
        let client = test_client();
        assert_eq!(client.resolve_model(Some("mistral")), "mistral");
    }

    #[test]
    fn test_consume_line_appends_content() {
        let mut out = String::new();
        assert!(consume_line(r#"{"response": "Hello", "done": false}"#, &mut out));
        assert!(consume_line(r#"{"response": " world", "done": true}"#, &mut out));
        assert_eq!(out, "Hello world");
    }

    #[test]
    fn test_consume_line_data_prefix() {
        let mut out = String::new();
        assert!(consume_line(r#"data: {"response": "hi"}"#, &mut out));
        assert_eq!(out, "hi");
    }

    #[test]
    fn test_consume_line_skips_garbage() {
        let mut out = String::new();
        assert!(!consume_line("not json at all", &mut out));
        assert!(!consume_line("", &mut out));
        assert!(!consume_line(r#"{"done": true}"#, &mut out));
        assert!(out.is_empty());
    }

    // Integration test (requires a running Ollama, run with: cargo test -- --ignored)
    #[ignore]
    #[tokio::test]
    async fn test_generate_against_local_runtime() {
        let client = test_client();
        let result = client.generate("Say hello in one word.", "llama3").await;
        assert!(result.is_ok());
        assert!(!result.unwrap().is_empty());
    }
}
