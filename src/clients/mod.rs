//! HTTP clients for external services.

mod ollama;

pub use ollama::{OllamaClient, OllamaError};
