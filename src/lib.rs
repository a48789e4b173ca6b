//! LLM Tool MCP Server
//!
//! This crate exposes a set of LLM-backed tools (question answering,
//! summarization, translation, code generation, ...) and elementary storage
//! CRUD through a Model Context Protocol server layered on a REST API.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the main server, transports
//! - **clients**: the Ollama HTTP client
//! - **context**: the application context holding shared clients and backends
//! - **data_sources**: database, object-storage, and web-fetcher backends
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: MCP tools executable by clients
//!   - **resources**: data resources readable by clients
//!   - **prompts**: prompt templates for consistent interactions
//!
//! # Example
//!
//! ```rust,no_run
//! use llm_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod clients;
pub mod context;
pub mod core;
pub mod data_sources;
pub mod domains;

// Re-export commonly used types for convenience
pub use context::AppContext;
pub use core::{Config, Error, McpServer, Result};
