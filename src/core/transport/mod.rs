//! Transport layer for the MCP server.
//!
//! Three transport implementations, conditionally compiled:
//! - **STDIO** (`stdio`, default): standard input/output, the normal MCP mode
//! - **TCP** (`tcp`): raw TCP socket with line-delimited JSON-RPC
//! - **HTTP** (`http`): axum server with a JSON-RPC endpoint and the
//!   `/api/v1` REST facade
//!
//! Each transport handles the connection lifecycle and delegates message
//! processing to the MCP server handler.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
mod rest;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
