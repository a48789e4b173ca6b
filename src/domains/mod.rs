//! Domain modules for the MCP server.
//!
//! Each domain owns one MCP capability:
//!
//! - `tools` - executable functions (LLM calls, CRUD, fetchers)
//! - `resources` - readable data (help, status, remote content)
//! - `prompts` - parameterized message templates

pub mod prompts;
pub mod resources;
pub mod tools;
