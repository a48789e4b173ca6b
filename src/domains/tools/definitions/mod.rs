//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod chat;
pub mod code;
pub mod common;
pub mod data;
pub mod finance;

pub use chat::{
    ChatAskTool, ChatClassifyTool, ChatComposeTool, ChatGreetTool, ChatRecapTool,
    ChatSummarizeTool, ChatTimeTool, ChatTranslateTool,
};
pub use code::{CodeAssistTool, CodeGenerateTool};
pub use data::{DocumentStoreTool, KvStoreTool, ObjectStoreTool, TableRowsTool, WebFetchTool};
pub use finance::FinanceValuationTool;
