//! Code tools.

pub mod assist;
pub mod generate;

pub use assist::{AssistAction, CodeAssistParams, CodeAssistTool};
pub use generate::{CodeGenerateParams, CodeGenerateTool, LANGUAGE_PREAMBLES};
