//! Conversation tools.
//!
//! One file per tool. The model-backed tools forward a built prompt to
//! Ollama; greet, recap, and time are deterministic.

pub mod ask;
pub mod classify;
pub mod compose;
pub mod greet;
pub mod recap;
pub mod summarize;
pub mod time;
pub mod translate;

pub use ask::{ChatAskParams, ChatAskTool};
pub use classify::{ChatClassifyParams, ChatClassifyTool, ClassifyKind};
pub use compose::{ChatComposeParams, ChatComposeTool, ComposeMode};
pub use greet::{ChatGreetParams, ChatGreetTool};
pub use recap::{ChatRecapParams, ChatRecapTool};
pub use summarize::{ChatSummarizeParams, ChatSummarizeTool};
pub use time::{ChatTimeParams, ChatTimeTool};
pub use translate::{ChatTranslateParams, ChatTranslateTool};
