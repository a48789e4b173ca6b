//! Backend CRUD and web fetch tools.

pub mod document_store;
pub mod kv_store;
pub mod object_store;
pub mod table_rows;
pub mod web_fetch;

pub use document_store::{DocumentAction, DocumentStoreParams, DocumentStoreTool};
pub use kv_store::{KvAction, KvStoreParams, KvStoreTool};
pub use object_store::{ObjectAction, ObjectBackend, ObjectStoreParams, ObjectStoreTool};
pub use table_rows::{TableAction, TableRowsParams, TableRowsTool};
pub use web_fetch::{FetchMode, WebFetchParams, WebFetchTool};
