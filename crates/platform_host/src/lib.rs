//! Host-domain contracts consumed by the desktop runtime and its window content providers.
//!
//! This crate is the boundary for platform services: the document storage contract used by
//! text-editor content and the time helpers the runtime stamps gesture events with.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod time;

pub use storage::documents::{
    editor_document_key, load_document_text, save_document_text, DocumentRecord, DocumentStore,
    DocumentStoreFuture, MemoryDocumentStore, NoopDocumentStore, EDITOR_DOCUMENT_PREFIX,
};
pub use time::{elapsed_ms, next_monotonic_timestamp_ms, unix_time_ms_now};
