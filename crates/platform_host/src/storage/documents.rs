//! Document storage contract consumed by window content providers.
//!
//! The desktop core never calls into this module; it only hands content providers an opaque
//! key (see [`editor_document_key`]) that providers use to address a [`DocumentStore`].

use std::{cell::RefCell, collections::BTreeMap, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

/// Key prefix for text-editor documents.
pub const EDITOR_DOCUMENT_PREFIX: &str = "editor-";

/// Object-safe boxed future used by [`DocumentStore`] async methods.
pub type DocumentStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Returns the storage key a text editor uses for the window/icon `id`.
pub fn editor_document_key(id: &str) -> String {
    format!("{EDITOR_DOCUMENT_PREFIX}{id}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Stored document body plus its last write time.
pub struct DocumentRecord {
    /// Document body (HTML or plain text, interpreted by the content provider).
    pub content: String,
    /// Last update time in unix milliseconds.
    pub updated_at_unix_ms: u64,
}

impl DocumentRecord {
    /// Creates a record stamped with a monotonic timestamp.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            updated_at_unix_ms: crate::time::next_monotonic_timestamp_ms(),
        }
    }
}

/// Storage service for documents addressed by an opaque string key.
pub trait DocumentStore {
    /// Loads a document by key.
    fn load_document<'a>(
        &'a self,
        key: &'a str,
    ) -> DocumentStoreFuture<'a, Result<Option<DocumentRecord>, String>>;

    /// Saves (creates or replaces) a document.
    fn save_document<'a>(
        &'a self,
        key: &'a str,
        record: &'a DocumentRecord,
    ) -> DocumentStoreFuture<'a, Result<(), String>>;

    /// Deletes a document. Deleting a missing key succeeds.
    fn delete_document<'a>(&'a self, key: &'a str) -> DocumentStoreFuture<'a, Result<(), String>>;

    /// Lists stored keys starting with `prefix`, in ascending order.
    fn list_documents<'a>(
        &'a self,
        prefix: &'a str,
    ) -> DocumentStoreFuture<'a, Result<Vec<String>, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Document store that keeps nothing. Used where no storage backend exists.
pub struct NoopDocumentStore;

impl DocumentStore for NoopDocumentStore {
    fn load_document<'a>(
        &'a self,
        _key: &'a str,
    ) -> DocumentStoreFuture<'a, Result<Option<DocumentRecord>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_document<'a>(
        &'a self,
        _key: &'a str,
        _record: &'a DocumentRecord,
    ) -> DocumentStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete_document<'a>(&'a self, _key: &'a str) -> DocumentStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn list_documents<'a>(
        &'a self,
        _prefix: &'a str,
    ) -> DocumentStoreFuture<'a, Result<Vec<String>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory document store. Clones share the same backing map.
pub struct MemoryDocumentStore {
    inner: Rc<RefCell<BTreeMap<String, DocumentRecord>>>,
}

impl DocumentStore for MemoryDocumentStore {
    fn load_document<'a>(
        &'a self,
        key: &'a str,
    ) -> DocumentStoreFuture<'a, Result<Option<DocumentRecord>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().get(key).cloned()) })
    }

    fn save_document<'a>(
        &'a self,
        key: &'a str,
        record: &'a DocumentRecord,
    ) -> DocumentStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), record.clone());
            Ok(())
        })
    }

    fn delete_document<'a>(&'a self, key: &'a str) -> DocumentStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(key);
            Ok(())
        })
    }

    fn list_documents<'a>(
        &'a self,
        prefix: &'a str,
    ) -> DocumentStoreFuture<'a, Result<Vec<String>, String>> {
        Box::pin(async move {
            Ok(self
                .inner
                .borrow()
                .keys()
                .filter(|key| key.starts_with(prefix))
                .cloned()
                .collect())
        })
    }
}

/// Loads the text body of a document, treating a missing document as empty.
///
/// # Errors
///
/// Returns an error when the store fails.
pub async fn load_document_text<S: DocumentStore + ?Sized>(
    store: &S,
    key: &str,
) -> Result<String, String> {
    Ok(store
        .load_document(key)
        .await?
        .map(|record| record.content)
        .unwrap_or_default())
}

/// Saves a text body under `key`, stamping the record with the current time.
///
/// # Errors
///
/// Returns an error when the store fails.
pub async fn save_document_text<S: DocumentStore + ?Sized>(
    store: &S,
    key: &str,
    content: &str,
) -> Result<(), String> {
    let record = DocumentRecord::new(content);
    store.save_document(key, &record).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn editor_keys_are_prefixed_with_the_window_id() {
        assert_eq!(editor_document_key("textEditor"), "editor-textEditor");
        assert_eq!(editor_document_key("text-3"), "editor-text-3");
    }

    #[test]
    fn memory_store_saves_loads_and_deletes() {
        let store = MemoryDocumentStore::default();
        let store_obj: &dyn DocumentStore = &store;

        block_on(save_document_text(store_obj, "editor-a", "<p>hi</p>")).expect("save");
        assert_eq!(
            block_on(load_document_text(store_obj, "editor-a")).expect("load"),
            "<p>hi</p>"
        );

        block_on(store_obj.delete_document("editor-a")).expect("delete");
        assert_eq!(
            block_on(store_obj.load_document("editor-a")).expect("load"),
            None
        );
        assert_eq!(
            block_on(load_document_text(store_obj, "editor-a")).expect("load text"),
            ""
        );
    }

    #[test]
    fn memory_store_clones_share_documents_and_list_by_prefix() {
        let store = MemoryDocumentStore::default();
        let other = store.clone();

        block_on(save_document_text(&store, "editor-b", "b")).expect("save b");
        block_on(save_document_text(&store, "editor-a", "a")).expect("save a");
        block_on(save_document_text(&store, "notes-x", "x")).expect("save x");

        let keys = block_on(other.list_documents(EDITOR_DOCUMENT_PREFIX)).expect("list");
        assert_eq!(keys, vec!["editor-a".to_string(), "editor-b".to_string()]);
    }

    #[test]
    fn later_saves_carry_newer_timestamps() {
        let first = DocumentRecord::new("one");
        let second = DocumentRecord::new("two");
        assert!(second.updated_at_unix_ms > first.updated_at_unix_ms);
    }

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store = NoopDocumentStore;
        let store_obj: &dyn DocumentStore = &store;
        block_on(save_document_text(store_obj, "k", "body")).expect("save");
        assert_eq!(block_on(store_obj.load_document("k")).expect("load"), None);
        assert!(block_on(store_obj.list_documents("")).expect("list").is_empty());
        block_on(store_obj.delete_document("k")).expect("delete");
    }
}
