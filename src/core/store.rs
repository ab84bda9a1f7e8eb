//! Document collection persistence
//!
//! The whole collection lives under one storage key as a JSON array and is
//! rewritten in full on every mutation. There is no partial write, no retry
//! and no defensive parsing: a failing substrate or malformed stored text
//! surfaces as an error to the caller.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::storage::{KeyValueStorage, StorageError};

/// Fixed storage key holding the serialized document collection
pub const DOCS_KEY: &str = "allUserDocs";

/// Bundled dataset consumed for first-run seeding
const WELCOME_DATA: &str = include_str!("../../assets/welcome.json");

/// A single markdown note in its persisted form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Creation date, string-encoded
    pub date: String,
    /// User-chosen title, not required to be unique
    #[serde(rename = "docName")]
    pub name: String,
    /// Raw markdown text
    pub content: String,
}

impl Document {
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            name: name.into(),
            content: String::new(),
        }
    }
}

/// Persistence failure of the document collection
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage substrate refused the read or write
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Stored text is not a valid serialized collection
    #[error("malformed document data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The document collection, its cursor, and the backend they persist to
///
/// Insertion order is creation order and display order. The cursor indexes
/// the currently open document; it is not persisted and starts at 0.
pub struct DocumentStore<S: KeyValueStorage> {
    storage: S,
    docs: Vec<Document>,
    cursor: usize,
}

impl<S: KeyValueStorage> DocumentStore<S> {
    /// Load the collection from storage
    ///
    /// An absent key is the empty collection. Present but malformed text is
    /// an error, never silently replaced by an empty or default collection.
    pub fn load(storage: S) -> Result<Self, StoreError> {
        let docs = Self::read(&storage)?;
        Ok(Self {
            storage,
            docs,
            cursor: 0,
        })
    }

    fn read(storage: &S) -> Result<Vec<Document>, StoreError> {
        match storage.get(DOCS_KEY)? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(Vec::new()),
        }
    }

    /// Serialize the full collection and overwrite the storage key
    pub fn save(&self) -> Result<(), StoreError> {
        let text = serde_json::to_string(&self.docs)?;
        self.storage.set(DOCS_KEY, &text)?;
        tracing::debug!("Saved {} document(s)", self.docs.len());
        Ok(())
    }

    /// Seed the collection with a default document, only when it is empty
    ///
    /// Returns whether seeding happened, so calling this on every startup is
    /// safe and never duplicates the welcome document.
    pub fn seed_if_empty(&mut self, default: Document) -> Result<bool, StoreError> {
        if !self.docs.is_empty() {
            return Ok(false);
        }
        self.docs.push(default);
        self.save()?;
        tracing::info!("Seeded store with default document");
        Ok(true)
    }

    /// Append a new empty document stamped with today's date and move the
    /// cursor to it
    pub fn create(&mut self, name: &str) -> Result<(), StoreError> {
        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        self.docs.push(Document::new(name, date));
        self.save()?;
        self.cursor = self.docs.len() - 1;
        Ok(())
    }

    /// Move the cursor; out-of-bounds indices are refused
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.docs.len() {
            self.cursor = index;
            true
        } else {
            false
        }
    }

    /// Replace the current document's content and persist the collection
    pub fn set_current_content(&mut self, content: &str) -> Result<(), StoreError> {
        let cursor = self.cursor;
        if let Some(doc) = self.docs.get_mut(cursor) {
            if doc.content != content {
                doc.content = content.to_string();
                self.save()?;
            }
        }
        Ok(())
    }

    /// Re-read the collection from storage, replacing in-memory state
    ///
    /// Used when another writer touched the key: last writer wins. The
    /// cursor is clamped into the new collection. Returns whether anything
    /// actually changed, so the app's own writes echo back as no-ops.
    pub fn reload(&mut self) -> Result<bool, StoreError> {
        let docs = Self::read(&self.storage)?;
        if docs == self.docs {
            return Ok(false);
        }
        self.docs = docs;
        if self.cursor >= self.docs.len() {
            self.cursor = self.docs.len().saturating_sub(1);
        }
        Ok(true)
    }

    pub fn documents(&self) -> &[Document] {
        &self.docs
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&Document> {
        self.docs.get(self.cursor)
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// The default document from the bundled dataset
///
/// The dataset is an array of `{createdAt, name, content}` entries; only the
/// first entry is consumed.
pub fn welcome_document() -> anyhow::Result<Document> {
    #[derive(Deserialize)]
    struct SeedEntry {
        #[serde(rename = "createdAt")]
        created_at: String,
        name: String,
        content: String,
    }

    let entries: Vec<SeedEntry> =
        serde_json::from_str(WELCOME_DATA).context("Failed to parse bundled welcome dataset")?;
    let first = entries
        .into_iter()
        .next()
        .context("Bundled welcome dataset is empty")?;
    Ok(Document {
        date: first.created_at,
        name: first.name,
        content: first.content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStorage;

    fn doc(name: &str, date: &str, content: &str) -> Document {
        Document {
            date: date.to_string(),
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_empty_load() {
        let store = DocumentStore::load(MemoryStorage::default()).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.cursor(), 0);
        assert!(store.current().is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let storage = MemoryStorage::default();
        let mut store = DocumentStore::load(storage.clone()).unwrap();
        store.docs = vec![
            doc("First", "2024-01-01", "# One"),
            doc("Second", "2024-02-02", "*two*"),
        ];
        store.save().unwrap();

        let reloaded = DocumentStore::load(storage).unwrap();
        assert_eq!(reloaded.documents(), store.documents());
    }

    #[test]
    fn test_persisted_field_names() {
        let storage = MemoryStorage::default();
        let mut store = DocumentStore::load(storage.clone()).unwrap();
        store.docs = vec![doc("Welcome", "2024-01-01", "# Hi")];
        store.save().unwrap();

        let text = storage.get(DOCS_KEY).unwrap().unwrap();
        assert_eq!(
            text,
            r##"[{"date":"2024-01-01","docName":"Welcome","content":"# Hi"}]"##
        );
    }

    #[test]
    fn test_seed_once() {
        let storage = MemoryStorage::default();
        let mut store = DocumentStore::load(storage.clone()).unwrap();
        let seeded = store
            .seed_if_empty(doc("Welcome", "2024-01-01", "# Hi"))
            .unwrap();
        assert!(seeded);

        let reloaded = DocumentStore::load(storage).unwrap();
        assert_eq!(
            reloaded.documents(),
            &[doc("Welcome", "2024-01-01", "# Hi")]
        );
    }

    #[test]
    fn test_seed_skipped_when_not_empty() {
        let storage = MemoryStorage::default();
        let mut store = DocumentStore::load(storage).unwrap();
        store.seed_if_empty(doc("Welcome", "2024-01-01", "# Hi")).unwrap();
        let seeded_again = store
            .seed_if_empty(doc("Welcome", "2024-01-01", "# Hi"))
            .unwrap();
        assert!(!seeded_again);
        assert_eq!(store.documents().len(), 1);
    }

    #[test]
    fn test_append_only_growth() {
        let storage = MemoryStorage::default();
        let mut store = DocumentStore::load(storage.clone()).unwrap();
        for name in ["a", "b", "c"] {
            store.create(name).unwrap();
        }

        let reloaded = DocumentStore::load(storage).unwrap();
        let names: Vec<&str> = reloaded.documents().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_create_moves_cursor() {
        let mut store = DocumentStore::load(MemoryStorage::default()).unwrap();
        store.create("first").unwrap();
        store.create("second").unwrap();
        assert_eq!(store.cursor(), 1);
        assert_eq!(store.current().unwrap().name, "second");
    }

    #[test]
    fn test_malformed_data_fails_load() {
        let storage = MemoryStorage::default();
        storage.set(DOCS_KEY, "not json").unwrap();
        let result = DocumentStore::load(storage);
        assert!(matches!(result, Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_select_bounds() {
        let mut store = DocumentStore::load(MemoryStorage::default()).unwrap();
        store.create("only").unwrap();
        assert!(store.select(0));
        assert!(!store.select(1));
        assert_eq!(store.cursor(), 0);
    }

    #[test]
    fn test_set_current_content_persists() {
        let storage = MemoryStorage::default();
        let mut store = DocumentStore::load(storage.clone()).unwrap();
        store.create("note").unwrap();
        store.set_current_content("# Edited").unwrap();

        let reloaded = DocumentStore::load(storage).unwrap();
        assert_eq!(reloaded.documents()[0].content, "# Edited");
    }

    #[test]
    fn test_reload_takes_external_writes() {
        let storage = MemoryStorage::default();
        let mut store = DocumentStore::load(storage.clone()).unwrap();
        store.create("mine").unwrap();

        // Unchanged storage reloads as a no-op
        assert!(!store.reload().unwrap());

        // Another writer replaces the collection wholesale
        let text = serde_json::to_string(&[doc("theirs", "2024-03-03", "x")]).unwrap();
        storage.set(DOCS_KEY, &text).unwrap();
        assert!(store.reload().unwrap());
        assert_eq!(store.documents()[0].name, "theirs");
        assert_eq!(store.cursor(), 0);
    }

    #[test]
    fn test_reload_clamps_cursor() {
        let storage = MemoryStorage::default();
        let mut store = DocumentStore::load(storage.clone()).unwrap();
        store.create("a").unwrap();
        store.create("b").unwrap();
        store.create("c").unwrap();
        assert_eq!(store.cursor(), 2);

        let text = serde_json::to_string(&[doc("a", "2024-01-01", "")]).unwrap();
        storage.set(DOCS_KEY, &text).unwrap();
        store.reload().unwrap();
        assert_eq!(store.cursor(), 0);
        assert!(store.current().is_some());
    }

    #[test]
    fn test_welcome_document_parses() {
        let doc = welcome_document().unwrap();
        assert!(!doc.name.is_empty());
        assert!(!doc.content.is_empty());
    }
}
