//! core::documents
//!
//! Documents attached to paths in the taxonomy.
//!
//! Documents are keyed by the [`PathKey`] of the path they are attached
//! to. Within one path, document names are unique and insertion order is
//! preserved. Like the tree, every operation consumes the store and returns
//! the next one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::codec::{encode, PathKey};
use crate::core::types::{Document, DomainPath};

/// Documents keyed by encoded path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentStore(BTreeMap<PathKey, Vec<Document>>);

impl DocumentStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `document` at `path`.
    ///
    /// No-op if a document with the same name is already attached there.
    pub fn attach(mut self, path: &DomainPath, document: Document) -> Self {
        let docs = self.0.entry(encode(path)).or_default();
        if !docs.iter().any(|d| d.name == document.name) {
            docs.push(document);
        }
        self
    }

    /// Documents attached at `path`, in insertion order.
    pub fn list_at(&self, path: &DomainPath) -> &[Document] {
        self.0
            .get(&encode(path))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether a document named `name` is attached at `path`.
    pub fn contains(&self, path: &DomainPath, name: &str) -> bool {
        self.list_at(path).iter().any(|d| d.name == name)
    }

    /// An empty store. Used on full reset.
    pub fn clear_all(self) -> Self {
        Self::new()
    }

    /// Whether no documents are attached anywhere.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Total number of attached documents.
    pub fn document_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Keys that have a document list.
    pub fn keys(&self) -> impl Iterator<Item = &PathKey> {
        self.0.keys()
    }

    /// Drop duplicate-named documents per path, keeping the first.
    ///
    /// Used on stores read from persisted data.
    pub fn normalized(self) -> Self {
        Self(
            self.0
                .into_iter()
                .map(|(key, docs)| {
                    let mut kept: Vec<Document> = Vec::with_capacity(docs.len());
                    for doc in docs {
                        if !kept.iter().any(|d| d.name == doc.name) {
                            kept.push(doc);
                        }
                    }
                    (key, kept)
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> DomainPath {
        DomainPath::parse_segments(segments.iter().copied()).unwrap()
    }

    fn doc(name: &str, content: &str) -> Document {
        Document::new(name, content).unwrap()
    }

    #[test]
    fn attach_preserves_order() {
        let p = path(&["A"]);
        let store = DocumentStore::new()
            .attach(&p, doc("b.txt", "2"))
            .attach(&p, doc("a.txt", "1"));
        let listed: Vec<&str> = store.list_at(&p).iter().map(|d| d.name.as_str()).collect();
        assert_eq!(listed, vec!["b.txt", "a.txt"]);
    }

    #[test]
    fn duplicate_name_is_noop() {
        let p = path(&["A"]);
        let store = DocumentStore::new()
            .attach(&p, doc("x.txt", "first"))
            .attach(&p, doc("x.txt", "second"));
        let docs = store.list_at(&p);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "first");
    }

    #[test]
    fn same_name_at_different_paths() {
        let store = DocumentStore::new()
            .attach(&path(&["A"]), doc("x.txt", "a"))
            .attach(&path(&["B"]), doc("x.txt", "b"));
        assert_eq!(store.document_count(), 2);
        assert!(store.contains(&path(&["A"]), "x.txt"));
        assert!(store.contains(&path(&["B"]), "x.txt"));
    }

    #[test]
    fn root_path_can_hold_documents() {
        let store = DocumentStore::new().attach(&DomainPath::root(), doc("root.md", ""));
        assert_eq!(store.list_at(&DomainPath::root()).len(), 1);
    }

    #[test]
    fn list_at_unknown_is_empty() {
        assert!(DocumentStore::new().list_at(&path(&["A"])).is_empty());
    }

    #[test]
    fn clear_all_empties() {
        let store = DocumentStore::new()
            .attach(&path(&["A"]), doc("x.txt", ""))
            .clear_all();
        assert!(store.is_empty());
        assert_eq!(store, DocumentStore::new());
    }

    #[test]
    fn normalized_drops_duplicates() {
        let json = serde_json::json!({
            "A": [
                { "name": "x.txt", "content": "1" },
                { "name": "x.txt", "content": "2" }
            ]
        });
        let store: DocumentStore = serde_json::from_value(json).unwrap();
        let store = store.normalized();
        assert_eq!(store.list_at(&path(&["A"])).len(), 1);
        assert_eq!(store.list_at(&path(&["A"]))[0].content, "1");
    }
}
