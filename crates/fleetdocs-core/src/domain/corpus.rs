//! Validated, id-keyed document collection for a query session.

use std::collections::HashMap;

use crate::domain::document::{Document, DocumentKind};
use crate::domain::error::{FleetDocsError, Result};
use crate::obs;
use crate::references::ReferenceGraph;

/// An immutable document corpus.
///
/// Preserves insertion order and carries the reference adjacency built at
/// load time. Share across threads behind an `Arc`; nothing mutates it.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
    index: HashMap<String, usize>,
    graph: ReferenceGraph,
}

impl Corpus {
    /// Build a corpus, rejecting blank ids, empty applicability rules and
    /// duplicate ids. The error names the offending document.
    pub fn load(documents: impl IntoIterator<Item = Document>) -> Result<Self> {
        let mut stored: Vec<Document> = Vec::new();
        let mut index = HashMap::new();

        for document in documents {
            document.validate()?;
            if index.contains_key(&document.document_id) {
                return Err(FleetDocsError::DuplicateDocument {
                    id: document.document_id,
                });
            }
            index.insert(document.document_id.clone(), stored.len());
            stored.push(document);
        }

        let graph = ReferenceGraph::from_documents(&stored);
        obs::emit_corpus_loaded(stored.len(), graph.edge_count());

        Ok(Self {
            documents: stored,
            index,
            graph,
        })
    }

    /// Look up a document by id.
    pub fn get(&self, document_id: &str) -> Option<&Document> {
        self.index.get(document_id).map(|&i| &self.documents[i])
    }

    /// True if a document with this id was loaded.
    pub fn contains(&self, document_id: &str) -> bool {
        self.index.contains_key(document_id)
    }

    /// Documents in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// Documents of one variant, in load order.
    pub fn documents_of_kind(&self, kind: DocumentKind) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(move |d| d.kind() == kind)
    }

    /// Number of documents in the corpus.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Reference adjacency built at load time.
    pub fn reference_graph(&self) -> &ReferenceGraph {
        &self.graph
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

/// Build a [`Corpus`] from caller-supplied documents.
pub fn load_corpus(documents: impl IntoIterator<Item = Document>) -> Result<Corpus> {
    Corpus::load(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::ApplicabilityRule;

    fn sb(id: &str) -> Document {
        Document::service_bulletin(id, "bulletin")
            .unwrap()
            .with_applicability(ApplicabilityRule::for_models(["777-300ER"]).unwrap())
    }

    #[test]
    fn test_duplicate_id_fails_load() {
        let err = load_corpus(vec![sb("SB-1"), sb("SB-2"), sb("SB-1")]).unwrap_err();
        match err {
            FleetDocsError::DuplicateDocument { id } => assert_eq!(id, "SB-1"),
            other => panic!("expected DuplicateDocument, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_id_fails_load() {
        let mut doc = sb("SB-1");
        doc.document_id = String::new();
        assert!(matches!(
            load_corpus(vec![doc]),
            Err(FleetDocsError::EmptyDocumentId)
        ));
    }

    #[test]
    fn test_document_without_rule_fails_load() {
        let unruled = Document::engineering_directive("ED-NORULE", "x").unwrap();
        let err = load_corpus(vec![sb("SB-1"), unruled]).unwrap_err();
        match err {
            FleetDocsError::EmptyRule { document_id } => {
                assert_eq!(document_id.as_deref(), Some("ED-NORULE"))
            }
            other => panic!("expected EmptyRule, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_and_order_are_preserved() {
        let corpus = load_corpus(vec![sb("SB-B"), sb("SB-A")]).unwrap();
        assert_eq!(corpus.len(), 2);
        assert!(corpus.contains("SB-A"));
        assert_eq!(corpus.get("SB-B").unwrap().document_id, "SB-B");
        let ids: Vec<&str> = corpus.iter().map(|d| d.document_id.as_str()).collect();
        assert_eq!(ids, vec!["SB-B", "SB-A"]);
        assert!(corpus.get("SB-C").is_none());
    }
}
