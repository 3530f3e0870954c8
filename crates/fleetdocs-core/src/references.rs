//! Cross-document reference graph and closure resolution.
//!
//! Documents cite each other (an AD incorporates SBs by reference, an SB
//! points at TOs or EDs, and an SB usually names the AD that mandates it).
//! Edges are stored as `document → referenced ids` with a reverse map for
//! "cited by" lookups. Traversal is a BFS with a visited set keyed by
//! document id, so cycles terminate.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Corpus, Document, DocumentKind, FleetDocsError, Result};
use crate::obs;

/// Directed reference adjacency over document ids.
///
/// Targets may name documents absent from the corpus; those edges surface as
/// dangling references during traversal.
#[derive(Debug, Clone, Default)]
pub struct ReferenceGraph {
    /// `document_id → {referenced_id, ...}`
    outgoing: HashMap<String, BTreeSet<String>>,
    /// `referenced_id → {document_id, ...}`
    incoming: HashMap<String, BTreeSet<String>>,
}

impl ReferenceGraph {
    pub fn from_documents<'a>(documents: impl IntoIterator<Item = &'a Document>) -> Self {
        let mut graph = Self::default();
        for document in documents {
            graph
                .outgoing
                .entry(document.document_id.clone())
                .or_default();
            for target in &document.references {
                graph.add_edge(&document.document_id, target);
            }
        }
        graph
    }

    fn add_edge(&mut self, from: &str, to: &str) {
        self.outgoing
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
        self.incoming
            .entry(to.to_string())
            .or_default()
            .insert(from.to_string());
    }

    /// Ids that `document_id` references, in id order.
    pub fn references_of(&self, document_id: &str) -> impl Iterator<Item = &str> {
        self.outgoing
            .get(document_id)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Ids of documents that reference `document_id`, in id order.
    pub fn referenced_by(&self, document_id: &str) -> impl Iterator<Item = &str> {
        self.incoming
            .get(document_id)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Union of both directions, excluding `document_id` itself.
    pub fn related_to(&self, document_id: &str) -> BTreeSet<String> {
        self.references_of(document_id)
            .chain(self.referenced_by(document_id))
            .filter(|id| *id != document_id)
            .map(str::to_string)
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(BTreeSet::len).sum()
    }
}

/// Which edges a closure traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalDirection {
    /// References the documents make, plus back-links from subordinate
    /// documents: an SB citing a reached AD, a TO or ED citing a reached SB.
    Compliance,
    /// References in both directions ("everything related to").
    Related,
}

/// A reference to a document id that is not in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingReference {
    /// The document holding the reference.
    pub referenced_from: String,
    /// The id that could not be resolved.
    pub missing_id: String,
}

/// Documents reachable from an anchor, grouped by variant.
///
/// Each group is in BFS discovery order. The anchor itself is never listed.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceClosure<'a> {
    pub anchor: String,
    pub direction: TraversalDirection,
    pub ad: Vec<&'a Document>,
    pub sb: Vec<&'a Document>,
    pub to: Vec<&'a Document>,
    pub ed: Vec<&'a Document>,
    pub dangling: Vec<DanglingReference>,
}

impl<'a> ReferenceClosure<'a> {
    fn new(anchor: &str, direction: TraversalDirection) -> Self {
        Self {
            anchor: anchor.to_string(),
            direction,
            ad: Vec::new(),
            sb: Vec::new(),
            to: Vec::new(),
            ed: Vec::new(),
            dangling: Vec::new(),
        }
    }

    pub fn group(&self, kind: DocumentKind) -> &[&'a Document] {
        match kind {
            DocumentKind::AirworthinessDirective => &self.ad,
            DocumentKind::ServiceBulletin => &self.sb,
            DocumentKind::TechnicalOrder => &self.to,
            DocumentKind::EngineeringDirective => &self.ed,
        }
    }

    fn push(&mut self, document: &'a Document) {
        match document.kind() {
            DocumentKind::AirworthinessDirective => self.ad.push(document),
            DocumentKind::ServiceBulletin => self.sb.push(document),
            DocumentKind::TechnicalOrder => self.to.push(document),
            DocumentKind::EngineeringDirective => self.ed.push(document),
        }
    }

    /// Number of resolved documents across all groups.
    pub fn len(&self) -> usize {
        self.ad.len() + self.sb.len() + self.to.len() + self.ed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn group_ids(&self, kind: DocumentKind) -> Vec<&'a str> {
        self.group(kind)
            .iter()
            .map(|d| d.document_id.as_str())
            .collect()
    }
}

/// Compliance closure of `anchor_id`.
///
/// Follows the references each reached document makes, and also takes in
/// subordinate documents that cite a reached one, so an SB that names an AD
/// belongs to that AD's closure even when the AD does not list the SB.
/// A superior document citing a subordinate one (an AD citing the anchor SB)
/// is only reached through [`resolve_related`].
///
/// Fails only when the anchor itself is unknown; unresolved references
/// further out are collected in [`ReferenceClosure::dangling`].
pub fn resolve_closure<'a>(anchor_id: &str, corpus: &'a Corpus) -> Result<ReferenceClosure<'a>> {
    traverse(anchor_id, corpus, TraversalDirection::Compliance)
}

/// Position in the AD > SB > TO/ED hierarchy; lower is more senior.
fn tier(kind: DocumentKind) -> u8 {
    match kind {
        DocumentKind::AirworthinessDirective => 0,
        DocumentKind::ServiceBulletin => 1,
        DocumentKind::TechnicalOrder | DocumentKind::EngineeringDirective => 2,
    }
}

/// Like [`resolve_closure`] but also follows incoming references, so
/// documents that cite the anchor are included.
pub fn resolve_related<'a>(anchor_id: &str, corpus: &'a Corpus) -> Result<ReferenceClosure<'a>> {
    traverse(anchor_id, corpus, TraversalDirection::Related)
}

pub fn traverse<'a>(
    anchor_id: &str,
    corpus: &'a Corpus,
    direction: TraversalDirection,
) -> Result<ReferenceClosure<'a>> {
    if !corpus.contains(anchor_id) {
        return Err(FleetDocsError::UnknownDocument(anchor_id.to_string()));
    }

    let graph = corpus.reference_graph();
    let mut closure = ReferenceClosure::new(anchor_id, direction);
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    visited.insert(anchor_id);
    queue.push_back(anchor_id);

    while let Some(current) = queue.pop_front() {
        let neighbours: Vec<&str> = match direction {
            TraversalDirection::Compliance => {
                let current_tier = corpus.get(current).map(|d| tier(d.kind()));
                graph
                    .references_of(current)
                    .chain(graph.referenced_by(current).filter(|citer| {
                        match (corpus.get(citer), current_tier) {
                            (Some(doc), Some(t)) => tier(doc.kind()) > t,
                            _ => false,
                        }
                    }))
                    .collect()
            }
            TraversalDirection::Related => graph
                .references_of(current)
                .chain(graph.referenced_by(current))
                .collect(),
        };

        for next in neighbours {
            match corpus.get(next) {
                Some(document) => {
                    if visited.insert(next) {
                        closure.push(document);
                        queue.push_back(next);
                    }
                }
                None => {
                    warn!(
                        event = "closure.dangling_reference",
                        from = %current,
                        missing = %next,
                        "reference to unknown document"
                    );
                    closure.dangling.push(DanglingReference {
                        referenced_from: current.to_string(),
                        missing_id: next.to_string(),
                    });
                }
            }
        }
    }

    obs::emit_closure_resolved(anchor_id, closure.len(), closure.dangling.len());
    Ok(closure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{load_corpus, ApplicabilityRule};

    fn rule() -> ApplicabilityRule {
        ApplicabilityRule::for_models(["777-300ER"]).unwrap()
    }

    fn ad(id: &str) -> Document {
        Document::airworthiness_directive(id, id)
            .unwrap()
            .with_applicability(rule())
    }

    fn sb(id: &str) -> Document {
        Document::service_bulletin(id, id)
            .unwrap()
            .with_applicability(rule())
    }

    fn to(id: &str) -> Document {
        Document::technical_order(id, id)
            .unwrap()
            .with_applicability(rule())
    }

    #[test]
    fn test_closure_groups_by_variant() {
        let corpus = load_corpus(vec![
            ad("AD-1").with_reference("SB-1").with_reference("SB-2"),
            sb("SB-1").with_reference("TO-1"),
            sb("SB-2"),
            to("TO-1"),
        ])
        .unwrap();
        let closure = resolve_closure("AD-1", &corpus).unwrap();
        assert_eq!(
            closure.group_ids(DocumentKind::ServiceBulletin),
            vec!["SB-1", "SB-2"]
        );
        assert_eq!(closure.group_ids(DocumentKind::TechnicalOrder), vec!["TO-1"]);
        assert!(closure.ad.is_empty());
        assert!(closure.dangling.is_empty());
    }

    #[test]
    fn test_cycle_terminates_and_excludes_anchor() {
        let corpus = load_corpus(vec![
            ad("AD-1").with_reference("SB-1"),
            sb("SB-1").with_reference("AD-1"),
        ])
        .unwrap();
        let closure = resolve_closure("AD-1", &corpus).unwrap();
        assert_eq!(closure.len(), 1);
        assert_eq!(closure.group_ids(DocumentKind::ServiceBulletin), vec!["SB-1"]);
    }

    #[test]
    fn test_dangling_reference_is_collected_not_fatal() {
        let corpus = load_corpus(vec![
            ad("AD-1").with_reference("SB-MISSING").with_reference("SB-1"),
            sb("SB-1"),
        ])
        .unwrap();
        let closure = resolve_closure("AD-1", &corpus).unwrap();
        assert_eq!(closure.group_ids(DocumentKind::ServiceBulletin), vec!["SB-1"]);
        assert_eq!(
            closure.dangling,
            vec![DanglingReference {
                referenced_from: "AD-1".to_string(),
                missing_id: "SB-MISSING".to_string(),
            }]
        );
    }

    #[test]
    fn test_unknown_anchor_is_an_error() {
        let corpus = load_corpus(vec![ad("AD-1")]).unwrap();
        assert!(matches!(
            resolve_closure("AD-404", &corpus),
            Err(FleetDocsError::UnknownDocument(id)) if id == "AD-404"
        ));
    }

    #[test]
    fn test_closure_takes_in_bulletin_citing_the_anchor() {
        let corpus = load_corpus(vec![ad("AD-1"), sb("SB-1").with_reference("AD-1")]).unwrap();
        let closure = resolve_closure("AD-1", &corpus).unwrap();
        assert_eq!(closure.group_ids(DocumentKind::ServiceBulletin), vec!["SB-1"]);
    }

    #[test]
    fn test_closure_does_not_climb_to_citing_directive() {
        let corpus = load_corpus(vec![
            ad("AD-1").with_reference("SB-1"),
            sb("SB-1"),
            to("TO-1").with_reference("SB-1"),
        ])
        .unwrap();
        let closure = resolve_closure("SB-1", &corpus).unwrap();
        assert!(closure.ad.is_empty());
        assert_eq!(closure.group_ids(DocumentKind::TechnicalOrder), vec!["TO-1"]);

        let related = resolve_related("SB-1", &corpus).unwrap();
        assert_eq!(related.group_ids(DocumentKind::AirworthinessDirective), vec!["AD-1"]);
    }

    #[test]
    fn test_graph_related_to_unions_both_directions() {
        let docs = vec![
            ad("AD-1").with_reference("SB-1"),
            sb("SB-1"),
            sb("SB-2").with_reference("AD-1"),
        ];
        let graph = ReferenceGraph::from_documents(&docs);
        let related: Vec<String> = graph.related_to("AD-1").into_iter().collect();
        assert_eq!(related, vec!["SB-1".to_string(), "SB-2".to_string()]);
        assert_eq!(graph.edge_count(), 2);
    }
}
