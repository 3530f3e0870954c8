//! Applicability matching and in-service cutoff filtering.
//!
//! A document applies to an aircraft when its rule names the aircraft's serial
//! number, or (for rules without serial numbers) the aircraft's model. Results
//! are ordered by issue date ascending, then document id; undated documents
//! sort after every dated one.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Aircraft, Corpus, Document, DocumentDate, DocumentKind};
use crate::domain::{FleetDocsError, Result};
use crate::obs;

/// Decide whether `document` applies to `aircraft`.
pub fn matches(aircraft: &Aircraft, document: &Document) -> bool {
    let rule = &document.applicability;
    if rule.is_serial_restricted() {
        return rule.serial_numbers.contains(&aircraft.serial_number);
    }
    rule.models.contains(&aircraft.model)
}

/// Every document in `corpus` that applies to `aircraft`, in issue order.
pub fn applicable_documents<'a>(aircraft: &Aircraft, corpus: &'a Corpus) -> Vec<&'a Document> {
    let mut applicable: Vec<&Document> = corpus.iter().filter(|d| matches(aircraft, d)).collect();
    applicable.sort_by(|a, b| issue_order(a, b));
    obs::emit_applicability_resolved(&aircraft.registration, corpus.len(), applicable.len());
    applicable
}

/// Why a document was left out of a cutoff query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "problem", rename_all = "snake_case")]
pub enum DateProblem {
    Missing,
    Unparseable { raw: String },
}

/// A document excluded from a cutoff query because its date is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateDiagnostic {
    pub document_id: String,
    pub kind: DocumentKind,
    #[serde(flatten)]
    pub problem: DateProblem,
}

/// Result of a cutoff query.
#[derive(Debug, Clone, Serialize)]
pub struct CutoffReport<'a> {
    pub cutoff: NaiveDate,
    /// Documents issued strictly before `cutoff`, in issue order.
    pub documents: Vec<&'a Document>,
    /// Documents excluded for a missing or unparseable date.
    pub excluded: Vec<DateDiagnostic>,
}

impl<'a> CutoffReport<'a> {
    pub fn of_kind(&self, kind: DocumentKind) -> impl Iterator<Item = &'a Document> + '_ {
        self.documents.iter().copied().filter(move |d| d.kind() == kind)
    }

    pub fn document_ids(&self) -> Vec<&'a str> {
        self.documents
            .iter()
            .map(|d| d.document_id.as_str())
            .collect()
    }
}

/// Keep the documents issued strictly before `cutoff`.
///
/// Undated documents are reported in [`CutoffReport::excluded`] rather than
/// dropped. Applying the same cutoff to the output returns the same documents.
pub fn documents_before_cutoff<'a, I>(documents: I, cutoff: NaiveDate) -> CutoffReport<'a>
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut kept = Vec::new();
    let mut excluded = Vec::new();

    for document in documents {
        match &document.issue_date {
            DocumentDate::Known(date) => {
                if *date < cutoff {
                    kept.push(document);
                }
            }
            DocumentDate::Missing => excluded.push(DateDiagnostic {
                document_id: document.document_id.clone(),
                kind: document.kind(),
                problem: DateProblem::Missing,
            }),
            DocumentDate::Unparseable(raw) => excluded.push(DateDiagnostic {
                document_id: document.document_id.clone(),
                kind: document.kind(),
                problem: DateProblem::Unparseable { raw: raw.clone() },
            }),
        }
    }

    for diagnostic in &excluded {
        warn!(
            event = "cutoff.excluded",
            document_id = %diagnostic.document_id,
            problem = ?diagnostic.problem,
            "document excluded from cutoff query"
        );
    }

    kept.sort_by(|a, b| issue_order(a, b));
    obs::emit_cutoff_applied(cutoff, kept.len(), excluded.len());

    CutoffReport {
        cutoff,
        documents: kept,
        excluded,
    }
}

/// Applicable documents issued before the aircraft entered service.
///
/// Fails with [`FleetDocsError::MissingInServiceDate`] when the registry has
/// no in-service date for the aircraft.
pub fn documents_before_in_service<'a>(
    aircraft: &Aircraft,
    corpus: &'a Corpus,
) -> Result<CutoffReport<'a>> {
    let cutoff = aircraft
        .in_service_date
        .ok_or_else(|| FleetDocsError::MissingInServiceDate {
            registration: aircraft.registration.clone(),
        })?;
    Ok(documents_before_cutoff(
        applicable_documents(aircraft, corpus),
        cutoff,
    ))
}

/// Documents that would have applied to a not-yet-delivered aircraft of
/// `model` entering service on `in_service`.
///
/// Serial-restricted documents never match, since no serial is assigned yet.
pub fn documents_for_prospective<'a>(
    model: &str,
    in_service: NaiveDate,
    corpus: &'a Corpus,
) -> CutoffReport<'a> {
    let candidates = corpus.iter().filter(|d| {
        let rule = &d.applicability;
        !rule.is_serial_restricted() && rule.models.contains(model)
    });
    documents_before_cutoff(candidates, in_service)
}

pub(crate) fn issue_order(a: &Document, b: &Document) -> Ordering {
    match (a.issue_date.known(), b.issue_date.known()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.document_id.cmp(&b.document_id))
}
