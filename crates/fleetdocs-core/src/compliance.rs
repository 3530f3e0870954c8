//! Compliance aggregation for a single aircraft.
//!
//! [`summarize`] joins the aircraft's applicable documents with a
//! [`ComplianceLedger`] and produces a [`Summary`]: per-document resolved
//! status, per-variant counts, and any data-integrity problems found in the
//! record set. The function is pure; identical inputs give equal summaries.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::applicability::{applicable_documents, matches};
use crate::domain::date::optional_date;
use crate::domain::{
    Aircraft, ComplianceRecord, Corpus, DocumentDate, DocumentKind, ResolvedStatus, Result,
};
use crate::obs;

/// Record set indexed by (aircraft id, document id).
///
/// When a pair is asserted more than once the last record wins; earlier
/// copies are remembered so summaries can flag them.
#[derive(Debug, Clone, Default)]
pub struct ComplianceLedger {
    records: Vec<ComplianceRecord>,
    index: HashMap<(String, String), usize>,
    duplicates: Vec<(String, String)>,
}

impl ComplianceLedger {
    /// Index `records`, keeping the last record for a repeated pair.
    pub fn new(records: impl IntoIterator<Item = ComplianceRecord>) -> Self {
        let mut ledger = Self::default();
        for record in records {
            let key = (record.aircraft_id.clone(), record.document_id.clone());
            if let Some(&slot) = ledger.index.get(&key) {
                ledger.records[slot] = record;
                ledger.duplicates.push(key);
            } else {
                ledger.index.insert(key, ledger.records.len());
                ledger.records.push(record);
            }
        }
        ledger
    }

    /// Effective record for one (aircraft, document) pair.
    pub fn get(&self, aircraft_id: &str, document_id: &str) -> Option<&ComplianceRecord> {
        self.index
            .get(&(aircraft_id.to_string(), document_id.to_string()))
            .map(|&i| &self.records[i])
    }

    /// Effective records for one aircraft, in first-assertion order.
    pub fn records_for<'a>(
        &'a self,
        aircraft_id: &'a str,
    ) -> impl Iterator<Item = &'a ComplianceRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.aircraft_id == aircraft_id)
    }

    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<ComplianceRecord>> for ComplianceLedger {
    fn from(records: Vec<ComplianceRecord>) -> Self {
        Self::new(records)
    }
}

/// Per-variant status counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub compliant: usize,
    pub not_compliant: usize,
    pub pending: usize,
    pub untracked: usize,
    /// Matched documents whose record claims `NotApplicable`.
    pub not_applicable_flagged: usize,
}

impl StatusCounts {
    fn record(&mut self, status: ResolvedStatus) {
        match status {
            ResolvedStatus::Compliant => self.compliant += 1,
            ResolvedStatus::NotCompliant => self.not_compliant += 1,
            ResolvedStatus::Pending => self.pending += 1,
            ResolvedStatus::Untracked => self.untracked += 1,
            ResolvedStatus::NotApplicable => self.not_applicable_flagged += 1,
        }
    }

    fn absorb(&mut self, other: &StatusCounts) {
        self.compliant += other.compliant;
        self.not_compliant += other.not_compliant;
        self.pending += other.pending;
        self.untracked += other.untracked;
        self.not_applicable_flagged += other.not_applicable_flagged;
    }

    pub fn total(&self) -> usize {
        self.compliant
            + self.not_compliant
            + self.pending
            + self.untracked
            + self.not_applicable_flagged
    }

    /// Everything that is not `Compliant`.
    pub fn outstanding(&self) -> usize {
        self.total() - self.compliant
    }
}

/// A data-integrity problem in the compliance records of one aircraft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum IntegrityIssue {
    /// A record exists for a document whose rule does not match the aircraft.
    RecordForNonApplicableDocument {
        aircraft_id: String,
        document_id: String,
    },
    /// A record names a document id missing from the corpus.
    RecordForUnknownDocument {
        aircraft_id: String,
        document_id: String,
    },
    /// A matched document carries a stored `NotApplicable` status.
    NotApplicableButMatched {
        aircraft_id: String,
        document_id: String,
    },
    /// The same pair was asserted more than once; the last record was used.
    DuplicateRecord {
        aircraft_id: String,
        document_id: String,
    },
}

/// One applicable document and its resolved compliance state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub document_id: String,
    pub kind: DocumentKind,
    pub title: String,
    pub issue_date: DocumentDate,
    pub status: ResolvedStatus,
    #[serde(default, with = "optional_date")]
    pub last_completed: Option<NaiveDate>,
    #[serde(default, with = "optional_date")]
    pub next_due: Option<NaiveDate>,
    /// Ids of documents referencing or referenced by this one.
    pub related_to: Vec<String>,
}

/// Compliance summary for one aircraft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub aircraft_id: String,
    pub registration: String,
    pub model: String,
    /// Applicable documents in issue order.
    pub entries: Vec<SummaryEntry>,
    /// Counts for every variant, including variants with no documents.
    pub counts: BTreeMap<DocumentKind, StatusCounts>,
    pub integrity_issues: Vec<IntegrityIssue>,
}

impl Summary {
    pub fn counts_for(&self, kind: DocumentKind) -> StatusCounts {
        self.counts.get(&kind).copied().unwrap_or_default()
    }

    /// Documents of `kind` whose resolved status is anything but `Compliant`.
    pub fn pending_count(&self, kind: DocumentKind) -> usize {
        self.counts_for(kind).outstanding()
    }

    pub fn total_pending(&self) -> usize {
        self.counts.values().map(StatusCounts::outstanding).sum()
    }

    pub fn entry(&self, document_id: &str) -> Option<&SummaryEntry> {
        self.entries.iter().find(|e| e.document_id == document_id)
    }

    pub fn entries_of_kind(&self, kind: DocumentKind) -> impl Iterator<Item = &SummaryEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    pub fn is_fully_compliant(&self) -> bool {
        self.total_pending() == 0 && self.integrity_issues.is_empty()
    }

    /// SHA-256 hex digest of the summary's canonical JSON.
    ///
    /// Equal summaries always produce equal digests, so the value can key
    /// caches and identify exported artifacts.
    pub fn digest(&self) -> Result<String> {
        // `Value` objects keep keys sorted, giving a canonical encoding.
        let canonical = serde_json::to_value(self)?;
        let bytes = serde_json::to_vec(&canonical)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}

/// Summarize compliance for `aircraft` against `corpus` and `ledger`.
pub fn summarize(aircraft: &Aircraft, corpus: &Corpus, ledger: &ComplianceLedger) -> Summary {
    let applicable = applicable_documents(aircraft, corpus);
    let graph = corpus.reference_graph();

    let mut counts: BTreeMap<DocumentKind, StatusCounts> = DocumentKind::ALL
        .into_iter()
        .map(|kind| (kind, StatusCounts::default()))
        .collect();
    let mut integrity_issues = Vec::new();
    let mut entries = Vec::with_capacity(applicable.len());

    for document in &applicable {
        let record = ledger.get(&aircraft.aircraft_id, &document.document_id);
        let status = record
            .map(|r| ResolvedStatus::from(r.status))
            .unwrap_or(ResolvedStatus::Untracked);

        if status == ResolvedStatus::NotApplicable {
            integrity_issues.push(IntegrityIssue::NotApplicableButMatched {
                aircraft_id: aircraft.aircraft_id.clone(),
                document_id: document.document_id.clone(),
            });
        }
        counts.entry(document.kind()).or_default().record(status);

        entries.push(SummaryEntry {
            document_id: document.document_id.clone(),
            kind: document.kind(),
            title: document.title.clone(),
            issue_date: document.issue_date.clone(),
            status,
            last_completed: record.and_then(|r| r.last_completed),
            next_due: record.and_then(|r| r.next_due),
            related_to: graph.related_to(&document.document_id).into_iter().collect(),
        });
    }

    for record in ledger.records_for(&aircraft.aircraft_id) {
        match corpus.get(&record.document_id) {
            None => integrity_issues.push(IntegrityIssue::RecordForUnknownDocument {
                aircraft_id: record.aircraft_id.clone(),
                document_id: record.document_id.clone(),
            }),
            Some(document) if !matches(aircraft, document) => {
                integrity_issues.push(IntegrityIssue::RecordForNonApplicableDocument {
                    aircraft_id: record.aircraft_id.clone(),
                    document_id: record.document_id.clone(),
                })
            }
            Some(_) => {}
        }
    }

    for (aircraft_id, document_id) in &ledger.duplicates {
        if aircraft_id == &aircraft.aircraft_id {
            integrity_issues.push(IntegrityIssue::DuplicateRecord {
                aircraft_id: aircraft_id.clone(),
                document_id: document_id.clone(),
            });
        }
    }

    let summary = Summary {
        aircraft_id: aircraft.aircraft_id.clone(),
        registration: aircraft.registration.clone(),
        model: aircraft.model.clone(),
        entries,
        counts,
        integrity_issues,
    };
    obs::emit_summary_computed(
        &summary.registration,
        summary.entries.len(),
        summary.total_pending(),
        summary.integrity_issues.len(),
    );
    summary
}

/// Sum per-variant counts across several summaries.
pub fn combined_counts<'a>(
    summaries: impl IntoIterator<Item = &'a Summary>,
) -> BTreeMap<DocumentKind, StatusCounts> {
    let mut totals: BTreeMap<DocumentKind, StatusCounts> = DocumentKind::ALL
        .into_iter()
        .map(|kind| (kind, StatusCounts::default()))
        .collect();
    for summary in summaries {
        for (kind, counts) in &summary.counts {
            totals.entry(*kind).or_default().absorb(counts);
        }
    }
    totals
}
