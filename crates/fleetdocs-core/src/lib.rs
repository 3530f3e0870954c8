//! FleetDocs Core Library
//!
//! Resolves which Airworthiness Directives, Service Bulletins, Technical
//! Orders and Engineering Directives apply to which aircraft, follows
//! cross-document references, and aggregates per-aircraft compliance.
//!
//! Every query is a synchronous function over caller-supplied, in-memory
//! data; only [`fleet::summarize_fleet`] is async, and it just fans the pure
//! per-aircraft summary out over tokio's blocking pool.

pub mod applicability;
pub mod compliance;
pub mod domain;
pub mod export;
pub mod fleet;
pub mod ingest;
pub mod obs;
pub mod references;
pub mod sample;
pub mod telemetry;

pub use domain::{
    load_corpus, parse_calendar_date, Aircraft, AircraftStatus, ApplicabilityRule,
    ComplianceRecord, ComplianceStatus, Corpus, Document, DocumentDate, DocumentDetails,
    DocumentKind, FleetDocsError, ResolvedStatus, Result,
};

pub use applicability::{
    applicable_documents, documents_before_cutoff, documents_before_in_service,
    documents_for_prospective, matches, CutoffReport, DateDiagnostic, DateProblem,
};
pub use compliance::{
    combined_counts, summarize, ComplianceLedger, IntegrityIssue, StatusCounts, Summary,
    SummaryEntry,
};
pub use export::{
    summary_csv_string, write_summary_csv, write_summary_csv_file, write_summary_json,
    CSV_HEADERS,
};
pub use fleet::{summarize_fleet, FleetReport};
pub use ingest::{
    load_compliance_json, load_documents_json, load_fleet_json, read_compliance, read_documents,
    read_fleet, IngestDiagnostic, IngestReport,
};
pub use obs::QuerySpan;
pub use references::{
    resolve_closure, resolve_related, DanglingReference, ReferenceClosure, ReferenceGraph,
    TraversalDirection,
};
pub use telemetry::init_tracing;

/// FleetDocs version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
