//! Structured observability hooks for FleetDocs queries.
//!
//! This module provides:
//! - Query-scoped tracing spans via the `QuerySpan` RAII guard
//! - Emission functions for the resolution steps: corpus load, applicability,
//!   cutoff, closure and summary
//!
//! Events are emitted at `debug!`/`info!` level with an `event` field so log
//! pipelines can filter on it. For JSON output, initialise tracing with
//! `json = true` (see [`crate::telemetry::init_tracing`]).

use chrono::NaiveDate;
use tracing::{debug, info};

/// RAII guard that enters a query-scoped tracing span.
///
/// # Example
///
/// ```ignore
/// let _span = QuerySpan::enter("summary", "HS-TKK");
/// // events emitted here carry query = "summary", subject = "HS-TKK"
/// ```
pub struct QuerySpan {
    _span: tracing::span::EnteredSpan,
}

impl QuerySpan {
    pub fn enter(query: &str, subject: &str) -> Self {
        let span = tracing::info_span!("fleetdocs.query", query = %query, subject = %subject);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: corpus validated and indexed.
pub fn emit_corpus_loaded(documents: usize, references: usize) {
    info!(
        event = "corpus.loaded",
        documents = documents,
        references = references,
    );
}

/// Emit event: applicable documents computed for one aircraft.
pub fn emit_applicability_resolved(registration: &str, candidates: usize, applicable: usize) {
    debug!(
        event = "applicability.resolved",
        registration = %registration,
        candidates = candidates,
        applicable = applicable,
    );
}

/// Emit event: cutoff filter applied.
pub fn emit_cutoff_applied(cutoff: NaiveDate, kept: usize, excluded: usize) {
    debug!(
        event = "cutoff.applied",
        cutoff = %cutoff,
        kept = kept,
        excluded = excluded,
    );
}

/// Emit event: reference closure resolved for an anchor.
pub fn emit_closure_resolved(anchor: &str, resolved: usize, dangling: usize) {
    info!(
        event = "closure.resolved",
        anchor = %anchor,
        resolved = resolved,
        dangling = dangling,
    );
}

/// Emit event: compliance summary computed for one aircraft.
pub fn emit_summary_computed(registration: &str, documents: usize, pending: usize, issues: usize) {
    info!(
        event = "summary.computed",
        registration = %registration,
        documents = documents,
        pending = pending,
        integrity_issues = issues,
    );
}

/// Emit event: fleet-wide summary finished.
pub fn emit_fleet_summarized(aircraft: usize, pending: usize) {
    info!(event = "fleet.summarized", aircraft = aircraft, pending = pending);
}
