//! Fleet-wide compliance summaries.
//!
//! [`summarize_fleet`] runs one [`summarize`] per aircraft on tokio's blocking
//! pool. Every task shares the same immutable corpus and ledger snapshot
//! through `Arc`; nothing is locked.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use crate::compliance::{combined_counts, summarize, ComplianceLedger, StatusCounts, Summary};
use crate::domain::{Aircraft, Corpus, DocumentKind, FleetDocsError, Result};
use crate::obs;

/// Compliance summaries for a whole fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetReport {
    /// One summary per aircraft, in the order the fleet was supplied.
    pub summaries: Vec<Summary>,
    /// Per-variant counts summed over all aircraft.
    pub totals: BTreeMap<DocumentKind, StatusCounts>,
    /// Registrations whose summary carries integrity issues.
    pub aircraft_with_issues: Vec<String>,
}

impl FleetReport {
    pub fn total_pending(&self) -> usize {
        self.totals.values().map(StatusCounts::outstanding).sum()
    }

    pub fn summary_for(&self, key: &str) -> Option<&Summary> {
        self.summaries.iter().find(|s| {
            s.aircraft_id.eq_ignore_ascii_case(key) || s.registration.eq_ignore_ascii_case(key)
        })
    }
}

/// Summarize every aircraft in `fleet` concurrently.
pub async fn summarize_fleet(
    corpus: Arc<Corpus>,
    ledger: Arc<ComplianceLedger>,
    fleet: Vec<Aircraft>,
) -> Result<FleetReport> {
    let fleet_len = fleet.len();
    let mut join_set = JoinSet::new();
    for (idx, aircraft) in fleet.into_iter().enumerate() {
        let corpus = Arc::clone(&corpus);
        let ledger = Arc::clone(&ledger);
        join_set.spawn_blocking(move || (idx, summarize(&aircraft, &corpus, &ledger)));
    }

    let mut ordered: Vec<Option<Summary>> = vec![None; fleet_len];
    while let Some(joined) = join_set.join_next().await {
        let (idx, summary) =
            joined.map_err(|e| FleetDocsError::Fleet(format!("summary task join error: {e}")))?;
        ordered[idx] = Some(summary);
    }

    let summaries = ordered
        .into_iter()
        .enumerate()
        .map(|(idx, slot)| {
            slot.ok_or_else(|| FleetDocsError::Fleet(format!("missing summary for aircraft #{idx}")))
        })
        .collect::<Result<Vec<_>>>()?;

    let totals = combined_counts(&summaries);
    let aircraft_with_issues = summaries
        .iter()
        .filter(|s| !s.integrity_issues.is_empty())
        .map(|s| s.registration.clone())
        .collect();

    let report = FleetReport {
        summaries,
        totals,
        aircraft_with_issues,
    };
    obs::emit_fleet_summarized(report.summaries.len(), report.total_pending());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{sample_corpus, sample_fleet, sample_ledger};

    #[tokio::test]
    async fn test_fleet_report_preserves_fleet_order() {
        let corpus = Arc::new(sample_corpus().unwrap());
        let ledger = Arc::new(sample_ledger());
        let report = summarize_fleet(corpus, ledger, sample_fleet()).await.unwrap();
        let regs: Vec<&str> = report
            .summaries
            .iter()
            .map(|s| s.registration.as_str())
            .collect();
        assert_eq!(regs, vec!["HS-TKK", "HS-THB", "HS-TQC"]);
        assert!(report.aircraft_with_issues.is_empty());
    }

    #[tokio::test]
    async fn test_empty_fleet_yields_empty_report() {
        let corpus = Arc::new(sample_corpus().unwrap());
        let report = summarize_fleet(corpus, Arc::new(ComplianceLedger::default()), Vec::new())
            .await
            .unwrap();
        assert!(report.summaries.is_empty());
        assert_eq!(report.total_pending(), 0);
    }
}
