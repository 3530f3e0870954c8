//! End-to-end compliance summaries over the built-in fleet.

use std::sync::Arc;

use chrono::NaiveDate;
use fleetdocs_core::sample::{sample_corpus, sample_fleet, sample_ledger, sample_records};
use fleetdocs_core::{
    summarize, summarize_fleet, summary_csv_string, ComplianceLedger, ComplianceRecord,
    ComplianceStatus, DocumentKind, IntegrityIssue, ResolvedStatus,
};

#[test]
fn triple_seven_wing_skin_ad_is_compliant() {
    let corpus = sample_corpus().unwrap();
    let hs_tkk = &sample_fleet()[0];
    let summary = summarize(hs_tkk, &corpus, &sample_ledger());

    let entry = summary.entry("AD-2025-06-02").unwrap();
    assert_eq!(entry.status, ResolvedStatus::Compliant);
    assert_eq!(entry.next_due, NaiveDate::from_ymd_opt(2026, 5, 1));
    assert_eq!(entry.related_to, vec!["SB-777-57-0125".to_string()]);

    assert_eq!(summary.pending_count(DocumentKind::AirworthinessDirective), 0);
    assert_eq!(summary.pending_count(DocumentKind::ServiceBulletin), 2);
    assert_eq!(summary.pending_count(DocumentKind::TechnicalOrder), 1);
    assert_eq!(summary.pending_count(DocumentKind::EngineeringDirective), 1);
    assert_eq!(summary.total_pending(), 4);
    assert!(summary.integrity_issues.is_empty());
    assert!(!summary.is_fully_compliant());
}

#[test]
fn every_variant_is_counted_even_when_empty() {
    let corpus = sample_corpus().unwrap();
    let hs_tqc = &sample_fleet()[2];
    let summary = summarize(hs_tqc, &corpus, &sample_ledger());

    assert_eq!(summary.counts.len(), DocumentKind::ALL.len());
    assert_eq!(summary.counts_for(DocumentKind::ServiceBulletin).total(), 0);
    assert_eq!(summary.counts_for(DocumentKind::AirworthinessDirective).compliant, 1);
    assert_eq!(summary.entries_of_kind(DocumentKind::EngineeringDirective).count(), 1);
}

#[test]
fn summaries_are_deterministic() {
    let corpus = sample_corpus().unwrap();
    let ledger = sample_ledger();
    for aircraft in sample_fleet() {
        let first = summarize(&aircraft, &corpus, &ledger);
        let second = summarize(&aircraft, &corpus, &ledger);
        assert_eq!(first, second);
        assert_eq!(first.digest().unwrap(), second.digest().unwrap());
        assert_eq!(
            summary_csv_string(&first).unwrap(),
            summary_csv_string(&second).unwrap()
        );
    }
}

#[test]
fn record_changes_move_the_digest() {
    let corpus = sample_corpus().unwrap();
    let hs_tkk = &sample_fleet()[0];
    let before = summarize(hs_tkk, &corpus, &sample_ledger());

    let mut records = sample_records();
    records.push(ComplianceRecord::new(
        "A101",
        "SB-777-28-001",
        ComplianceStatus::Compliant,
    ));
    let after = summarize(hs_tkk, &corpus, &ComplianceLedger::new(records));

    assert_eq!(after.pending_count(DocumentKind::ServiceBulletin), 1);
    assert_ne!(before.digest().unwrap(), after.digest().unwrap());
}

#[test]
fn cross_model_record_is_flagged_for_the_aircraft_it_names() {
    let corpus = sample_corpus().unwrap();
    let mut records = sample_records();
    // An A350 landing-gear AD recorded against the 777.
    records.push(ComplianceRecord::new(
        "A101",
        "AD-2024-03-11",
        ComplianceStatus::Compliant,
    ));
    let ledger = ComplianceLedger::new(records);

    let fleet = sample_fleet();
    let hs_tkk = summarize(&fleet[0], &corpus, &ledger);
    let hs_thb = summarize(&fleet[1], &corpus, &ledger);

    assert_eq!(
        hs_tkk.integrity_issues,
        vec![IntegrityIssue::RecordForNonApplicableDocument {
            aircraft_id: "A101".to_string(),
            document_id: "AD-2024-03-11".to_string(),
        }]
    );
    assert!(hs_thb.integrity_issues.is_empty());
}

#[tokio::test]
async fn fleet_report_totals_match_individual_summaries() {
    let corpus = Arc::new(sample_corpus().unwrap());
    let ledger = Arc::new(sample_ledger());
    let report = summarize_fleet(Arc::clone(&corpus), Arc::clone(&ledger), sample_fleet())
        .await
        .unwrap();

    let individual: Vec<_> = sample_fleet()
        .iter()
        .map(|a| summarize(a, &corpus, &ledger))
        .collect();
    let pending: usize = individual.iter().map(|s| s.total_pending()).sum();
    let ad_compliant: usize = individual
        .iter()
        .map(|s| s.counts_for(DocumentKind::AirworthinessDirective).compliant)
        .sum();
    assert_eq!(report.total_pending(), pending);
    assert_eq!(
        report.totals[&DocumentKind::AirworthinessDirective].compliant,
        ad_compliant
    );
    // Four compliant AD records across the three aircraft.
    assert_eq!(ad_compliant, 4);
    assert_eq!(
        report.summary_for("hs-thb").map(|s| s.aircraft_id.as_str()),
        Some("A102")
    );
}
