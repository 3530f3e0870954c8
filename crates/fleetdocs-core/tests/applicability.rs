//! Integration tests for applicability matching and cutoff queries.

use chrono::NaiveDate;
use fleetdocs_core::sample::{sample_corpus, sample_fleet};
use fleetdocs_core::{
    applicable_documents, documents_before_cutoff, documents_before_in_service,
    documents_for_prospective, load_corpus, matches, Aircraft, ApplicabilityRule, Document,
    DocumentDate, DocumentKind,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Matching ────────────────────────────────────────────────────────────

#[test]
fn applicable_documents_only_contains_matches_in_issue_order() {
    let corpus = sample_corpus().unwrap();
    for aircraft in sample_fleet() {
        let applicable = applicable_documents(&aircraft, &corpus);
        assert!(applicable.iter().all(|d| matches(&aircraft, d)));

        let expected_count = corpus.iter().filter(|d| matches(&aircraft, d)).count();
        assert_eq!(applicable.len(), expected_count);

        for pair in applicable.windows(2) {
            let a = (pair[0].issue_date.known(), &pair[0].document_id);
            let b = (pair[1].issue_date.known(), &pair[1].document_id);
            assert!(a <= b, "{:?} should not precede {:?}", a, b);
        }
    }
}

#[test]
fn triple_seven_sees_its_documents() {
    let corpus = sample_corpus().unwrap();
    let hs_tkk = &sample_fleet()[0];
    let ids: Vec<&str> = applicable_documents(hs_tkk, &corpus)
        .into_iter()
        .map(|d| d.document_id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "SB-777-57-0125",
            "TO-2023-A01",
            "SB-777-28-001",
            "ED-2024-01",
            "AD-2024-03-10",
            "AD-2025-06-02",
        ]
    );
}

#[test]
fn serial_set_overrides_model_both_ways() {
    let doc = Document::service_bulletin("SB-SERIAL", "Serial specific")
        .unwrap()
        .with_issue_date(ymd(2024, 1, 1))
        .with_applicability(ApplicabilityRule::new(["777-300ER"], ["41682"]).unwrap());

    let other_model_same_serial = Aircraft::new("X1", "HS-XXX", "Boeing", "787-9", "41682");
    let same_model_other_serial = Aircraft::new("X2", "HS-YYY", "Boeing", "777-300ER", "41683");

    assert!(matches(&other_model_same_serial, &doc));
    assert!(!matches(&same_model_other_serial, &doc));
}

#[test]
fn bypassed_empty_rule_matches_no_aircraft() {
    let mut doc = Document::engineering_directive("ED-OPEN", "Unconstrained")
        .unwrap()
        .with_applicability(ApplicabilityRule::for_models(["777-300ER"]).unwrap());
    doc.applicability = ApplicabilityRule::default();

    assert!(doc.validate().is_err());
    for aircraft in sample_fleet() {
        assert!(!matches(&aircraft, &doc));
    }
}

// ── Cutoff ──────────────────────────────────────────────────────────────

#[test]
fn ed_issued_after_in_service_date_is_excluded() {
    let corpus = sample_corpus().unwrap();
    let aircraft = Aircraft::new("A200", "HS-TXA", "Boeing", "777-300ER", "99999")
        .with_in_service_date(ymd(2023, 11, 1));

    let report = documents_before_in_service(&aircraft, &corpus).unwrap();
    assert_eq!(report.cutoff, ymd(2023, 11, 1));
    assert!(!report.document_ids().contains(&"ED-2024-01"));
    assert_eq!(
        report.document_ids(),
        vec!["SB-777-57-0125", "TO-2023-A01"]
    );
    assert_eq!(report.of_kind(DocumentKind::EngineeringDirective).count(), 0);
}

#[test]
fn cutoff_filter_is_idempotent() {
    let corpus = sample_corpus().unwrap();
    let cutoff = ymd(2024, 2, 12);
    let first = documents_before_cutoff(&corpus, cutoff);
    let second = documents_before_cutoff(first.documents.iter().copied(), cutoff);
    assert_eq!(first.document_ids(), second.document_ids());
    assert!(second.excluded.is_empty());
}

#[test]
fn undated_documents_are_reported_not_dropped() {
    let rule = || ApplicabilityRule::for_models(["A350-900"]).unwrap();
    let corpus = load_corpus(vec![
        Document::engineering_directive("ED-DATED", "dated")
            .unwrap()
            .with_issue_date(ymd(2020, 1, 1))
            .with_applicability(rule()),
        Document::engineering_directive("ED-MISSING", "no date")
            .unwrap()
            .with_applicability(rule()),
        Document::engineering_directive("ED-BAD", "garbled")
            .unwrap()
            .with_issue_date(DocumentDate::parse("sometime in 2021"))
            .with_applicability(rule()),
    ])
    .unwrap();

    let report = documents_before_cutoff(&corpus, ymd(2024, 1, 1));
    assert_eq!(report.document_ids(), vec!["ED-DATED"]);
    let excluded: Vec<&str> = report
        .excluded
        .iter()
        .map(|d| d.document_id.as_str())
        .collect();
    assert_eq!(excluded, vec!["ED-MISSING", "ED-BAD"]);
}

#[test]
fn prospective_aircraft_uses_model_and_date() {
    let corpus = sample_corpus().unwrap();
    let report = documents_for_prospective("A350-900", ymd(2024, 3, 1), &corpus);
    assert_eq!(
        report.document_ids(),
        vec!["TO-2023-A02", "SB-A350-57-001", "ED-2024-02"]
    );
}
