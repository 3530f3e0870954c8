//! Built-in demonstration data: a small widebody fleet, the documents that
//! concern it, and a handful of compliance records.
//!
//! The data is fixed (no randomness), so tests and the CLI `--demo` mode see
//! identical inputs on every run.

use chrono::NaiveDate;

use crate::compliance::ComplianceLedger;
use crate::domain::{
    Aircraft, ApplicabilityRule, ComplianceRecord, ComplianceStatus, Corpus, Document,
    DocumentDetails, Result,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    // Literal dates below are all valid.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn sample_fleet() -> Vec<Aircraft> {
    vec![
        Aircraft::new("A101", "HS-TKK", "Boeing", "777-300ER", "41682")
            .with_in_service_date(ymd(2014, 1, 15)),
        Aircraft::new("A102", "HS-THB", "Airbus", "A350-900", "106")
            .with_in_service_date(ymd(2016, 9, 1)),
        Aircraft::new("A103", "HS-TQC", "Boeing", "787-8", "35308")
            .with_in_service_date(ymd(2013, 9, 16)),
    ]
}

pub fn sample_documents() -> Result<Vec<Document>> {
    Ok(vec![
        Document::airworthiness_directive("AD-2025-06-02", "Wing Skin Inspection")?
            .with_details(DocumentDetails::AirworthinessDirective {
                ad_type: Some("Final Rule".to_string()),
                ata_chapter: Some("57".to_string()),
                supersedes: Vec::new(),
            })
            .with_authority("FAA")
            .with_issue_date(ymd(2025, 4, 23))
            .with_description("Repetitive inspections for cracking on the upper wing skin.")
            .with_applicability(ApplicabilityRule::for_models([
                "777-200",
                "777-300ER",
                "777F",
            ])?)
            .with_reference("SB-777-57-0125"),
        Document::airworthiness_directive("AD-2024-03-10", "Engine Fire Suppression System")?
            .with_details(DocumentDetails::AirworthinessDirective {
                ad_type: Some("Emergency".to_string()),
                ata_chapter: Some("26".to_string()),
                supersedes: Vec::new(),
            })
            .with_authority("EASA")
            .with_issue_date(ymd(2024, 3, 10))
            .with_description("Inspection and possible replacement of fire suppression bottles.")
            .with_applicability(ApplicabilityRule::for_models(["777-300ER", "787-8"])?),
        Document::airworthiness_directive("AD-2024-03-11", "Landing Gear Actuator")?
            .with_details(DocumentDetails::AirworthinessDirective {
                ad_type: Some("Final Rule".to_string()),
                ata_chapter: Some("32".to_string()),
                supersedes: Vec::new(),
            })
            .with_authority("EASA")
            .with_issue_date(ymd(2024, 3, 15))
            .with_description("Replacement of a specific landing gear actuator part.")
            .with_applicability(ApplicabilityRule::for_models(["A350-900"])?),
        Document::service_bulletin("SB-777-28-001", "Hydraulic Pump Seal Replacement")?
            .with_details(DocumentDetails::ServiceBulletin {
                revision: Some("Rev. 1".to_string()),
                bulletin_type: None,
            })
            .with_authority("Boeing")
            .with_issue_date(ymd(2024, 1, 20))
            .with_description("Recommended replacement of hydraulic pump seals to prevent leakage.")
            .with_applicability(ApplicabilityRule::for_models(["777-300ER"])?),
        Document::service_bulletin("SB-777-57-0125", "Wing Skin Inspection")?
            .with_details(DocumentDetails::ServiceBulletin {
                revision: Some("Rev. 0".to_string()),
                bulletin_type: Some("Alert Requirements Bulletin".to_string()),
            })
            .with_authority("Boeing")
            .with_issue_date(ymd(2023, 7, 25))
            .with_description("Details for wing skin inspection procedure.")
            .with_applicability(ApplicabilityRule::for_models(["777-300ER"])?)
            .with_reference("AD-2025-06-02"),
        Document::service_bulletin("SB-A350-57-001", "Fuselage Frame Repair")?
            .with_details(DocumentDetails::ServiceBulletin {
                revision: Some("Rev. 2".to_string()),
                bulletin_type: None,
            })
            .with_authority("Airbus")
            .with_issue_date(ymd(2023, 11, 10))
            .with_description("Details a repair procedure for a fuselage frame.")
            .with_applicability(ApplicabilityRule::for_models(["A350-900"])?),
        Document::technical_order("TO-2023-A01", "Cockpit Display Unit Update")?
            .with_details(DocumentDetails::TechnicalOrder {
                revision: Some("Ver. 1.0".to_string()),
                originator: Some("Thai Airways Engineering".to_string()),
            })
            .with_authority("Thai Airways Engineering")
            .with_issue_date(ymd(2023, 8, 1))
            .with_description("Procedure for updating cockpit display unit software.")
            .with_applicability(ApplicabilityRule::for_models(["777-300ER"])?),
        Document::technical_order("TO-2023-A02", "Cabin Lighting Modification")?
            .with_details(DocumentDetails::TechnicalOrder {
                revision: Some("Ver. 1.1".to_string()),
                originator: Some("Thai Airways Engineering".to_string()),
            })
            .with_authority("Thai Airways Engineering")
            .with_issue_date(ymd(2023, 9, 5))
            .with_description("Instructions for installing new LED cabin lighting.")
            .with_applicability(ApplicabilityRule::for_models(["A350-900"])?),
        Document::engineering_directive("ED-2024-01", "Inspection of Landing Gear Latch")?
            .with_issue_date(ymd(2024, 2, 10))
            .with_description("Mandatory inspection of the landing gear latch mechanism.")
            .with_applicability(ApplicabilityRule::for_models(["777-300ER", "787-8"])?),
        Document::engineering_directive("ED-2024-02", "Fuel Tank Vent System Check")?
            .with_issue_date(ymd(2024, 2, 15))
            .with_description("Check of the fuel tank vent system for blockages.")
            .with_applicability(ApplicabilityRule::for_models(["A350-900"])?),
    ])
}

pub fn sample_corpus() -> Result<Corpus> {
    Corpus::load(sample_documents()?)
}

pub fn sample_records() -> Vec<ComplianceRecord> {
    vec![
        ComplianceRecord::new("A101", "AD-2025-06-02", ComplianceStatus::Compliant)
            .with_last_completed(ymd(2025, 5, 1))
            .with_next_due(ymd(2026, 5, 1)),
        ComplianceRecord::new("A101", "AD-2024-03-10", ComplianceStatus::Compliant)
            .with_last_completed(ymd(2024, 3, 15)),
        ComplianceRecord::new("A103", "AD-2024-03-10", ComplianceStatus::Compliant)
            .with_last_completed(ymd(2024, 3, 16)),
        ComplianceRecord::new("A102", "AD-2024-03-11", ComplianceStatus::Compliant)
            .with_last_completed(ymd(2024, 4, 1)),
    ]
}

pub fn sample_ledger() -> ComplianceLedger {
    ComplianceLedger::new(sample_records())
}
