//! Flattened export artifacts for a compliance [`Summary`].
//!
//! The CSV layout is fixed: one row per applicable document with the columns
//! in [`CSV_HEADERS`]. Dates are ISO `YYYY-MM-DD` or empty.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::compliance::{Summary, SummaryEntry};

pub const CSV_HEADERS: [&str; 7] = [
    "Document_Type",
    "Document_ID",
    "Title",
    "Status",
    "Date_Due",
    "Last_Completed",
    "Related_To",
];

fn iso(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn csv_row(entry: &SummaryEntry) -> [String; 7] {
    [
        entry.kind.code().to_string(),
        entry.document_id.clone(),
        entry.title.clone(),
        entry.status.to_string(),
        iso(entry.next_due),
        iso(entry.last_completed),
        entry.related_to.join("; "),
    ]
}

/// Write `summary` as CSV (header plus one row per entry) to `writer`.
pub fn write_summary_csv<W: Write>(summary: &Summary, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(CSV_HEADERS)
        .context("write csv header")?;
    for entry in &summary.entries {
        csv_writer
            .write_record(csv_row(entry))
            .with_context(|| format!("write csv row for {}", entry.document_id))?;
    }
    csv_writer.flush().context("flush csv writer")?;
    Ok(())
}

/// Render `summary` as a CSV string.
pub fn summary_csv_string(summary: &Summary) -> Result<String> {
    let mut buffer = Vec::new();
    write_summary_csv(summary, &mut buffer)?;
    String::from_utf8(buffer).context("csv output is not valid utf-8")
}

/// Write `summary` as a CSV file.
pub fn write_summary_csv_file(path: &Path, summary: &Summary) -> Result<()> {
    let file =
        std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_summary_csv(summary, file)
}

/// Write `summary` as pretty JSON.
pub fn write_summary_json(path: &Path, summary: &Summary) -> Result<()> {
    let content = serde_json::to_string_pretty(summary).context("serialize summary")?;
    std::fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::{summarize, ComplianceLedger};
    use crate::domain::{
        load_corpus, Aircraft, ApplicabilityRule, ComplianceRecord, ComplianceStatus, Document,
    };

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn summary() -> Summary {
        let rule = || ApplicabilityRule::for_models(["777-300ER"]).unwrap();
        let corpus = load_corpus(vec![
            Document::airworthiness_directive("AD-1", "Wing Skin, Upper")
                .unwrap()
                .with_issue_date(ymd(2025, 4, 23))
                .with_applicability(rule())
                .with_reference("SB-1")
                .with_reference("SB-2"),
            Document::service_bulletin("SB-1", "Wing SB")
                .unwrap()
                .with_issue_date(ymd(2023, 7, 25))
                .with_applicability(rule()),
        ])
        .unwrap();
        let ledger = ComplianceLedger::new(vec![ComplianceRecord::new(
            "A101",
            "AD-1",
            ComplianceStatus::Compliant,
        )
        .with_last_completed(ymd(2025, 5, 1))
        .with_next_due(ymd(2026, 5, 1))]);
        let aircraft = Aircraft::new("A101", "HS-TKK", "Boeing", "777-300ER", "41682");
        summarize(&aircraft, &corpus, &ledger)
    }

    #[test]
    fn test_csv_has_fixed_header_and_one_row_per_entry() {
        let csv = summary_csv_string(&summary()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Document_Type,Document_ID,Title,Status,Date_Due,Last_Completed,Related_To"
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "SB,SB-1,Wing SB,Untracked,,,AD-1");
        assert_eq!(
            lines[2],
            "AD,AD-1,\"Wing Skin, Upper\",Compliant,2026-05-01,2025-05-01,SB-1; SB-2"
        );
    }

    #[test]
    fn test_json_artifact_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let original = summary();
        write_summary_json(&path, &original).unwrap();
        let back: Summary =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_csv_file_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        write_summary_csv_file(&path, &summary()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Document_Type,"));
    }
}
