//! Plain-text rendering for terminal output.

use fleetdocs_core::{
    CutoffReport, Document, DocumentDate, DocumentKind, FleetReport, ReferenceClosure, Summary,
};

fn date_text(date: &DocumentDate) -> String {
    match date {
        DocumentDate::Known(d) => d.format("%Y-%m-%d").to_string(),
        DocumentDate::Missing => "-".to_string(),
        DocumentDate::Unparseable(raw) => format!("?{raw}"),
    }
}

/// Truncate a string for display
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len).collect();
        format!("{head}...")
    }
}

fn document_line(doc: &Document) -> String {
    format!(
        "  {:<3} {:<16} {:<10} {}\n",
        doc.kind().code(),
        doc.document_id,
        date_text(&doc.issue_date),
        truncate(&doc.title, 48)
    )
}

pub fn render_documents(heading: &str, documents: &[&Document]) -> String {
    let mut out = String::new();
    out.push_str(heading);
    out.push('\n');
    out.push_str(&"=".repeat(heading.len()));
    out.push('\n');
    if documents.is_empty() {
        out.push_str("  (none)\n");
    }
    for doc in documents {
        out.push_str(&document_line(doc));
    }
    out.trim_end().to_string()
}

pub fn render_cutoff(heading: &str, report: &CutoffReport<'_>) -> String {
    let mut out = render_documents(heading, &report.documents);
    if !report.excluded.is_empty() {
        out.push_str("\n\nExcluded (unusable issue date):\n");
        for diag in &report.excluded {
            out.push_str(&format!("  ! {} ({:?})\n", diag.document_id, diag.problem));
        }
    }
    out.trim_end().to_string()
}

pub fn render_closure(closure: &ReferenceClosure<'_>) -> String {
    let mut out = format!("Closure of {} ({:?})\n", closure.anchor, closure.direction);
    for kind in DocumentKind::ALL {
        let group = closure.group(kind);
        out.push_str(&format!("\n{} ({}):\n", kind.label(), group.len()));
        for doc in group {
            out.push_str(&document_line(doc));
        }
    }
    if !closure.dangling.is_empty() {
        out.push_str("\nDangling references:\n");
        for d in &closure.dangling {
            out.push_str(&format!("  ! {} -> {}\n", d.referenced_from, d.missing_id));
        }
    }
    out.trim_end().to_string()
}

pub fn render_summary(summary: &Summary) -> String {
    let mut out = format!(
        "Compliance summary for {} ({}, {})\n",
        summary.registration, summary.aircraft_id, summary.model
    );
    out.push_str(&"=".repeat(out.trim_end().len()));
    out.push('\n');

    for entry in &summary.entries {
        let due = entry
            .next_due
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "  {:<3} {:<16} {:<14} due {:<10} {}\n",
            entry.kind.code(),
            entry.document_id,
            entry.status,
            due,
            truncate(&entry.title, 40)
        ));
    }

    out.push_str("\nPending by type:\n");
    for kind in DocumentKind::ALL {
        let counts = summary.counts_for(kind);
        out.push_str(&format!(
            "  {:<3} pending {:>3} of {:>3}\n",
            kind.code(),
            counts.outstanding(),
            counts.total()
        ));
    }

    if !summary.integrity_issues.is_empty() {
        out.push_str("\nIntegrity issues:\n");
        for issue in &summary.integrity_issues {
            out.push_str(&format!("  ! {:?}\n", issue));
        }
    }
    out.trim_end().to_string()
}

pub fn render_fleet(report: &FleetReport) -> String {
    let mut out = String::new();
    out.push_str("Fleet compliance\n");
    out.push_str("================\n");
    out.push_str(&format!(
        "  {:<10} {:<6} {:<12} {:>4} {:>4} {:>4} {:>4} {:>6}\n",
        "REG", "ID", "MODEL", "AD", "SB", "TO", "ED", "ISSUES"
    ));
    for s in &report.summaries {
        out.push_str(&format!(
            "  {:<10} {:<6} {:<12} {:>4} {:>4} {:>4} {:>4} {:>6}\n",
            s.registration,
            s.aircraft_id,
            s.model,
            s.pending_count(DocumentKind::AirworthinessDirective),
            s.pending_count(DocumentKind::ServiceBulletin),
            s.pending_count(DocumentKind::TechnicalOrder),
            s.pending_count(DocumentKind::EngineeringDirective),
            s.integrity_issues.len()
        ));
    }
    out.push_str(&format!("\ntotal pending: {}", report.total_pending()));
    out
}
