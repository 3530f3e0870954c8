//! Compliance assertions joining aircraft to documents.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::date::optional_date;

/// Stored compliance status for an (aircraft, document) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    #[serde(alias = "Complied")]
    Compliant,
    #[serde(alias = "Not Compliant", alias = "Non-Compliant")]
    NotCompliant,
    #[serde(alias = "Open")]
    Pending,
    #[serde(alias = "Not Applicable", alias = "N/A")]
    NotApplicable,
}

/// A compliance assertion for one aircraft against one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceRecord {
    pub aircraft_id: String,
    pub document_id: String,
    pub status: ComplianceStatus,
    #[serde(default, with = "optional_date", alias = "last_completed_date")]
    pub last_completed: Option<NaiveDate>,
    #[serde(default, with = "optional_date", alias = "next_due_date")]
    pub next_due: Option<NaiveDate>,
}

impl ComplianceRecord {
    /// Create a record with no completion or due dates.
    pub fn new(
        aircraft_id: impl Into<String>,
        document_id: impl Into<String>,
        status: ComplianceStatus,
    ) -> Self {
        Self {
            aircraft_id: aircraft_id.into(),
            document_id: document_id.into(),
            status,
            last_completed: None,
            next_due: None,
        }
    }

    /// Date the required action was last performed.
    pub fn with_last_completed(mut self, date: NaiveDate) -> Self {
        self.last_completed = Some(date);
        self
    }

    /// Date the next repetition is due.
    pub fn with_next_due(mut self, date: NaiveDate) -> Self {
        self.next_due = Some(date);
        self
    }
}

/// Status of an applicable document after joining with the record set.
///
/// `Untracked` means no record exists for the pair; it is distinct from a
/// stored `NotApplicable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolvedStatus {
    Compliant,
    NotCompliant,
    Pending,
    NotApplicable,
    Untracked,
}

impl ResolvedStatus {
    /// Anything but `Compliant` still needs attention.
    pub fn is_pending(self) -> bool {
        self != ResolvedStatus::Compliant
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResolvedStatus::Compliant => "Compliant",
            ResolvedStatus::NotCompliant => "NotCompliant",
            ResolvedStatus::Pending => "Pending",
            ResolvedStatus::NotApplicable => "NotApplicable",
            ResolvedStatus::Untracked => "Untracked",
        }
    }
}

impl From<ComplianceStatus> for ResolvedStatus {
    fn from(status: ComplianceStatus) -> Self {
        match status {
            ComplianceStatus::Compliant => ResolvedStatus::Compliant,
            ComplianceStatus::NotCompliant => ResolvedStatus::NotCompliant,
            ComplianceStatus::Pending => ResolvedStatus::Pending,
            ComplianceStatus::NotApplicable => ResolvedStatus::NotApplicable,
        }
    }
}

impl fmt::Display for ResolvedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
