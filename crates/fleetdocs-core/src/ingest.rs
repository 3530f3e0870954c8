//! JSON ingestion of caller-authored documents, fleet entries and records.
//!
//! Each input is a JSON array, or an object holding the array under a named
//! key (`documents`, `fleet`, `compliance`). Elements are decoded one at a
//! time: a malformed element becomes an [`IngestDiagnostic`] and the rest of
//! the batch still loads. Only an unreadable file or a wrong top-level shape
//! fails the whole call.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::{Aircraft, ComplianceRecord, Document, FleetDocsError, Result};

/// A single element rejected during ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestDiagnostic {
    /// Position of the element in the input array.
    pub index: usize,
    /// Identifier of the element when one could be read.
    pub id: Option<String>,
    pub message: String,
}

/// Decoded elements plus the diagnostics for those that were rejected.
#[derive(Debug, Clone)]
pub struct IngestReport<T> {
    pub items: Vec<T>,
    pub diagnostics: Vec<IngestDiagnostic>,
}

impl<T> IngestReport<T> {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

fn top_level_array(mut value: Value, key: &str) -> Result<Vec<Value>> {
    let shape_error = || {
        FleetDocsError::Serialization(<serde_json::Error as serde::de::Error>::custom(format!(
            "expected a JSON array or an object with a '{key}' array"
        )))
    };
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(ref mut map) => match map.remove(key) {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(shape_error()),
        },
        _ => Err(shape_error()),
    }
}

fn decode_each<T, F>(items: Vec<Value>, id_field: &str, validate: F) -> IngestReport<T>
where
    T: DeserializeOwned,
    F: Fn(&T) -> Result<()>,
{
    let mut report = IngestReport {
        items: Vec::with_capacity(items.len()),
        diagnostics: Vec::new(),
    };

    for (index, value) in items.into_iter().enumerate() {
        let id = value
            .get(id_field)
            .and_then(Value::as_str)
            .map(str::to_string);
        let outcome = serde_json::from_value::<T>(value)
            .map_err(FleetDocsError::from)
            .and_then(|item| validate(&item).map(|()| item));
        match outcome {
            Ok(item) => report.items.push(item),
            Err(err) => {
                warn!(
                    event = "ingest.rejected",
                    index = index,
                    id = ?id,
                    error = %err,
                    "skipping malformed element"
                );
                report.diagnostics.push(IngestDiagnostic {
                    index,
                    id,
                    message: err.to_string(),
                });
            }
        }
    }
    report
}

/// Decode documents, rejecting those with a blank id or an empty rule.
pub fn load_documents_json(json: &str) -> Result<IngestReport<Document>> {
    let items = top_level_array(serde_json::from_str(json)?, "documents")?;
    Ok(decode_each(items, "document_id", Document::validate))
}

/// Decode fleet registry entries.
pub fn load_fleet_json(json: &str) -> Result<IngestReport<Aircraft>> {
    let items = top_level_array(serde_json::from_str(json)?, "fleet")?;
    Ok(decode_each(items, "registration", |_: &Aircraft| Ok(())))
}

/// Decode compliance records.
pub fn load_compliance_json(json: &str) -> Result<IngestReport<ComplianceRecord>> {
    let items = top_level_array(serde_json::from_str(json)?, "compliance")?;
    Ok(decode_each(items, "document_id", |_: &ComplianceRecord| {
        Ok(())
    }))
}

pub fn read_documents(path: &Path) -> Result<IngestReport<Document>> {
    load_documents_json(&std::fs::read_to_string(path)?)
}

pub fn read_fleet(path: &Path) -> Result<IngestReport<Aircraft>> {
    load_fleet_json(&std::fs::read_to_string(path)?)
}

pub fn read_compliance(path: &Path) -> Result<IngestReport<ComplianceRecord>> {
    load_compliance_json(&std::fs::read_to_string(path)?)
}
