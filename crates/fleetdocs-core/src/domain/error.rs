//! Domain-level error taxonomy for FleetDocs.
//!
//! Only construction-time and lookup failures are errors. Problems scoped to a
//! single document or record (dangling references, undated documents,
//! integrity flags) are reported as diagnostics alongside successful results.

/// FleetDocs domain errors.
#[derive(Debug, thiserror::Error)]
pub enum FleetDocsError {
    #[error("duplicate document id in corpus: {id}")]
    DuplicateDocument { id: String },

    #[error(
        "applicability rule{} has no models and no serial numbers",
        for_document(.document_id)
    )]
    EmptyRule { document_id: Option<String> },

    #[error("document id must not be empty")]
    EmptyDocumentId,

    #[error("document not found in corpus: {0}")]
    UnknownDocument(String),

    #[error("aircraft {registration} has no in-service date")]
    MissingInServiceDate { registration: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("fleet summary failed: {0}")]
    Fleet(String),
}

fn for_document(document_id: &Option<String>) -> String {
    match document_id {
        Some(id) => format!(" for document {id}"),
        None => String::new(),
    }
}

/// Result type for FleetDocs domain operations.
pub type Result<T> = std::result::Result<T, FleetDocsError>;
