//! Domain models for FleetDocs.
//!
//! Canonical definitions for the core entities:
//! - `Aircraft`: a fleet registry entry
//! - `Document`: an AD, SB, TO or ED with its applicability rule and references
//! - `ComplianceRecord`: a compliance assertion for an (aircraft, document) pair
//! - `Corpus`: the validated document collection for a query session

pub mod aircraft;
pub mod compliance;
pub mod corpus;
pub mod date;
pub mod document;
pub mod error;

pub use aircraft::{Aircraft, AircraftStatus};
pub use compliance::{ComplianceRecord, ComplianceStatus, ResolvedStatus};
pub use corpus::{load_corpus, Corpus};
pub use date::{parse_calendar_date, DocumentDate};
pub use document::{ApplicabilityRule, Document, DocumentDetails, DocumentKind};
pub use error::{FleetDocsError, Result};
