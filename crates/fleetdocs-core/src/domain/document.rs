//! Regulatory and engineering documents and their applicability rules.
//!
//! Every document shares a base shape (id, title, authority, date, rule,
//! outgoing references). Variant-specific fields live in [`DocumentDetails`],
//! whose serde tag (`"kind"`) doubles as the document discriminant.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::date::DocumentDate;
use crate::domain::error::{FleetDocsError, Result};

/// Document variant discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    #[serde(rename = "AD")]
    AirworthinessDirective,
    #[serde(rename = "SB")]
    ServiceBulletin,
    #[serde(rename = "TO")]
    TechnicalOrder,
    #[serde(rename = "ED")]
    EngineeringDirective,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::AirworthinessDirective,
        DocumentKind::ServiceBulletin,
        DocumentKind::TechnicalOrder,
        DocumentKind::EngineeringDirective,
    ];

    /// Short code used in exports and document ids: `AD`, `SB`, `TO`, `ED`.
    pub fn code(self) -> &'static str {
        match self {
            DocumentKind::AirworthinessDirective => "AD",
            DocumentKind::ServiceBulletin => "SB",
            DocumentKind::TechnicalOrder => "TO",
            DocumentKind::EngineeringDirective => "ED",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::AirworthinessDirective => "Airworthiness Directive",
            DocumentKind::ServiceBulletin => "Service Bulletin",
            DocumentKind::TechnicalOrder => "Technical Order",
            DocumentKind::EngineeringDirective => "Engineering Directive",
        }
    }

    /// Parse a short code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

/// Which aircraft a document concerns.
///
/// A non-empty serial set takes precedence over the model set. A rule with
/// both sets empty matches nothing; [`ApplicabilityRule::new`] rejects it, and
/// the matcher still fails closed if one is built through `Default`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicabilityRule {
    #[serde(default, alias = "aircraft_models")]
    pub models: BTreeSet<String>,
    #[serde(default)]
    pub serial_numbers: BTreeSet<String>,
}

impl ApplicabilityRule {
    /// Build a rule, failing with `EmptyRule` when both sets are empty.
    pub fn new<M, S>(models: M, serial_numbers: S) -> Result<Self>
    where
        M: IntoIterator,
        M::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        let rule = Self {
            models: models.into_iter().map(Into::into).collect(),
            serial_numbers: serial_numbers.into_iter().map(Into::into).collect(),
        };
        if rule.is_empty() {
            return Err(FleetDocsError::EmptyRule { document_id: None });
        }
        Ok(rule)
    }

    /// Rule matching every airframe of the given models.
    pub fn for_models<M>(models: M) -> Result<Self>
    where
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Self::new(models, std::iter::empty::<String>())
    }

    /// Rule matching only the listed serial numbers.
    pub fn for_serials<S>(serial_numbers: S) -> Result<Self>
    where
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self::new(std::iter::empty::<String>(), serial_numbers)
    }

    /// True when neither models nor serials are listed.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty() && self.serial_numbers.is_empty()
    }

    /// True when the rule names specific serial numbers.
    pub fn is_serial_restricted(&self) -> bool {
        !self.serial_numbers.is_empty()
    }
}

/// Variant-specific document fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DocumentDetails {
    #[serde(rename = "AD")]
    AirworthinessDirective {
        /// e.g. "Final Rule", "Emergency".
        #[serde(default)]
        ad_type: Option<String>,
        #[serde(default)]
        ata_chapter: Option<String>,
        /// Ids of earlier ADs this one supersedes.
        #[serde(default)]
        supersedes: Vec<String>,
    },
    #[serde(rename = "SB")]
    ServiceBulletin {
        #[serde(default)]
        revision: Option<String>,
        /// e.g. "Alert Requirements Bulletin".
        #[serde(default)]
        bulletin_type: Option<String>,
    },
    #[serde(rename = "TO")]
    TechnicalOrder {
        #[serde(default)]
        revision: Option<String>,
        #[serde(default)]
        originator: Option<String>,
    },
    #[serde(rename = "ED")]
    EngineeringDirective {
        #[serde(default)]
        version: Option<String>,
    },
}

impl DocumentDetails {
    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentDetails::AirworthinessDirective { .. } => DocumentKind::AirworthinessDirective,
            DocumentDetails::ServiceBulletin { .. } => DocumentKind::ServiceBulletin,
            DocumentDetails::TechnicalOrder { .. } => DocumentKind::TechnicalOrder,
            DocumentDetails::EngineeringDirective { .. } => DocumentKind::EngineeringDirective,
        }
    }

    /// Details with every optional field empty.
    pub fn empty(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::AirworthinessDirective => DocumentDetails::AirworthinessDirective {
                ad_type: None,
                ata_chapter: None,
                supersedes: Vec::new(),
            },
            DocumentKind::ServiceBulletin => DocumentDetails::ServiceBulletin {
                revision: None,
                bulletin_type: None,
            },
            DocumentKind::TechnicalOrder => DocumentDetails::TechnicalOrder {
                revision: None,
                originator: None,
            },
            DocumentKind::EngineeringDirective => {
                DocumentDetails::EngineeringDirective { version: None }
            }
        }
    }
}

/// An AD, SB, TO or ED record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique key within a corpus, e.g. `"AD-2025-06-02"`.
    pub document_id: String,
    pub title: String,
    #[serde(default)]
    pub issuing_authority: String,
    /// Issue date, or effective date for ADs.
    #[serde(default, alias = "effective_date")]
    pub issue_date: DocumentDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub applicability: ApplicabilityRule,
    /// Outgoing references to other document ids.
    #[serde(default)]
    pub references: BTreeSet<String>,
    #[serde(flatten)]
    pub details: DocumentDetails,
}

impl Document {
    /// Create a document with empty metadata and no applicability.
    ///
    /// Callers must attach a rule via [`Document::with_applicability`];
    /// [`Corpus::load`](crate::domain::Corpus::load) rejects a document
    /// without one.
    pub fn new(
        details: DocumentDetails,
        document_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<Self> {
        let document_id = document_id.into();
        if document_id.trim().is_empty() {
            return Err(FleetDocsError::EmptyDocumentId);
        }
        Ok(Self {
            document_id,
            title: title.into(),
            issuing_authority: String::new(),
            issue_date: DocumentDate::Missing,
            description: String::new(),
            applicability: ApplicabilityRule::default(),
            references: BTreeSet::new(),
            details,
        })
    }

    /// Create an AD with empty details.
    pub fn airworthiness_directive(
        document_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<Self> {
        Self::new(
            DocumentDetails::empty(DocumentKind::AirworthinessDirective),
            document_id,
            title,
        )
    }

    /// Create an SB with empty details.
    pub fn service_bulletin(document_id: impl Into<String>, title: impl Into<String>) -> Result<Self> {
        Self::new(
            DocumentDetails::empty(DocumentKind::ServiceBulletin),
            document_id,
            title,
        )
    }

    /// Create a TO with empty details.
    pub fn technical_order(document_id: impl Into<String>, title: impl Into<String>) -> Result<Self> {
        Self::new(
            DocumentDetails::empty(DocumentKind::TechnicalOrder),
            document_id,
            title,
        )
    }

    /// Create an ED with empty details.
    pub fn engineering_directive(
        document_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<Self> {
        Self::new(
            DocumentDetails::empty(DocumentKind::EngineeringDirective),
            document_id,
            title,
        )
    }

    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.issuing_authority = authority.into();
        self
    }

    pub fn with_issue_date(mut self, date: impl Into<DocumentDate>) -> Self {
        self.issue_date = date.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_applicability(mut self, rule: ApplicabilityRule) -> Self {
        self.applicability = rule;
        self
    }

    /// Add an outgoing reference to another document id.
    pub fn with_reference(mut self, document_id: impl Into<String>) -> Self {
        self.references.insert(document_id.into());
        self
    }

    pub fn with_details(mut self, details: DocumentDetails) -> Self {
        self.details = details;
        self
    }

    pub fn kind(&self) -> DocumentKind {
        self.details.kind()
    }

    /// Check the construction invariants for a document that did not go
    /// through [`Document::new`] (e.g. one deserialized from JSON).
    pub fn validate(&self) -> Result<()> {
        if self.document_id.trim().is_empty() {
            return Err(FleetDocsError::EmptyDocumentId);
        }
        if self.applicability.is_empty() {
            return Err(FleetDocsError::EmptyRule {
                document_id: Some(self.document_id.clone()),
            });
        }
        Ok(())
    }
}
