//! Fleet registry entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::date::optional_date;

/// Operational status of an airframe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum AircraftStatus {
    Active,
    Stored,
    Retired,
    #[serde(untagged)]
    Other(String),
}

/// An aircraft in the operator's fleet.
///
/// Owned by the caller and read-only for the duration of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aircraft {
    /// Operator-internal identifier, e.g. `"A101"`. Compliance records key on this.
    pub aircraft_id: String,
    /// Registration mark, e.g. `"HS-TKK"`.
    pub registration: String,
    pub manufacturer: String,
    /// Type designation matched against applicability rules, e.g. `"777-300ER"`.
    pub model: String,
    /// Manufacturer serial number (MSN).
    pub serial_number: String,
    #[serde(
        default,
        with = "optional_date",
        alias = "airworthiness_certificate_date"
    )]
    pub in_service_date: Option<NaiveDate>,
    pub status: AircraftStatus,
}

impl Aircraft {
    /// Create an active aircraft with no in-service date.
    pub fn new(
        aircraft_id: impl Into<String>,
        registration: impl Into<String>,
        manufacturer: impl Into<String>,
        model: impl Into<String>,
        serial_number: impl Into<String>,
    ) -> Self {
        Self {
            aircraft_id: aircraft_id.into(),
            registration: registration.into(),
            manufacturer: manufacturer.into(),
            model: model.into(),
            serial_number: serial_number.into(),
            in_service_date: None,
            status: AircraftStatus::Active,
        }
    }

    pub fn with_in_service_date(mut self, date: NaiveDate) -> Self {
        self.in_service_date = Some(date);
        self
    }

    pub fn with_status(mut self, status: AircraftStatus) -> Self {
        self.status = status;
        self
    }

    /// True if `key` is this aircraft's id or registration (case-insensitive).
    pub fn is_identified_by(&self, key: &str) -> bool {
        self.aircraft_id.eq_ignore_ascii_case(key) || self.registration.eq_ignore_ascii_case(key)
    }
}
