//! Calendar dates as they appear in authority and fleet data.
//!
//! Source data mixes ISO dates (`2025-04-23`), prose dates (`April 23, 2025`)
//! and month-precision dates (`Mar 2024`). Month-precision dates resolve to the
//! first day of the month.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const FULL_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%d %B %Y"];

/// Parse a calendar date in any of the accepted textual forms.
///
/// Returns `None` for empty input, `N/A`, or anything unrecognised.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
        return None;
    }

    for format in FULL_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    // Timestamps such as "2024-01-15T00:00:00" or "2024-01-15 00:00:00".
    if trimmed.len() > 10 && trimmed.is_char_boundary(10) {
        let (head, tail) = trimmed.split_at(10);
        if tail.starts_with('T') || tail.starts_with(' ') {
            if let Ok(date) = NaiveDate::parse_from_str(head, "%Y-%m-%d") {
                return Some(date);
            }
        }
    }

    // Month precision: "Mar 2024", "March 2024".
    NaiveDate::parse_from_str(&format!("1 {trimmed}"), "%d %B %Y").ok()
}

/// Issue/effective date of a document.
///
/// Missing and unparseable dates are kept distinct so cutoff queries can
/// report them instead of dropping the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum DocumentDate {
    Known(NaiveDate),
    #[default]
    Missing,
    /// The raw text that failed to parse.
    Unparseable(String),
}

impl DocumentDate {
    /// Interpret raw source text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
            return DocumentDate::Missing;
        }
        match parse_calendar_date(trimmed) {
            Some(date) => DocumentDate::Known(date),
            None => DocumentDate::Unparseable(trimmed.to_string()),
        }
    }

    pub fn known(&self) -> Option<NaiveDate> {
        match self {
            DocumentDate::Known(date) => Some(*date),
            _ => None,
        }
    }
}

impl From<NaiveDate> for DocumentDate {
    fn from(date: NaiveDate) -> Self {
        DocumentDate::Known(date)
    }
}

impl From<Option<String>> for DocumentDate {
    fn from(raw: Option<String>) -> Self {
        match raw {
            Some(text) => DocumentDate::parse(&text),
            None => DocumentDate::Missing,
        }
    }
}

impl From<DocumentDate> for Option<String> {
    fn from(date: DocumentDate) -> Self {
        match date {
            DocumentDate::Known(d) => Some(d.format("%Y-%m-%d").to_string()),
            DocumentDate::Missing => None,
            DocumentDate::Unparseable(raw) => Some(raw),
        }
    }
}

/// Serde adapter for optional dates that must parse when present.
///
/// `null`, `""` and `"N/A"` all map to `None`; any other unrecognised text is
/// a deserialization error. Serializes as ISO `YYYY-MM-DD`.
pub mod optional_date {
    use super::*;

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_some(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(text) = raw else {
            return Ok(None);
        };
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
            return Ok(None);
        }
        parse_calendar_date(trimmed)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognised date: {trimmed:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parses_iso_and_prose_dates() {
        assert_eq!(parse_calendar_date("2025-04-23"), Some(ymd(2025, 4, 23)));
        assert_eq!(parse_calendar_date("April 23, 2025"), Some(ymd(2025, 4, 23)));
        assert_eq!(parse_calendar_date("Apr 23, 2025"), Some(ymd(2025, 4, 23)));
        assert_eq!(parse_calendar_date("23 April 2025"), Some(ymd(2025, 4, 23)));
        assert_eq!(parse_calendar_date("2025/04/23"), Some(ymd(2025, 4, 23)));
    }

    #[test]
    fn test_month_precision_resolves_to_first_day() {
        assert_eq!(parse_calendar_date("Aug 2012"), Some(ymd(2012, 8, 1)));
        assert_eq!(parse_calendar_date("March 2024"), Some(ymd(2024, 3, 1)));
    }

    #[test]
    fn test_timestamp_prefix_is_accepted() {
        assert_eq!(
            parse_calendar_date("2024-01-15T00:00:00"),
            Some(ymd(2024, 1, 15))
        );
    }

    #[test]
    fn test_not_applicable_and_garbage_are_none() {
        assert_eq!(parse_calendar_date("N/A"), None);
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("sometime soon"), None);
    }

    #[test]
    fn test_document_date_keeps_unparseable_text() {
        assert_eq!(
            DocumentDate::parse("Q3 2024"),
            DocumentDate::Unparseable("Q3 2024".to_string())
        );
        assert_eq!(DocumentDate::parse("  "), DocumentDate::Missing);
        assert_eq!(
            DocumentDate::parse("2024-02-10").known(),
            Some(ymd(2024, 2, 10))
        );
    }

    #[test]
    fn test_document_date_serde_uses_plain_strings() {
        let json = serde_json::to_string(&DocumentDate::Known(ymd(2023, 7, 25))).unwrap();
        assert_eq!(json, "\"2023-07-25\"");
        let back: DocumentDate = serde_json::from_str("null").unwrap();
        assert_eq!(back, DocumentDate::Missing);
        let prose: DocumentDate = serde_json::from_str("\"July 15, 2025\"").unwrap();
        assert_eq!(prose, DocumentDate::Known(ymd(2025, 7, 15)));
    }
}
