//! # Response Normalization Module
//!
//! ## Purpose
//! Maps the portal's raw case payload into the stable `CaseRecord` shape:
//! field renames, date parsing, and presence defaults for optional fields.
//!
//! ## Input/Output Specification
//! - **Input**: The raw `data` payload from a portal case search
//! - **Output**: Ordered `CaseRecord` sequence (portal order, never re-sorted)
//! - **Policy**: a row whose filing date cannot be parsed is dropped with a
//!   warning; a payload that is not a collection of rows at all is a
//!   normalization error

use crate::errors::{ApiError, Result};
use crate::utils::TextUtils;
use crate::CaseRecord;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

/// One case row as the portal serializes it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRow {
    #[serde(default)]
    pub case_number: Option<String>,
    #[serde(default)]
    pub case_stage_name: Option<String>,
    #[serde(default)]
    pub case_filing_date: Option<String>,
    #[serde(default)]
    pub complainant_name: Option<String>,
    #[serde(default)]
    pub complainant_advocate_name: Option<String>,
    #[serde(default)]
    pub respondent_name: Option<String>,
    #[serde(default)]
    pub respondent_advocate_name: Option<String>,
    #[serde(default)]
    pub order_document_path: Option<String>,
}

/// Extract case rows from the portal's `data` payload.
///
/// The portal serves either `{"cases": [...]}` or a bare array depending
/// on the endpoint version; both are accepted. `null` means zero matches.
pub fn extract_rows(data: &serde_json::Value) -> Result<Vec<CaseRow>> {
    let rows_value = match data {
        serde_json::Value::Null => return Ok(Vec::new()),
        serde_json::Value::Object(map) => match map.get("cases") {
            Some(cases) => cases.clone(),
            None => {
                return Err(ApiError::Normalization {
                    details: "case payload object has no 'cases' collection".to_string(),
                })
            }
        },
        serde_json::Value::Array(_) => data.clone(),
        other => {
            return Err(ApiError::Normalization {
                details: format!("case payload is not a collection of rows: {}", other),
            })
        }
    };

    serde_json::from_value(rows_value).map_err(|e| ApiError::Normalization {
        details: format!("case rows do not match any known schema: {}", e),
    })
}

/// Normalize portal rows into case records, preserving portal order.
///
/// Rows with an unparsable filing date are dropped and the batch
/// continues.
pub fn normalize_cases(rows: Vec<CaseRow>) -> Vec<CaseRecord> {
    rows.into_iter()
        .filter_map(|row| {
            let raw_date = row.case_filing_date.unwrap_or_default();
            let Some(filing_date) = parse_filing_date(&raw_date) else {
                warn!(
                    "Dropping case row with unparsable filing date '{}' (case {})",
                    raw_date,
                    row.case_number.as_deref().unwrap_or("unknown")
                );
                return None;
            };

            Some(CaseRecord {
                case_number: TextUtils::clean(&row.case_number.unwrap_or_default()),
                case_stage: TextUtils::clean(&row.case_stage_name.unwrap_or_default()),
                filing_date,
                complainant: TextUtils::clean(&row.complainant_name.unwrap_or_default()),
                complainant_advocate: TextUtils::clean(
                    &row.complainant_advocate_name.unwrap_or_default(),
                ),
                respondent: TextUtils::clean(&row.respondent_name.unwrap_or_default()),
                respondent_advocate: TextUtils::clean(
                    &row.respondent_advocate_name.unwrap_or_default(),
                ),
                document_link: row.order_document_path.unwrap_or_default().trim().to_string(),
            })
        })
        .collect()
}

/// Parse a portal filing date. The portal has served both ISO and
/// day-first forms.
fn parse_filing_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(case_number: &str, filing_date: &str) -> serde_json::Value {
        json!({
            "caseNumber": case_number,
            "caseStageName": "ADMIT",
            "caseFilingDate": filing_date,
            "complainantName": "RAM  KUMAR",
            "complainantAdvocateName": "SHARMA",
            "respondentName": "FLIPKART",
            "respondentAdvocateName": "GUPTA",
            "orderDocumentPath": "https://e-jagriti.gov.in/orders/1.pdf"
        })
    }

    #[test]
    fn wrapped_and_bare_payloads_are_accepted() {
        let wrapped = json!({"cases": [row("CC/1/2024", "2024-01-10")]});
        let bare = json!([row("CC/1/2024", "2024-01-10")]);
        assert_eq!(extract_rows(&wrapped).unwrap().len(), 1);
        assert_eq!(extract_rows(&bare).unwrap().len(), 1);
    }

    #[test]
    fn null_payload_means_zero_matches() {
        assert!(extract_rows(&serde_json::Value::Null).unwrap().is_empty());
    }

    #[test]
    fn non_collection_payload_is_a_normalization_error() {
        let result = extract_rows(&json!("unexpected"));
        assert!(matches!(result, Err(ApiError::Normalization { .. })));

        let result = extract_rows(&json!({"message": "no cases key"}));
        assert!(matches!(result, Err(ApiError::Normalization { .. })));
    }

    #[test]
    fn rows_normalize_in_portal_order() {
        let rows = extract_rows(&json!([
            row("CC/1/2024", "2024-01-10"),
            row("CC/2/2024", "2024-02-11"),
            row("CC/3/2024", "2024-03-12"),
        ]))
        .unwrap();

        let records = normalize_cases(rows);
        assert_eq!(records.len(), 3);
        let numbers: Vec<&str> = records.iter().map(|r| r.case_number.as_str()).collect();
        assert_eq!(numbers, vec!["CC/1/2024", "CC/2/2024", "CC/3/2024"]);
        assert_eq!(records[0].complainant, "RAM KUMAR");
        assert_eq!(
            records[0].filing_date,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
    }

    #[test]
    fn day_first_dates_are_parsed() {
        let rows = extract_rows(&json!([row("CC/4/2024", "10-01-2024")])).unwrap();
        let records = normalize_cases(rows);
        assert_eq!(
            records[0].filing_date,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
    }

    #[test]
    fn unparsable_date_drops_only_that_row() {
        let rows = extract_rows(&json!([
            row("CC/1/2024", "2024-01-10"),
            row("CC/2/2024", "not-a-date"),
            row("CC/3/2024", "2024-03-12"),
        ]))
        .unwrap();

        let records = normalize_cases(rows);
        assert_eq!(records.len(), 2);
        let numbers: Vec<&str> = records.iter().map(|r| r.case_number.as_str()).collect();
        assert_eq!(numbers, vec!["CC/1/2024", "CC/3/2024"]);
    }

    #[test]
    fn missing_optional_fields_become_empty_strings() {
        let rows = extract_rows(&json!([{
            "caseNumber": "CC/9/2024",
            "caseFilingDate": "2024-05-01",
            "complainantName": "KUMAR",
            "respondentName": "ACME"
        }]))
        .unwrap();

        let records = normalize_cases(rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].complainant_advocate, "");
        assert_eq!(records[0].respondent_advocate, "");
        assert_eq!(records[0].document_link, "");
        assert_eq!(records[0].case_stage, "");
    }
}
