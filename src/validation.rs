//! # Request Validation Module
//!
//! ## Purpose
//! Validates inbound search requests before any portal call is made,
//! returning a field-level reason for the first violation found.
//!
//! ## Input/Output Specification
//! - **Input**: `SearchRequest` plus the search kind being performed
//! - **Output**: `Ok(())` or `ValidationFailed { field, reason }`
//! - **Policy**: fail-fast, violations are not aggregated

use crate::errors::Result;
use crate::validation_error;
use crate::{SearchKind, SearchRequest};

/// Validate a search request for the given kind.
///
/// Checks, in order: state id format, commission id format, search value
/// presence, date range order. Date defaults are resolved before the
/// range check so an explicit single-ended range is still validated.
pub fn validate(kind: SearchKind, request: &SearchRequest) -> Result<()> {
    if !is_numeric_id(&request.state_id) {
        return Err(validation_error!(
            "state_id",
            "must be a non-empty numeric identifier"
        ));
    }

    if !is_numeric_id(&request.commission_id) {
        return Err(validation_error!(
            "commission_id",
            "must be a non-empty numeric identifier"
        ));
    }

    if kind.requires_value() && request.search_value.trim().is_empty() {
        return Err(validation_error!(
            "search_value",
            format!("cannot be empty for a {} search", kind.label())
        ));
    }

    let (from, to) = request.date_range();
    if from > to {
        return Err(validation_error!(
            "from_date",
            "from_date must not be later than to_date"
        ));
    }

    Ok(())
}

/// Portal identifiers are decimal digit strings (e.g. "11290000")
fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiError;
    use chrono::NaiveDate;

    fn request() -> SearchRequest {
        SearchRequest {
            state_id: "11290000".to_string(),
            commission_id: "15290525".to_string(),
            search_value: "Reddy".to_string(),
            from_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            to_date: NaiveDate::from_ymd_opt(2024, 12, 31),
        }
    }

    fn failed_field(result: Result<()>) -> String {
        match result {
            Err(ApiError::ValidationFailed { field, .. }) => field,
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(validate(SearchKind::Complainant, &request()).is_ok());
    }

    #[test]
    fn case_number_values_are_accepted_verbatim() {
        let mut req = request();
        req.search_value = "DC/AB4/525/CC/72/2025".to_string();
        assert!(validate(SearchKind::CaseNumber, &req).is_ok());
    }

    #[test]
    fn non_numeric_state_id_is_rejected() {
        let mut req = request();
        req.state_id = "KARNATAKA".to_string();
        assert_eq!(failed_field(validate(SearchKind::Complainant, &req)), "state_id");
    }

    #[test]
    fn empty_commission_id_is_rejected() {
        let mut req = request();
        req.commission_id = String::new();
        assert_eq!(
            failed_field(validate(SearchKind::Complainant, &req)),
            "commission_id"
        );
    }

    #[test]
    fn blank_search_value_is_rejected() {
        let mut req = request();
        req.search_value = "   ".to_string();
        assert_eq!(
            failed_field(validate(SearchKind::Respondent, &req)),
            "search_value"
        );
    }

    #[test]
    fn reversed_date_range_is_rejected() {
        let mut req = request();
        req.from_date = NaiveDate::from_ymd_opt(2024, 12, 31);
        req.to_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert_eq!(failed_field(validate(SearchKind::Judge, &req)), "from_date");
    }

    #[test]
    fn single_day_range_is_allowed() {
        let mut req = request();
        req.from_date = NaiveDate::from_ymd_opt(2024, 6, 15);
        req.to_date = NaiveDate::from_ymd_opt(2024, 6, 15);
        assert!(validate(SearchKind::IndustryType, &req).is_ok());
    }

    #[test]
    fn first_violation_wins() {
        let mut req = request();
        req.state_id = "bad".to_string();
        req.search_value = String::new();
        assert_eq!(failed_field(validate(SearchKind::Complainant, &req)), "state_id");
    }
}
