//! # Jagriti Consumer-Court Case Search API
//!
//! ## Overview
//! This library implements a REST adapter over the e-Jagriti consumer-court
//! portal. It translates typed case-search requests into the portal's own
//! request format, normalizes the portal's responses into a stable
//! case-record schema, and exposes the state/commission lookup tables
//! needed to populate searches.
//!
//! ## Architecture
//! The system is composed of several key modules:
//! - `portal`: outbound HTTP client for the Jagriti portal endpoints
//! - `normalize`: maps raw portal rows into the fixed `CaseRecord` shape
//! - `validation`: fail-fast checks on inbound search requests
//! - `api`: actix-web HTTP surface and error-to-status mapping
//! - `config`: configuration management and settings
//! - `errors`: centralized error handling and types
//!
//! ## Input/Output Specification
//! - **Input**: JSON search requests (state/commission ids, search value, date range)
//! - **Output**: JSON arrays of normalized case records, in portal order
//! - **Flow**: request → validate → portal call → normalize → response
//!
//! No component retains state across requests; every request is handled
//! independently against the live portal.

// Core modules
pub mod api;
pub mod config;
pub mod errors;
pub mod normalize;
pub mod portal;
pub mod validation;

// Utilities
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use errors::{ApiError, Result};
pub use portal::PortalClient;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::utils::DateUtils;

/// The closed set of case-search operations the portal supports.
///
/// Each kind maps to the portal's numeric search-type code; the payload
/// shape is otherwise identical across kinds, so the kind-specific
/// behavior lives entirely in this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchKind {
    CaseNumber,
    Complainant,
    Respondent,
    ComplainantAdvocate,
    RespondentAdvocate,
    IndustryType,
    Judge,
}

impl SearchKind {
    /// Every search kind, in portal code order
    pub const ALL: [SearchKind; 7] = [
        SearchKind::CaseNumber,
        SearchKind::Complainant,
        SearchKind::Respondent,
        SearchKind::ComplainantAdvocate,
        SearchKind::RespondentAdvocate,
        SearchKind::IndustryType,
        SearchKind::Judge,
    ];

    /// Numeric `serchType` code the portal expects for this kind
    pub fn portal_code(&self) -> i64 {
        match self {
            SearchKind::CaseNumber => 1,
            SearchKind::Complainant => 2,
            SearchKind::Respondent => 3,
            SearchKind::ComplainantAdvocate => 4,
            SearchKind::RespondentAdvocate => 5,
            SearchKind::IndustryType => 6,
            SearchKind::Judge => 7,
        }
    }

    /// The portal's display label for this kind
    pub fn label(&self) -> &'static str {
        match self {
            SearchKind::CaseNumber => "CASE NUMBER",
            SearchKind::Complainant => "COMPLAINANT / APPELLANT /PETITIONER",
            SearchKind::Respondent => "RESPONDENT / OPPOSITE PARTY",
            SearchKind::ComplainantAdvocate => "COMPLAINANT / APPELLANT /PETITIONER ADVOCATE",
            SearchKind::RespondentAdvocate => "RESPONDENT / OPPOSITE PARTY ADVOCATE",
            SearchKind::IndustryType => "INDUSTRY TYPE",
            SearchKind::Judge => "JUDGE",
        }
    }

    /// Whether the kind requires a non-empty search value.
    ///
    /// Every current kind does; the portal rejects an empty
    /// `serchTypeValue` for all seven codes.
    pub fn requires_value(&self) -> bool {
        true
    }
}

/// Inbound search request, shared by all `/cases/by-*` endpoints.
///
/// Missing dates default to the last 30 days of filings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub state_id: String,
    pub commission_id: String,
    pub search_value: String,
    #[serde(default)]
    pub from_date: Option<NaiveDate>,
    #[serde(default)]
    pub to_date: Option<NaiveDate>,
}

impl SearchRequest {
    /// Resolve the request's date range, filling defaults for missing ends
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        let (default_from, default_to) = DateUtils::default_range();
        (
            self.from_date.unwrap_or(default_from),
            self.to_date.unwrap_or(default_to),
        )
    }
}

/// Normalized representation of one court case, as returned to API callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub case_number: String,
    pub case_stage: String,
    pub filing_date: NaiveDate,
    pub complainant: String,
    pub complainant_advocate: String,
    pub respondent: String,
    pub respondent_advocate: String,
    pub document_link: String,
}

/// A state-level commission as listed by the portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: String,
    pub name: String,
}

/// A district commission (DCDRC) within a state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commission {
    pub id: String,
    pub name: String,
    pub state_id: String,
}

/// Application state shared across request handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::Config>,
    pub portal: Arc<portal::PortalClient>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portal_codes_cover_one_through_seven() {
        let codes: Vec<i64> = SearchKind::ALL.iter().map(|k| k.portal_code()).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn every_kind_requires_a_value() {
        assert!(SearchKind::ALL.iter().all(|k| k.requires_value()));
    }

    #[test]
    fn explicit_dates_are_kept() {
        let request = SearchRequest {
            state_id: "11290000".to_string(),
            commission_id: "15290525".to_string(),
            search_value: "Reddy".to_string(),
            from_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            to_date: NaiveDate::from_ymd_opt(2024, 12, 31),
        };
        let (from, to) = request.date_range();
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn missing_dates_fall_back_to_default_range() {
        let request = SearchRequest {
            state_id: "11290000".to_string(),
            commission_id: "15290525".to_string(),
            search_value: "Reddy".to_string(),
            from_date: None,
            to_date: None,
        };
        let (from, to) = request.date_range();
        assert!(from <= to);
    }
}
