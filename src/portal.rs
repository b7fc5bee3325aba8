//! # Jagriti Portal Client
//!
//! ## Purpose
//! Outbound HTTP client for the e-Jagriti portal. Builds the portal's
//! expected request shapes (including its misspelled wire field names),
//! performs one call per invocation, and hands back the raw payload for
//! normalization.
//!
//! ## Input/Output Specification
//! - **Input**: Search kind + validated request, or a state id for lookups
//! - **Output**: Parsed metadata rows, or the raw case payload on success
//! - **Failure Modes**: portal unreachable, non-success HTTP status,
//!   non-success body status, unparseable body
//!
//! ## Key Features
//! - Bounded request timeout surfacing as an upstream-unavailable error
//! - Browser-like headers the portal requires (User-Agent, Referer, Origin)
//! - No retries, no backoff, no caching

use crate::config::PortalConfig;
use crate::errors::{ApiError, Result};
use crate::utils::DateUtils;
use crate::validation_error;
use crate::{Commission, SearchKind, SearchRequest, State};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// States and state commissions listing endpoint
const STATES_PATH: &str = "/services/report/report/getStateCommissionAndCircuitBench";
/// District commissions for one state
const COMMISSIONS_PATH: &str = "/services/report/report/getDistrictCommissionByCommissionId";
/// Case search endpoint
const SEARCH_PATH: &str = "/services/case/caseFilingService/v2/getCaseDetailsBySearchType";

/// Client for the Jagriti portal endpoints
pub struct PortalClient {
    config: PortalConfig,
    client: Client,
}

/// Response envelope the portal wraps every payload in
#[derive(Debug, Deserialize)]
struct PortalEnvelope {
    #[serde(default)]
    status: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: serde_json::Value,
}

/// One row of the portal's commission listings (states and districts share
/// the same shape)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommissionRow {
    #[serde(default)]
    commission_id: Option<i64>,
    #[serde(default)]
    commission_name_en: Option<String>,
    #[serde(default)]
    active_status: bool,
    #[serde(default)]
    circuit_addition_bench_status: bool,
}

/// Case search payload in the portal's exact wire shape. The `serch`
/// spelling is the portal's, not ours.
#[derive(Debug, Serialize)]
struct SearchPayload<'a> {
    #[serde(rename = "commissionId")]
    commission_id: i64,
    /// 1 = filter by case filing date
    #[serde(rename = "dateRequestType")]
    date_request_type: i64,
    #[serde(rename = "fromDate")]
    from_date: String,
    #[serde(rename = "toDate")]
    to_date: String,
    #[serde(rename = "judgeId")]
    judge_id: &'a str,
    /// 1 = daily orders
    #[serde(rename = "orderType")]
    order_type: i64,
    #[serde(rename = "serchType")]
    serch_type: i64,
    #[serde(rename = "serchTypeValue")]
    serch_type_value: &'a str,
}

impl PortalClient {
    /// Create a new portal client with the configured timeout and headers
    pub fn new(config: PortalConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Config {
                message: format!("Failed to build portal HTTP client: {}", e),
            })?;

        Ok(Self { config, client })
    }

    /// List all states known to the portal.
    ///
    /// The portal returns state commissions and circuit benches in one
    /// listing; circuit benches and inactive entries are filtered out and
    /// duplicate names collapsed, preserving portal order.
    pub async fn fetch_states(&self) -> Result<Vec<State>> {
        let url = format!("{}{}", self.config.base_url, STATES_PATH);
        debug!("Fetching states from {}", url);

        let response = self
            .client
            .get(&url)
            .header(REFERER, format!("{}/", self.config.base_url))
            .send()
            .await?;
        let envelope = Self::checked_envelope(response).await?;

        let rows: Vec<CommissionRow> =
            serde_json::from_value(envelope.data).map_err(|e| ApiError::UpstreamBadResponse {
                details: format!("Unexpected state listing shape: {}", e),
            })?;

        let mut seen = HashSet::new();
        let mut states = Vec::new();
        for row in rows {
            if !row.active_status || row.circuit_addition_bench_status {
                continue;
            }
            let (Some(id), Some(name)) = (row.commission_id, row.commission_name_en) else {
                continue;
            };
            let name = name.trim().to_uppercase();
            if name.is_empty() || !seen.insert(name.clone()) {
                continue;
            }
            states.push(State {
                id: id.to_string(),
                name,
            });
        }

        info!("Fetched {} states from the portal", states.len());
        Ok(states)
    }

    /// List the active district commissions for one state, in portal order
    pub async fn fetch_commissions(&self, state_id: &str) -> Result<Vec<Commission>> {
        let url = format!("{}{}", self.config.base_url, COMMISSIONS_PATH);
        debug!("Fetching commissions for state {} from {}", state_id, url);

        let response = self
            .client
            .get(&url)
            .query(&[("commissionId", state_id)])
            .header(REFERER, format!("{}/", self.config.base_url))
            .send()
            .await?;
        let envelope = Self::checked_envelope(response).await?;

        let rows: Vec<CommissionRow> =
            serde_json::from_value(envelope.data).map_err(|e| ApiError::UpstreamBadResponse {
                details: format!("Unexpected commission listing shape: {}", e),
            })?;

        let commissions: Vec<Commission> = rows
            .into_iter()
            .filter(|row| row.active_status)
            .filter_map(|row| {
                let id = row.commission_id?;
                let name = row.commission_name_en?;
                Some(Commission {
                    id: id.to_string(),
                    name: name.trim().to_string(),
                    state_id: state_id.to_string(),
                })
            })
            .collect();

        info!(
            "Fetched {} commissions for state {}",
            commissions.len(),
            state_id
        );
        Ok(commissions)
    }

    /// Run a case search and return the portal's raw `data` payload.
    ///
    /// The caller is expected to have validated the request; the payload
    /// shape is identical for every search kind apart from the numeric
    /// `serchType` code.
    pub async fn search_cases(
        &self,
        kind: SearchKind,
        request: &SearchRequest,
    ) -> Result<serde_json::Value> {
        let commission_id = request
            .commission_id
            .parse::<i64>()
            .map_err(|_| validation_error!("commission_id", "must be a numeric identifier"))?;

        let (from_date, to_date) = request.date_range();
        let payload = SearchPayload {
            commission_id,
            date_request_type: 1,
            from_date: DateUtils::format_portal_date(from_date),
            to_date: DateUtils::format_portal_date(to_date),
            judge_id: "",
            order_type: 1,
            serch_type: kind.portal_code(),
            serch_type_value: &request.search_value,
        };

        let url = format!("{}{}", self.config.base_url, SEARCH_PATH);
        debug!(
            "Searching cases ({}) for commission {} between {} and {}",
            kind.label(),
            commission_id,
            payload.from_date,
            payload.to_date
        );

        let response = self
            .client
            .post(&url)
            .header(REFERER, self.config.referer_url.clone())
            .header(ORIGIN, self.config.base_url.clone())
            .json(&payload)
            .send()
            .await?;
        let envelope = Self::checked_envelope(response).await?;

        Ok(envelope.data)
    }

    /// Verify the portal is reachable by fetching the state listing
    pub async fn health_check(&self) -> Result<()> {
        self.fetch_states().await.map(|_| ())
    }

    /// Check the HTTP status and the portal's body-level status, returning
    /// the parsed envelope on success
    async fn checked_envelope(response: reqwest::Response) -> Result<PortalEnvelope> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Portal request failed with HTTP {}", status);
            return Err(ApiError::UpstreamBadResponse {
                details: format!("HTTP {}: {}", status, body),
            });
        }

        let envelope: PortalEnvelope = response.json().await?;
        if envelope.status != Some(200) {
            return Err(ApiError::UpstreamBadResponse {
                details: format!(
                    "portal status {:?}: {}",
                    envelope.status,
                    envelope.message.unwrap_or_else(|| "no message".to_string())
                ),
            });
        }

        Ok(envelope)
    }
}
