//! # API Server Module
//!
//! ## Purpose
//! REST surface of the case search adapter: metadata lookups, the seven
//! case-search endpoints, and health, with internal failures mapped to the
//! HTTP status taxonomy.
//!
//! ## Input/Output Specification
//! - **Input**: HTTP requests with search payloads or path parameters
//! - **Output**: JSON arrays of states, commissions, or case records
//! - **Errors**: `{error, message, status_code}` bodies on every non-2xx
//!
//! ## Key Features
//! - One generic search path parameterized by search kind
//! - Zero-match searches return an empty array, never an error
//! - CORS support for web frontends
//! - Stateless between calls

use crate::errors::{ApiError, Result};
use crate::{normalize, validation};
use crate::{AppState, CaseRecord, Commission, SearchKind, SearchRequest};
use actix_cors::Cors;
use actix_web::middleware::Condition;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::{Deserialize, Serialize};

/// HTTP server wrapper around the shared application state
pub struct ApiServer {
    app_state: AppState,
}

/// Error body shape for all non-2xx responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ApiServer {
    /// Create new API server
    pub fn new(app_state: AppState) -> Self {
        Self { app_state }
    }

    /// Run the API server until it is stopped
    pub async fn run(self) -> Result<()> {
        let bind_addr = self.app_state.config.bind_addr();
        let workers = self.app_state.config.server.workers;
        let enable_cors = self.app_state.config.server.enable_cors;

        tracing::info!("Starting API server on {}", bind_addr);

        let app_state = self.app_state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(app_state.clone()))
                .wrap(Condition::new(enable_cors, Cors::permissive()))
                .configure(configure_routes)
        })
        .workers(workers)
        .bind(&bind_addr)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to bind server to {}: {}", bind_addr, e),
        })?
        .run();

        server.await.map_err(|e| ApiError::Internal {
            message: format!("Server error: {}", e),
        })?;

        Ok(())
    }
}

/// Route table, shared by the server and the integration tests
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Malformed request bodies get the same error shape as every other
    // failure
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let api_err = ApiError::ValidationFailed {
            field: "body".to_string(),
            reason: err.to_string(),
        };
        actix_web::error::InternalError::from_response(err, error_response(&api_err)).into()
    });

    cfg.app_data(json_config)
        .route("/health", web::get().to(health_handler))
        .route("/states", web::get().to(states_handler))
        .route("/commissions/{state_id}", web::get().to(commissions_handler))
        .service(
            web::scope("/cases")
                .route("/by-case-number", web::post().to(search_by_case_number))
                .route("/by-complainant", web::post().to(search_by_complainant))
                .route("/by-respondent", web::post().to(search_by_respondent))
                .route(
                    "/by-complainant-advocate",
                    web::post().to(search_by_complainant_advocate),
                )
                .route(
                    "/by-respondent-advocate",
                    web::post().to(search_by_respondent_advocate),
                )
                .route("/by-industry-type", web::post().to(search_by_industry_type))
                .route("/by-judge", web::post().to(search_by_judge)),
        );
}

/// Health check endpoint handler
async fn health_handler() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}

/// States listing handler
async fn states_handler(app_state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    Ok(respond(app_state.portal.fetch_states().await))
}

/// Commissions-for-state handler; an id the portal knows no commissions
/// for is a 404, not an empty list
async fn commissions_handler(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let state_id = path.into_inner();
    Ok(respond(lookup_commissions(&app_state, &state_id).await))
}

async fn lookup_commissions(state: &AppState, state_id: &str) -> Result<Vec<Commission>> {
    let commissions = state.portal.fetch_commissions(state_id).await?;
    if commissions.is_empty() {
        return Err(ApiError::NotFound {
            resource: format!("Commissions for state '{}'", state_id),
        });
    }
    Ok(commissions)
}

/// Shared search path: validate, call the portal, normalize
async fn run_search(
    state: &AppState,
    kind: SearchKind,
    request: SearchRequest,
) -> Result<Vec<CaseRecord>> {
    validation::validate(kind, &request)?;
    let raw = state.portal.search_cases(kind, &request).await?;
    let rows = normalize::extract_rows(&raw)?;
    Ok(normalize::normalize_cases(rows))
}

async fn search_by_case_number(
    app_state: web::Data<AppState>,
    request: web::Json<SearchRequest>,
) -> ActixResult<HttpResponse> {
    Ok(respond(run_search(&app_state, SearchKind::CaseNumber, request.into_inner()).await))
}

async fn search_by_complainant(
    app_state: web::Data<AppState>,
    request: web::Json<SearchRequest>,
) -> ActixResult<HttpResponse> {
    Ok(respond(run_search(&app_state, SearchKind::Complainant, request.into_inner()).await))
}

async fn search_by_respondent(
    app_state: web::Data<AppState>,
    request: web::Json<SearchRequest>,
) -> ActixResult<HttpResponse> {
    Ok(respond(run_search(&app_state, SearchKind::Respondent, request.into_inner()).await))
}

async fn search_by_complainant_advocate(
    app_state: web::Data<AppState>,
    request: web::Json<SearchRequest>,
) -> ActixResult<HttpResponse> {
    Ok(respond(
        run_search(
            &app_state,
            SearchKind::ComplainantAdvocate,
            request.into_inner(),
        )
        .await,
    ))
}

async fn search_by_respondent_advocate(
    app_state: web::Data<AppState>,
    request: web::Json<SearchRequest>,
) -> ActixResult<HttpResponse> {
    Ok(respond(
        run_search(
            &app_state,
            SearchKind::RespondentAdvocate,
            request.into_inner(),
        )
        .await,
    ))
}

async fn search_by_industry_type(
    app_state: web::Data<AppState>,
    request: web::Json<SearchRequest>,
) -> ActixResult<HttpResponse> {
    Ok(respond(run_search(&app_state, SearchKind::IndustryType, request.into_inner()).await))
}

async fn search_by_judge(
    app_state: web::Data<AppState>,
    request: web::Json<SearchRequest>,
) -> ActixResult<HttpResponse> {
    Ok(respond(run_search(&app_state, SearchKind::Judge, request.into_inner()).await))
}

/// Turn a service result into an HTTP response
fn respond<T: Serialize>(result: Result<T>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(err) => error_response(&err),
    }
}

/// Map an error to its status and JSON body
fn error_response(err: &ApiError) -> HttpResponse {
    match err.category() {
        "validation" | "lookup" => tracing::warn!("{} error: {}", err.category(), err),
        _ => tracing::error!("{} error: {}", err.category(), err),
    }

    let status = err.status_code();
    HttpResponse::build(status).json(ErrorBody {
        error: err.kind().to_string(),
        message: err.to_string(),
        status_code: status.as_u16(),
    })
}
