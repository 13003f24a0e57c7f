use crate::config::Config;
use crate::duplicate;
use crate::errors::{AppError, ResultExt};
use crate::lead_id::{self, LeadIdParams, ParsedLeadId};
use crate::models::*;
use crate::sequence::{SequenceCounter, SequenceState, SharedSequence};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Arc, MutexGuard, PoisonError};

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Daily Lead ID sequence; one per process.
    pub sequence: SharedSequence,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sequence: SequenceCounter::shared(),
        }
    }

    /// Locks the counter, recovering it if a previous holder panicked.
    ///
    /// Every mutation leaves the counter consistent, so the poisoned value is
    /// still safe to keep counting from.
    fn lock_sequence(&self) -> MutexGuard<'_, SequenceCounter> {
        self.sequence.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("⚠️ Sequence counter lock was poisoned, recovering");
            self.sequence.clear_poison();
            poisoned.into_inner()
        })
    }

    /// Restores the daily sequence from already persisted Lead IDs.
    pub fn initialize_sequence<S: AsRef<str>>(&self, existing_lead_ids: &[S]) -> SequenceState {
        let today = self.config.today();
        let mut counter = self.lock_sequence();
        counter.initialize(existing_lead_ids, today);
        counter.state()
    }
}

// ============ Request / Response Bodies ============

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLeadId {
    pub lead_id: String,
    pub parsed: Option<ParsedLeadId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyLeadIdRequest {
    pub lead_id: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyLeadIdResponse {
    pub lead_id: String,
    pub canonical: bool,
    pub checksum_valid: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeSequenceRequest {
    #[serde(default)]
    pub existing_lead_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturningCustomerRequest {
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub existing_leads: Vec<LeadRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateCheckRequest {
    pub new_lead: NewLead,
    #[serde(default)]
    pub existing_leads: Vec<LeadRecord>,
}

// ============ Handlers ============

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "lead-id-engine",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/v1/lead-ids
///
/// Generates the next Lead ID for a new lead.
pub async fn generate_lead_id(
    State(state): State<Arc<AppState>>,
    Json(params): Json<LeadIdParams>,
) -> (StatusCode, Json<GeneratedLeadId>) {
    let today = state.config.today();
    let lead_id = {
        let mut counter = state.lock_sequence();
        lead_id::generate_lead_id_on(&params, &mut counter, today)
    };

    tracing::info!("POST /lead-ids - generated {}", lead_id);

    let parsed = lead_id::parse_lead_id(&lead_id);
    if parsed.is_none() {
        tracing::warn!("Generated lead id {} does not split into 6 segments", lead_id);
    }

    (StatusCode::CREATED, Json(GeneratedLeadId { lead_id, parsed }))
}

/// GET /api/v1/lead-ids/:lead_id
pub async fn get_lead_id(Path(lead_id): Path<String>) -> Result<Json<ParsedLeadId>, AppError> {
    lead_id::parse_lead_id(&lead_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("'{}' is not a lead id", lead_id)))
}

/// POST /api/v1/lead-ids/verify
///
/// Reports whether an ID has the canonical shape and whether its checksum
/// matches the given phone number.
pub async fn verify_lead_id(
    Json(request): Json<VerifyLeadIdRequest>,
) -> Result<Json<VerifyLeadIdResponse>, AppError> {
    lead_id::parse_lead_id(&request.lead_id)
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "'{}' must have 6 dash-separated segments",
                request.lead_id
            ))
        })
        .context("verifying lead id")?;

    let canonical = lead_id::is_canonical(&request.lead_id);
    let checksum_valid =
        lead_id::verify_checksum(&request.lead_id, request.phone_number.as_deref());

    Ok(Json(VerifyLeadIdResponse {
        lead_id: request.lead_id,
        canonical,
        checksum_valid,
    }))
}

/// GET /api/v1/lead-ids/sequence
pub async fn get_sequence(State(state): State<Arc<AppState>>) -> Json<SequenceState> {
    Json(state.lock_sequence().state())
}

/// POST /api/v1/lead-ids/sequence
///
/// Restores the daily sequence from the IDs created today. A count already
/// reached today is kept when the IDs report a lower one.
pub async fn initialize_sequence(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InitializeSequenceRequest>,
) -> Json<SequenceState> {
    tracing::info!(
        "POST /lead-ids/sequence - {} existing id(s)",
        request.existing_lead_ids.len()
    );
    Json(state.initialize_sequence(&request.existing_lead_ids))
}

/// POST /api/v1/leads/returning
pub async fn returning_customer(
    Json(request): Json<ReturningCustomerRequest>,
) -> Json<ReturningCustomer> {
    Json(duplicate::detect_returning_customer(
        request.phone_number.as_deref(),
        &request.existing_leads,
    ))
}

/// POST /api/v1/leads/duplicates
pub async fn detect_duplicate(
    Json(request): Json<DuplicateCheckRequest>,
) -> Json<DuplicateCheckResult> {
    tracing::debug!(
        "POST /leads/duplicates - checking against {} lead(s)",
        request.existing_leads.len()
    );
    Json(duplicate::detect_duplicate(
        &request.new_lead,
        &request.existing_leads,
    ))
}

/// Engine routes, without `/health`.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/lead-ids", post(generate_lead_id))
        .route(
            "/api/v1/lead-ids/sequence",
            get(get_sequence).post(initialize_sequence),
        )
        .route("/api/v1/lead-ids/verify", post(verify_lead_id))
        .route("/api/v1/lead-ids/:lead_id", get(get_lead_id))
        .route("/api/v1/leads/returning", post(returning_customer))
        .route("/api/v1/leads/duplicates", post(detect_duplicate))
}

/// Full application router without rate limiting or tracing layers.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(api_routes())
        .with_state(state)
}
