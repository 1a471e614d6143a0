//! HTTP surface: the process endpoint, health probe, and OpenAPI document.
//!
//! The router owns the transport concerns (body cap, CORS, request tracing,
//! method fallback) and the mapping from [`PapercastError`] to wire
//! responses. Everything pipeline-shaped stays in [`crate::process`]; the
//! handlers here are thin.
//!
//! Response contract:
//!
//! * `200` — `{"audioUrl": "..."}`
//! * `400` — `{"error": "<what the client got wrong>"}`
//! * `405` — `{"error": "Method not allowed"}` for non-POST on the endpoint
//! * `500` — `{"error": "Failed to process PDF", "details": "<stage detail>"}`

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{OpenApi, ToSchema};

use crate::config::Config;
use crate::error::PapercastError;
use crate::process;
use crate::providers::openai::OpenAiClient;
use crate::providers::supabase::SupabaseStorage;
use crate::providers::{AudioStore, NarrationGenerator, SpeechSynthesizer};

/// Request body cap. A 10 MiB PDF inflates to roughly 13.7 MiB of base64
/// plus JSON framing, so 15 MiB covers every accepted upload.
pub const MAX_BODY_BYTES: usize = 15 * 1024 * 1024;

/// Application state shared across handlers.
///
/// Collaborators are trait objects so tests can drop in fakes; the real
/// wiring comes from [`AppState::from_config`].
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub generator: Arc<dyn NarrationGenerator>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub store: Arc<dyn AudioStore>,
}

impl AppState {
    /// Wire the production providers from a validated config.
    pub fn from_config(config: Config) -> Self {
        let openai = Arc::new(OpenAiClient::from_config(&config));
        let storage = Arc::new(SupabaseStorage::from_config(&config));
        Self {
            config: Arc::new(config),
            generator: openai.clone(),
            synthesizer: openai,
            store: storage,
        }
    }
}

/// Upload request: the PDF as a data URL.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProcessRequest {
    /// `data:application/pdf;base64,<payload>`
    pub file: Option<String>,
}

/// Successful processing result.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProcessResponse {
    /// Public URL of the generated audio object.
    #[serde(rename = "audioUrl")]
    pub audio_url: String,
}

/// Error envelope for every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Liveness probe payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, process_pdf_handler),
    components(schemas(ProcessRequest, ProcessResponse, ErrorResponse, HealthResponse))
)]
pub struct ApiDoc;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/process-pdf",
            post(process_pdf_handler).fallback(method_not_allowed),
        )
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/api/process-pdf",
    request_body = ProcessRequest,
    responses(
        (status = 200, description = "Audio generated and stored", body = ProcessResponse),
        (status = 400, description = "Upload rejected", body = ErrorResponse),
        (status = 405, description = "Wrong method", body = ErrorResponse),
        (status = 500, description = "Pipeline stage failed", body = ErrorResponse)
    )
)]
async fn process_pdf_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            tracing::warn!("Rejected request body: {}", rejection.body_text());
            return (
                rejection.status(),
                Json(ErrorResponse {
                    error: rejection.body_text(),
                    details: None,
                }),
            )
                .into_response();
        }
    };

    let file = request.file.unwrap_or_default();
    let result = process::process_pdf(
        &file,
        &state.config,
        state.generator.as_ref(),
        state.synthesizer.as_ref(),
        state.store.as_ref(),
    )
    .await;

    match result {
        Ok(audio_url) => (StatusCode::OK, Json(ProcessResponse { audio_url })).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method not allowed".to_string(),
            details: None,
        }),
    )
        .into_response()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Render a pipeline error as its wire response.
///
/// Validation problems echo their display string at 400. Everything else
/// hides behind the generic message at 500, with the display string in
/// `details` for the caller and the full error in the server log.
fn error_response(err: &PapercastError) -> Response {
    if err.is_client_error() {
        tracing::warn!("Rejected upload: {}", err);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: err.to_string(),
                details: None,
            }),
        )
            .into_response()
    } else {
        tracing::error!("Error processing PDF: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to process PDF".to_string(),
                details: Some(err.to_string()),
            }),
        )
            .into_response()
    }
}
