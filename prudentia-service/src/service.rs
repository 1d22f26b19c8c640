use axum::{
    Router,
    extract::{Path, Query, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::{Next, from_fn},
    response::{Json, Response},
    routing::{get, post},
};
use prudentia_flow::{
    FALLBACK_MESSAGE, FlowError, FlowRunner, InMemorySessionStorage, InferenceClient,
    InferenceConfig, OpenRouterClient, Orchestrator, courts,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, error, info, warn};
use uuid::Uuid;

use crate::models::{CourtsQuery, CourtsView, FormSchema, SessionView, UserEvent};

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

type ApiError = (StatusCode, Json<Value>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn bad_request_error(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

/// Map a workflow error onto the status the UI branches on
fn flow_error(err: FlowError) -> ApiError {
    let message = err.to_string();
    match err {
        FlowError::InvalidTransition { step, event } => (
            StatusCode::CONFLICT,
            Json(json!({ "error": message, "step": step, "event": event })),
        ),
        FlowError::StaleSession(session_id) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": message, "session_id": session_id })),
        ),
        FlowError::NothingToGenerate { step } => (
            StatusCode::CONFLICT,
            Json(json!({ "error": message, "step": step })),
        ),
        FlowError::MissingRequiredFields(fields) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": message, "missing_fields": fields })),
        ),
        FlowError::SessionNotFound(session_id) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Session not found", "session_id": session_id })),
        ),
        FlowError::EndpointUnavailable(_) | FlowError::EmptyCompletion => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": message, "message": FALLBACK_MESSAGE })),
        ),
        FlowError::MissingCredential(_) | FlowError::StorageError(_) => {
            error!(error = %message, "internal failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error", "details": message })),
            )
        }
    }
}

fn validate_session_id(session_id: &str) -> Result<(), ApiError> {
    Uuid::parse_str(session_id)
        .map(|_| ())
        .map_err(|_| bad_request_error("Invalid session ID format"))
}

#[derive(Clone)]
pub struct AppState {
    pub runner: FlowRunner,
}

impl AppState {
    /// In-memory sessions in front of the given model client
    pub fn new(client: Arc<dyn InferenceClient>) -> Self {
        Self {
            runner: FlowRunner::new(
                Orchestrator::new(client),
                Arc::new(InMemorySessionStorage::new()),
            ),
        }
    }
}

pub fn create_app(config: InferenceConfig) -> Router {
    build_router(AppState::new(Arc::new(OpenRouterClient::new(config))))
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/form", get(get_form))
        .route("/courts", get(get_courts))
        .route("/sessions", post(create_session))
        .route(
            "/sessions/{session_id}",
            get(get_session).delete(delete_session),
        )
        .route("/sessions/{session_id}/events", post(submit_event))
        .route("/sessions/{session_id}/generate", post(generate))
        .layer(from_fn(correlation_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Tag every request with a correlation id and run it inside an `http_request` span
async fn correlation_id_middleware(mut request: Request, next: Next) -> Response {
    let correlation_id = Uuid::new_v4().to_string();
    let header = HeaderValue::from_str(&correlation_id).ok();

    if let Some(value) = &header {
        request
            .headers_mut()
            .insert(CORRELATION_ID_HEADER, value.clone());
    }

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    let mut response = next.run(request).instrument(span).await;

    if let Some(value) = header {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
    response
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Prudentia Legal Assistance Service",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /form": "Categories, form fields, petition languages and states",
            "GET /courts?pin_code=": "Map centre and court markers",
            "POST /sessions": "Start a new session",
            "GET /sessions/{session_id}": "Current session view",
            "DELETE /sessions/{session_id}": "Discard a session",
            "POST /sessions/{session_id}/events": "Send a UI action",
            "POST /sessions/{session_id}/generate": "Generate guidance or petition for the current step",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn get_form() -> Json<FormSchema> {
    Json(FormSchema::build())
}

async fn get_courts(Query(query): Query<CourtsQuery>) -> Json<CourtsView> {
    let view = courts::locate(query.pin_code.as_deref());
    if !view.found {
        info!(pin_code = ?query.pin_code, "pin code not in locator data");
    }
    Json(CourtsView::around(view))
}

async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    let session = state.runner.create().await.map_err(flow_error)?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<SessionView> {
    validate_session_id(&session_id)?;
    let session = state.runner.get(&session_id).await.map_err(flow_error)?;
    Ok(Json(session.into()))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    validate_session_id(&session_id)?;
    state
        .runner
        .discard(&session_id)
        .await
        .map_err(flow_error)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn submit_event(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(event): Json<UserEvent>,
) -> ApiResult<SessionView> {
    validate_session_id(&session_id)?;

    match state.runner.apply(&session_id, event.into()).await {
        Ok(session) => {
            info!(
                session_id = %session_id,
                step = ?session.current_step,
                "event applied"
            );
            Ok(Json(session.into()))
        }
        Err(e) => {
            warn!(session_id = %session_id, error = %e, "event rejected");
            Err(flow_error(e))
        }
    }
}

async fn generate(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<SessionView> {
    validate_session_id(&session_id)?;

    match state.runner.generate(&session_id).await {
        Ok(session) => Ok(Json(session.into())),
        Err(e) => {
            if e.is_generation_failure() {
                warn!(session_id = %session_id, error = %e, "generation failed, showing fallback");
            }
            Err(flow_error(e))
        }
    }
}
