use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::authority::{TransitionAuthority, TransitionError};
use super::domain::{ActorRole, ApplicationId, CategoryId, Identity};
use super::runner::AutomationRunner;
use super::store::TrackingStore;

const ROLE_HEADER: &str = "x-actor-role";
const ACTOR_HEADER: &str = "x-actor-id";

/// Shared state for the tracking endpoints.
pub struct TrackingState<S> {
    pub authority: Arc<TransitionAuthority<S>>,
    pub runner: Arc<AutomationRunner<S>>,
}

impl<S> Clone for TrackingState<S> {
    fn clone(&self) -> Self {
        Self {
            authority: Arc::clone(&self.authority),
            runner: Arc::clone(&self.runner),
        }
    }
}

/// Router exposing the tracking API. The caller's identity arrives via the
/// `x-actor-role` and `x-actor-id` headers; verifying the token they came
/// from is the job of an upstream layer.
pub fn tracking_router<S>(state: TrackingState<S>) -> Router
where
    S: TrackingStore + 'static,
{
    Router::new()
        .route("/api/v1/categories", post(create_category_handler::<S>))
        .route(
            "/api/v1/applications",
            post(create_handler::<S>).get(list_handler::<S>),
        )
        .route("/api/v1/applications/:id", get(get_handler::<S>))
        .route("/api/v1/applications/:id/logs", get(logs_handler::<S>))
        .route(
            "/api/v1/applications/:id/status",
            put(admin_status_handler::<S>),
        )
        .route("/api/v1/automation/run", post(automation_run_handler::<S>))
        .with_state(state)
}

#[async_trait]
impl<St> FromRequestParts<St> for Identity
where
    St: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        let role = header_value(parts, ROLE_HEADER)?
            .parse::<ActorRole>()
            .map_err(|err| bad_request(err.to_string()))?;
        let actor_id = header_value(parts, ACTOR_HEADER)?
            .parse::<u64>()
            .map_err(|_| bad_request(format!("{ACTOR_HEADER} must be a numeric id")))?;
        Ok(Identity { role, actor_id })
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, Response> {
    parts
        .headers
        .get(name)
        .ok_or_else(|| bad_request(format!("missing {name} header")))?
        .to_str()
        .map_err(|_| bad_request(format!("{name} header must be printable ASCII")))
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

fn error_response(err: TransitionError) -> Response {
    let status = match &err {
        TransitionError::NotFound => StatusCode::NOT_FOUND,
        TransitionError::Forbidden(_) => StatusCode::BAD_REQUEST,
        TransitionError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

#[derive(Debug, Deserialize)]
struct CreateCategoryRequest {
    name: String,
    #[serde(default)]
    is_technical: bool,
}

#[derive(Debug, Deserialize)]
struct CreateApplicationRequest {
    category_id: u64,
}

#[derive(Debug, Deserialize)]
struct UpdateStatusRequest {
    status: String,
    #[serde(default)]
    comment: Option<String>,
}

async fn create_category_handler<S>(
    State(state): State<TrackingState<S>>,
    identity: Identity,
    Json(request): Json<CreateCategoryRequest>,
) -> Response
where
    S: TrackingStore + 'static,
{
    match state
        .authority
        .create_category(&identity, &request.name, request.is_technical)
    {
        Ok(category) => (
            StatusCode::CREATED,
            Json(json!({ "message": "job category created", "category": category })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

async fn create_handler<S>(
    State(state): State<TrackingState<S>>,
    identity: Identity,
    Json(request): Json<CreateApplicationRequest>,
) -> Response
where
    S: TrackingStore + 'static,
{
    match state
        .authority
        .create(&identity, CategoryId(request.category_id))
    {
        Ok((record, _entry)) => (
            StatusCode::CREATED,
            Json(json!({ "message": "application created", "application": record })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

async fn list_handler<S>(State(state): State<TrackingState<S>>, identity: Identity) -> Response
where
    S: TrackingStore + 'static,
{
    match state.authority.applications(&identity) {
        Ok(records) => Json(records).into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_handler<S>(
    State(state): State<TrackingState<S>>,
    identity: Identity,
    Path(id): Path<u64>,
) -> Response
where
    S: TrackingStore + 'static,
{
    match state.authority.application(&identity, ApplicationId(id)) {
        Ok(record) => Json(record).into_response(),
        Err(err) => error_response(err),
    }
}

async fn logs_handler<S>(
    State(state): State<TrackingState<S>>,
    identity: Identity,
    Path(id): Path<u64>,
) -> Response
where
    S: TrackingStore + 'static,
{
    match state.authority.logs(&identity, ApplicationId(id)) {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => error_response(err),
    }
}

async fn admin_status_handler<S>(
    State(state): State<TrackingState<S>>,
    identity: Identity,
    Path(id): Path<u64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Response
where
    S: TrackingStore + 'static,
{
    match state.authority.admin_transition(
        &identity,
        ApplicationId(id),
        &request.status,
        request.comment.as_deref(),
    ) {
        Ok((record, entry)) => Json(json!({
            "message": "status updated",
            "application_id": record.id,
            "old_status": entry.old_status,
            "new_status": entry.new_status,
        }))
        .into_response(),
        Err(err) => error_response(err),
    }
}

async fn automation_run_handler<S>(
    State(state): State<TrackingState<S>>,
    identity: Identity,
) -> Response
where
    S: TrackingStore + 'static,
{
    match state.runner.run(&identity) {
        Ok(summary) => Json(summary).into_response(),
        Err(err) => error_response(err),
    }
}
