//! HTTP API for the Hours Engine.
//!
//! This module exposes the calculators and the stored timesheets using
//! the [`axum`](https://crates.io/crates/axum) framework.  Clients post
//! raw `HH:MM` strings and receive formatted totals; malformed input
//! is answered with `422` and an `{"error": ...}` body.
//!
//! Stored timesheets are served read-only: the store is loaded once at
//! startup and never written back.  Editing (the CRUD methods on
//! [`Store`] and [`Store::save`]) is left to library callers.

use crate::config::Config;
use crate::engine::{calculate_worked, summarize_entries, summarize_store, summarize_user};
use crate::error::TimeError;
use crate::models::{TotalsRequest, UserSummary, WorkedRequest, WorkedResponse};
use crate::store::Store;
use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Application state shared across requests.
pub struct AppState {
    pub store: Store,
}

impl IntoResponse for TimeError {
    fn into_response(self) -> Response {
        let status = match self {
            TimeError::UnknownUser(_) | TimeError::EntryOutOfRange { .. } => StatusCode::NOT_FOUND,
            TimeError::MalformedTime(_) | TimeError::InvalidPause(_) | TimeError::LastEntry => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        };
        warn!(error = %self, %status, "rejected request");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

fn reject_body(rejection: JsonRejection) -> Response {
    warn!(error = %rejection.body_text(), "rejected request body");
    (rejection.status(), Json(json!({ "error": rejection.body_text() }))).into_response()
}

/// Build the API router around a loaded store.  Returns the router and
/// a handle to the state.
pub fn build_router(store: Store) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState { store });
    let router = Router::new()
        .route("/api/totals", post(totals_handler))
        .route("/api/worked", post(worked_handler))
        .route("/api/users", get(users_handler))
        .route("/api/users/:id/totals", get(user_totals_handler))
        .route("/api/users/:id/export", get(user_export_handler))
        .with_state(state.clone());
    (router, state)
}

/// Handler for POST /api/totals
async fn totals_handler(body: Result<Json<TotalsRequest>, JsonRejection>) -> Response {
    let Json(request) = match body {
        Ok(b) => b,
        Err(rejection) => return reject_body(rejection),
    };
    match summarize_entries(&request.entries, request.shift.as_ref()) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Handler for POST /api/worked
async fn worked_handler(body: Result<Json<WorkedRequest>, JsonRejection>) -> Response {
    let Json(request) = match body {
        Ok(b) => b,
        Err(rejection) => return reject_body(rejection),
    };
    match calculate_worked(&request) {
        Ok(worked) => (StatusCode::OK, Json(WorkedResponse { worked })).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Handler for GET /api/users
async fn users_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserSummary>>, TimeError> {
    Ok(Json(summarize_store(&app_state.store)?))
}

/// Handler for GET /api/users/:id/totals
async fn user_totals_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserSummary>, TimeError> {
    let store = &app_state.store;
    Ok(Json(summarize_user(store.user(&id)?, store.entries(&id)?)?))
}

/// Handler for GET /api/users/:id/export
async fn user_export_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<String, TimeError> {
    app_state.store.export_text(&id)
}

/// Launch the API server.  This function loads the store named in the
/// configuration and binds to the configured address.  It blocks until
/// the server terminates (e.g. when interrupted).
pub async fn serve(config: &Config) -> Result<()> {
    let store = Store::load(&config.store_path)?;
    let (router, _state) = build_router(store);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "server listening");
    axum::serve(listener, router).await?;
    Ok(())
}
