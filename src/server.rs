use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, info};

use crate::dashboard::{Dashboard, FinalsData, SelectionEvent, handle_event};
use crate::dataset::FinalRecord;
use crate::error::DashboardError;
use crate::page::render_page;
use crate::win_summary::CountryWins;

pub fn create_router(data: Arc<FinalsData>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/events", post(selection_event))
        .route("/api/finals", get(finals))
        .route("/api/wins", get(wins))
        .with_state(data)
}

pub async fn serve(bind_addr: SocketAddr, data: Arc<FinalsData>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!("dashboard listening on http://{bind_addr}");
    axum::serve(listener, create_router(data))
        .await
        .context("dashboard server failed")
}

fn dashboard_error_to_response(err: DashboardError) -> Response {
    error!(invariant = err.is_invariant_violation(), "dashboard error: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
}

async fn index(State(data): State<Arc<FinalsData>>) -> Response {
    // Each page load starts a fresh session at the default selection.
    let dashboard = Dashboard::new(data);
    match render_page(&dashboard) {
        Ok(page) => Html(page).into_response(),
        Err(err) => dashboard_error_to_response(err),
    }
}

async fn selection_event(
    State(data): State<Arc<FinalsData>>,
    Json(event): Json<SelectionEvent>,
) -> Response {
    match handle_event(&data, &event) {
        Ok(updates) => Json(updates).into_response(),
        Err(err) => dashboard_error_to_response(err),
    }
}

async fn finals(State(data): State<Arc<FinalsData>>) -> Json<Vec<FinalRecord>> {
    Json(data.dataset().records().to_vec())
}

async fn wins(State(data): State<Arc<FinalsData>>) -> Json<Vec<CountryWins>> {
    Json(data.wins().entries().to_vec())
}
