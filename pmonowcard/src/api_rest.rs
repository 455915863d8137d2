//! HTTP surface for the now-playing card
//!
//! A single logical endpoint: every GET, whatever its path, renders the
//! current snapshot with optional style overrides from the query string.

use crate::error::Error;
use crate::render::CardRenderer;
use crate::style::RenderStyle;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use pmonowfeed::SnapshotStore;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

// ============ Gestion des erreurs ============

struct AppError(Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            // No track yet: the service is up but has nothing to show
            Error::NoTrack => StatusCode::SERVICE_UNAVAILABLE,
            // Upstream artwork problems
            Error::Http(_) | Error::ArtworkStatus(_) => StatusCode::BAD_GATEWAY,
            Error::Palette(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({
            "error": self.0.to_string()
        }));

        (status, body).into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

// ============================================================================
// State & Router
// ============================================================================

/// Optional style overrides taken from the query string
#[derive(Debug, Deserialize)]
pub struct CardParams {
    pub background_color: Option<String>,
    pub border_color: Option<String>,
}

/// Shared state for the card endpoint
#[derive(Clone)]
pub struct CardState {
    pub store: SnapshotStore,
    pub renderer: Arc<CardRenderer>,
}

/// Crée le router pour l'endpoint de rendu
///
/// The path is not used to select behaviour: `/` and any subpath render the
/// same card.
pub fn create_router(state: CardState) -> Router {
    Router::new()
        .route("/", get(render_card))
        .route("/{*path}", get(render_card))
        .with_state(state)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /<any path>?background_color=..&border_color=..
/// Renders the current track as an SVG card
async fn render_card(
    State(state): State<CardState>,
    Query(params): Query<CardParams>,
) -> Result<Response, AppError> {
    let style = RenderStyle::from_params(params.background_color, params.border_color);

    // Read the snapshot exactly once; "latest at time of request" is the
    // contract, there is no waiting for a fresher value
    let snapshot = state.store.current().await.ok_or(Error::NoTrack)?;

    info!(title=%snapshot.title, artist=%snapshot.artist, "Rendering now-playing card");

    let svg = state.renderer.render(&snapshot, &style).await?;

    let mut headers = HeaderMap::new();
    headers.insert("content-type", "image/svg+xml".parse().unwrap());
    // Shared caches may hold the card for one second at most: enough to
    // absorb a burst of identical requests, stale for barely an instant
    headers.insert("cache-control", "s-maxage=1".parse().unwrap());

    Ok((headers, svg).into_response())
}
