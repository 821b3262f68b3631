use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Datelike, Utc};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{FetchMoviesRequest, FetchMoviesResponse, MovieRecord, NumberOrString};
use crate::services::UpstreamParams;

use super::AppState;

const INVALID_PAGE_MESSAGE: &str = "Invalid page number provided";

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Proxy handler for fetching movies by year, page, and genre
///
/// POST only; other methods are rejected by the method router with a 405 and
/// an `Allow: POST` header. Every outcome, including malformed bodies and
/// upstream failures, is returned as `{movies: [...]}` or `{error: "..."}`.
pub async fn fetch_movies(
    State(state): State<AppState>,
    payload: Result<Json<FetchMoviesRequest>, JsonRejection>,
) -> Response {
    let result = fetch_movies_inner(&state, payload).await;

    // Operational breadcrumb only; the functional contract is the body above.
    tracing::info!(completed_at = %Utc::now().to_rfc3339(), "fetchmovies request handled");

    match result {
        Ok(movies) => (StatusCode::OK, Json(FetchMoviesResponse { movies })).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn fetch_movies_inner(
    state: &AppState,
    payload: Result<Json<FetchMoviesRequest>, JsonRejection>,
) -> AppResult<Vec<MovieRecord>> {
    // An absent or malformed body has no usable page number, which is the
    // same failure as an explicit bad page.
    let Json(request) =
        payload.map_err(|_| AppError::InvalidInput(INVALID_PAGE_MESSAGE.to_string()))?;

    let page = request
        .page
        .as_ref()
        .and_then(NumberOrString::as_i64)
        .filter(|page| *page >= 1)
        .ok_or_else(|| AppError::InvalidInput(INVALID_PAGE_MESSAGE.to_string()))?;

    let year = request
        .year
        .as_ref()
        .map(NumberOrString::as_param)
        .filter(|year| !year.is_empty())
        .unwrap_or_else(|| Utc::now().year().to_string());

    // An empty genre means "no filter" and is left out of the upstream query.
    let genre = request.genre.filter(|genre| !genre.is_empty());

    let params = UpstreamParams { year, page, genre };
    state.provider.most_popular(&params).await
}
