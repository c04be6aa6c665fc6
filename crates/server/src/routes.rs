use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use reelgate_core::error::{ApiError, EndpointNotFound, ProxyErrorBody, SimpleErrorBody};
use reelgate_metadata::MetadataError;
use reelgate_player::embed::{EmbedTarget, embed_url, sanitize_url};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::cors::{CACHE_CONTROL_VALUE, preflight_middleware};
use crate::error::AppError;
use crate::shim;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/trending-movies", any(trending_movies))
        .route("/api/tv-shows/{*rest}", any(season_episodes))
        .nest("/embed", embed_router())
        .fallback(proxy)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(preflight_middleware)),
        )
        .with_state(state)
}

fn embed_router() -> Router<AppState> {
    Router::new()
        .route("/movie/{id}", get(embed_movie))
        .route("/tv/{id}/{season}/{episode}", get(embed_episode))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    provider: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        provider: state.provider.name().to_string(),
    })
}

// ---------------------------------------------------------------------------
// Proxy
// ---------------------------------------------------------------------------

fn passthrough(data: serde_json::Value, cacheable: bool) -> Response {
    let mut resp = (
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(data),
    )
        .into_response();
    if cacheable {
        resp.headers_mut().insert(
            header::CACHE_CONTROL,
            header::HeaderValue::from_static(CACHE_CONTROL_VALUE),
        );
    }
    resp
}

fn json_error<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(body),
    )
        .into_response()
}

fn query_pairs(uri: &Uri) -> Vec<(String, String)> {
    uri.query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}

/// Catch-all handler mapping `/api/*` paths onto upstream calls.
async fn proxy(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();

    let resolved = match shim::resolve(path) {
        Ok(r) => r,
        Err(pattern) => {
            return json_error(
                StatusCode::NOT_FOUND,
                EndpointNotFound {
                    error: "Invalid endpoint".to_string(),
                    requested_path: path.to_string(),
                    pattern,
                    available_endpoints: shim::available_endpoints(),
                },
            );
        }
    };

    let query = if resolved.endpoint.forwards_query() {
        query_pairs(&uri)
    } else {
        Vec::new()
    };

    match state
        .provider
        .fetch(&resolved.upstream_path, &query)
        .await
    {
        Ok(data) => passthrough(data, true),
        Err(e) => {
            error!(error = %e, path, pattern = %resolved.pattern, "proxy request failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ProxyErrorBody::internal(e.to_string()),
            )
        }
    }
}

/// Standalone trending endpoint. Unlike the proxy, upstream statuses are
/// passed through instead of collapsing to 500.
async fn trending_movies(State(state): State<AppState>) -> Response {
    match state.provider.fetch("/trending/movie/week", &[]).await {
        Ok(data) => passthrough(data, false),
        Err(MetadataError::Upstream { status, body }) => {
            error!(status, body = %body, "TMDB API error");
            json_error(
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                SimpleErrorBody::new("Failed to fetch trending movies"),
            )
        }
        Err(e) => {
            error!(error = %e, "trending movies request failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                SimpleErrorBody::new("Internal server error"),
            )
        }
    }
}

/// `/api/tv-shows/{show_id}/season/{season_number}`
async fn season_episodes(State(state): State<AppState>, uri: Uri) -> Response {
    let parts: Vec<&str> = uri.path().split('/').collect();
    let show_id = parts.get(3).copied().unwrap_or_default();
    let season_number = parts.get(5).copied().unwrap_or_default();

    if show_id.is_empty() || season_number.is_empty() {
        return json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            ProxyErrorBody::internal("Missing required parameters"),
        );
    }

    match state
        .provider
        .fetch(&format!("/tv/{show_id}/season/{season_number}"), &[])
        .await
    {
        Ok(data) => passthrough(data, true),
        Err(e) => {
            error!(error = %e, show_id, season_number, "season request failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ProxyErrorBody::internal(e.to_string()),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Embed
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct EmbedResponse {
    url: String,
}

fn embed_response(state: &AppState, target: EmbedTarget) -> Result<Json<EmbedResponse>, AppError> {
    let url = sanitize_url(&embed_url(&state.player, target), &state.player.embed_host);
    if url.is_empty() {
        return Err(ApiError::Internal(format!(
            "embed URL rejected for host {}",
            state.player.embed_host
        ))
        .into());
    }
    Ok(Json(EmbedResponse { url }))
}

fn parse_number(field: &str, raw: &str) -> Result<u32, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("{field} must be a number: {raw}")))
}

async fn embed_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmbedResponse>, AppError> {
    let target = EmbedTarget::movie(&id)?;
    embed_response(&state, target)
}

async fn embed_episode(
    State(state): State<AppState>,
    Path((id, season, episode)): Path<(String, String, String)>,
) -> Result<Json<EmbedResponse>, AppError> {
    let season = parse_number("season", &season)?;
    let episode = parse_number("episode", &episode)?;
    let target = EmbedTarget::episode(&id, season, episode)?;
    embed_response(&state, target)
}
