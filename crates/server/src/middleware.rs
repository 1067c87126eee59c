//! Request-scoped middleware: API-key auth, request-id propagation, and
//! request logging, layered in `server::build_router` around every route.

use std::sync::Arc;

use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use crate::error::ServerError;
use crate::state::ServerState;

/// A request's id, either carried in from an upstream `x-request-id` header
/// or minted fresh. Stashed in request extensions so `log_requests` (and any
/// handler) can read it back without re-deriving it.
#[derive(Debug, Clone)]
struct RequestId(String);

fn extract_api_key(request: &Request) -> Option<String> {
    request
        .headers()
        .get("x-api-key")
        .or_else(|| request.headers().get(AUTHORIZATION))
        .and_then(|v| v.to_str().ok())
        .map(|s| s.strip_prefix("Bearer ").unwrap_or(s).to_string())
}

/// Reject the request unless `x-api-key` (or `Authorization: Bearer <key>`)
/// carries a key [`ServerState::is_valid_api_key`] recognizes, then enforce
/// that key's rate limit before handing off to the route.
pub async fn api_key_auth(
    state: axum::extract::State<Arc<ServerState>>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(key) = extract_api_key(&request) else {
        return Err(ServerError::Authentication(
            "API key required. Provide it in 'X-API-Key' or 'Authorization: Bearer <key>' header"
                .to_string(),
        ));
    };

    if !state.is_valid_api_key(&key) {
        return Err(ServerError::Authentication("Invalid API key".to_string()));
    }
    if !state.check_rate_limit(&key) {
        return Err(ServerError::RateLimitExceeded);
    }

    Ok(next.run(request).await)
}

/// Stamp every request with a `RequestId`, reusing an inbound `x-request-id`
/// if present, and echo it back on the response so a caller can correlate
/// its own logs against ours.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request.extensions_mut().insert(RequestId(id.clone()));

    let mut response = next.run(request).await;
    if let Ok(value) = id.parse() {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

/// Wrap the request in a `tracing` span carrying method, URI, and request
/// id, and emit the outcome at span end. Runs after `request_id` in the
/// layering order so the id is already in extensions.
pub async fn log_requests(request: Request, next: Next) -> Response {
    use tracing::Instrument;

    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();

    let span = tracing::info_span!("http_request", %method, %uri, %request_id);
    async move {
        tracing::info!("request started");
        let start = std::time::Instant::now();
        let response = next.run(request).await;
        tracing::info!(
            status = %response.status(),
            duration_ms = %start.elapsed().as_millis(),
            "request completed"
        );
        response
    }
    .instrument(span)
    .await
}
