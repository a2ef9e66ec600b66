use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Validated API key, injected into request extensions for downstream use.
/// Every valid key carries identical, full privilege.
#[derive(Clone, Debug)]
pub struct ApiKey(pub String);

/// Static API-key middleware guarding the application routes and /version.
pub async fn require_api_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let supplied = bearer_token(&headers);
    let key = verify_api_key(state.config.api_key.as_deref(), supplied.as_deref())?;

    request.extensions_mut().insert(ApiKey(key));
    Ok(next.run(request).await)
}

/// Compare a supplied bearer credential against the configured secret.
///
/// A missing server-side secret is a misconfiguration, reported distinctly
/// from (and ahead of) any client auth failure.
pub fn verify_api_key(
    configured: Option<&str>,
    supplied: Option<&str>,
) -> Result<String, ApiError> {
    let Some(expected) = configured else {
        return Err(ApiError::server_misconfigured(
            "API key not configured on server",
        ));
    };

    let Some(supplied) = supplied else {
        return Err(ApiError::unauthorized(
            "API key required. Please provide 'Authorization: Bearer your_api_key' header",
        ));
    };

    if supplied != expected {
        return Err(ApiError::unauthorized("Invalid API key"));
    }

    Ok(supplied.to_string())
}

/// Extract the bearer credential from the Authorization header. A missing
/// header, a non-Bearer scheme, and an empty token all count as "no key
/// supplied".
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
