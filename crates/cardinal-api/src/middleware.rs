//! Middleware — authentication extraction.

use axum::{extract::Request, http::header, middleware::Next, response::Response};
use cardinal_common::error::CardinalError;

use crate::auth;

/// Authentication context extracted from the Authorization header.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: uuid::Uuid,
}

/// Extract and validate the JWT from the Authorization: Bearer <token> header.
///
/// Rejects uniformly: a missing header, a malformed token, and an expired
/// session all produce the same 401 without touching the store.
pub async fn auth_middleware(mut request: Request, next: Next) -> Result<Response, CardinalError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(CardinalError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(CardinalError::Unauthorized)?;

    let config = cardinal_common::config::get();
    let claims = auth::validate_token(token, &config.auth.jwt_secret)
        .map_err(|_| CardinalError::InvalidToken)?;

    if claims.token_type != "session" {
        return Err(CardinalError::InvalidToken);
    }

    let user_id = claims
        .sub
        .parse::<uuid::Uuid>()
        .map_err(|_| CardinalError::InvalidToken)?;

    request.extensions_mut().insert(AuthContext { user_id });

    Ok(next.run(request).await)
}
