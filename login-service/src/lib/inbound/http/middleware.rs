use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::login::models::UserClaims;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::router::AppState;

/// Request extension carrying the decoded claims of a presented bearer
/// token.
///
/// Present exactly when the request carried a token that validated; whether
/// that is required, forbidden or optional is each handler's decision.
#[derive(Clone, Debug)]
pub struct BearerClaims(pub UserClaims);

/// Middleware that decodes an optional bearer token into a request
/// extension.
///
/// A request without an `Authorization: Bearer` header passes through
/// untouched. A token that is present but fails validation stops here; a
/// client that went to the trouble of sending one is told it did not hold.
pub async fn token_context(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(token) = bearer_token(&req) {
        let claims = state
            .auth_service
            .decode_token(token)
            .map_err(ApiError::from)?;
        req.extensions_mut().insert(BearerClaims(claims));
    }

    Ok(next.run(req).await)
}

/// Extract the bearer token from the Authorization header, if any.
fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
