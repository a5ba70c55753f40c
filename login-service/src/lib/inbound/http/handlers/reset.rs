use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::TokenResponse;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::middleware::BearerClaims;
use crate::inbound::http::router::AppState;

/// Handler for the password reset endpoint.
///
/// Redeems a reset token: stores the new password and answers with a fresh
/// session token for the account the reset token was minted for.
pub async fn reset_password(
    State(state): State<AppState>,
    claims: Option<Extension<BearerClaims>>,
    body: Option<Json<ResetRequest>>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Some(Extension(BearerClaims(claims))) = claims else {
        tracing::warn!("Unauthorized attempt: password reset without a token");
        return Err(ApiError::token_not_provided());
    };

    let Some(Json(body)) = body else {
        return Err(ApiError::missing_parameters());
    };
    if body.password.is_empty() {
        return Err(ApiError::missing_parameters());
    }

    let signed = state
        .auth_service
        .reset_password(&claims, &body.password)
        .await?;

    tracing::info!("User '{}' has reset their password", claims.user.label());
    tracing::info!("Login successful: token expires at {}", signed.expires_at);

    Ok(Json(TokenResponse {
        token: signed.token,
    }))
}

/// HTTP request body for a password reset (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    password: String,
}
