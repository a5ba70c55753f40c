use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::TokenResponse;
use crate::domain::login::models::AuthOutcome;
use crate::domain::login::models::Identity;
use crate::domain::login::models::Role;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::middleware::BearerClaims;
use crate::inbound::http::router::AppState;

/// Handler for the login endpoint.
///
/// Verifies the presented credentials and answers with a session token. An
/// account that exists but has no password yet is answered with a failure
/// carrying a short-lived reset token instead.
pub async fn login(
    State(state): State<AppState>,
    claims: Option<Extension<BearerClaims>>,
    body: Option<Json<LoginRequest>>,
) -> Result<Json<TokenResponse>, ApiError> {
    // Holding a valid session already means there is nothing to log in to.
    // This outranks body validation, so it is checked before the body.
    if claims.is_some() {
        return Err(ApiError::already_logged_in());
    }

    let Some(Json(body)) = body else {
        return Err(ApiError::missing_parameters());
    };
    let params = body.try_into_params()?;

    let outcome = state
        .auth_service
        .authenticate(&params.identity, &params.password, params.role)
        .await?;

    match outcome {
        AuthOutcome::Success(user) => {
            let signed = state.auth_service.issue_login_token(&user)?;
            tracing::info!("Login successful: token expires at {}", signed.expires_at);
            Ok(Json(TokenResponse {
                token: signed.token,
            }))
        }
        AuthOutcome::MissingPassword(user) => {
            tracing::warn!(
                "Login failed: user '{}' has no password set",
                params.identity
            );
            let signed = state.auth_service.issue_reset_token(&user)?;
            tracing::info!("Handed out reset token that expires at {}", signed.expires_at);
            Err(ApiError::missing_password().with_details(ResetTokenDetails {
                reset_token: signed.token,
            }))
        }
        AuthOutcome::WrongPassword(_) => {
            tracing::warn!(
                "Unauthorized attempt: wrong password for user '{}'",
                params.identity
            );
            Err(ApiError::wrong_password())
        }
        AuthOutcome::WrongIdentity(found) => {
            if found.is_some() {
                tracing::warn!(
                    "Unauthorized attempt: user '{}' does not have the requested role",
                    params.identity
                );
            } else {
                tracing::warn!("Unauthorized attempt: user '{}' not found", params.identity);
            }
            Err(ApiError::wrong_identity())
        }
    }
}

/// HTTP request body for a login attempt (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    identity: String,
    #[serde(default)]
    password: String,
    role: Option<Role>,
}

impl LoginRequest {
    /// Validate the raw body into [LoginParams].
    ///
    /// Both credential fields must be non-empty. An unparseable role has
    /// already failed at deserialization and never reaches this point.
    fn try_into_params(self) -> Result<LoginParams, ApiError> {
        if self.password.is_empty() {
            return Err(ApiError::missing_parameters());
        }
        let identity =
            Identity::new(self.identity).map_err(|_| ApiError::missing_parameters())?;

        Ok(LoginParams {
            identity,
            password: self.password,
            role: self.role,
        })
    }
}

/// Validated login parameters.
struct LoginParams {
    identity: Identity,
    password: String,
    role: Option<Role>,
}

/// Client-visible details attached to a MISSING_PASSWORD failure.
///
/// The reset token rides along so the account holder can proceed straight
/// to setting their first password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetTokenDetails {
    pub reset_token: String,
}
