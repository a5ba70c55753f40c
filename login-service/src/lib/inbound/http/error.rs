use std::fmt::Display;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::login::errors::AuthError;

/// The closed set of failure kinds the API exposes.
///
/// Every failure that crosses the HTTP boundary is one of these, each with a
/// fixed status and a stable machine-readable code that clients branch on.
/// Statuses are informational; the code is the contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// An internal fault with no more specific classification.
    Unknown,
    /// A backing dependency, such as the user store, cannot be reached.
    ServiceUnavailable,
    /// The request body is missing, unreadable or incomplete.
    MissingParameters,
    /// The account exists but has no password on record yet.
    MissingPassword,
    /// No account matched the presented identity and role.
    WrongIdentity,
    /// The password did not match.
    WrongPassword,
    /// A login was attempted while already holding a valid session.
    AlreadyLoggedIn,
    /// The operation needs a bearer token and none was sent.
    TokenNotProvided,
    /// The bearer token is expired, malformed or minted for another purpose.
    InvalidToken,
    /// No route matched the request.
    InvalidRoute,
}

impl ErrorKind {
    /// HTTP status this kind answers with.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::ServiceUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::MissingParameters => StatusCode::BAD_REQUEST,
            ErrorKind::MissingPassword => StatusCode::NOT_FOUND,
            ErrorKind::WrongIdentity => StatusCode::UNAUTHORIZED,
            ErrorKind::WrongPassword => StatusCode::UNAUTHORIZED,
            ErrorKind::AlreadyLoggedIn => StatusCode::BAD_REQUEST,
            ErrorKind::TokenNotProvided => StatusCode::UNAUTHORIZED,
            ErrorKind::InvalidToken => StatusCode::UNAUTHORIZED,
            ErrorKind::InvalidRoute => StatusCode::NOT_FOUND,
        }
    }

    /// Stable wire code this kind is reported as.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Unknown => "UNKNOWN",
            ErrorKind::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorKind::MissingParameters => "MISSING_PARAMETERS",
            ErrorKind::MissingPassword => "MISSING_PASSWORD",
            ErrorKind::WrongIdentity => "WRONG_IDENTITY",
            ErrorKind::WrongPassword => "WRONG_PASSWORD",
            ErrorKind::AlreadyLoggedIn => "ALREADY_LOGGED_IN",
            ErrorKind::TokenNotProvided => "TOKEN_NOT_PROVIDED",
            ErrorKind::InvalidToken => "INVALID_TOKEN",
            ErrorKind::InvalidRoute => "INVALID_ROUTE",
        }
    }
}

/// A classified API failure.
///
/// Carries optional structured details for the client and an optional
/// internal cause that is logged at the boundary but never serialized.
#[derive(Debug)]
pub struct ApiError {
    kind: ErrorKind,
    details: Option<serde_json::Value>,
    cause: Option<anyhow::Error>,
}

impl ApiError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            details: None,
            cause: None,
        }
    }

    pub fn missing_parameters() -> Self {
        Self::new(ErrorKind::MissingParameters)
    }

    pub fn missing_password() -> Self {
        Self::new(ErrorKind::MissingPassword)
    }

    pub fn wrong_identity() -> Self {
        Self::new(ErrorKind::WrongIdentity)
    }

    pub fn wrong_password() -> Self {
        Self::new(ErrorKind::WrongPassword)
    }

    pub fn already_logged_in() -> Self {
        Self::new(ErrorKind::AlreadyLoggedIn)
    }

    pub fn token_not_provided() -> Self {
        Self::new(ErrorKind::TokenNotProvided)
    }

    pub fn invalid_route() -> Self {
        Self::new(ErrorKind::InvalidRoute)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Attach client-visible details.
    ///
    /// A value that fails to serialize is silently dropped; the classified
    /// code still reaches the client.
    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    /// Attach an internal cause. Logged when the response is written, never
    /// sent to the client.
    pub fn with_cause(mut self, cause: impl Into<anyhow::Error>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

/// Two API errors are the same failure when their kinds match; details and
/// cause do not participate.
impl PartialEq for ApiError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {}", self.kind.code(), cause),
            None => f.write_str(self.kind.code()),
        }
    }
}

impl std::error::Error for ApiError {}

/// Classify a domain failure into its wire shape.
///
/// This is the single place where internal error kinds become transport
/// codes; handlers use `?` and never match on [AuthError] themselves.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let kind = match &err {
            AuthError::WrongUsage => ErrorKind::InvalidToken,
            AuthError::UserNotFound => ErrorKind::WrongIdentity,
            AuthError::InvalidToken(_) => ErrorKind::InvalidToken,
            AuthError::Hashing(_) => ErrorKind::Unknown,
            AuthError::Signing(_) => ErrorKind::Unknown,
            AuthError::Store(_) => ErrorKind::ServiceUnavailable,
        };
        ApiError::new(kind).with_cause(err)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(cause) = &self.cause {
            tracing::error!(code = self.kind.code(), "{:#}", cause);
        }

        let body = ErrorBody {
            error: self.kind.code(),
            details: self.details.as_ref(),
        };
        (self.kind.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use auth::TokenError;
    use serde_json::json;

    use super::*;
    use crate::domain::login::errors::StoreError;

    #[test]
    fn test_every_kind_has_fixed_status_and_code() {
        let table = [
            (ErrorKind::Unknown, StatusCode::INTERNAL_SERVER_ERROR, "UNKNOWN"),
            (
                ErrorKind::ServiceUnavailable,
                StatusCode::INTERNAL_SERVER_ERROR,
                "SERVICE_UNAVAILABLE",
            ),
            (
                ErrorKind::MissingParameters,
                StatusCode::BAD_REQUEST,
                "MISSING_PARAMETERS",
            ),
            (
                ErrorKind::MissingPassword,
                StatusCode::NOT_FOUND,
                "MISSING_PASSWORD",
            ),
            (
                ErrorKind::WrongIdentity,
                StatusCode::UNAUTHORIZED,
                "WRONG_IDENTITY",
            ),
            (
                ErrorKind::WrongPassword,
                StatusCode::UNAUTHORIZED,
                "WRONG_PASSWORD",
            ),
            (
                ErrorKind::AlreadyLoggedIn,
                StatusCode::BAD_REQUEST,
                "ALREADY_LOGGED_IN",
            ),
            (
                ErrorKind::TokenNotProvided,
                StatusCode::UNAUTHORIZED,
                "TOKEN_NOT_PROVIDED",
            ),
            (
                ErrorKind::InvalidToken,
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
            ),
            (ErrorKind::InvalidRoute, StatusCode::NOT_FOUND, "INVALID_ROUTE"),
        ];

        for (kind, status, code) in table {
            assert_eq!(kind.status(), status);
            assert_eq!(kind.code(), code);
        }
    }

    #[test]
    fn test_equality_ignores_details_and_cause() {
        let bare = ApiError::missing_password();
        let decorated = ApiError::missing_password()
            .with_details(json!({"reset_token": "abc"}))
            .with_cause(StoreError::Unavailable("boom".to_string()));

        assert_eq!(bare, decorated);
        assert_ne!(bare, ApiError::wrong_password());
    }

    #[test]
    fn test_domain_errors_classify_to_wire_codes() {
        let cases = [
            (AuthError::WrongUsage, ErrorKind::InvalidToken),
            (AuthError::UserNotFound, ErrorKind::WrongIdentity),
            (
                AuthError::InvalidToken(TokenError::Expired),
                ErrorKind::InvalidToken,
            ),
            (
                AuthError::Signing(TokenError::EncodingFailed("boom".to_string())),
                ErrorKind::Unknown,
            ),
            (
                AuthError::Store(StoreError::Unavailable("boom".to_string())),
                ErrorKind::ServiceUnavailable,
            ),
        ];

        for (err, kind) in cases {
            assert_eq!(ApiError::from(err).kind(), kind);
        }
    }

    #[tokio::test]
    async fn test_response_body_carries_code_and_details() {
        let response = ApiError::missing_password()
            .with_details(json!({"reset_token": "abc"}))
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({
                "error": "MISSING_PASSWORD",
                "details": {"reset_token": "abc"},
            })
        );
    }

    #[tokio::test]
    async fn test_response_body_omits_absent_details() {
        let response = ApiError::wrong_identity().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"error": "WRONG_IDENTITY"}));
    }
}
