use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::error::ApiError;
use super::handlers::login::login;
use super::handlers::reset::reset_password;
use super::middleware::token_context;
use crate::domain::login::service::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
}

pub fn create_router(auth_service: Arc<AuthService>) -> Router {
    let state = AppState { auth_service };

    // Both endpoints are POST-only. A wrong method on a known path answers
    // the same way as an unknown path, so each route carries the fallback.
    let api_routes = Router::new()
        .route("/api/login", post(login).fallback(invalid_route))
        .route("/api/reset", post(reset_password).fallback(invalid_route))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            token_context,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
                headers = ?request.headers(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(api_routes)
        .fallback(invalid_route)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Fallback for requests that match no route.
async fn invalid_route() -> ApiError {
    ApiError::invalid_route()
}
