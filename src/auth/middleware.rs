//! JWT auth middleware for protected routes.

use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResponse, error_codes};

/// Verify the bearer token and inject [`crate::auth::Claims`] into request
/// extensions for downstream handlers.
pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<()>>)> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(header_value) = header_value else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error(
                error_codes::MISSING_AUTH,
                "Missing Authorization header",
            )),
        ));
    };

    let Some(token) = header_value.strip_prefix("Bearer ") else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error(
                error_codes::MISSING_AUTH,
                "Expected Bearer token",
            )),
        ));
    };

    match state.auth.verify_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(e) => {
            debug!(error = %e, "token verification failed");
            Err((
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error(
                    error_codes::AUTH_FAILED,
                    "Invalid or expired token",
                )),
            ))
        }
    }
}
