//! Staff authentication.
//!
//! Staff-gated endpoints check an `X-API-Key` header against the
//! `STAFF_API_KEY` environment variable. The manager views additionally
//! confirm a shared password via POST /api/validate-manager.

use axum::{
    http::{header::HeaderMap, StatusCode},
    Json,
};
use tracing::{error, warn};

use crate::models::auth::{AuthStatusResponse, ValidateManagerRequest, ValidateManagerResponse};

/// Check staff authentication via the X-API-Key header.
///
/// Returns (status, message) so each handler family can wrap the failure in
/// its own error body.
pub fn check_staff_auth(headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let staff_key = std::env::var("STAFF_API_KEY").map_err(|_| {
        error!("STAFF_API_KEY not configured");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server configuration error".to_string(),
        )
    })?;

    let provided_key = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if provided_key != staff_key {
        warn!("Invalid or missing API key");
        return Err((
            StatusCode::UNAUTHORIZED,
            "Invalid or missing API key".to_string(),
        ));
    }

    Ok(())
}

/// Report whether the presented credentials are valid
///
/// GET /auth-status
pub async fn auth_status(headers: HeaderMap) -> Json<AuthStatusResponse> {
    Json(AuthStatusResponse {
        authenticated: check_staff_auth(&headers).is_ok(),
    })
}

/// Validate the manager password
///
/// POST /api/validate-manager
///
/// Staff-gated; returns `{ "valid": true }` on success and 401 with
/// `{ "valid": false }` on a wrong password.
pub async fn validate_manager(
    headers: HeaderMap,
    Json(payload): Json<ValidateManagerRequest>,
) -> Result<Json<ValidateManagerResponse>, (StatusCode, Json<ValidateManagerResponse>)> {
    if let Err((status, _)) = check_staff_auth(&headers) {
        return Err((status, Json(ValidateManagerResponse { valid: false })));
    }

    let manager_password = std::env::var("MANAGER_PASSWORD").map_err(|_| {
        error!("MANAGER_PASSWORD not configured");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ValidateManagerResponse { valid: false }),
        )
    })?;

    if payload.password == manager_password {
        Ok(Json(ValidateManagerResponse { valid: true }))
    } else {
        warn!("Manager password validation failed");
        Err((
            StatusCode::UNAUTHORIZED,
            Json(ValidateManagerResponse { valid: false }),
        ))
    }
}
