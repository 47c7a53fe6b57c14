//! Auth request/response models.

use serde::{Deserialize, Serialize};

/// Response of GET /auth-status.
#[derive(Debug, Clone, Serialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
}

/// Body of POST /api/validate-manager.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateManagerRequest {
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateManagerResponse {
    pub valid: bool,
}
