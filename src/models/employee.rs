//! Employee request/response models.

use serde::{Deserialize, Serialize};

/// Body of POST /api/employees and PUT /api/employees/:id.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeNameRequest {
    pub name: String,
}

impl EmployeeNameRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name cannot be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteEmployeeResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeErrorResponse {
    pub error: String,
}
