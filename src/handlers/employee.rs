//! Employee CRUD handlers.

use axum::{
    extract::{Path, State},
    http::{header::HeaderMap, StatusCode},
    Json,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{error, info, warn};

use crate::entities::{employees, orders, prelude::*};
use crate::handlers::auth::check_staff_auth;
use crate::models::employee::{DeleteEmployeeResponse, EmployeeErrorResponse, EmployeeNameRequest};
use crate::AppState;

type EmployeeError = (StatusCode, Json<EmployeeErrorResponse>);

fn db_error(e: sea_orm::DbErr) -> EmployeeError {
    error!(error = %e, "Employee query failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(EmployeeErrorResponse {
            error: format!("Database error: {}", e),
        }),
    )
}

fn auth_error((status, error): (StatusCode, String)) -> EmployeeError {
    (status, Json(EmployeeErrorResponse { error }))
}

fn not_found(id: i32) -> EmployeeError {
    (
        StatusCode::NOT_FOUND,
        Json(EmployeeErrorResponse {
            error: format!("employee {} not found", id),
        }),
    )
}

/// List employees ordered by id
///
/// GET /api/employees
pub async fn get_employees(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<employees::Model>>, EmployeeError> {
    check_staff_auth(&headers).map_err(auth_error)?;

    let list = Employees::find()
        .order_by_asc(employees::Column::Id)
        .all(&state.db)
        .await
        .map_err(db_error)?;

    Ok(Json(list))
}

/// Create an employee
///
/// POST /api/employees
pub async fn create_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<EmployeeNameRequest>,
) -> Result<Json<employees::Model>, EmployeeError> {
    check_staff_auth(&headers).map_err(auth_error)?;

    if let Err(e) = payload.validate() {
        warn!(error = %e, "Invalid employee payload");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(EmployeeErrorResponse { error: e }),
        ));
    }

    let employee = employees::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        ..Default::default()
    };
    let created = employee.insert(&state.db).await.map_err(db_error)?;

    info!(id = created.id, name = %created.name, "Employee created");
    Ok(Json(created))
}

/// Rename an employee
///
/// PUT /api/employees/:id
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    Json(payload): Json<EmployeeNameRequest>,
) -> Result<Json<employees::Model>, EmployeeError> {
    check_staff_auth(&headers).map_err(auth_error)?;

    if let Err(e) = payload.validate() {
        warn!(error = %e, "Invalid employee payload");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(EmployeeErrorResponse { error: e }),
        ));
    }

    let existing = Employees::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(id))?;

    let mut employee: employees::ActiveModel = existing.into();
    employee.name = Set(payload.name.trim().to_string());
    let updated = employee.update(&state.db).await.map_err(db_error)?;

    info!(id = updated.id, name = %updated.name, "Employee renamed");
    Ok(Json(updated))
}

/// Delete an employee
///
/// DELETE /api/employees/:id
///
/// Refused with 409 while orders still reference the employee.
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Result<Json<DeleteEmployeeResponse>, EmployeeError> {
    check_staff_auth(&headers).map_err(auth_error)?;

    let existing = Employees::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(id))?;

    let order_count = Orders::find()
        .filter(orders::Column::EmployeeId.eq(id))
        .count(&state.db)
        .await
        .map_err(db_error)?;
    if order_count > 0 {
        return Err((
            StatusCode::CONFLICT,
            Json(EmployeeErrorResponse {
                error: format!("employee {} has {} orders and cannot be deleted", id, order_count),
            }),
        ));
    }

    existing.delete(&state.db).await.map_err(db_error)?;

    info!(id = id, "Employee deleted");
    Ok(Json(DeleteEmployeeResponse {
        message: "Employee deleted".to_string(),
    }))
}
