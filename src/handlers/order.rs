//! Order handlers.
//!
//! GET /api/orders serves the windowed queue view (all active orders plus
//! the 10 most recent completed ones), with the projector-derived age,
//! urgency color, and valuation inlined per entry so every client view
//! shares one implementation of that arithmetic.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::{header::HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, Set, TransactionTrait,
};
use tracing::{error, info, warn};

use crate::entities::{employees, order_items, orders, prelude::*};
use crate::handlers::auth::check_staff_auth;
use crate::models::order::{
    CreateOrderRequest, CreateOrderResponse, OrderErrorResponse, OrderLineItem, OrderListResponse,
    OrderRevenueSummary, OrderSummary, OrderView, UpdateOrderRequest,
};
use crate::services::order_lifecycle::{
    order_value, urgency_color, visible_set, MenuIndex, OrderAge,
};
use crate::AppState;

type OrderError = (StatusCode, Json<OrderErrorResponse>);

fn db_error(e: sea_orm::DbErr) -> OrderError {
    error!(error = %e, "Order query failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(OrderErrorResponse {
            error: format!("Database error: {}", e),
        }),
    )
}

fn auth_error((status, error): (StatusCode, String)) -> OrderError {
    (status, Json(OrderErrorResponse { error }))
}

fn not_found(id: i32) -> OrderError {
    (
        StatusCode::NOT_FOUND,
        Json(OrderErrorResponse {
            error: format!("order {} not found", id),
        }),
    )
}

/// Load every order with its line items and employee name, as raw
/// projector input.
async fn load_order_summaries(state: &AppState) -> Result<Vec<OrderSummary>, sea_orm::DbErr> {
    let employee_names: HashMap<i32, String> = Employees::find()
        .all(&state.db)
        .await?
        .into_iter()
        .map(|e| (e.id, e.name))
        .collect();

    let orders_with_items = Orders::find()
        .find_with_related(OrderItems)
        .all(&state.db)
        .await?;

    Ok(orders_with_items
        .into_iter()
        .map(|(order, items)| OrderSummary {
            id: order.id,
            order_time: order.order_time.with_timezone(&Utc),
            is_active: order.is_active,
            employee_name: order
                .employee_id
                .and_then(|id| employee_names.get(&id).cloned()),
            items: items
                .into_iter()
                .map(|item| OrderLineItem {
                    menu_item: item.menu_item,
                    quantity: item.quantity,
                })
                .collect(),
        })
        .collect())
}

/// List the staff queue view
///
/// GET /api/orders
///
/// All active orders newest-first, then the 10 most recent completed
/// orders newest-first. Each entry carries its items, employee name,
/// current-menu total, age, and urgency color as of serve time. Clients
/// poll this endpoint; nothing is cached server-side.
pub async fn list_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<OrderListResponse>, OrderError> {
    check_staff_auth(&headers).map_err(auth_error)?;

    let summaries = load_order_summaries(&state).await.map_err(db_error)?;
    let menu = MenuIndex::from_menu(&MenuItems::find().all(&state.db).await.map_err(db_error)?);

    let now = Utc::now();
    let visible = visible_set(&summaries);
    let active_count = visible.iter().filter(|o| o.is_active).count();
    let completed_count = visible.len() - active_count;

    let views = visible
        .into_iter()
        .map(|order| {
            let age = OrderAge::of(order.order_time, now);
            OrderView {
                total: order_value(&order.items, &menu),
                age_minutes: age.total_minutes,
                age_display: age.display(),
                urgency_color: urgency_color(order.order_time, now),
                id: order.id,
                order_time: order.order_time,
                is_active: order.is_active,
                employee_name: order.employee_name,
                items: order.items,
            }
        })
        .collect();

    info!(
        active = active_count,
        completed = completed_count,
        "Order list served"
    );

    Ok(Json(OrderListResponse {
        orders: views,
        active_count,
        completed_count,
    }))
}

/// Create an order
///
/// POST /api/orders (public: the customer ordering view submits here)
///
/// Runs in a single transaction: resolve (or create a default) employee,
/// insert the order active with a server-assigned timestamp, insert its
/// line items. Any failure rolls the whole order back.
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>, OrderError> {
    let correlation_id = uuid::Uuid::new_v4().to_string();
    info!(
        correlation_id = %correlation_id,
        items = payload.items.len(),
        employee_id = payload.employee_id,
        "Order submission received"
    );

    if let Err(e) = payload.validate() {
        warn!(correlation_id = %correlation_id, error = %e, "Invalid order payload");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(OrderErrorResponse { error: e }),
        ));
    }

    // Dropped uncommitted on any early return, rolling the order back
    let txn = state.db.begin().await.map_err(db_error)?;

    let employee_id = match payload.employee_id {
        Some(id) => {
            let exists = Employees::find_by_id(id)
                .one(&txn)
                .await
                .map_err(db_error)?;
            if exists.is_none() {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(OrderErrorResponse {
                        error: format!("employee {} not found", id),
                    }),
                ));
            }
            id
        }
        None => {
            let first = Employees::find()
                .order_by_asc(employees::Column::Id)
                .one(&txn)
                .await
                .map_err(db_error)?;
            match first {
                Some(employee) => employee.id,
                None => {
                    let created = employees::ActiveModel {
                        name: Set("Default Employee".to_string()),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await
                    .map_err(db_error)?;
                    created.id
                }
            }
        }
    };

    let order = orders::ActiveModel {
        employee_id: Set(Some(employee_id)),
        order_time: Set(Utc::now().into()),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(db_error)?;

    for item in &payload.items {
        order_items::ActiveModel {
            order_id: Set(order.id),
            menu_item: Set(item.name.trim().to_string()),
            quantity: Set(item.quantity),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error)?;
    }

    txn.commit().await.map_err(db_error)?;

    info!(correlation_id = %correlation_id, order_id = order.id, "Order created");
    Ok(Json(CreateOrderResponse {
        success: true,
        order_id: order.id,
    }))
}

/// Set an order's active flag
///
/// PUT /api/orders/:id
///
/// Idempotent: completing a completed order or reactivating an active one
/// is a no-op write.
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    Json(payload): Json<UpdateOrderRequest>,
) -> Result<Json<orders::Model>, OrderError> {
    check_staff_auth(&headers).map_err(auth_error)?;

    let existing = Orders::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(id))?;

    let mut order: orders::ActiveModel = existing.into();
    order.is_active = Set(payload.is_active);
    let updated = order.update(&state.db).await.map_err(db_error)?;

    info!(id = updated.id, is_active = updated.is_active, "Order flag set");
    Ok(Json(updated))
}

/// Delete an order permanently
///
/// DELETE /api/orders/:id
///
/// Only completed orders may be deleted; active ones return 409. Line
/// items go with the order via the cascade.
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, OrderError> {
    check_staff_auth(&headers).map_err(auth_error)?;

    let existing = Orders::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(id))?;

    if existing.is_active {
        return Err((
            StatusCode::CONFLICT,
            Json(OrderErrorResponse {
                error: format!("order {} is still active; complete it before deleting", id),
            }),
        ));
    }

    existing.delete(&state.db).await.map_err(db_error)?;

    info!(id = id, "Order deleted");
    Ok(Json(serde_json::json!({ "message": "Order deleted" })))
}

/// Revenue summary over all orders
///
/// GET /api/orders/summary
///
/// Values every order against the current menu (no price snapshotting, so
/// menu edits shift historical revenue) and reports totals to 2 decimal
/// places.
pub async fn revenue_summary(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<OrderRevenueSummary>, OrderError> {
    check_staff_auth(&headers).map_err(auth_error)?;

    let summaries = load_order_summaries(&state).await.map_err(db_error)?;
    let menu = MenuIndex::from_menu(&MenuItems::find().all(&state.db).await.map_err(db_error)?);

    let total_orders = summaries.len() as u64;
    let total_revenue: Decimal = summaries
        .iter()
        .map(|order| order_value(&order.items, &menu))
        .sum::<Decimal>()
        .round_dp(2);
    let average_order_value = if total_orders > 0 {
        (total_revenue / Decimal::from(total_orders)).round_dp(2)
    } else {
        Decimal::ZERO
    };

    info!(
        total_orders = total_orders,
        total_revenue = %total_revenue,
        "Revenue summary served"
    );

    Ok(Json(OrderRevenueSummary {
        total_revenue,
        total_orders,
        average_order_value,
    }))
}
