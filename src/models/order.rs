//! Order request/response models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::services::order_lifecycle::Rgb;

/// One line of an order as stored and served: menu-item name plus quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub menu_item: String,
    pub quantity: i32,
}

/// Raw order record as assembled from the store, before projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub id: i32,
    pub order_time: DateTime<Utc>,
    pub is_active: bool,
    pub employee_name: Option<String>,
    pub items: Vec<OrderLineItem>,
}

/// One entry of the order list response: the raw record plus the
/// projector-derived display attributes.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: i32,
    pub order_time: DateTime<Utc>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    pub items: Vec<OrderLineItem>,
    /// Order value against the current menu, 2 decimal places
    pub total: Decimal,
    pub age_minutes: i64,
    /// e.g. "2h 5m"
    pub age_display: String,
    /// Advisory wait color as "#rrggbb"
    pub urgency_color: Rgb,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderView>,
    /// Active orders in the list (all of them)
    pub active_count: usize,
    /// Completed orders in the list (capped at the 10 most recent)
    pub completed_count: usize,
}

/// Body of POST /api/orders.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<CreateOrderItem>,
    /// Employee entering the order; a default employee is used when absent
    pub employee_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderItem {
    pub name: String,
    pub quantity: i32,
}

impl CreateOrderRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.items.is_empty() {
            return Err("order must contain at least one item".to_string());
        }
        for item in &self.items {
            if item.name.trim().is_empty() {
                return Err("item name cannot be empty".to_string());
            }
            if item.quantity < 1 {
                return Err(format!(
                    "quantity for '{}' must be at least 1",
                    item.name
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order_id: i32,
}

/// Body of PUT /api/orders/:id.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderRequest {
    pub is_active: bool,
}

/// Response of GET /api/orders/summary.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRevenueSummary {
    pub total_revenue: Decimal,
    pub total_orders: u64,
    pub average_order_value: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderErrorResponse {
    pub error: String,
}
