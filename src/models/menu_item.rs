//! Menu item request/response models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of POST /api/menu-items.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMenuItemRequest {
    pub name: String,
    pub price: Decimal,
    pub category: String,
}

impl CreateMenuItemRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name cannot be empty".to_string());
        }
        if self.category.trim().is_empty() {
            return Err("category cannot be empty".to_string());
        }
        validate_price(self.price)
    }
}

/// Body of PUT /api/menu-items/:name. The name is the key and comes from
/// the path; only price and category are editable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMenuItemRequest {
    pub price: Decimal,
    pub category: String,
}

impl UpdateMenuItemRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.category.trim().is_empty() {
            return Err("category cannot be empty".to_string());
        }
        validate_price(self.price)
    }
}

fn validate_price(price: Decimal) -> Result<(), String> {
    if price < Decimal::ZERO {
        return Err("price cannot be negative".to_string());
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteMenuItemResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuItemErrorResponse {
    pub error: String,
}
