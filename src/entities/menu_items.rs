//! SeaORM entity for menu items.
//!
//! Keyed by name: order line items reference menu items by name, so names
//! must be unique across the menu.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    /// Unit price in dollars, 2 decimal places
    pub price: Decimal,
    /// Display category (e.g. "Hot Drink", "Cold Drink", "Food", "Seasonal")
    pub category: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
