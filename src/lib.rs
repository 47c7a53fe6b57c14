// src/lib.rs

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

pub mod entities {
    pub mod prelude;
    pub mod employees;
    pub mod menu_items;
    pub mod order_items;
    pub mod orders;
}

pub mod services {
    pub mod order_lifecycle;
}

pub mod handlers;
pub mod models;
