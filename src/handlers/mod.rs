pub mod auth;
pub mod employee;
pub mod menu_item;
pub mod order;
