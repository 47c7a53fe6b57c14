pub use super::employees::Entity as Employees;
pub use super::menu_items::Entity as MenuItems;
pub use super::order_items::Entity as OrderItems;
pub use super::orders::Entity as Orders;
