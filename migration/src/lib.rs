pub use sea_orm_migration::prelude::*;

mod m20260812_000001_create_employees;
mod m20260812_000002_create_menu_items;
mod m20260812_000003_create_orders;
mod m20260812_000004_create_order_items;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260812_000001_create_employees::Migration),
            Box::new(m20260812_000002_create_menu_items::Migration),
            Box::new(m20260812_000003_create_orders::Migration),
            Box::new(m20260812_000004_create_order_items::Migration),
        ]
    }
}
