use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection, DbErr, EntityTrait};
use std::env;
use std::sync::Once;

use cafe_pos_backend::entities::prelude::*;

static INIT_ENV: Once = Once::new();

/// Credentials the staff-gated handlers read from the environment.
pub const TEST_STAFF_KEY: &str = "test-staff-key";
pub const TEST_MANAGER_PASSWORD: &str = "test-manager-password";

/// Set up test database connection and run migrations
/// Uses TEST_DATABASE_URL environment variable or falls back to default
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    INIT_ENV.call_once(|| {
        // Safety: runs once, before any handler reads these
        unsafe {
            env::set_var("STAFF_API_KEY", TEST_STAFF_KEY);
            env::set_var("MANAGER_PASSWORD", TEST_MANAGER_PASSWORD);
        }
    });

    let database_url = env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgresql://cafe_pos@localhost:5432/cafe_pos_test".to_string());

    let db = Database::connect(&database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Empty every table so a test starts from a known state. Tests that rely
/// on this must run single-threaded (`cargo test -- --test-threads=1`).
pub async fn reset_test_db(db: &DatabaseConnection) -> Result<(), DbErr> {
    OrderItems::delete_many().exec(db).await?;
    Orders::delete_many().exec(db).await?;
    MenuItems::delete_many().exec(db).await?;
    Employees::delete_many().exec(db).await?;
    Ok(())
}
