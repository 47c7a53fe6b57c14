use axum::{
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::env;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cafe_pos_backend::{handlers, AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cafe_pos_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Connect to database
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let state = AppState { db };

    // Build router
    let app = Router::new()
        .route("/", get(hello_cafe))
        .route("/auth-status", get(handlers::auth::auth_status))
        .route("/api/validate-manager", post(handlers::auth::validate_manager))
        .route(
            "/api/menu-items",
            get(handlers::menu_item::get_menu_items).post(handlers::menu_item::create_menu_item),
        )
        .route(
            "/api/menu-items/{name}",
            put(handlers::menu_item::update_menu_item).delete(handlers::menu_item::delete_menu_item),
        )
        .route(
            "/api/orders",
            get(handlers::order::list_orders).post(handlers::order::create_order),
        )
        .route("/api/orders/summary", get(handlers::order::revenue_summary))
        .route(
            "/api/orders/{id}",
            put(handlers::order::update_order).delete(handlers::order::delete_order),
        )
        .route(
            "/api/employees",
            get(handlers::employee::get_employees).post(handlers::employee::create_employee),
        )
        .route(
            "/api/employees/{id}",
            put(handlers::employee::update_employee).delete(handlers::employee::delete_employee),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state);

    // Start server
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind port");

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

/// Credentialed CORS for the configured front-end origin, permissive
/// otherwise (local development).
fn cors_layer() -> CorsLayer {
    match env::var("FRONTEND_ORIGIN") {
        Ok(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .expect("FRONTEND_ORIGIN is not a valid origin"),
            )
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([CONTENT_TYPE, HeaderName::from_static("x-api-key")])
            .allow_credentials(true),
        Err(_) => CorsLayer::permissive(),
    }
}

async fn hello_cafe() -> &'static str {
    "Cafe POS backend is running"
}
