//! End-to-end tests against the real handlers over a live Postgres.
//!
//! Requires a database at TEST_DATABASE_URL, so every test is `#[ignore]`:
//! run them with `cargo test -- --ignored --test-threads=1`.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::{get, post, put},
    Router,
};
use cafe_pos_backend::{handlers, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::common::{reset_test_db, setup_test_db, TEST_STAFF_KEY};

async fn build_test_router() -> Router {
    let db = setup_test_db().await.expect("Failed to connect to test DB");
    reset_test_db(&db).await.expect("Failed to reset test DB");
    let state = AppState { db };

    Router::new()
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
        .with_state(state)
}

fn staff_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-api-key", TEST_STAFF_KEY);
    match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn public_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Decimal fields serialize as strings; tolerate numbers too.
fn as_f64(v: &Value) -> f64 {
    match v {
        Value::String(s) => s.parse().unwrap(),
        Value::Number(n) => n.as_f64().unwrap(),
        other => panic!("not a numeric field: {other:?}"),
    }
}

async fn submit_order(app: &Router, items: Value) -> i64 {
    let response = app
        .clone()
        .oneshot(public_request(
            "POST",
            "/api/orders",
            Some(json!({ "items": items })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await["order_id"].as_i64().unwrap()
}

async fn set_order_active(app: &Router, id: i64, is_active: bool) {
    let response = app
        .clone()
        .oneshot(staff_request(
            "PUT",
            &format!("/api/orders/{id}"),
            Some(json!({ "is_active": is_active })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires Postgres at TEST_DATABASE_URL"]
async fn order_list_requires_staff_key() {
    let app = build_test_router().await;

    let response = app
        .clone()
        .oneshot(public_request("GET", "/api/orders", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(staff_request("GET", "/api/orders", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires Postgres at TEST_DATABASE_URL"]
async fn auth_status_reflects_presented_key() {
    let app = build_test_router().await;

    let response = app
        .clone()
        .oneshot(public_request("GET", "/auth-status", None))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["authenticated"], json!(false));

    let response = app
        .oneshot(staff_request("GET", "/auth-status", None))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["authenticated"], json!(true));
}

#[tokio::test]
#[ignore = "requires Postgres at TEST_DATABASE_URL"]
async fn validate_manager_checks_password() {
    let app = build_test_router().await;

    let response = app
        .clone()
        .oneshot(staff_request(
            "POST",
            "/api/validate-manager",
            Some(json!({ "password": common::TEST_MANAGER_PASSWORD })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["valid"], json!(true));

    let response = app
        .oneshot(staff_request(
            "POST",
            "/api/validate-manager",
            Some(json!({ "password": "wrong" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires Postgres at TEST_DATABASE_URL"]
async fn menu_item_crud_round_trip() {
    let app = build_test_router().await;

    // Create
    let response = app
        .clone()
        .oneshot(staff_request(
            "POST",
            "/api/menu-items",
            Some(json!({ "name": "Latte", "price": "4.00", "category": "Hot Drink" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Duplicate name is a conflict
    let response = app
        .clone()
        .oneshot(staff_request(
            "POST",
            "/api/menu-items",
            Some(json!({ "name": "Latte", "price": "5.00", "category": "Hot Drink" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Public listing shows it
    let response = app
        .clone()
        .oneshot(public_request("GET", "/api/menu-items", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let items = json_body(response).await;
    let latte = items
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["name"] == "Latte")
        .expect("Latte should be listed");
    assert_eq!(as_f64(&latte["price"]), 4.0);

    // Update price
    let response = app
        .clone()
        .oneshot(staff_request(
            "PUT",
            "/api/menu-items/Latte",
            Some(json!({ "price": "4.50", "category": "Hot Drink" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(as_f64(&json_body(response).await["price"]), 4.5);

    // Negative price rejected
    let response = app
        .clone()
        .oneshot(staff_request(
            "PUT",
            "/api/menu-items/Latte",
            Some(json!({ "price": "-1.00", "category": "Hot Drink" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Delete, then further updates are 404
    let response = app
        .clone()
        .oneshot(staff_request("DELETE", "/api/menu-items/Latte", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(staff_request(
            "PUT",
            "/api/menu-items/Latte",
            Some(json!({ "price": "4.00", "category": "Hot Drink" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires Postgres at TEST_DATABASE_URL"]
async fn create_order_validates_payload() {
    let app = build_test_router().await;

    let response = app
        .clone()
        .oneshot(public_request(
            "POST",
            "/api/orders",
            Some(json!({ "items": [] })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(public_request(
            "POST",
            "/api/orders",
            Some(json!({ "items": [{ "name": "Latte", "quantity": 0 }] })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires Postgres at TEST_DATABASE_URL"]
async fn order_list_windows_completed_history() {
    let app = build_test_router().await;

    // 12 orders; complete the first 11, leave the last active
    let mut ids = Vec::new();
    for _ in 0..12 {
        ids.push(submit_order(&app, json!([{ "name": "Latte", "quantity": 1 }])).await);
    }
    for id in &ids[..11] {
        set_order_active(&app, *id, false).await;
    }

    let response = app
        .clone()
        .oneshot(staff_request("GET", "/api/orders", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    assert_eq!(body["active_count"], json!(1));
    assert_eq!(body["completed_count"], json!(10));

    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 11);

    // The active order leads; the oldest completed order fell out the window
    assert_eq!(orders[0]["id"].as_i64().unwrap(), ids[11]);
    assert_eq!(orders[0]["is_active"], json!(true));
    assert!(orders.iter().all(|o| o["id"].as_i64().unwrap() != ids[0]));

    // Completed tail is newest-first
    let completed_ids: Vec<i64> = orders[1..]
        .iter()
        .map(|o| o["id"].as_i64().unwrap())
        .collect();
    let mut sorted = completed_ids.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(completed_ids, sorted);

    // Fresh orders carry the projector fields: a minute-old order is green
    assert_eq!(orders[0]["urgency_color"], json!("#00ff00"));
    assert_eq!(orders[0]["age_display"], json!("0m"));
}

#[tokio::test]
#[ignore = "requires Postgres at TEST_DATABASE_URL"]
async fn order_valuation_tolerates_deleted_menu_items() {
    let app = build_test_router().await;

    let response = app
        .clone()
        .oneshot(staff_request(
            "POST",
            "/api/menu-items",
            Some(json!({ "name": "Latte", "price": "4.00", "category": "Hot Drink" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // GhostItem never existed on the menu; it must value at zero
    submit_order(
        &app,
        json!([
            { "name": "Latte", "quantity": 2 },
            { "name": "GhostItem", "quantity": 3 }
        ]),
    )
    .await;

    let response = app
        .clone()
        .oneshot(staff_request("GET", "/api/orders", None))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(as_f64(&body["orders"][0]["total"]), 8.0);

    let response = app
        .oneshot(staff_request("GET", "/api/orders/summary", None))
        .await
        .unwrap();
    let summary = json_body(response).await;
    assert_eq!(as_f64(&summary["total_revenue"]), 8.0);
    assert_eq!(summary["total_orders"], json!(1));
    assert_eq!(as_f64(&summary["average_order_value"]), 8.0);
}

#[tokio::test]
#[ignore = "requires Postgres at TEST_DATABASE_URL"]
async fn order_delete_only_while_completed() {
    let app = build_test_router().await;

    let id = submit_order(&app, json!([{ "name": "Latte", "quantity": 1 }])).await;

    // Active orders cannot be deleted
    let response = app
        .clone()
        .oneshot(staff_request("DELETE", &format!("/api/orders/{id}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Complete, then delete succeeds
    set_order_active(&app, id, false).await;
    let response = app
        .clone()
        .oneshot(staff_request("DELETE", &format!("/api/orders/{id}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Gone for good
    let response = app
        .oneshot(staff_request("DELETE", &format!("/api/orders/{id}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires Postgres at TEST_DATABASE_URL"]
async fn employee_delete_refused_while_orders_reference_them() {
    let app = build_test_router().await;

    let response = app
        .clone()
        .oneshot(staff_request(
            "POST",
            "/api/employees",
            Some(json!({ "name": "Alex" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let employee_id = json_body(response).await["id"].as_i64().unwrap();

    // Rename works
    let response = app
        .clone()
        .oneshot(staff_request(
            "PUT",
            &format!("/api/employees/{employee_id}"),
            Some(json!({ "name": "Sam" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["name"], json!("Sam"));

    // An order entered by this employee blocks deletion
    let response = app
        .clone()
        .oneshot(public_request(
            "POST",
            "/api/orders",
            Some(json!({
                "items": [{ "name": "Latte", "quantity": 1 }],
                "employee_id": employee_id
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(staff_request(
            "DELETE",
            &format!("/api/employees/{employee_id}"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
