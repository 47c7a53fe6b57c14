//! Menu item CRUD handlers.
//!
//! Menu items are keyed by name. Editing a price retroactively changes the
//! valuation of historical orders that reference it; deleting an item leaves
//! those orders valuing the dangling line at zero.

use axum::{
    extract::{Path, State},
    http::{header::HeaderMap, StatusCode},
    Json,
};
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, Set};
use tracing::{error, info, warn};

use crate::entities::{menu_items, prelude::MenuItems};
use crate::handlers::auth::check_staff_auth;
use crate::models::menu_item::{
    CreateMenuItemRequest, DeleteMenuItemResponse, MenuItemErrorResponse, UpdateMenuItemRequest,
};
use crate::AppState;

type MenuItemError = (StatusCode, Json<MenuItemErrorResponse>);

fn db_error(e: sea_orm::DbErr) -> MenuItemError {
    error!(error = %e, "Menu item query failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(MenuItemErrorResponse {
            error: format!("Database error: {}", e),
        }),
    )
}

fn auth_error((status, error): (StatusCode, String)) -> MenuItemError {
    (status, Json(MenuItemErrorResponse { error }))
}

/// List the menu, ordered by category then name
///
/// GET /api/menu-items (public: the customer and drive-thru views read it)
pub async fn get_menu_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<menu_items::Model>>, MenuItemError> {
    let items = MenuItems::find()
        .order_by_asc(menu_items::Column::Category)
        .order_by_asc(menu_items::Column::Name)
        .all(&state.db)
        .await
        .map_err(db_error)?;

    Ok(Json(items))
}

/// Create a menu item
///
/// POST /api/menu-items
pub async fn create_menu_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateMenuItemRequest>,
) -> Result<Json<menu_items::Model>, MenuItemError> {
    check_staff_auth(&headers).map_err(auth_error)?;

    if let Err(e) = payload.validate() {
        warn!(error = %e, "Invalid menu item payload");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(MenuItemErrorResponse { error: e }),
        ));
    }

    let name = payload.name.trim().to_string();

    let existing = MenuItems::find_by_id(name.as_str())
        .one(&state.db)
        .await
        .map_err(db_error)?;
    if existing.is_some() {
        return Err((
            StatusCode::CONFLICT,
            Json(MenuItemErrorResponse {
                error: format!("menu item '{}' already exists", name),
            }),
        ));
    }

    let item = menu_items::ActiveModel {
        name: Set(name.clone()),
        price: Set(payload.price),
        category: Set(payload.category.trim().to_string()),
    };
    let created = item.insert(&state.db).await.map_err(db_error)?;

    info!(name = %created.name, category = %created.category, "Menu item created");
    Ok(Json(created))
}

/// Update a menu item's price and category
///
/// PUT /api/menu-items/:name
pub async fn update_menu_item(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<UpdateMenuItemRequest>,
) -> Result<Json<menu_items::Model>, MenuItemError> {
    check_staff_auth(&headers).map_err(auth_error)?;

    if let Err(e) = payload.validate() {
        warn!(error = %e, "Invalid menu item payload");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(MenuItemErrorResponse { error: e }),
        ));
    }

    let existing = MenuItems::find_by_id(name.as_str())
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(MenuItemErrorResponse {
                    error: format!("menu item '{}' not found", name),
                }),
            )
        })?;

    let mut item: menu_items::ActiveModel = existing.into();
    item.price = Set(payload.price);
    item.category = Set(payload.category.trim().to_string());
    let updated = item.update(&state.db).await.map_err(db_error)?;

    info!(name = %updated.name, price = %updated.price, "Menu item updated");
    Ok(Json(updated))
}

/// Delete a menu item
///
/// DELETE /api/menu-items/:name
///
/// Historical orders referencing the deleted name keep rendering; the
/// projector values their dangling lines at zero.
pub async fn delete_menu_item(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DeleteMenuItemResponse>, MenuItemError> {
    check_staff_auth(&headers).map_err(auth_error)?;

    let existing = MenuItems::find_by_id(name.as_str())
        .one(&state.db)
        .await
        .map_err(db_error)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(MenuItemErrorResponse {
                    error: format!("menu item '{}' not found", name),
                }),
            )
        })?;

    existing.delete(&state.db).await.map_err(db_error)?;

    info!(name = %name, "Menu item deleted");
    Ok(Json(DeleteMenuItemResponse {
        message: "Menu item deleted".to_string(),
    }))
}
