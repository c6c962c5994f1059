//! `/menu-items` handlers.

use crate::{
    api::{
        AppState,
        error::{ApiJson, ApiPath},
        response::{ApiResponse, list_message},
    },
    core::menu_item,
    errors::Result,
    models::{
        HierarchyNode, MenuHierarchy, MenuItemChanges, MenuItemView, NewChildMenuItem,
        NewMenuItem, OrderChange,
    },
};
use axum::{Json, extract::State, http::StatusCode};

/// POST /menu-items
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewMenuItem>,
) -> Result<(StatusCode, Json<ApiResponse<MenuItemView>>)> {
    let created = menu_item::create_menu_item(&state.db, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Menu item successfully created", created)),
    ))
}

/// POST /menu-items/{id}/children
pub async fn create_child(
    State(state): State<AppState>,
    ApiPath(parent_id): ApiPath<i64>,
    ApiJson(input): ApiJson<NewChildMenuItem>,
) -> Result<(StatusCode, Json<ApiResponse<MenuItemView>>)> {
    let created = menu_item::create_child_menu_item(&state.db, parent_id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Child menu item successfully created",
            created,
        )),
    ))
}

/// GET /menu-items/path/{*path}
///
/// The captured remainder arrives percent-decoded and without its leading slash, which is
/// restored before the lookup. An unknown path is still a successful lookup with null data.
pub async fn find_by_path(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<String>,
) -> Result<Json<ApiResponse<MenuItemView>>> {
    let path = format!("/{}", path.trim_start_matches('/'));
    let response = match menu_item::get_menu_item_by_path(&state.db, &path).await? {
        Some(item) => ApiResponse::success("Menu item found", item),
        None => ApiResponse::done("Menu item not found"),
    };
    Ok(Json(response))
}

/// GET /menu-items
pub async fn find_all(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MenuItemView>>>> {
    let items = menu_item::get_all_menu_items(&state.db).await?;
    let message = list_message(
        &items,
        "Menu items retrieved successfully",
        "No menu items found",
    );
    Ok(Json(ApiResponse::success(message, items)))
}

/// GET /menu-items/menu/{menu_id}
pub async fn find_by_menu_id(
    State(state): State<AppState>,
    ApiPath(menu_id): ApiPath<i64>,
) -> Result<Json<ApiResponse<Vec<MenuItemView>>>> {
    let items = menu_item::get_menu_items_by_menu_id(&state.db, menu_id).await?;
    let message = list_message(
        &items,
        "Menu items for this menu retrieved successfully",
        format!("No menu items found for menu with id {menu_id}"),
    );
    Ok(Json(ApiResponse::success(message, items)))
}

/// GET /menu-items/menu/{menu_id}/hierarchy
pub async fn find_hierarchy_by_menu_id(
    State(state): State<AppState>,
    ApiPath(menu_id): ApiPath<i64>,
) -> Result<Json<ApiResponse<Vec<HierarchyNode>>>> {
    let hierarchy = menu_item::get_menu_hierarchy(&state.db, menu_id).await?;
    let message = list_message(
        &hierarchy,
        "Menu item hierarchy retrieved successfully",
        format!("No menu items found for menu with id {menu_id}"),
    );
    Ok(Json(ApiResponse::success(message, hierarchy)))
}

/// GET /menu-items/hierarchy/all
pub async fn find_all_hierarchies(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MenuHierarchy>>>> {
    let menus = menu_item::get_active_menus_with_hierarchy(&state.db).await?;
    Ok(Json(ApiResponse::success(
        "Menu items retrieved successfully",
        menus,
    )))
}

/// GET /menu-items/{id} - a missing item is reported in the envelope, not as a 404.
pub async fn find_one(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<MenuItemView>>> {
    let found = menu_item::get_menu_item_by_id(&state.db, id).await?;
    Ok(Json(ApiResponse::found(
        found,
        "Menu item found",
        format!("Menu item with id {id} not found"),
    )))
}

/// PATCH /menu-items/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(changes): ApiJson<MenuItemChanges>,
) -> Result<Json<ApiResponse<MenuItemView>>> {
    let updated = menu_item::update_menu_item(&state.db, id, changes).await?;
    Ok(Json(ApiResponse::success(
        "Menu item successfully updated",
        updated,
    )))
}

/// PATCH /menu-items/{id}/order
pub async fn update_order(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(change): ApiJson<OrderChange>,
) -> Result<Json<ApiResponse<MenuItemView>>> {
    let updated = menu_item::update_menu_item_order(&state.db, id, change.order).await?;
    Ok(Json(ApiResponse::success(
        "Menu item order successfully updated",
        updated,
    )))
}

/// DELETE /menu-items/{id}
pub async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    menu_item::delete_menu_item(&state.db, id).await?;
    Ok(Json(ApiResponse::done(format!(
        "Menu item with id {id} successfully deleted"
    ))))
}
