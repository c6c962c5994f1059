//! `/menus` handlers.

use crate::{
    api::{
        AppState,
        error::{ApiJson, ApiPath},
        response::{ApiResponse, list_message},
    },
    core::menu,
    errors::Result,
    models::{MenuChanges, MenuView, MenuWithItemCount, NewMenu},
};
use axum::{Json, extract::State, http::StatusCode};

/// POST /menus
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewMenu>,
) -> Result<(StatusCode, Json<ApiResponse<MenuView>>)> {
    let created = menu::create_menu(&state.db, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Menu successfully created", created)),
    ))
}

/// GET /menus
pub async fn find_all(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<MenuView>>>> {
    let menus = menu::get_all_menus(&state.db).await?;
    let message = list_message(&menus, "Menus retrieved successfully", "No menus found");
    Ok(Json(ApiResponse::success(message, menus)))
}

/// GET /menus/active
pub async fn find_active(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MenuView>>>> {
    let menus = menu::get_active_menus(&state.db).await?;
    let message = list_message(
        &menus,
        "Active menus retrieved successfully",
        "No active menus found",
    );
    Ok(Json(ApiResponse::success(message, menus)))
}

/// GET /menus/with-counts
pub async fn find_with_counts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MenuWithItemCount>>>> {
    let menus = menu::get_menus_with_item_counts(&state.db).await?;
    let message = list_message(&menus, "Menus retrieved successfully", "No menus found");
    Ok(Json(ApiResponse::success(message, menus)))
}

/// GET /menus/{id} - a missing menu is reported in the envelope, not as a 404.
pub async fn find_one(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<MenuView>>> {
    let found = menu::get_menu_by_id(&state.db, id).await?;
    Ok(Json(ApiResponse::found(
        found,
        "Menu found",
        format!("Menu with id {id} not found"),
    )))
}

/// PATCH /menus/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(changes): ApiJson<MenuChanges>,
) -> Result<Json<ApiResponse<MenuView>>> {
    let updated = menu::update_menu(&state.db, id, changes).await?;
    Ok(Json(ApiResponse::success("Menu successfully updated", updated)))
}

/// DELETE /menus/{id}
pub async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    menu::delete_menu(&state.db, id).await?;
    Ok(Json(ApiResponse::done(format!(
        "Menu with id {id} successfully deleted"
    ))))
}
