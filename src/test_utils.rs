//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test menus and menu items with sensible defaults.

use crate::{
    core::{menu, menu_item},
    errors::Result,
    models::{MenuItemView, MenuView, NewChildMenuItem, NewMenu, NewMenuItem},
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Input for an active menu with no description.
#[must_use]
pub fn new_menu(name: &str) -> NewMenu {
    NewMenu {
        name: name.to_string(),
        description: None,
        is_active: None,
    }
}

/// Input for a root item in `menu_id`.
///
/// # Defaults
/// * `name`: "Item `<code>`"
/// * `parent_id`, `order`, `is_active`, `path`, `icon`: unset
#[must_use]
pub fn new_item(menu_id: i64, code: &str) -> NewMenuItem {
    NewMenuItem {
        name: format!("Item {code}"),
        code: code.to_string(),
        menu_id,
        ..Default::default()
    }
}

/// Input for a child item with no explicit order.
#[must_use]
pub fn new_child(name: &str, code: &str) -> NewChildMenuItem {
    NewChildMenuItem {
        name: name.to_string(),
        code: code.to_string(),
        ..Default::default()
    }
}

/// Creates an active test menu.
pub async fn create_test_menu(db: &DatabaseConnection, name: &str) -> Result<MenuView> {
    menu::create_menu(db, new_menu(name)).await
}

/// Creates a root item in `menu_id` with default settings.
pub async fn create_test_item(
    db: &DatabaseConnection,
    menu_id: i64,
    code: &str,
) -> Result<MenuItemView> {
    menu_item::create_menu_item(db, new_item(menu_id, code)).await
}

/// Creates a child under `parent_id`, appended after its siblings.
pub async fn create_test_child(
    db: &DatabaseConnection,
    parent_id: i64,
    code: &str,
) -> Result<MenuItemView> {
    menu_item::create_child_menu_item(db, parent_id, new_child(&format!("Item {code}"), code))
        .await
}

/// Sets up a complete test environment with a menu holding one root item.
/// Returns (db, menu, root) for common tree scenarios.
pub async fn setup_with_root_item() -> Result<(DatabaseConnection, MenuView, MenuItemView)> {
    let db = setup_test_db().await?;
    let menu = create_test_menu(&db, "Test Menu").await?;
    let root = create_test_item(&db, menu.id, "ROOT").await?;
    Ok((db, menu, root))
}
