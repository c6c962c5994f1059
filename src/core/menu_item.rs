//! Menu item business logic - the tree operations behind a menu.
//!
//! Every operation validates before it writes, so a rejected call leaves storage untouched.
//! Invariants held here:
//! - `code` is unique across all items
//! - a parent exists and belongs to the same menu as its children
//! - `depth` is derived from the parent, for the item and for its whole subtree
//! - an item is never placed under itself or one of its descendants

use crate::{
    core::hierarchy,
    entities::menu_item,
    errors::{Error, Result},
    models::{
        HierarchyNode, MenuHierarchy, MenuItemChanges, MenuItemView, NewChildMenuItem,
        NewMenuItem,
    },
    repository::{self, menu_item::TreePosition},
};
use futures::future::try_join_all;
use sea_orm::{DatabaseConnection, IntoActiveModel, Set};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

fn validate_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation {
            message: format!("Menu item {field} cannot be empty"),
        });
    }
    Ok(())
}

fn validate_order(order: Option<i32>) -> Result<()> {
    match order {
        Some(order) if order < 0 => Err(Error::Validation {
            message: format!("Menu item order must be zero or positive, got {order}"),
        }),
        _ => Ok(()),
    }
}

fn code_conflict() -> Error {
    Error::Conflict {
        message: "Menu item with this code already exists".to_string(),
    }
}

fn cross_menu_parent() -> Error {
    Error::InvalidRelation {
        message: "Parent must belong to the same menu".to_string(),
    }
}

async fn ensure_code_free(db: &DatabaseConnection, code: &str) -> Result<()> {
    if repository::menu_item::find_by_code(db, code).await?.is_some() {
        return Err(code_conflict());
    }
    Ok(())
}

async fn ensure_menu_exists(db: &DatabaseConnection, menu_id: i64) -> Result<()> {
    if repository::menu::find_by_id(db, menu_id).await?.is_none() {
        return Err(Error::menu_not_found(menu_id));
    }
    Ok(())
}

async fn find_parent(db: &DatabaseConnection, parent_id: i64) -> Result<menu_item::Model> {
    repository::menu_item::find_by_id(db, parent_id)
        .await?
        .ok_or_else(|| Error::parent_not_found(parent_id))
}

async fn resolve_parent_name(
    db: &DatabaseConnection,
    item: &menu_item::Model,
) -> Result<Option<String>> {
    match item.parent_id {
        Some(parent_id) => Ok(repository::menu_item::find_by_id(db, parent_id)
            .await?
            .map(|parent| parent.name)),
        None => Ok(None),
    }
}

/// Turns flat rows into views, resolving parent names from the rows themselves.
fn into_views(items: Vec<menu_item::Model>) -> Vec<MenuItemView> {
    let names: HashMap<i64, String> = items
        .iter()
        .map(|item| (item.id, item.name.clone()))
        .collect();

    items
        .into_iter()
        .map(|item| {
            let parent_name = item.parent_id.and_then(|id| names.get(&id).cloned());
            MenuItemView::new(item, parent_name)
        })
        .collect()
}

/// Creates a menu item at any level of a menu.
///
/// Depth is derived from the parent (0 without one) and order defaults to 0.
///
/// # Errors
/// Returns an error if:
/// - `name` or `code` is blank, or `order` is negative (`Validation`)
/// - another item already uses `code` (`Conflict`)
/// - the parent does not exist (`NotFound`)
/// - the parent belongs to another menu (`InvalidRelation`)
/// - the menu does not exist (`NotFound`)
#[instrument(skip(db, input), fields(code = %input.code))]
pub async fn create_menu_item(db: &DatabaseConnection, input: NewMenuItem) -> Result<MenuItemView> {
    validate_text("name", &input.name)?;
    validate_text("code", &input.code)?;
    validate_order(input.order)?;

    ensure_code_free(db, &input.code).await?;

    let parent = match input.parent_id {
        Some(parent_id) => {
            let parent = find_parent(db, parent_id).await?;
            if parent.menu_id != input.menu_id {
                return Err(cross_menu_parent());
            }
            Some(parent)
        }
        None => None,
    };
    ensure_menu_exists(db, input.menu_id).await?;

    let now = chrono::Utc::now().naive_utc();
    let item = menu_item::ActiveModel {
        name: Set(input.name),
        code: Set(input.code),
        menu_id: Set(input.menu_id),
        parent_id: Set(input.parent_id),
        depth: Set(hierarchy::derive_depth(parent.as_ref())),
        order: Set(input.order.unwrap_or(0)),
        is_active: Set(input.is_active.unwrap_or(true)),
        path: Set(input.path),
        icon: Set(input.icon),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = repository::menu_item::insert(db, item).await?;
    info!(
        "Created menu item '{}' ({}) at depth {}",
        created.code, created.id, created.depth
    );
    Ok(MenuItemView::new(created, parent.map(|parent| parent.name)))
}

/// Creates a child directly under `parent_id`, inheriting the parent's menu.
///
/// Without an explicit `order` the child is appended after its current siblings.
///
/// # Errors
/// Returns an error if:
/// - `name` or `code` is blank, or `order` is negative (`Validation`)
/// - the parent does not exist (`NotFound`)
/// - another item already uses `code` (`Conflict`)
#[instrument(skip(db, input), fields(code = %input.code))]
pub async fn create_child_menu_item(
    db: &DatabaseConnection,
    parent_id: i64,
    input: NewChildMenuItem,
) -> Result<MenuItemView> {
    validate_text("name", &input.name)?;
    validate_text("code", &input.code)?;
    validate_order(input.order)?;

    let parent = find_parent(db, parent_id).await?;
    ensure_code_free(db, &input.code).await?;

    let order = match input.order {
        Some(order) => order,
        None => {
            let siblings = repository::menu_item::find_children(db, parent_id).await?;
            hierarchy::next_sibling_order(&siblings)
        }
    };

    let now = chrono::Utc::now().naive_utc();
    let item = menu_item::ActiveModel {
        name: Set(input.name),
        code: Set(input.code),
        menu_id: Set(parent.menu_id),
        parent_id: Set(Some(parent.id)),
        depth: Set(hierarchy::derive_depth(Some(&parent))),
        order: Set(order),
        is_active: Set(input.is_active.unwrap_or(true)),
        path: Set(input.path),
        icon: Set(input.icon),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = repository::menu_item::insert(db, item).await?;
    info!(
        "Created child menu item '{}' ({}) under {} with order {}",
        created.code, created.id, parent.id, created.order
    );
    Ok(MenuItemView::new(created, Some(parent.name)))
}

/// Finds a menu item by ID, returning None if it does not exist.
pub async fn get_menu_item_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<MenuItemView>> {
    let Some(item) = repository::menu_item::find_by_id(db, id).await? else {
        return Ok(None);
    };
    let parent_name = resolve_parent_name(db, &item).await?;
    Ok(Some(MenuItemView::new(item, parent_name)))
}

/// Finds an active menu item by exact path. Inactive items never match.
pub async fn get_menu_item_by_path(
    db: &DatabaseConnection,
    path: &str,
) -> Result<Option<MenuItemView>> {
    let Some(item) = repository::menu_item::find_active_by_path(db, path).await? else {
        return Ok(None);
    };
    let parent_name = resolve_parent_name(db, &item).await?;
    Ok(Some(MenuItemView::new(item, parent_name)))
}

/// Lists every menu item ordered by `(menu_id, depth, order)`.
pub async fn get_all_menu_items(db: &DatabaseConnection) -> Result<Vec<MenuItemView>> {
    Ok(into_views(repository::menu_item::find_all(db).await?))
}

/// Lists the items of one menu ordered by `(depth, order)`.
pub async fn get_menu_items_by_menu_id(
    db: &DatabaseConnection,
    menu_id: i64,
) -> Result<Vec<MenuItemView>> {
    Ok(into_views(
        repository::menu_item::find_by_menu_id(db, menu_id).await?,
    ))
}

/// Builds the nested hierarchy of the active items of one menu.
pub async fn get_menu_hierarchy(
    db: &DatabaseConnection,
    menu_id: i64,
) -> Result<Vec<HierarchyNode>> {
    let items = repository::menu_item::find_active_by_menu_id(db, menu_id).await?;
    debug!("Building hierarchy for menu {} from {} items", menu_id, items.len());
    Ok(hierarchy::build_hierarchy(items))
}

/// Pairs every active menu with its item hierarchy.
///
/// The per-menu reads touch disjoint menus and run concurrently.
pub async fn get_active_menus_with_hierarchy(
    db: &DatabaseConnection,
) -> Result<Vec<MenuHierarchy>> {
    let menus = repository::menu::find_active(db).await?;
    if menus.is_empty() {
        return Ok(Vec::new());
    }

    try_join_all(menus.into_iter().map(|menu| async move {
        let hierarchy = get_menu_hierarchy(db, menu.id).await?;
        Ok::<_, Error>(MenuHierarchy {
            menu: menu.into(),
            hierarchy,
        })
    }))
    .await
}

/// Resolves the parent an item will have after `changes`, enforcing the tree rules.
async fn resolve_new_parent(
    db: &DatabaseConnection,
    existing: &menu_item::Model,
    requested: Option<Option<i64>>,
    target_menu_id: i64,
) -> Result<Option<menu_item::Model>> {
    match requested {
        Some(Some(parent_id)) if Some(parent_id) != existing.parent_id => {
            if parent_id == existing.id {
                return Err(Error::InvalidRelation {
                    message: "Menu item cannot be its own parent".to_string(),
                });
            }
            let parent = find_parent(db, parent_id).await?;
            if parent.menu_id != target_menu_id {
                return Err(cross_menu_parent());
            }
            let menu_items = repository::menu_item::find_by_menu_id(db, parent.menu_id).await?;
            if hierarchy::is_ancestor_or_self(&menu_items, existing.id, parent.id) {
                return Err(Error::InvalidRelation {
                    message: "Menu item cannot be moved under its own descendant".to_string(),
                });
            }
            Ok(Some(parent))
        }
        Some(None) => Ok(None),
        _ => match existing.parent_id {
            Some(parent_id) => {
                let parent = find_parent(db, parent_id).await?;
                if parent.menu_id != target_menu_id {
                    return Err(cross_menu_parent());
                }
                Ok(Some(parent))
            }
            None => Ok(None),
        },
    }
}

/// Applies a partial update to a menu item.
///
/// A `name` explicitly set to null leaves the name unchanged. `parent_id` set to null
/// detaches the item to the root level. Depth is re-derived from the resulting parent, and
/// when the depth or menu changes the whole subtree follows.
///
/// # Errors
/// Returns an error if:
/// - the item does not exist (`NotFound`)
/// - a new `name`/`code` is blank or `order` is negative (`Validation`)
/// - the new `code` is used by another item (`Conflict`)
/// - the new menu or parent does not exist (`NotFound`)
/// - the parent is the item itself, one of its descendants, or in another menu
///   (`InvalidRelation`)
#[instrument(skip(db, changes))]
pub async fn update_menu_item(
    db: &DatabaseConnection,
    id: i64,
    changes: MenuItemChanges,
) -> Result<MenuItemView> {
    let existing = repository::menu_item::find_by_id(db, id)
        .await?
        .ok_or_else(|| Error::menu_item_not_found(id))?;

    let new_name = changes.name.flatten();
    if let Some(name) = &new_name {
        validate_text("name", name)?;
    }
    if let Some(code) = &changes.code {
        validate_text("code", code)?;
        if *code != existing.code {
            ensure_code_free(db, code).await?;
        }
    }
    validate_order(changes.order)?;

    let target_menu_id = changes.menu_id.unwrap_or(existing.menu_id);
    if target_menu_id != existing.menu_id {
        ensure_menu_exists(db, target_menu_id).await?;
    }

    let parent = resolve_new_parent(db, &existing, changes.parent_id, target_menu_id).await?;
    let new_depth = hierarchy::derive_depth(parent.as_ref());

    let descendants = if new_depth == existing.depth && target_menu_id == existing.menu_id {
        Vec::new()
    } else {
        let menu_items = repository::menu_item::find_by_menu_id(db, existing.menu_id).await?;
        hierarchy::subtree_depths(&menu_items, existing.id, new_depth)
            .into_iter()
            .map(|(id, depth)| TreePosition {
                id,
                menu_id: target_menu_id,
                depth,
            })
            .collect()
    };

    let mut item = existing.into_active_model();
    if let Some(name) = new_name {
        item.name = Set(name);
    }
    if let Some(code) = changes.code {
        item.code = Set(code);
    }
    if let Some(order) = changes.order {
        item.order = Set(order);
    }
    if let Some(is_active) = changes.is_active {
        item.is_active = Set(is_active);
    }
    if let Some(path) = changes.path {
        item.path = Set(path);
    }
    if let Some(icon) = changes.icon {
        item.icon = Set(icon);
    }
    item.menu_id = Set(target_menu_id);
    item.parent_id = Set(parent.as_ref().map(|parent| parent.id));
    item.depth = Set(new_depth);
    item.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = if descendants.is_empty() {
        repository::menu_item::update(db, item).await?
    } else {
        repository::menu_item::update_with_subtree(db, item, &descendants).await?
    };
    Ok(MenuItemView::new(updated, parent.map(|parent| parent.name)))
}

/// Sets only the sibling order of a menu item. Applying the same order twice is a no-op.
///
/// # Errors
/// Returns `Validation` for a negative order and `NotFound` if the item does not exist.
#[instrument(skip(db))]
pub async fn update_menu_item_order(
    db: &DatabaseConnection,
    id: i64,
    order: i32,
) -> Result<MenuItemView> {
    validate_order(Some(order))?;
    if repository::menu_item::find_by_id(db, id).await?.is_none() {
        return Err(Error::menu_item_not_found(id));
    }

    let updated = repository::menu_item::update_order(db, id, order).await?;
    let parent_name = resolve_parent_name(db, &updated).await?;
    Ok(MenuItemView::new(updated, parent_name))
}

/// Deletes a menu item together with its subtree.
///
/// # Errors
/// Returns `NotFound` if the item does not exist, or a database error if the delete fails.
#[instrument(skip(db))]
pub async fn delete_menu_item(db: &DatabaseConnection, id: i64) -> Result<()> {
    if repository::menu_item::find_by_id(db, id).await?.is_none() {
        return Err(Error::menu_item_not_found(id));
    }

    let removed = repository::menu_item::delete_subtree(db, id).await?;
    info!("Deleted menu item {} ({} rows including descendants)", id, removed);
    Ok(())
}
