//! Menu item storage operations.
//!
//! Every list comes back in a fixed order because consumers render menus in read order:
//! `(menu_id, depth, order)` across menus and `(depth, order)` within one menu.

use crate::{
    entities::{MenuItem, menu_item},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::debug;

/// New depth and owning menu for one row of a moved subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreePosition {
    /// Row to reposition
    pub id: i64,
    /// Menu the row now belongs to
    pub menu_id: i64,
    /// Depth re-derived from the row's parent
    pub depth: i32,
}

/// Inserts a new menu item row.
pub async fn insert<C>(db: &C, item: menu_item::ActiveModel) -> Result<menu_item::Model>
where
    C: ConnectionTrait,
{
    item.insert(db).await.map_err(Into::into)
}

/// Finds a menu item by primary key.
pub async fn find_by_id<C>(db: &C, id: i64) -> Result<Option<menu_item::Model>>
where
    C: ConnectionTrait,
{
    MenuItem::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Finds a menu item by its code, active or not.
pub async fn find_by_code<C>(db: &C, code: &str) -> Result<Option<menu_item::Model>>
where
    C: ConnectionTrait,
{
    MenuItem::find()
        .filter(menu_item::Column::Code.eq(code))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the first active item whose path matches exactly.
pub async fn find_active_by_path<C>(db: &C, path: &str) -> Result<Option<menu_item::Model>>
where
    C: ConnectionTrait,
{
    MenuItem::find()
        .filter(menu_item::Column::Path.eq(path))
        .filter(menu_item::Column::IsActive.eq(true))
        .order_by_asc(menu_item::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every item ordered by `(menu_id, depth, order)`.
pub async fn find_all<C>(db: &C) -> Result<Vec<menu_item::Model>>
where
    C: ConnectionTrait,
{
    MenuItem::find()
        .order_by_asc(menu_item::Column::MenuId)
        .order_by_asc(menu_item::Column::Depth)
        .order_by_asc(menu_item::Column::Order)
        .order_by_asc(menu_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the items of one menu ordered by `(depth, order)`.
pub async fn find_by_menu_id<C>(db: &C, menu_id: i64) -> Result<Vec<menu_item::Model>>
where
    C: ConnectionTrait,
{
    MenuItem::find()
        .filter(menu_item::Column::MenuId.eq(menu_id))
        .order_by_asc(menu_item::Column::Depth)
        .order_by_asc(menu_item::Column::Order)
        .order_by_asc(menu_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the active items of one menu ordered by `(depth, order)`.
pub async fn find_active_by_menu_id<C>(db: &C, menu_id: i64) -> Result<Vec<menu_item::Model>>
where
    C: ConnectionTrait,
{
    MenuItem::find()
        .filter(menu_item::Column::MenuId.eq(menu_id))
        .filter(menu_item::Column::IsActive.eq(true))
        .order_by_asc(menu_item::Column::Depth)
        .order_by_asc(menu_item::Column::Order)
        .order_by_asc(menu_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the direct children of `parent_id` ordered by `order`.
pub async fn find_children<C>(db: &C, parent_id: i64) -> Result<Vec<menu_item::Model>>
where
    C: ConnectionTrait,
{
    MenuItem::find()
        .filter(menu_item::Column::ParentId.eq(parent_id))
        .order_by_asc(menu_item::Column::Order)
        .order_by_asc(menu_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Writes the changed columns of an existing item.
pub async fn update<C>(db: &C, item: menu_item::ActiveModel) -> Result<menu_item::Model>
where
    C: ConnectionTrait,
{
    item.update(db).await.map_err(Into::into)
}

/// Writes an item together with the new positions of its descendants, atomically.
pub async fn update_with_subtree<C>(
    db: &C,
    item: menu_item::ActiveModel,
    descendants: &[TreePosition],
) -> Result<menu_item::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let updated = item.update(&txn).await?;
    let now = chrono::Utc::now().naive_utc();
    for position in descendants {
        menu_item::ActiveModel {
            id: Set(position.id),
            menu_id: Set(position.menu_id),
            depth: Set(position.depth),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await?;
    }

    txn.commit().await?;
    debug!(
        "Updated menu item {} and repositioned {} descendants",
        updated.id,
        descendants.len()
    );
    Ok(updated)
}

/// Sets only the sibling order of an item.
pub async fn update_order<C>(db: &C, id: i64, order: i32) -> Result<menu_item::Model>
where
    C: ConnectionTrait,
{
    menu_item::ActiveModel {
        id: Set(id),
        order: Set(order),
        updated_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .update(db)
    .await
    .map_err(Into::into)
}

/// Deletes an item together with its whole subtree, atomically.
///
/// Descendants are collected level by level through `parent_id`, so the delete does not
/// depend on the backend enforcing `ON DELETE CASCADE`.
pub async fn delete_subtree<C>(db: &C, id: i64) -> Result<u64>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let mut doomed = vec![id];
    let mut frontier = vec![id];
    while !frontier.is_empty() {
        let children: Vec<i64> = MenuItem::find()
            .filter(menu_item::Column::ParentId.is_in(frontier))
            .all(&txn)
            .await?
            .into_iter()
            .map(|child| child.id)
            .filter(|child_id| !doomed.contains(child_id))
            .collect();
        doomed.extend_from_slice(&children);
        frontier = children;
    }

    let result = MenuItem::delete_many()
        .filter(menu_item::Column::Id.is_in(doomed))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    debug!(
        "Deleted menu item {} with {} rows in its subtree",
        id, result.rows_affected
    );
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{errors::Error, test_utils::*};

    fn item_row(menu_id: i64, code: &str) -> menu_item::ActiveModel {
        let now = chrono::Utc::now().naive_utc();
        menu_item::ActiveModel {
            name: Set(format!("Item {code}")),
            code: Set(code.to_string()),
            menu_id: Set(menu_id),
            parent_id: Set(None),
            depth: Set(0),
            order: Set(0),
            is_active: Set(true),
            path: Set(None),
            icon: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_duplicate_code_insert_is_conflict() -> Result<()> {
        let (db, menu, _root) = setup_with_root_item().await?;

        // Bypasses the service-level code check; the unique index must reject it
        let result = insert(&db, item_row(menu.id, "ROOT")).await;
        assert!(matches!(result.unwrap_err(), Error::Conflict { message: _ }));
        assert_eq!(find_by_menu_id(&db, menu.id).await?.len(), 1);

        insert(&db, item_row(menu.id, "OTHER")).await?;
        assert_eq!(find_by_menu_id(&db, menu.id).await?.len(), 2);

        Ok(())
    }
}
