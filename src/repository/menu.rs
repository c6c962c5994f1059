//! Menu storage operations.

use crate::{
    entities::{Menu, MenuItem, menu, menu_item},
    errors::Result,
};
use sea_orm::{
    PaginatorTrait, QueryOrder, QuerySelect, TransactionTrait, prelude::*, sea_query::Expr,
};
use std::collections::HashMap;
use tracing::debug;

/// Inserts a new menu row.
pub async fn insert<C>(db: &C, menu: menu::ActiveModel) -> Result<menu::Model>
where
    C: ConnectionTrait,
{
    menu.insert(db).await.map_err(Into::into)
}

/// Finds a menu by primary key.
pub async fn find_by_id<C>(db: &C, id: i64) -> Result<Option<menu::Model>>
where
    C: ConnectionTrait,
{
    Menu::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Finds a menu by its exact name.
pub async fn find_by_name<C>(db: &C, name: &str) -> Result<Option<menu::Model>>
where
    C: ConnectionTrait,
{
    Menu::find()
        .filter(menu::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every menu, newest first.
pub async fn find_all<C>(db: &C) -> Result<Vec<menu::Model>>
where
    C: ConnectionTrait,
{
    Menu::find()
        .order_by_desc(menu::Column::CreatedAt)
        .order_by_desc(menu::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists active menus, newest first.
pub async fn find_active<C>(db: &C) -> Result<Vec<menu::Model>>
where
    C: ConnectionTrait,
{
    Menu::find()
        .filter(menu::Column::IsActive.eq(true))
        .order_by_desc(menu::Column::CreatedAt)
        .order_by_desc(menu::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Returns true if no menu exists yet.
pub async fn is_empty<C>(db: &C) -> Result<bool>
where
    C: ConnectionTrait,
{
    Ok(Menu::find().count(db).await? == 0)
}

/// Counts items per menu. Menus without items are absent from the map.
pub async fn count_items_per_menu<C>(db: &C) -> Result<HashMap<i64, u64>>
where
    C: ConnectionTrait,
{
    let rows: Vec<(i64, i64)> = MenuItem::find()
        .select_only()
        .column(menu_item::Column::MenuId)
        .column_as(Expr::col(menu_item::Column::Id).count(), "item_count")
        .group_by(menu_item::Column::MenuId)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(menu_id, count)| (menu_id, u64::try_from(count).unwrap_or_default()))
        .collect())
}

/// Writes the changed columns of an existing menu.
pub async fn update<C>(db: &C, menu: menu::ActiveModel) -> Result<menu::Model>
where
    C: ConnectionTrait,
{
    menu.update(db).await.map_err(Into::into)
}

/// Deletes a menu together with every item it owns, atomically.
pub async fn delete<C>(db: &C, id: i64) -> Result<()>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let items = MenuItem::delete_many()
        .filter(menu_item::Column::MenuId.eq(id))
        .exec(&txn)
        .await?;
    Menu::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    debug!(
        "Deleted menu {} and {} owned menu items",
        id, items.rows_affected
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{errors::Error, test_utils::*};
    use sea_orm::Set;

    fn menu_row(name: &str) -> menu::ActiveModel {
        let now = chrono::Utc::now().naive_utc();
        menu::ActiveModel {
            name: Set(name.to_string()),
            description: Set(None),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_duplicate_name_insert_is_conflict() -> Result<()> {
        let db = setup_test_db().await?;
        insert(&db, menu_row("Sidebar")).await?;

        // Bypasses the service-level name check; the unique index must reject it
        let result = insert(&db, menu_row("Sidebar")).await;
        assert!(matches!(result.unwrap_err(), Error::Conflict { message: _ }));
        assert_eq!(find_all(&db).await?.len(), 1);

        Ok(())
    }
}
