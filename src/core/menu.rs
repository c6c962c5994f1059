//! Menu business logic - creating, listing, updating and deleting menus.
//!
//! Menu names are unique: the check runs before every insert and every rename, and the
//! unique index on `menus.name` catches whatever slips past it under concurrency.

use crate::{
    entities::menu,
    errors::{Error, Result},
    models::{MenuChanges, MenuView, MenuWithItemCount, NewMenu},
    repository,
};
use sea_orm::{DatabaseConnection, IntoActiveModel, Set};
use tracing::{info, instrument};

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Menu name cannot be empty".to_string(),
        });
    }
    Ok(())
}

async fn ensure_name_free(db: &DatabaseConnection, name: &str) -> Result<()> {
    if repository::menu::find_by_name(db, name).await?.is_some() {
        return Err(Error::Conflict {
            message: "Menu with this name already exists".to_string(),
        });
    }
    Ok(())
}

/// Creates a new menu.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only (`Validation`)
/// - Another menu already has this name (`Conflict`)
/// - The database insert fails
#[instrument(skip(db))]
pub async fn create_menu(db: &DatabaseConnection, input: NewMenu) -> Result<MenuView> {
    validate_name(&input.name)?;
    ensure_name_free(db, &input.name).await?;

    let now = chrono::Utc::now().naive_utc();
    let menu = menu::ActiveModel {
        name: Set(input.name),
        description: Set(input.description),
        is_active: Set(input.is_active.unwrap_or(true)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = repository::menu::insert(db, menu).await?;
    info!("Created menu '{}' ({})", created.name, created.id);
    Ok(created.into())
}

/// Lists every menu, newest first.
pub async fn get_all_menus(db: &DatabaseConnection) -> Result<Vec<MenuView>> {
    let menus = repository::menu::find_all(db).await?;
    Ok(menus.into_iter().map(Into::into).collect())
}

/// Lists active menus, newest first.
pub async fn get_active_menus(db: &DatabaseConnection) -> Result<Vec<MenuView>> {
    let menus = repository::menu::find_active(db).await?;
    Ok(menus.into_iter().map(Into::into).collect())
}

/// Finds a menu by ID, returning None if it does not exist.
pub async fn get_menu_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<MenuView>> {
    Ok(repository::menu::find_by_id(db, id).await?.map(Into::into))
}

/// Lists every menu together with the number of items it owns.
pub async fn get_menus_with_item_counts(
    db: &DatabaseConnection,
) -> Result<Vec<MenuWithItemCount>> {
    let counts = repository::menu::count_items_per_menu(db).await?;
    let menus = repository::menu::find_all(db).await?;

    Ok(menus
        .into_iter()
        .map(|menu| MenuWithItemCount {
            item_count: counts.get(&menu.id).copied().unwrap_or(0),
            menu: menu.into(),
        })
        .collect())
}

/// Applies a partial update to a menu.
///
/// # Errors
/// Returns an error if:
/// - The menu does not exist (`NotFound`)
/// - The new name is blank (`Validation`) or taken by another menu (`Conflict`)
/// - The database update fails
#[instrument(skip(db))]
pub async fn update_menu(
    db: &DatabaseConnection,
    id: i64,
    changes: MenuChanges,
) -> Result<MenuView> {
    let existing = repository::menu::find_by_id(db, id)
        .await?
        .ok_or_else(|| Error::menu_not_found(id))?;

    if let Some(name) = &changes.name {
        validate_name(name)?;
        if *name != existing.name {
            ensure_name_free(db, name).await?;
        }
    }

    let mut menu = existing.into_active_model();
    if let Some(name) = changes.name {
        menu.name = Set(name);
    }
    if let Some(description) = changes.description {
        menu.description = Set(description);
    }
    if let Some(is_active) = changes.is_active {
        menu.is_active = Set(is_active);
    }
    menu.updated_at = Set(chrono::Utc::now().naive_utc());

    Ok(repository::menu::update(db, menu).await?.into())
}

/// Deletes a menu and every item it owns.
///
/// # Errors
/// Returns `NotFound` if the menu does not exist, or a database error if the delete fails.
#[instrument(skip(db))]
pub async fn delete_menu(db: &DatabaseConnection, id: i64) -> Result<()> {
    if repository::menu::find_by_id(db, id).await?.is_none() {
        return Err(Error::menu_not_found(id));
    }

    repository::menu::delete(db, id).await?;
    info!("Deleted menu {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_menu_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_menu(&db, new_menu("   ")).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_menu_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let menu = create_menu(
            &db,
            NewMenu {
                name: "Sidebar".to_string(),
                description: Some("Sidebar navigation".to_string()),
                is_active: None,
            },
        )
        .await?;

        assert_eq!(menu.name, "Sidebar");
        assert_eq!(menu.description.as_deref(), Some("Sidebar navigation"));
        assert!(menu.is_active);
        assert_eq!(menu.created_at, menu.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_menu_duplicate_name_conflicts() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_menu(&db, "Sidebar").await?;

        let result = create_menu(&db, new_menu("Sidebar")).await;
        assert!(matches!(result.unwrap_err(), Error::Conflict { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_active_menus_filtering() -> Result<()> {
        let db = setup_test_db().await?;
        let header = create_test_menu(&db, "Header").await?;
        create_menu(
            &db,
            NewMenu {
                name: "Footer".to_string(),
                description: None,
                is_active: Some(false),
            },
        )
        .await?;

        assert_eq!(get_all_menus(&db).await?.len(), 2);

        let active = get_active_menus(&db).await?;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, header.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_menus_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_menu(&db, "First").await?;
        let second = create_test_menu(&db, "Second").await?;

        let menus = get_all_menus(&db).await?;
        assert_eq!(menus[0].id, second.id);
        assert_eq!(menus[1].id, first.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_menu_by_id_missing_is_none() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(get_menu_by_id(&db, 999).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_menu_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let menu = create_menu(
            &db,
            NewMenu {
                name: "Header".to_string(),
                description: Some("Top bar".to_string()),
                is_active: None,
            },
        )
        .await?;

        let updated = update_menu(
            &db,
            menu.id,
            MenuChanges {
                name: Some("Main Header".to_string()),
                description: Some(None),
                is_active: Some(false),
            },
        )
        .await?;

        assert_eq!(updated.name, "Main Header");
        assert_eq!(updated.description, None);
        assert!(!updated.is_active);
        assert!(updated.updated_at >= menu.updated_at);

        // Keeping the same name is not a conflict with itself
        let same = update_menu(
            &db,
            menu.id,
            MenuChanges {
                name: Some("Main Header".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(same.name, "Main Header");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_menu_rename_conflict_and_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_menu(&db, "Header").await?;
        let footer = create_test_menu(&db, "Footer").await?;

        let result = update_menu(
            &db,
            footer.id,
            MenuChanges {
                name: Some("Header".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Conflict { message: _ }));

        let result = update_menu(&db, 999, MenuChanges::default()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound { entity: "Menu", id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_menu_cascades_to_items() -> Result<()> {
        let (db, menu, root) = setup_with_root_item().await?;
        create_test_child(&db, root.id, "CHILD").await?;
        let other = create_test_menu(&db, "Other").await?;
        create_test_item(&db, other.id, "OTHER_ROOT").await?;

        delete_menu(&db, menu.id).await?;

        assert!(get_menu_by_id(&db, menu.id).await?.is_none());
        let remaining = repository::menu_item::find_all(&db).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].code, "OTHER_ROOT");

        let result = delete_menu(&db, menu.id).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_menus_with_item_counts() -> Result<()> {
        let (db, menu, root) = setup_with_root_item().await?;
        create_test_child(&db, root.id, "CHILD").await?;
        let empty = create_test_menu(&db, "Empty").await?;

        let counts = get_menus_with_item_counts(&db).await?;
        let count_of = |id: i64| {
            counts
                .iter()
                .find(|entry| entry.menu.id == id)
                .unwrap()
                .item_count
        };
        assert_eq!(count_of(menu.id), 2);
        assert_eq!(count_of(empty.id), 0);

        Ok(())
    }
}
