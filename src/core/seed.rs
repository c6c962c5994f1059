//! Seeding of initial menus from the seed configuration.
//!
//! Seeding goes through the regular menu and menu item services, so seeded trees obey the
//! same invariants as API-created ones. It only runs against an empty `menus` table.

use crate::{
    config::seed::{MenuItemSeed, SeedConfig},
    core::{menu, menu_item},
    errors::Result,
    models::{NewChildMenuItem, NewMenu, NewMenuItem},
    repository,
};
use sea_orm::DatabaseConnection;
use std::collections::VecDeque;
use tracing::{debug, info, instrument, warn};

fn child_input(seed: &MenuItemSeed) -> NewChildMenuItem {
    NewChildMenuItem {
        name: seed.name.clone(),
        code: seed.code.clone(),
        order: seed.order,
        is_active: Some(seed.is_active),
        path: seed.path.clone(),
        icon: seed.icon.clone(),
    }
}

/// Creates the configured menus and their item trees if no menu exists yet.
///
/// Root items without an explicit order are ordered by their position in the file;
/// nested items without one are appended after their earlier siblings.
///
/// Returns the number of menus created (0 when seeding was skipped).
#[instrument(skip_all)]
pub async fn seed_initial_menus(db: &DatabaseConnection, config: &SeedConfig) -> Result<usize> {
    if !repository::menu::is_empty(db).await? {
        warn!("Menus already exist, skipping seed data");
        return Ok(0);
    }

    info!(
        "Starting to seed initial menus. Found {} menus in the seed file.",
        config.menus.len()
    );

    for menu_seed in &config.menus {
        let created = menu::create_menu(
            db,
            NewMenu {
                name: menu_seed.name.clone(),
                description: menu_seed.description.clone(),
                is_active: Some(menu_seed.is_active),
            },
        )
        .await?;

        let mut pending: VecDeque<(i64, &MenuItemSeed)> = VecDeque::new();
        for (position, item_seed) in menu_seed.items.iter().enumerate() {
            let root = menu_item::create_menu_item(
                db,
                NewMenuItem {
                    name: item_seed.name.clone(),
                    code: item_seed.code.clone(),
                    menu_id: created.id,
                    parent_id: None,
                    order: item_seed
                        .order
                        .or_else(|| i32::try_from(position).ok()),
                    is_active: Some(item_seed.is_active),
                    path: item_seed.path.clone(),
                    icon: item_seed.icon.clone(),
                },
            )
            .await?;
            pending.extend(item_seed.children.iter().map(|child| (root.id, child)));
        }

        let mut item_count = menu_seed.items.len();
        while let Some((parent_id, item_seed)) = pending.pop_front() {
            let child =
                menu_item::create_child_menu_item(db, parent_id, child_input(item_seed)).await?;
            pending.extend(item_seed.children.iter().map(|next| (child.id, next)));
            item_count += 1;
        }

        debug!("Seeded menu '{}' with {} items", created.name, item_count);
    }

    info!("Seeded {} menus", config.menus.len());
    Ok(config.menus.len())
}
