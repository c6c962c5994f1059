//! Menu entity - A named collection of navigation items (e.g. "Sidebar", "Header").
//!
//! Menu names are unique. Deleting a menu deletes every item it owns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Menu database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menus")]
pub struct Model {
    /// Unique identifier for the menu
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, unique across all menus
    #[sea_orm(unique)]
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Inactive menus are left out of the combined hierarchy view
    pub is_active: bool,
    /// When the menu was created
    pub created_at: DateTime,
    /// When the menu was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Menu and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One menu has many menu items
    #[sea_orm(has_many = "super::menu_item::Entity")]
    MenuItems,
}

impl Related<super::menu_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
