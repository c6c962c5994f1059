//! Menu item entity - One node of a menu's navigation tree.
//!
//! Items reference their owning menu through `menu_id` and, optionally, their parent item
//! through `parent_id`. `depth` is always derived from the parent (roots sit at depth 0) and
//! `order` sorts siblings that share a parent.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Menu item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_items")]
pub struct Model {
    /// Unique identifier for the menu item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g. "Dashboard")
    pub name: String,
    /// Stable code, unique across every menu (e.g. `"SYSTEM_CODE"`)
    #[sea_orm(unique)]
    pub code: String,
    /// Owning menu
    #[sea_orm(indexed)]
    pub menu_id: i64,
    /// Parent item, None for roots
    #[sea_orm(nullable, indexed)]
    pub parent_id: Option<i64>,
    /// Distance from the root of the tree
    pub depth: i32,
    /// Sort key among siblings
    pub order: i32,
    /// Inactive items are hidden from hierarchy and path lookups
    pub is_active: bool,
    /// Route the item navigates to, also usable as a lookup key
    pub path: Option<String>,
    /// Icon identifier or glyph
    pub icon: Option<String>,
    /// When the item was created
    pub created_at: DateTime,
    /// When the item was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between `MenuItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item belongs to one menu
    #[sea_orm(
        belongs_to = "super::menu::Entity",
        from = "Column::MenuId",
        to = "super::menu::Column::Id",
        on_delete = "Cascade"
    )]
    Menu,
    /// Each non-root item belongs to a parent item
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_delete = "Cascade"
    )]
    Parent,
}

impl Related<super::menu::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Menu.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
