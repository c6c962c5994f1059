//! Request commands and response views shared by the domain services and the API.
//!
//! JSON field names are camelCase. Update commands distinguish three states per nullable
//! field: absent (`None`), explicit null (`Some(None)`) and a value (`Some(Some(v))`).

use crate::entities::{menu, menu_item};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes a field that may be absent, null or set into `Option<Option<T>>`.
///
/// Combined with `#[serde(default)]`, an absent field stays `None` while an explicit
/// `null` becomes `Some(None)`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Input for creating a menu
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenu {
    /// Unique menu name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Defaults to true
    pub is_active: Option<bool>,
}

/// Partial update of a menu
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuChanges {
    /// New name; uniqueness is re-checked when it differs
    pub name: Option<String>,
    /// New description; explicit null clears it
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    /// New active flag
    pub is_active: Option<bool>,
}

/// Input for creating a menu item anywhere in a menu
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    /// Display name
    pub name: String,
    /// Globally unique code
    pub code: String,
    /// Owning menu
    pub menu_id: i64,
    /// Parent item; must belong to `menu_id`
    pub parent_id: Option<i64>,
    /// Sibling order, 0 when omitted
    pub order: Option<i32>,
    /// Defaults to true
    pub is_active: Option<bool>,
    /// Route path
    pub path: Option<String>,
    /// Icon identifier
    pub icon: Option<String>,
}

/// Input for creating a child under an existing item. The menu is inherited from the parent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChildMenuItem {
    /// Display name
    pub name: String,
    /// Globally unique code
    pub code: String,
    /// Sibling order; appended after the last sibling when omitted
    pub order: Option<i32>,
    /// Defaults to true
    pub is_active: Option<bool>,
    /// Route path
    pub path: Option<String>,
    /// Icon identifier
    pub icon: Option<String>,
}

/// Partial update of a menu item
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemChanges {
    /// New name. An explicit null is ignored rather than clearing the name.
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    /// New code; uniqueness is re-checked when it differs
    pub code: Option<String>,
    /// Move the item (and its subtree) to another menu
    pub menu_id: Option<i64>,
    /// New parent; explicit null detaches the item to the root level
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<i64>>,
    /// New sibling order
    pub order: Option<i32>,
    /// New active flag
    pub is_active: Option<bool>,
    /// New path; explicit null clears it
    #[serde(default, deserialize_with = "double_option")]
    pub path: Option<Option<String>>,
    /// New icon; explicit null clears it
    #[serde(default, deserialize_with = "double_option")]
    pub icon: Option<Option<String>>,
}

/// Body of an order-only update
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OrderChange {
    /// New sibling order
    pub order: i32,
}

/// Menu as returned to API consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuView {
    /// Primary key
    pub id: i64,
    /// Unique menu name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Whether the menu is shown
    pub is_active: bool,
    /// Creation timestamp (UTC)
    pub created_at: NaiveDateTime,
    /// Last modification timestamp (UTC)
    pub updated_at: NaiveDateTime,
}

impl From<menu::Model> for MenuView {
    fn from(menu: menu::Model) -> Self {
        Self {
            id: menu.id,
            name: menu.name,
            description: menu.description,
            is_active: menu.is_active,
            created_at: menu.created_at,
            updated_at: menu.updated_at,
        }
    }
}

/// Menu paired with the number of items it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuWithItemCount {
    /// The menu itself
    #[serde(flatten)]
    pub menu: MenuView,
    /// Number of items in the menu, at any depth
    pub item_count: u64,
}

/// Menu item as returned to API consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemView {
    /// Primary key
    pub id: i64,
    /// Display name
    pub name: String,
    /// Globally unique code
    pub code: String,
    /// Immediate parent, None for roots
    pub parent_id: Option<i64>,
    /// Name of the immediate parent, None for roots
    pub parent_name: Option<String>,
    /// Owning menu
    pub menu_id: i64,
    /// Distance from the root level (roots are 0)
    pub depth: i32,
    /// Position among siblings
    pub order: i32,
    /// Whether the item is shown
    pub is_active: bool,
    /// Route path
    pub path: Option<String>,
    /// Icon identifier
    pub icon: Option<String>,
    /// Creation timestamp (UTC)
    pub created_at: NaiveDateTime,
    /// Last modification timestamp (UTC)
    pub updated_at: NaiveDateTime,
}

impl MenuItemView {
    /// Builds the view of `item`, attaching the resolved parent name.
    #[must_use]
    pub fn new(item: menu_item::Model, parent_name: Option<String>) -> Self {
        Self {
            id: item.id,
            name: item.name,
            code: item.code,
            parent_id: item.parent_id,
            parent_name,
            menu_id: item.menu_id,
            depth: item.depth,
            order: item.order,
            is_active: item.is_active,
            path: item.path,
            icon: item.icon,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// One node of a nested menu hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    /// The item at this node
    #[serde(flatten)]
    pub item: MenuItemView,
    /// Direct children, by sibling order
    pub children: Vec<HierarchyNode>,
}

/// An active menu with its nested item hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuHierarchy {
    /// The menu
    pub menu: MenuView,
    /// Root items with their children nested
    pub hierarchy: Vec<HierarchyNode>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_menu_item_changes_distinguishes_absent_null_and_value() {
        let changes: MenuItemChanges =
            serde_json::from_str(r#"{"name": null, "parentId": null, "icon": "x"}"#).unwrap();
        assert_eq!(changes.name, Some(None));
        assert_eq!(changes.parent_id, Some(None));
        assert_eq!(changes.icon, Some(Some("x".to_string())));
        assert_eq!(changes.path, None);
        assert_eq!(changes.code, None);

        let changes: MenuItemChanges = serde_json::from_str(r#"{"parentId": 3}"#).unwrap();
        assert_eq!(changes.parent_id, Some(Some(3)));
        assert_eq!(changes.name, None);
    }

    #[test]
    fn test_new_menu_item_ignores_caller_depth() {
        let input: NewMenuItem = serde_json::from_str(
            r#"{"name": "Home", "code": "HOME", "menuId": 1, "depth": 9}"#,
        )
        .unwrap();
        assert_eq!(input.menu_id, 1);
        assert_eq!(input.parent_id, None);
        assert_eq!(input.order, None);
    }
}
