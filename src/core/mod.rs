//! Core business logic - framework-agnostic menu and menu item operations.
//!
//! Services are plain async functions taking the database handle explicitly.

/// Pure tree building and derivations over flat menu item rows
pub mod hierarchy;
/// Menu operations
pub mod menu;
/// Menu item tree operations
pub mod menu_item;
/// Initial menus from the seed configuration
pub mod seed;
