//! Persistence gateway - CRUD and ordered scans over `menus` and `menu_items`.
//!
//! No business rules live here. The one policy owned by this layer is what a delete
//! removes: a menu takes its items with it and an item takes its whole subtree.

pub mod menu;
pub mod menu_item;
