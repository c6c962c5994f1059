//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod menu;
pub mod menu_item;

// Re-export specific types to avoid conflicts
pub use menu::{Entity as Menu, Model as MenuModel};
pub use menu_item::{Entity as MenuItem, Model as MenuItemModel};
