//! Seed menu loading from a TOML file.
//!
//! The menus described here are inserted on first start, when the `menus` table is empty.
//! Items nest through `children`, so a whole navigation tree can be declared in one file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default seed file location used when `MENU_SEED_PATH` is not set.
pub const DEFAULT_SEED_PATH: &str = "menus.toml";

/// Configuration structure representing the entire seed file
#[derive(Debug, Deserialize, Default)]
pub struct SeedConfig {
    /// Menus to create, in file order
    #[serde(default)]
    pub menus: Vec<MenuSeed>,
}

/// A single menu and its root items
#[derive(Debug, Deserialize, Clone)]
pub struct MenuSeed {
    /// Unique menu name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Whether the menu is active (defaults to true)
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Root items of the menu
    #[serde(default)]
    pub items: Vec<MenuItemSeed>,
}

/// A menu item and, recursively, its children
#[derive(Debug, Deserialize, Clone)]
pub struct MenuItemSeed {
    /// Display name
    pub name: String,
    /// Globally unique code
    pub code: String,
    /// Route path
    pub path: Option<String>,
    /// Icon identifier
    pub icon: Option<String>,
    /// Sibling order; appended after existing siblings when omitted
    pub order: Option<i32>,
    /// Whether the item is active (defaults to true)
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Nested items
    #[serde(default)]
    pub children: Vec<MenuItemSeed>,
}

const fn default_active() -> bool {
    true
}

/// Loads seed menus from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML does not match the expected shape.
pub fn load_seed_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read seed file {:?}: {e}", path.as_ref()),
    })?;

    parse_seed_config(&contents)
}

/// Parses seed menus from TOML text.
pub fn parse_seed_config(contents: &str) -> Result<SeedConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed file: {e}"),
    })
}

/// Gets the seed file path from `MENU_SEED_PATH` or returns the default.
#[must_use]
pub fn get_seed_path() -> String {
    std::env::var("MENU_SEED_PATH").unwrap_or_else(|_| DEFAULT_SEED_PATH.to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_nested_seed_config() {
        let toml_str = r#"
            [[menus]]
            name = "Sidebar Menu"
            description = "Sidebar navigation"

            [[menus.items]]
            name = "Dashboard"
            code = "DASHBOARD"
            path = "/dashboard"
            order = 0

            [[menus.items]]
            name = "Systems"
            code = "SYSTEMS"
            order = 1

            [[menus.items.children]]
            name = "System Code"
            code = "SYSTEM_CODE"
            path = "/systems/code"

            [[menus.items.children]]
            name = "Properties"
            code = "PROPERTIES"
            is_active = false

            [[menus]]
            name = "Footer Menu"
            is_active = false
        "#;

        let config = parse_seed_config(toml_str).unwrap();
        assert_eq!(config.menus.len(), 2);

        let sidebar = &config.menus[0];
        assert!(sidebar.is_active);
        assert_eq!(sidebar.items.len(), 2);
        assert!(sidebar.items[0].children.is_empty());
        assert_eq!(sidebar.items[1].children.len(), 2);
        assert_eq!(sidebar.items[1].children[0].order, None);
        assert!(!sidebar.items[1].children[1].is_active);

        assert!(!config.menus[1].is_active);
        assert!(config.menus[1].items.is_empty());
    }

    #[test]
    fn test_parse_rejects_missing_code() {
        let toml_str = r#"
            [[menus]]
            name = "Header"

            [[menus.items]]
            name = "Home"
        "#;

        assert!(matches!(
            parse_seed_config(toml_str).unwrap_err(),
            Error::Config { message: _ }
        ));
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let result = load_seed_config("does/not/exist.toml");
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));
    }
}
