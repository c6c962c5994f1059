/// Database configuration and connection management
pub mod database;

/// Seed menu loading from a TOML file
pub mod seed;

/// HTTP listener settings
pub mod server;
