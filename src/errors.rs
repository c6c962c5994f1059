//! Unified error type for the menu service.
//!
//! Domain failures (`NotFound`, `Conflict`, `InvalidRelation`, `Validation`) are raised
//! before any write is attempted. Storage failures surface as `Database` and are never retried.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Every error the crate can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced menu, menu item or parent does not exist
    #[error("{entity} with ID {id} not found")]
    NotFound {
        /// Kind of record that was looked up (e.g. "Menu item")
        entity: &'static str,
        /// Identifier that was looked up
        id: i64,
    },

    /// Duplicate unique key (menu name, menu item code)
    #[error("{message}")]
    Conflict {
        /// Human-readable description of the clash
        message: String,
    },

    /// Parent/child relation that would break the tree (cross-menu parent, cycles)
    #[error("{message}")]
    InvalidRelation {
        /// Human-readable description of the rejected relation
        message: String,
    },

    /// Malformed input (blank names, negative order, undecodable request bodies)
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description of the invalid input
        message: String,
    },

    /// Configuration file or environment problem
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the configuration problem
        message: String,
    },

    /// Opaque storage failure
    #[error("Database error: {0}")]
    Database(DbErr),

    /// I/O failure (binding the listener, reading files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a `NotFound` on a menu.
    #[must_use]
    pub const fn menu_not_found(id: i64) -> Self {
        Self::NotFound { entity: "Menu", id }
    }

    /// Shorthand for a `NotFound` on a menu item.
    #[must_use]
    pub const fn menu_item_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Menu item",
            id,
        }
    }

    /// Shorthand for a `NotFound` on a parent menu item.
    #[must_use]
    pub const fn parent_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Parent menu item",
            id,
        }
    }
}

// The unique indexes are the authoritative guard when two writers race past the
// service-level checks, so their violations are reported as conflicts.
impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Self::Conflict {
                message: format!("Unique constraint violated: {detail}"),
            },
            _ => Self::Database(err),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
