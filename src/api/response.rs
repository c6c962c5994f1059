//! Uniform response envelope: `{ success, message, data }`.

use serde::Serialize;

/// Envelope wrapping every API response body.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// False for failures and for lookups that found nothing
    pub success: bool,
    /// Human-readable outcome
    pub message: String,
    /// Payload, serialized as `null` when absent
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Successful response without data (e.g. after a delete).
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Unsuccessful response with null data.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// `success` when `data` is present, `failure` with `missing` otherwise.
    pub fn found(data: Option<T>, message: impl Into<String>, missing: impl Into<String>) -> Self {
        match data {
            Some(data) => Self::success(message, data),
            None => Self::failure(missing),
        }
    }
}

/// Picks the message for a list depending on whether it is empty.
pub fn list_message<T>(items: &[T], found: &str, empty: impl Into<String>) -> String {
    if items.is_empty() {
        empty.into()
    } else {
        found.to_string()
    }
}
