//! Shared types for the HTTP API layer.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use serde::Serialize;

use crate::api::error::ApiError;

/// Shared context for all API routes: the SQLite connection behind a
/// mutex, one logical unit of work at a time.
#[derive(Clone)]
pub struct ApiContext {
    db: Arc<Mutex<Connection>>,
}

impl ApiContext {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn lock_db(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::internal("database unavailable", "connection lock poisoned"))
    }
}

/// Uniform response envelope. `data`/`count` appear on success,
/// `error`/`errors` on failure; absent fields are omitted from the JSON.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: Some(data),
            count: None,
            error: None,
            errors: None,
        }
    }

    /// Success with a `count` field, for list endpoints.
    pub fn ok_list(message: &str, data: T, count: usize) -> Self {
        Self {
            count: Some(count),
            ..Self::ok(message, data)
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload (delete operations).
    pub fn message_only(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: None,
            count: None,
            error: None,
            errors: None,
        }
    }

    pub fn failure(message: &str, error: String) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            data: None,
            count: None,
            error: Some(error),
            errors: None,
        }
    }

    pub fn validation_failure(errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: "validation failed".to_string(),
            data: None,
            count: None,
            error: None,
            errors: Some(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_error_fields() {
        let json = serde_json::to_value(ApiResponse::ok("found", 42)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 42);
        assert!(json.get("error").is_none());
        assert!(json.get("errors").is_none());
        assert!(json.get("count").is_none());
    }

    #[test]
    fn list_envelope_carries_count() {
        let json = serde_json::to_value(ApiResponse::ok_list("listed", vec![1, 2], 2)).unwrap();
        assert_eq!(json["count"], 2);
    }

    #[test]
    fn failure_envelope_omits_data() {
        let json =
            serde_json::to_value(ApiResponse::failure("broken", "detail".into())).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "detail");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn validation_envelope_lists_field_errors() {
        let json = serde_json::to_value(ApiResponse::validation_failure(vec![
            "pacDni: must be exactly 8 digits".into(),
        ]))
        .unwrap();
        assert_eq!(json["errors"][0], "pacDni: must be exactly 8 digits");
    }
}
