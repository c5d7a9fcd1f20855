//! Error classification logic

use crate::Error;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Best-effort view of an error response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
    /// Server-side error type label (the `error` field), if present.
    pub error_type: Option<String>,
}

impl ErrorBody {
    /// Parse `{"message": ..., "error": ...}`; fall back to the raw text, then to a
    /// generic message when the body is empty.
    pub fn parse(raw: &str) -> Self {
        if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(raw) {
            let error_type = map
                .get("error")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            let message = map
                .get("message")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .or_else(|| error_type.clone())
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            return Self {
                message,
                error_type,
            };
        }

        let text = raw.trim();
        Self {
            message: if text.is_empty() {
                UNKNOWN_ERROR.to_string()
            } else {
                text.to_string()
            },
            error_type: None,
        }
    }
}

/// Map an HTTP error response to exactly one [`Error`] variant.
///
/// Callers only pass statuses >= 400; anything lower is treated as the
/// generic kind as well so the function stays total.
pub fn classify(status: u16, raw_body: &str) -> Error {
    let ErrorBody {
        message,
        error_type,
    } = ErrorBody::parse(raw_body);

    match status {
        401 | 403 => Error::Authentication {
            message,
            status_code: status,
            error_type,
        },
        404 => Error::NotFound {
            message,
            status_code: status,
            error_type,
        },
        422 => Error::Validation {
            message,
            status_code: status,
            error_type,
        },
        429 => Error::RateLimit {
            message,
            status_code: status,
            error_type,
        },
        s if s >= 500 => Error::Server {
            message,
            status_code: status,
            error_type,
        },
        _ => Error::Api {
            message,
            status_code: status,
            error_type,
        },
    }
}
