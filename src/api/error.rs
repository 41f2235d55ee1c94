//! Error types for the catalog/library HTTP client.

use thiserror::Error;

/// Everything a remote call can fail with. Carries text rather than the
/// underlying transport error so results stay `Clone` for UI state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Connection failure or the request never completed
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-2xx response
    #[error("Server error ({status}): {detail}")]
    Status { status: u16, detail: String },

    /// Body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Mutation attempted without a token
    #[error("Sign in required")]
    Unauthenticated,

    /// Rejected locally before any request was sent
    #[error("{0}")]
    Validation(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// The server reports "already favorited" / "already in playlist" either as
    /// 409 or as 400 with an explanatory detail.
    pub fn is_conflict(&self) -> bool {
        match self {
            Self::Status { status: 409, .. } => true,
            Self::Status { status: 400, detail } => detail.to_ascii_lowercase().contains("already"),
            _ => false,
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Pull a human readable message out of an error body.
///
/// Handles `{"detail": ..}`, `{"error": ..}`, bare JSON strings and DRF field
/// maps (`{"email": ["..."], "password": ["..."]}`), which are flattened one
/// message per line.
pub(crate) fn error_detail(body: &str) -> String {
    let trimmed = body.trim();
    let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return trimmed.to_string();
    };

    if let Some(object) = value.as_object() {
        for key in ["detail", "error", "message"] {
            if let Some(text) = object.get(key).and_then(|v| v.as_str()) {
                return text.trim().to_string();
            }
        }
    }

    let mut messages = Vec::new();
    collect_messages(&value, &mut messages);
    messages.join("\n")
}

fn collect_messages(value: &serde_json::Value, out: &mut Vec<String>) {
    match value {
        serde_json::Value::String(text) => {
            let text = text.trim();
            if !text.is_empty() {
                out.push(text.to_string());
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                collect_messages(item, out);
            }
        }
        serde_json::Value::Object(map) => {
            for item in map.values() {
                collect_messages(item, out);
            }
        }
        serde_json::Value::Number(number) => out.push(number.to_string()),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_key_wins() {
        assert_eq!(
            error_detail(r#"{"detail": "Song already exists in playlist"}"#),
            "Song already exists in playlist"
        );
        assert_eq!(error_detail(r#"{"error": "Invalid Credentials"}"#), "Invalid Credentials");
    }

    #[test]
    fn field_maps_are_flattened() {
        let detail = error_detail(
            r#"{"email": ["Enter a valid email address."], "password": ["Too short."]}"#,
        );
        assert!(detail.contains("Enter a valid email address."));
        assert!(detail.contains("Too short."));
        assert_eq!(detail.lines().count(), 2);
    }

    #[test]
    fn non_json_bodies_pass_through() {
        assert_eq!(error_detail("  Bad Gateway "), "Bad Gateway");
    }

    #[test]
    fn conflict_detection() {
        let dup = ApiError::Status {
            status: 400,
            detail: "Song is already in your favorites".into(),
        };
        assert!(dup.is_conflict());
        assert!(ApiError::Status { status: 409, detail: String::new() }.is_conflict());
        let missing = ApiError::Status {
            status: 400,
            detail: "Song not found".into(),
        };
        assert!(!missing.is_conflict());
        assert!(!ApiError::Unauthenticated.is_conflict());
    }
}
