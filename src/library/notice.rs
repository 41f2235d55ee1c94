use crate::api::ApiError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;

/// How long a toast stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationErrorKind {
    /// The server already has the item.
    Duplicate,
    /// Rejected before any request was made.
    Validation,
    Unauthenticated,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct MutationError {
    pub kind: MutationErrorKind,
    pub message: String,
}

impl MutationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: MutationErrorKind::Validation,
            message: message.into(),
        }
    }

    /// Classify a failed remote call. `duplicate` is the user-facing text for
    /// a conflict, `action` names the operation for generic failures.
    pub(crate) fn from_api(err: ApiError, duplicate: &str, action: &str) -> Self {
        if err.is_conflict() {
            return Self {
                kind: MutationErrorKind::Duplicate,
                message: duplicate.to_string(),
            };
        }
        match err {
            ApiError::Unauthenticated => Self {
                kind: MutationErrorKind::Unauthenticated,
                message: "Sign in to manage your library".to_string(),
            },
            ApiError::Validation(message) => Self::validation(message),
            other => Self {
                kind: MutationErrorKind::Generic,
                message: format!("Could not {action}: {other}"),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient message for the toast host.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

static NEXT_NOTICE_ID: AtomicU64 = AtomicU64::new(1);

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message.into())
    }

    pub fn from_outcome<T>(outcome: &Result<T, MutationError>, success: &str) -> Self {
        match outcome {
            Ok(_) => Self::success(success),
            Err(err) => Self::error(err.message.clone()),
        }
    }

    fn new(level: NoticeLevel, message: String) -> Self {
        Self {
            id: NEXT_NOTICE_ID.fetch_add(1, Ordering::Relaxed),
            level,
            message,
        }
    }
}
