//! Error Types
//!
//! Failures that cross a component boundary. Input validation problems are
//! not represented here: they are coerced or blocked where they occur.

use thiserror::Error;

/// Result type for entity store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Capture device acquisition failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The user or the platform refused camera access
    #[error("camera permission denied")]
    PermissionDenied,

    /// No video input device exists
    #[error("no camera found")]
    NotFound,

    /// Anything else the platform reported (name kept for logs)
    #[error("camera unavailable: {0}")]
    Other(String),
}

impl CaptureError {
    /// Map a DOMException name from `getUserMedia` to a failure kind.
    pub fn from_dom_name(name: &str) -> Self {
        match name {
            "NotAllowedError" | "PermissionDeniedError" => CaptureError::PermissionDenied,
            "NotFoundError" => CaptureError::NotFound,
            other => CaptureError::Other(other.to_string()),
        }
    }

    /// Fixed user-facing message shown in place of the camera preview.
    pub fn user_message(&self) -> &'static str {
        match self {
            CaptureError::PermissionDenied => {
                "Unable to access camera. Please allow camera access in your browser settings and try again."
            }
            CaptureError::NotFound => "Unable to access camera. No camera found on this device.",
            CaptureError::Other(_) => "Unable to access camera. Please try using manual input instead.",
        }
    }
}

/// Entity store failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached or the call threw
    #[error("store unreachable: {0}")]
    Transport(String),

    /// The store answered with something that is not an item payload
    #[error("unexpected store response: {0}")]
    Decode(String),

    /// No item with this id
    #[error("item not found: {0}")]
    NotFound(String),

    /// The store refused the payload
    #[error("store rejected request: {0}")]
    Rejected(String),
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid sort spec: {0:?}")]
    Sort(String),

    #[error("recent_count must be at least 1")]
    RecentCount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_name_mapping() {
        assert_eq!(CaptureError::from_dom_name("NotAllowedError"), CaptureError::PermissionDenied);
        assert_eq!(CaptureError::from_dom_name("PermissionDeniedError"), CaptureError::PermissionDenied);
        assert_eq!(CaptureError::from_dom_name("NotFoundError"), CaptureError::NotFound);
        assert_eq!(
            CaptureError::from_dom_name("NotReadableError"),
            CaptureError::Other("NotReadableError".to_string())
        );
    }

    #[test]
    fn test_user_messages_are_distinct() {
        let denied = CaptureError::PermissionDenied.user_message();
        let missing = CaptureError::NotFound.user_message();
        let other = CaptureError::Other("OverconstrainedError".into()).user_message();
        assert!(denied.contains("allow camera access"));
        assert!(missing.contains("No camera found"));
        assert!(other.contains("manual input"));
    }
}
