//! # Error Types
//!
//! Structured error types for link_core. Every failure a capability can
//! produce maps onto one of these variants, and each variant knows how to
//! present itself to the user as a [`Notice`].
//!
//! ## Example
//!
//! ```rust
//! use link_core::errors::{ShareError, ShareResult};
//!
//! fn require_text(text: &str) -> ShareResult<()> {
//!     if text.is_empty() {
//!         return Err(ShareError::encoding_failure("No input text"));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(require_text("").unwrap_err().error_code(), "ENCODING_FAILURE");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capabilities::{Notice, Severity};

/// Result type alias for link_core operations
pub type ShareResult<T> = Result<T, ShareError>;

/// Structured error type for share dialog operations.
///
/// None of these are fatal: callers convert them into a notification at the
/// point of the call and carry on.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ShareError {
    /// The QR encoder rejected the input (empty, or too long for the EC level)
    #[error("QR encoding failed: {reason}")]
    EncodingFailure { reason: String },

    /// Writing to the system clipboard failed (permission denied, busy, ...)
    #[error("Clipboard write failed: {reason}")]
    ClipboardWriteFailure { reason: String },

    /// The host clipboard cannot carry this kind of payload
    #[error("Clipboard does not support {payload} payloads")]
    ClipboardUnsupported { payload: String },

    /// Saving the bitmap to a file failed
    #[error("Save failed: '{path}' - {reason}")]
    SaveFailure { path: String, reason: String },

    /// A configuration file could not be parsed or failed validation
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },
}

impl ShareError {
    /// Create an EncodingFailure error
    pub fn encoding_failure(reason: impl Into<String>) -> Self {
        ShareError::EncodingFailure {
            reason: reason.into(),
        }
    }

    /// Create a ClipboardWriteFailure error
    pub fn clipboard_write(reason: impl Into<String>) -> Self {
        ShareError::ClipboardWriteFailure {
            reason: reason.into(),
        }
    }

    /// Create a ClipboardUnsupported error
    pub fn clipboard_unsupported(payload: impl Into<String>) -> Self {
        ShareError::ClipboardUnsupported {
            payload: payload.into(),
        }
    }

    /// Create a SaveFailure error
    pub fn save_failure(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ShareError::SaveFailure {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ShareError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ShareError::EncodingFailure { .. } => "ENCODING_FAILURE",
            ShareError::ClipboardWriteFailure { .. } => "CLIPBOARD_WRITE_FAILURE",
            ShareError::ClipboardUnsupported { .. } => "CLIPBOARD_UNSUPPORTED",
            ShareError::SaveFailure { .. } => "SAVE_FAILURE",
            ShareError::InvalidConfig { .. } => "INVALID_CONFIG",
        }
    }

    /// Build the error notification shown for this failure.
    ///
    /// `summary` is the user-facing sentence ("Failed to copy QR code.");
    /// the underlying cause is appended so it is not lost.
    pub fn notice(&self, summary: &str) -> Notice {
        Notice::new("Error", format!("{} ({})", summary, self), Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = ShareError::save_failure("/tmp/qrcode.png", "permission denied");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"SaveFailure\""));
        let roundtrip: ShareError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ShareError::encoding_failure("x").error_code(), "ENCODING_FAILURE");
        assert_eq!(ShareError::clipboard_write("x").error_code(), "CLIPBOARD_WRITE_FAILURE");
        assert_eq!(ShareError::clipboard_unsupported("image").error_code(), "CLIPBOARD_UNSUPPORTED");
        assert_eq!(ShareError::invalid_config("title", "empty").error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_notice_carries_cause() {
        let notice = ShareError::clipboard_unsupported("image").notice("Failed to copy QR code.");
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.title, "Error");
        assert!(notice.description.starts_with("Failed to copy QR code."));
        assert!(notice.description.contains("image"));
    }
}
