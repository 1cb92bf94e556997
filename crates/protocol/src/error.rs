//! Host-reported failure payloads.
//!
//! A failed batch yields exactly one [`HostErrorPayload`]:
//!
//! ```json
//! {
//!   "message": "The item was not found.",
//!   "debugInfo": {
//!     "code": "ItemNotFound",
//!     "message": "The item was not found.",
//!     "errorLocation": "Paragraph.getNext",
//!     "statement": 1
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Error codes the host reports. The `code` field is free-form on the wire;
/// these constants cover the codes this client inspects.
pub mod codes {
    /// A navigation step found nothing, for example `getNext` past the last
    /// paragraph.
    pub const ITEM_NOT_FOUND: &str = "ItemNotFound";
    /// An object path could not be resolved, including operation results
    /// referenced from a later batch.
    pub const INVALID_OBJECT_PATH: &str = "InvalidObjectPath";
    /// An argument was rejected: unsupported insert location, malformed
    /// base64, mismatched table values.
    pub const INVALID_ARGUMENT: &str = "InvalidArgument";
    /// The operation exists but is not implemented for this object kind.
    pub const NOT_IMPLEMENTED: &str = "NotImplemented";
    /// Any other host-side failure.
    pub const GENERAL_EXCEPTION: &str = "GeneralException";
}

/// Diagnostic payload attached to a host failure. Opaque to the client
/// beyond logging; `statement` indexes the failing operation within the
/// batch that was executing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<u32>,
}

/// The single structured error a failed batch yields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostErrorPayload {
    /// Human-readable failure summary.
    pub message: String,
    /// Structured diagnostic data, carried verbatim into client logs.
    pub debug_info: DebugInfo,
}

impl HostErrorPayload {
    /// Builds a payload whose top-level message mirrors the debug message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: message.clone(),
            debug_info: DebugInfo {
                code: code.into(),
                message,
                error_location: None,
                statement: None,
            },
        }
    }

    /// Attaches the failing call site and statement index.
    pub fn at(mut self, location: impl Into<String>, statement: u32) -> Self {
        self.debug_info.error_location = Some(location.into());
        self.debug_info.statement = Some(statement);
        self
    }

    pub fn code(&self) -> &str {
        &self.debug_info.code
    }
}
