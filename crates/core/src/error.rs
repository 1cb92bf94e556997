//! Error taxonomy for session and flush failures.

use thiserror::Error;
use wordpane_protocol::{ApiVersion, DebugInfo, HostErrorPayload, Property, codes};

pub type Result<T> = std::result::Result<T, Error>;

/// Everything a session or flush can fail with.
///
/// Host-reported failures land in [`Error::Navigation`] or
/// [`Error::HostCommunication`] and carry the host's debug payload; the
/// remaining variants are produced locally without a round trip.
#[derive(Debug, Error)]
pub enum Error {
    /// A proxy's navigation could not resolve host-side, for example a
    /// next-sibling request past the last paragraph.
    #[error("navigation failed: {message}")]
    Navigation { message: String, debug: DebugInfo },

    /// The batch round trip failed: host unreachable, malformed batch, or
    /// any host rejection that is not a navigation failure.
    #[error("host communication failed: {message}")]
    HostCommunication {
        message: String,
        debug: Option<DebugInfo>,
    },

    /// The host's API version lacks a required capability. Produced by the
    /// pre-flight probe; the session stays usable and callers that keep
    /// queuing do so at their own risk.
    #[error("requirement set {set} {version} is not supported by this host")]
    ApiUnsupported { set: String, version: ApiVersion },

    /// A second flush was started before the first resolved.
    #[error("flush already in progress")]
    FlushInProgress,

    /// The session was disposed; no further flushes are possible.
    #[error("session already disposed")]
    SessionDisposed,

    /// A property was read before any successful flush that loaded it.
    #[error("property `{property}` read before a successful flush loaded it")]
    PropertyNotLoaded { property: Property },

    /// A loaded value did not have the shape the typed getter expected.
    #[error("property `{property}` holds a value that is not {expected}")]
    PropertyType {
        property: Property,
        expected: &'static str,
    },
}

impl Error {
    /// Maps a host-reported payload onto the client taxonomy.
    pub(crate) fn from_host(payload: HostErrorPayload) -> Self {
        match payload.code() {
            codes::ITEM_NOT_FOUND | codes::INVALID_OBJECT_PATH => Error::Navigation {
                message: payload.message,
                debug: payload.debug_info,
            },
            _ => Error::HostCommunication {
                message: payload.message,
                debug: Some(payload.debug_info),
            },
        }
    }

    /// Structured diagnostic data from the host, when the failure carried
    /// any. Handlers log this next to the message.
    pub fn debug_info(&self) -> Option<&DebugInfo> {
        match self {
            Error::Navigation { debug, .. } => Some(debug),
            Error::HostCommunication { debug, .. } => debug.as_ref(),
            _ => None,
        }
    }

    pub fn is_navigation(&self) -> bool {
        matches!(self, Error::Navigation { .. })
    }

    pub fn is_flush_in_progress(&self) -> bool {
        matches!(self, Error::FlushInProgress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_not_found_maps_to_navigation() {
        let payload = HostErrorPayload::new(codes::ITEM_NOT_FOUND, "The item was not found.")
            .at("Paragraph.getNext", 3);
        let error = Error::from_host(payload);
        assert!(error.is_navigation());
        let debug = error.debug_info().expect("navigation carries debug info");
        assert_eq!(debug.code, codes::ITEM_NOT_FOUND);
        assert_eq!(debug.statement, Some(3));
    }

    #[test]
    fn other_codes_map_to_host_communication() {
        for code in [
            codes::INVALID_ARGUMENT,
            codes::NOT_IMPLEMENTED,
            codes::GENERAL_EXCEPTION,
        ] {
            let error = Error::from_host(HostErrorPayload::new(code, "rejected"));
            assert!(
                matches!(error, Error::HostCommunication { .. }),
                "{code} should not map to {error:?}"
            );
        }
    }
}
