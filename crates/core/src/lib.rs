//! Batched command sessions against a host word-processor document.
//!
//! The crate revolves around one round-trip discipline: proxy objects
//! describe document locations without touching the host, mutating calls
//! queue operations into a [`Session`], and a single [`Session::flush`]
//! executes everything queued so far on the host in order. Host-reported
//! failures surface as one structured [`Error`] per flush.
//!
//! ```ignore
//! let session = Session::acquire(host);
//! let body = session.document().body();
//! body.insert_paragraph("Hello from the add-in.", InsertLocation::Start);
//! session.flush().await?;
//! ```

pub mod document;
pub mod emulator;
pub mod error;
pub mod fake_transport;
pub mod session;
pub mod transport;

/// Wire types for the batch protocol.
pub use wordpane_protocol as protocol;

/// Requirement set covering everything this client queues.
pub const WORD_API_SET: &str = "WordApi";

/// Version of [`WORD_API_SET`] the client was written against.
pub const WORD_API_VERSION: protocol::ApiVersion = protocol::ApiVersion::new(1, 3);

pub use document::{Body, Document, Font, InlinePicture, Paragraph, ParagraphCollection, Range, Table};
pub use emulator::{DocumentSnapshot, EmulatorHost, EmulatorHostBuilder};
pub use error::{Error, Result};
pub use fake_transport::{FakeTransport, FakeTransportBuilder, FakeTransportController};
pub use session::Session;
pub use transport::{HostTransport, TransportError};
