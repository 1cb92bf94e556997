//! Transport seam between a session and a host.
//!
//! A transport carries exactly one kind of traffic: whole batches, one per
//! flush. The real editing application sits behind an IPC or network
//! implementation supplied by the embedder; this crate ships two in-process
//! implementations, [`EmulatorHost`] for demos and semantic tests and
//! [`FakeTransport`] for scripted protocol-level tests.
//!
//! [`EmulatorHost`]: crate::emulator::EmulatorHost
//! [`FakeTransport`]: crate::fake_transport::FakeTransport

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use wordpane_protocol::{BatchRequest, BatchResponse, HostDescriptor, HostErrorPayload};

/// Why a batch round trip failed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The host received the batch and rejected it with a structured error.
    #[error("{}", .0.message)]
    Host(HostErrorPayload),

    /// The batch never completed: connection lost, host gone, response
    /// unparseable.
    #[error("connection to host failed: {0}")]
    Connection(String),
}

/// One host connection, shared by any number of independent sessions.
///
/// Implementations must tolerate concurrent `execute` calls; sessions
/// serialize their own flushes but distinct sessions do not coordinate.
pub trait HostTransport: Send + Sync {
    /// Executes one batch against the host document, in order, and returns
    /// either its response or the single structured failure it reported.
    fn execute(
        &self,
        batch: BatchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<BatchResponse, TransportError>> + Send + '_>>;

    /// What the connected host advertises about itself. This is local
    /// knowledge captured when the transport connected; consulting it never
    /// costs a round trip.
    fn descriptor(&self) -> HostDescriptor;
}
