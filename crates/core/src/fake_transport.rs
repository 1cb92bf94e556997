//! Fake transport for unit testing batching, ordering and error surfacing.
//!
//! Provides an in-memory [`HostTransport`] for testing the session layer
//! without a host document. Every outcome is scripted: the transport
//! records each batch it receives and answers with the next scripted
//! response, waiting if none has been queued yet.
//!
//! For tests that need a host actually applying operations to observable
//! document state, use [`EmulatorHost`](crate::emulator::EmulatorHost)
//! instead.
//!
//! # Example
//!
//! ```ignore
//! let (transport, controller) = FakeTransportBuilder::new().build();
//! let session = Session::acquire(transport);
//!
//! session.document().body().insert_paragraph("hi", InsertLocation::End);
//! controller.respond(BatchResponse::default());
//! session.flush().await?;
//!
//! let sent = controller.take_sent();
//! assert_eq!(sent.len(), 1);
//! ```

use crate::transport::{HostTransport, TransportError};
use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, mpsc};
use wordpane_protocol::{
    ApiSet, ApiVersion, BatchRequest, BatchResponse, HostDescriptor, HostErrorPayload,
};

type Outcome = Result<BatchResponse, TransportError>;

/// Builder for creating fake transport instances.
pub struct FakeTransportBuilder {
    descriptor: HostDescriptor,
}

impl FakeTransportBuilder {
    /// Create a new fake transport builder advertising `WordApi` 1.4.
    pub fn new() -> Self {
        Self {
            descriptor: HostDescriptor {
                application: "Word (fake)".to_string(),
                api_sets: vec![ApiSet {
                    name: "WordApi".to_string(),
                    version: ApiVersion::new(1, 4),
                }],
            },
        }
    }

    /// Replace the descriptor the transport advertises.
    pub fn with_descriptor(mut self, descriptor: HostDescriptor) -> Self {
        self.descriptor = descriptor;
        self
    }

    /// Build the fake transport and return it with a controller.
    ///
    /// The transport goes to [`Session::acquire`], the
    /// [`FakeTransportController`] stays with the test for scripting
    /// outcomes and inspecting sent batches.
    ///
    /// [`Session::acquire`]: crate::session::Session::acquire
    pub fn build(self) -> (Arc<FakeTransport>, FakeTransportController) {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let sent = Arc::new(Mutex::new(Vec::new()));

        let transport = Arc::new(FakeTransport {
            descriptor: self.descriptor,
            sent: Arc::clone(&sent),
            outcomes: AsyncMutex::new(outcome_rx),
        });
        let controller = FakeTransportController { outcome_tx, sent };

        (transport, controller)
    }
}

impl Default for FakeTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Controller for scripting outcomes and inspecting sent batches.
pub struct FakeTransportController {
    outcome_tx: mpsc::UnboundedSender<Outcome>,
    sent: Arc<Mutex<Vec<BatchRequest>>>,
}

impl FakeTransportController {
    /// Script a successful response for the next unanswered batch.
    pub fn respond(&self, response: BatchResponse) {
        let _ = self.outcome_tx.send(Ok(response));
    }

    /// Script a structured host error for the next unanswered batch.
    pub fn fail(&self, payload: HostErrorPayload) {
        let _ = self.outcome_tx.send(Err(TransportError::Host(payload)));
    }

    /// Script a connection-level failure for the next unanswered batch.
    pub fn disconnect(&self, message: &str) {
        let _ = self
            .outcome_tx
            .send(Err(TransportError::Connection(message.to_string())));
    }

    /// Take all sent batches, clearing the buffer.
    pub fn take_sent(&self) -> Vec<BatchRequest> {
        std::mem::take(&mut *self.sent.lock())
    }

    /// Number of batches received so far (since the last `take_sent`).
    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }
}

/// In-memory transport answering with scripted outcomes.
pub struct FakeTransport {
    descriptor: HostDescriptor,
    sent: Arc<Mutex<Vec<BatchRequest>>>,
    outcomes: AsyncMutex<mpsc::UnboundedReceiver<Outcome>>,
}

impl HostTransport for FakeTransport {
    fn execute(
        &self,
        batch: BatchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<BatchResponse, TransportError>> + Send + '_>> {
        Box::pin(async move {
            self.sent.lock().push(batch);
            match self.outcomes.lock().await.recv().await {
                Some(outcome) => outcome,
                None => Err(TransportError::Connection(
                    "fake transport controller dropped".to_string(),
                )),
            }
        })
    }

    fn descriptor(&self) -> HostDescriptor {
        self.descriptor.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordpane_protocol::codes;

    #[tokio::test]
    async fn records_batches_and_replays_scripted_outcomes() {
        let (transport, controller) = FakeTransportBuilder::new().build();

        controller.respond(BatchResponse::default());
        let response = transport
            .execute(BatchRequest::default())
            .await
            .expect("scripted success");
        assert!(response.loaded.is_empty());

        controller.fail(HostErrorPayload::new(codes::ITEM_NOT_FOUND, "no paragraph"));
        let error = transport
            .execute(BatchRequest::default())
            .await
            .expect_err("scripted failure");
        match error {
            TransportError::Host(payload) => assert_eq!(payload.code(), codes::ITEM_NOT_FOUND),
            other => panic!("unexpected error {other:?}"),
        }

        assert_eq!(controller.take_sent().len(), 2);
        assert_eq!(controller.sent_count(), 0);
    }

    #[tokio::test]
    async fn waits_for_an_outcome_scripted_after_the_batch_arrives() {
        let (transport, controller) = FakeTransportBuilder::new().build();

        let pending = tokio::spawn({
            let transport = Arc::clone(&transport);
            async move { transport.execute(BatchRequest::default()).await }
        });
        while controller.sent_count() == 0 {
            tokio::task::yield_now().await;
        }

        controller.respond(BatchResponse::default());
        pending
            .await
            .expect("task should finish")
            .expect("scripted success");
    }

    #[test]
    fn advertises_word_api_by_default() {
        let (transport, _controller) = FakeTransportBuilder::new().build();
        let descriptor = transport.descriptor();
        assert!(descriptor.is_set_supported("WordApi", ApiVersion::new(1, 3)));
        assert!(!descriptor.is_set_supported("ExcelApi", ApiVersion::new(1, 1)));
    }
}
