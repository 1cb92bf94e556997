//! In-process host emulator.
//!
//! Implements the batch protocol against an in-memory document, so demos
//! and semantic tests can observe real document state without the
//! external host application. Wire semantics follow the protocol crate:
//! lazy path resolution, strict statement order, one structured error
//! per failed batch, no rollback of statements that already ran.

mod document;
mod execute;

pub use document::{
    BlockSnapshot, DocumentSnapshot, FontSnapshot, ParagraphSnapshot, PictureSnapshot,
    SelectionSnapshot, TableSnapshot,
};

use crate::transport::{HostTransport, TransportError};
use document::DocumentState;
use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, warn};
use wordpane_protocol::{ApiSet, ApiVersion, BatchRequest, BatchResponse, HostDescriptor};

/// Requirement set the emulator advertises.
pub const EMULATOR_API_SET: &str = "WordApi";

/// Highest version the emulator implements.
pub const EMULATOR_API_VERSION: ApiVersion = ApiVersion::new(1, 3);

/// Builder for an [`EmulatorHost`] seeded with document content.
pub struct EmulatorHostBuilder {
    paragraphs: Vec<String>,
    select: Option<String>,
    max_api: ApiVersion,
}

impl EmulatorHostBuilder {
    pub fn new() -> Self {
        Self {
            paragraphs: Vec::new(),
            select: None,
            max_api: EMULATOR_API_VERSION,
        }
    }

    /// Appends a seed paragraph.
    pub fn paragraph(mut self, text: &str) -> Self {
        self.paragraphs.push(text.to_string());
        self
    }

    /// Places the selection over the first occurrence of `needle`. When
    /// the text is absent the selection stays collapsed at the document
    /// start and a warning is logged at build time.
    pub fn select(mut self, needle: &str) -> Self {
        self.select = Some(needle.to_string());
        self
    }

    /// Caps the advertised `WordApi` version, for exercising capability
    /// probes against an older host.
    pub fn max_api(mut self, version: ApiVersion) -> Self {
        self.max_api = version;
        self
    }

    pub fn build(self) -> Arc<EmulatorHost> {
        let mut state = DocumentState::new(self.paragraphs);
        if let Some(needle) = self.select {
            if !state.select_first(&needle) {
                warn!(
                    needle,
                    "selection text not found; selection stays at the document start"
                );
            }
        }
        Arc::new(EmulatorHost {
            state: Mutex::new(state),
            descriptor: HostDescriptor {
                application: "Word (emulator)".to_string(),
                api_sets: vec![ApiSet {
                    name: EMULATOR_API_SET.to_string(),
                    version: self.max_api,
                }],
            },
        })
    }
}

impl Default for EmulatorHostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// An in-memory host document speaking the batch protocol.
pub struct EmulatorHost {
    state: Mutex<DocumentState>,
    descriptor: HostDescriptor,
}

impl EmulatorHost {
    pub fn builder() -> EmulatorHostBuilder {
        EmulatorHostBuilder::new()
    }

    /// Point-in-time copy of the document, for rendering and assertions.
    pub fn snapshot(&self) -> DocumentSnapshot {
        self.state.lock().snapshot()
    }

    /// The body text, paragraphs joined by newlines. Tables and pictures
    /// do not appear here.
    pub fn body_text(&self) -> String {
        self.state.lock().body_text()
    }
}

impl HostTransport for EmulatorHost {
    fn execute(
        &self,
        batch: BatchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<BatchResponse, TransportError>> + Send + '_>> {
        Box::pin(async move {
            let mut state = self.state.lock();
            debug!(
                operations = batch.operations.len(),
                objects = batch.objects.len(),
                "executing batch"
            );
            match execute::run(&mut state, &batch) {
                Ok(response) => Ok(response),
                Err(payload) => {
                    debug!(code = payload.code(), "batch rejected");
                    Err(TransportError::Host(payload))
                }
            }
        })
    }

    fn descriptor(&self) -> HostDescriptor {
        self.descriptor.clone()
    }
}
