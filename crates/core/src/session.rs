//! Batched command sessions.
//!
//! A [`Session`] is one logical connection to a host document: proxies queue
//! operations into it, [`Session::flush`] executes everything queued so far
//! in a single host round trip, and disposal guarantees no pending state
//! leaks into the next session.
//!
//! # Message Flow
//!
//! 1. Handler acquires a session (purely local, no round trip)
//! 2. Proxy methods declare object paths and queue operation records
//! 3. `flush` serializes declarations + operations into one [`BatchRequest`]
//! 4. The host resolves paths lazily and executes operations in queue order
//! 5. On success, loaded property values populate and the queue clears
//! 6. On failure, the structured host error surfaces and the queue is kept
//!
//! Sessions are not `Clone`: a flush borrows the session for its whole
//! round trip, so disposal cannot race an in-flight flush.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::transport::{HostTransport, TransportError};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use wordpane_protocol::{
    ApiVersion, BatchRequest, HostDescriptor, ObjectDecl, ObjectId, ObjectPath, Operation,
    OperationRecord, Property, ROOT_OBJECT,
};

/// Shared state behind every proxy of one session.
///
/// The mutex is only ever held for local bookkeeping, never across the
/// flush round trip.
pub(crate) struct SessionCore {
    transport: Arc<dyn HostTransport>,
    descriptor: HostDescriptor,
    state: Mutex<SessionState>,
}

#[derive(Default)]
struct SessionState {
    /// Declaration per object id, in creation order; `objects[id]` is the
    /// declaration of object `id`. Paths are immutable once pushed.
    objects: Vec<ObjectDecl>,
    /// Operations waiting for the next flush, in queue order.
    queue: Vec<OperationRecord>,
    /// Values returned by successful flushes, keyed by target and property.
    loaded: HashMap<(ObjectId, Property), Value>,
    /// Session-global statement counter; never reset, including on flush.
    next_index: u32,
    flush_in_progress: bool,
    disposed: bool,
}

impl SessionCore {
    /// Declares a new object path and returns its id. Purely local.
    pub(crate) fn declare(&self, path: ObjectPath) -> ObjectId {
        let mut state = self.state.lock();
        let id = state.objects.len() as ObjectId;
        if state.disposed {
            warn!(?path, "object declared on a disposed session; ignoring");
            return id;
        }
        state.objects.push(ObjectDecl { id, path });
        id
    }

    /// Appends an operation to the queue and returns its statement index.
    /// O(1) and infallible for a live session.
    pub(crate) fn queue(&self, target: ObjectId, operation: Operation) -> u32 {
        let mut state = self.state.lock();
        if state.disposed {
            warn!(
                op = operation.name(),
                "operation queued on a disposed session; ignoring"
            );
            return state.next_index;
        }
        let index = state.next_index;
        state.next_index += 1;
        debug!(
            index,
            target_object = target,
            op = operation.name(),
            "queued operation"
        );
        state.queue.push(OperationRecord {
            index,
            target,
            operation,
        });
        index
    }

    /// Reads a property value a successful flush stored for `target`.
    pub(crate) fn loaded_value(&self, target: ObjectId, property: Property) -> Result<Value> {
        self.state
            .lock()
            .loaded
            .get(&(target, property))
            .cloned()
            .ok_or(Error::PropertyNotLoaded { property })
    }

    fn release(&self) {
        let mut state = self.state.lock();
        if state.disposed {
            return;
        }
        state.disposed = true;
        let dropped = state.queue.len();
        state.queue.clear();
        state.loaded.clear();
        if dropped > 0 {
            debug!(dropped, "session disposed with operations still pending");
        } else {
            debug!("session disposed");
        }
    }
}

/// One logical connection to a host document.
///
/// Created per top-level handler and disposed when the handler finishes,
/// on every exit path: dropping the session is disposal, so early returns
/// and failed flushes cannot leak queued operations into later sessions.
pub struct Session {
    core: Arc<SessionCore>,
}

impl Session {
    /// Acquires a session against `transport`.
    ///
    /// Purely local: the empty queue and the root document proxy are
    /// created without a host round trip.
    pub fn acquire(transport: Arc<dyn HostTransport>) -> Session {
        let descriptor = transport.descriptor();
        let core = Arc::new(SessionCore {
            transport,
            descriptor,
            state: Mutex::new(SessionState::default()),
        });
        core.state.lock().objects.push(ObjectDecl {
            id: ROOT_OBJECT,
            path: ObjectPath::Document,
        });
        debug!(
            application = %core.descriptor.application,
            "session acquired"
        );
        Session { core }
    }

    /// The root document proxy.
    pub fn document(&self) -> Document {
        Document::new(Arc::clone(&self.core))
    }

    /// Whether the host supports requirement set `set` at `version` or
    /// newer. Local check against the transport's descriptor.
    pub fn is_set_supported(&self, set: &str, version: ApiVersion) -> bool {
        self.core.descriptor.is_set_supported(set, version)
    }

    /// Like [`Session::is_set_supported`] but as an error value, for
    /// handlers that log the probe result. The session stays usable either
    /// way; continuing against an unsupported surface is the caller's risk.
    pub fn check_requirement(&self, set: &str, version: ApiVersion) -> Result<()> {
        if self.is_set_supported(set, version) {
            Ok(())
        } else {
            Err(Error::ApiUnsupported {
                set: set.to_string(),
                version,
            })
        }
    }

    /// Number of operations waiting for the next flush.
    pub fn pending_operations(&self) -> usize {
        self.core.state.lock().queue.len()
    }

    /// Executes everything queued so far in one host round trip.
    ///
    /// On success, all requested property loads become readable and the
    /// queue clears. On failure, the queue is left intact (only a
    /// successful flush or disposal clears it) and no queued operation may
    /// be assumed applied; flushing again resends the same batch.
    ///
    /// This is the session's only suspension point. A second flush started
    /// before the first resolves fails with [`Error::FlushInProgress`].
    pub async fn flush(&self) -> Result<()> {
        let batch = {
            let mut state = self.core.state.lock();
            if state.disposed {
                return Err(Error::SessionDisposed);
            }
            if state.flush_in_progress {
                return Err(Error::FlushInProgress);
            }
            state.flush_in_progress = true;
            build_batch(&state)
        };

        debug!(
            operations = batch.operations.len(),
            objects = batch.objects.len(),
            "flushing batch"
        );

        // The state lock is not held across the round trip.
        let outcome = self.core.transport.execute(batch).await;

        let mut state = self.core.state.lock();
        state.flush_in_progress = false;
        match outcome {
            Ok(response) => {
                for loaded in response.loaded {
                    state
                        .loaded
                        .insert((loaded.target, loaded.property), loaded.value);
                }
                state.queue.clear();
                debug!("flush succeeded");
                Ok(())
            }
            Err(TransportError::Host(payload)) => {
                debug!(code = payload.code(), "host rejected batch");
                Err(Error::from_host(payload))
            }
            Err(TransportError::Connection(message)) => Err(Error::HostCommunication {
                message,
                debug: None,
            }),
        }
    }

    /// Releases the session, discarding any still-pending operations and
    /// loaded values. Dropping the session has the same effect; this form
    /// exists for handlers that want the release visible in the flow.
    pub fn dispose(self) {
        self.core.release();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.core.release();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.core.state.lock();
        f.debug_struct("Session")
            .field("objects", &state.objects.len())
            .field("pending", &state.queue.len())
            .field("disposed", &state.disposed)
            .finish()
    }
}

/// Serializes the session state into one batch: operations in queue order,
/// plus every declaration reachable from them in creation order.
fn build_batch(state: &SessionState) -> BatchRequest {
    // Operations reference objects and objects reference parents, so walk
    // each target's parent chain. Ids index `objects` by construction.
    let mut needed = vec![false; state.objects.len()];
    for record in &state.queue {
        let mut id = record.target;
        loop {
            let slot = &mut needed[id as usize];
            if *slot {
                break;
            }
            *slot = true;
            match state.objects[id as usize].path {
                ObjectPath::Navigate { from, .. } => id = from,
                ObjectPath::Document | ObjectPath::OperationResult { .. } => break,
            }
        }
    }

    let objects = state
        .objects
        .iter()
        .filter(|decl| needed[decl.id as usize])
        .copied()
        .collect();
    BatchRequest {
        objects,
        operations: state.queue.clone(),
    }
}
