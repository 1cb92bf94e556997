//! Typed proxy objects for the host document model.
//!
//! Every type here is a lazy handle: constructing one records a
//! navigational description in the session and performs no host work.
//! Mutating methods queue operations; nothing reaches the host until
//! [`Session::flush`](crate::session::Session::flush). Methods that
//! produce a new object (the `insert_*` family) hand back a proxy whose
//! path is the operation's result, usable as a target for further
//! operations within the same batch.

mod body;
mod font;
mod paragraph;
mod picture;
mod range;
mod table;

pub use body::{Body, ParagraphCollection};
pub use font::Font;
pub use paragraph::Paragraph;
pub use picture::InlinePicture;
pub use range::Range;
pub use table::Table;

use crate::error::{Error, Result};
use crate::session::SessionCore;
use serde_json::Value;
use std::sync::Arc;
use wordpane_protocol::{NavStep, ObjectId, ObjectPath, Operation, Property, ROOT_OBJECT};

/// Shared plumbing behind every proxy type: the owning session plus the
/// proxy's declared object id.
#[derive(Clone)]
pub(crate) struct ProxyInner {
    core: Arc<SessionCore>,
    id: ObjectId,
}

impl ProxyInner {
    fn root(core: Arc<SessionCore>) -> ProxyInner {
        ProxyInner {
            core,
            id: ROOT_OBJECT,
        }
    }

    /// Declares an object one navigation step away from this one.
    fn navigate(&self, step: NavStep) -> ProxyInner {
        let id = self.core.declare(ObjectPath::Navigate {
            from: self.id,
            step,
        });
        ProxyInner {
            core: Arc::clone(&self.core),
            id,
        }
    }

    /// Queues `operation` against this object, returning its statement index.
    fn queue(&self, operation: Operation) -> u32 {
        self.core.queue(self.id, operation)
    }

    /// Declares an object standing for the result of statement `index`.
    fn result_of(&self, index: u32) -> ProxyInner {
        let id = self.core.declare(ObjectPath::OperationResult { operation: index });
        ProxyInner {
            core: Arc::clone(&self.core),
            id,
        }
    }

    fn loaded(&self, property: Property) -> Result<Value> {
        self.core.loaded_value(self.id, property)
    }

    fn loaded_string(&self, property: Property) -> Result<String> {
        match self.loaded(property)? {
            Value::String(value) => Ok(value),
            _ => Err(Error::PropertyType {
                property,
                expected: "string",
            }),
        }
    }

    fn loaded_bool(&self, property: Property) -> Result<bool> {
        match self.loaded(property)? {
            Value::Bool(value) => Ok(value),
            _ => Err(Error::PropertyType {
                property,
                expected: "boolean",
            }),
        }
    }

    fn loaded_f32(&self, property: Property) -> Result<f32> {
        match self.loaded(property)? {
            Value::Number(value) => value.as_f64().map(|v| v as f32).ok_or(Error::PropertyType {
                property,
                expected: "number",
            }),
            _ => Err(Error::PropertyType {
                property,
                expected: "number",
            }),
        }
    }
}

impl std::fmt::Debug for ProxyInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "object#{}", self.id)
    }
}

/// The root document proxy, id 0 in every session.
#[derive(Clone, Debug)]
pub struct Document {
    inner: ProxyInner,
}

impl Document {
    pub(crate) fn new(core: Arc<SessionCore>) -> Document {
        Document {
            inner: ProxyInner::root(core),
        }
    }

    /// The document body.
    pub fn body(&self) -> Body {
        Body::new(self.inner.navigate(NavStep::Body))
    }

    /// The current user selection, as a range. If nothing is selected the
    /// host treats the insertion point as an empty range.
    pub fn get_selection(&self) -> Range {
        Range::new(self.inner.navigate(NavStep::Selection))
    }
}
