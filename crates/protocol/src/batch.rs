//! Batch request/response shapes - the unit of one flush round trip.
//!
//! A flush serializes the session's state into one [`BatchRequest`]:
//!
//! ```json
//! {
//!   "objects": [
//!     { "id": 1, "path": { "kind": "navigate", "from": 0, "step": { "step": "body" } } }
//!   ],
//!   "operations": [
//!     { "index": 0, "target": 1, "operation": { "op": "insertParagraph", "text": "...", "location": "Start" } }
//!   ]
//! }
//! ```
//!
//! Declarations appear in creation order and operations in queue order; the
//! host resolves paths lazily while executing operations strictly in order.

use crate::operation::{Operation, Property};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client-assigned identifier for a declared object. Stable for the
/// lifetime of the session that assigned it.
pub type ObjectId = u32;

/// The root document always has id 0 and needs no declaration beyond
/// [`ObjectPath::Document`].
pub const ROOT_OBJECT: ObjectId = 0;

/// One navigation step from a parent object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum NavStep {
    /// The document body.
    Body,
    /// The current user selection, as a range.
    Selection,
    /// First paragraph of the target's paragraph collection.
    FirstParagraph,
    /// Last paragraph of the target's paragraph collection.
    LastParagraph,
    /// The paragraph immediately following the target paragraph.
    NextParagraph,
    /// Paragraph at a zero-based index in the target's collection.
    ParagraphAt { index: u32 },
    /// The character formatting object of the target paragraph.
    Font,
}

/// How the host reaches the object behind a declaration.
///
/// Paths are descriptions, not live references: nothing is resolved until
/// the host executes the batch containing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ObjectPath {
    /// The root document handle.
    Document,
    /// One navigation step from a previously declared object.
    Navigate { from: ObjectId, step: NavStep },
    /// The object produced by the operation whose session-global statement
    /// index is `operation`. Indices are never reused, so a path from an
    /// earlier batch can never alias an operation of the current one; it
    /// simply fails to resolve.
    OperationResult { operation: u32 },
}

/// A declared object: id plus its immutable navigational description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDecl {
    pub id: ObjectId,
    pub path: ObjectPath,
}

/// One queued operation against a declared object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    /// Session-global statement index: assigned when the operation is
    /// queued and never reused, including across flushes.
    pub index: u32,
    pub target: ObjectId,
    pub operation: Operation,
}

/// Everything one flush sends to the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Object declarations, in creation order. Only declarations reachable
    /// from `operations` are included.
    pub objects: Vec<ObjectDecl>,
    /// Operations to execute, in queue order.
    pub operations: Vec<OperationRecord>,
}

impl BatchRequest {
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// A property value the host resolved for a queued `load`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedValue {
    pub target: ObjectId,
    pub property: Property,
    pub value: Value,
}

/// Successful result of one executed batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    /// One entry per `load` operation in the batch, in operation order.
    #[serde(default)]
    pub loaded: Vec<LoadedValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::InsertLocation;

    #[test]
    fn object_path_tags_distinguish_variants() {
        let document = serde_json::to_value(ObjectPath::Document).unwrap();
        assert_eq!(document["kind"], "document");

        let navigate = serde_json::to_value(ObjectPath::Navigate {
            from: ROOT_OBJECT,
            step: NavStep::Selection,
        })
        .unwrap();
        assert_eq!(navigate["kind"], "navigate");
        assert_eq!(navigate["from"], 0);
        assert_eq!(navigate["step"]["step"], "selection");

        let result = serde_json::to_value(ObjectPath::OperationResult { operation: 2 }).unwrap();
        assert_eq!(result["kind"], "operationResult");
        assert_eq!(result["operation"], 2);
    }

    #[test]
    fn paragraph_at_carries_its_index() {
        let step = serde_json::to_value(NavStep::ParagraphAt { index: 3 }).unwrap();
        assert_eq!(step["step"], "paragraphAt");
        assert_eq!(step["index"], 3);
    }

    #[test]
    fn batch_request_round_trips() {
        let batch = BatchRequest {
            objects: vec![
                ObjectDecl {
                    id: 0,
                    path: ObjectPath::Document,
                },
                ObjectDecl {
                    id: 1,
                    path: ObjectPath::Navigate {
                        from: 0,
                        step: NavStep::Body,
                    },
                },
            ],
            operations: vec![OperationRecord {
                index: 0,
                target: 1,
                operation: Operation::InsertParagraph {
                    text: "hello".to_string(),
                    location: InsertLocation::Start,
                },
            }],
        };

        let json = serde_json::to_string(&batch).unwrap();
        let back: BatchRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, batch);
        assert!(!batch.is_empty());
        assert!(BatchRequest::default().is_empty());
    }

    #[test]
    fn empty_response_deserializes_without_loaded_field() {
        let response: BatchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.loaded.is_empty());
    }
}
