use super::ProxyInner;
use crate::error::Result;
use wordpane_protocol::{InsertLocation, Operation, Property};

/// Proxy for a contiguous range of text, including the user selection.
///
/// A range tracks its extent across edits: text inserted at `Start` or
/// `End` grows the range, `Before` and `After` leave its extent unchanged,
/// and `Replace` substitutes its content.
#[derive(Clone, Debug)]
pub struct Range {
    inner: ProxyInner,
}

impl Range {
    pub(crate) fn new(inner: ProxyInner) -> Range {
        Range { inner }
    }

    /// Queues a text insertion relative to this range, returning the range
    /// covering the inserted text.
    pub fn insert_text(&self, text: &str, location: InsertLocation) -> Range {
        let index = self.inner.queue(Operation::InsertText {
            text: text.to_string(),
            location,
        });
        Range::new(self.inner.result_of(index))
    }

    /// Queues a load of the range's text, readable after the next
    /// successful flush. The value reflects the range's extent at the time
    /// the load executes, after any earlier operations in the same batch.
    pub fn load_text(&self) {
        self.inner.queue(Operation::Load {
            property: Property::Text,
        });
    }

    /// The range text from the last successful flush that loaded it.
    pub fn text(&self) -> Result<String> {
        self.inner.loaded_string(Property::Text)
    }
}
