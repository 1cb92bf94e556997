use super::ProxyInner;
use crate::error::{Error, Result};
use wordpane_protocol::{Operation, Property};

/// Proxy for a table inserted next to a paragraph.
#[derive(Clone, Debug)]
pub struct Table {
    inner: ProxyInner,
}

impl Table {
    pub(crate) fn new(inner: ProxyInner) -> Table {
        Table { inner }
    }

    /// Queues a property load, readable after the next successful flush.
    pub fn load(&self, property: Property) {
        self.inner.queue(Operation::Load { property });
    }

    /// The cell values, row major, from the last successful flush that
    /// loaded them.
    pub fn values(&self) -> Result<Vec<Vec<String>>> {
        let raw = self.inner.loaded(Property::Values)?;
        serde_json::from_value(raw).map_err(|_| Error::PropertyType {
            property: Property::Values,
            expected: "rows of strings",
        })
    }
}
