use super::ProxyInner;
use crate::error::Result;
use wordpane_protocol::{Operation, Property};

/// Proxy for an inline picture anchored to a paragraph.
#[derive(Clone, Debug)]
pub struct InlinePicture {
    inner: ProxyInner,
}

impl InlinePicture {
    pub(crate) fn new(inner: ProxyInner) -> InlinePicture {
        InlinePicture { inner }
    }

    /// Queues a property load, readable after the next successful flush.
    pub fn load(&self, property: Property) {
        self.inner.queue(Operation::Load { property });
    }

    /// Display width in points.
    pub fn width(&self) -> Result<f32> {
        self.inner.loaded_f32(Property::Width)
    }

    /// Display height in points.
    pub fn height(&self) -> Result<f32> {
        self.inner.loaded_f32(Property::Height)
    }
}
