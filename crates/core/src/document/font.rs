use super::ProxyInner;
use crate::error::Result;
use wordpane_protocol::{FontUpdate, Operation, Property};

/// Proxy for the character formatting of a paragraph.
#[derive(Clone, Debug)]
pub struct Font {
    inner: ProxyInner,
}

impl Font {
    pub(crate) fn new(inner: ProxyInner) -> Font {
        Font { inner }
    }

    /// Queues a formatting update. Only the fields set on `update` change;
    /// the rest keep their current values.
    pub fn set(&self, update: FontUpdate) {
        self.inner.queue(Operation::SetFont { update });
    }

    /// Queues a property load, readable after the next successful flush.
    pub fn load(&self, property: Property) {
        self.inner.queue(Operation::Load { property });
    }

    pub fn name(&self) -> Result<String> {
        self.inner.loaded_string(Property::Name)
    }

    pub fn bold(&self) -> Result<bool> {
        self.inner.loaded_bool(Property::Bold)
    }

    pub fn italic(&self) -> Result<bool> {
        self.inner.loaded_bool(Property::Italic)
    }

    pub fn size(&self) -> Result<f32> {
        self.inner.loaded_f32(Property::Size)
    }

    /// The font color as a `#rrggbb` string.
    pub fn color(&self) -> Result<String> {
        self.inner.loaded_string(Property::Color)
    }
}
