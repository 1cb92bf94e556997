use super::{InlinePicture, Paragraph, ProxyInner};
use wordpane_protocol::{InsertLocation, NavStep, Operation};

/// Proxy for the main text body of the document.
#[derive(Clone, Debug)]
pub struct Body {
    inner: ProxyInner,
}

impl Body {
    pub(crate) fn new(inner: ProxyInner) -> Body {
        Body { inner }
    }

    /// The body's paragraph collection.
    pub fn paragraphs(&self) -> ParagraphCollection {
        ParagraphCollection {
            inner: self.inner.clone(),
        }
    }

    /// Queues a paragraph insertion. The host accepts `Start` and `End`
    /// for a body target; other locations fail the flush with
    /// `InvalidArgument`.
    pub fn insert_paragraph(&self, text: &str, location: InsertLocation) -> Paragraph {
        let index = self.inner.queue(Operation::InsertParagraph {
            text: text.to_string(),
            location,
        });
        Paragraph::new(self.inner.result_of(index))
    }

    /// Queues an inline picture insertion from a base64-encoded payload.
    pub fn insert_inline_picture_from_base64(
        &self,
        base64: &str,
        location: InsertLocation,
    ) -> InlinePicture {
        let index = self.inner.queue(Operation::InsertInlinePicture {
            base64: base64.to_string(),
            location,
        });
        InlinePicture::new(self.inner.result_of(index))
    }
}

/// Lazy handle to the paragraphs of a body. Individual paragraphs are
/// reached by position; out-of-range positions resolve to `ItemNotFound`
/// when the batch executes.
#[derive(Clone, Debug)]
pub struct ParagraphCollection {
    inner: ProxyInner,
}

impl ParagraphCollection {
    /// The first paragraph.
    pub fn first(&self) -> Paragraph {
        Paragraph::new(self.inner.navigate(NavStep::FirstParagraph))
    }

    /// The last paragraph.
    pub fn last(&self) -> Paragraph {
        Paragraph::new(self.inner.navigate(NavStep::LastParagraph))
    }

    /// The paragraph at a zero-based position.
    pub fn at(&self, index: u32) -> Paragraph {
        Paragraph::new(self.inner.navigate(NavStep::ParagraphAt { index }))
    }
}
