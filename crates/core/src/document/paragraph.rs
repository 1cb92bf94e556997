use super::{Font, ProxyInner, Range, Table};
use crate::error::{Error, Result};
use wordpane_protocol::{BuiltInStyle, InsertLocation, NavStep, Operation, Property};

/// Proxy for a single paragraph.
#[derive(Clone, Debug)]
pub struct Paragraph {
    inner: ProxyInner,
}

impl Paragraph {
    pub(crate) fn new(inner: ProxyInner) -> Paragraph {
        Paragraph { inner }
    }

    /// The paragraph immediately after this one. Navigating past the last
    /// paragraph fails the flush with `ItemNotFound`.
    pub fn next(&self) -> Paragraph {
        Paragraph::new(self.inner.navigate(NavStep::NextParagraph))
    }

    /// The paragraph's character formatting.
    pub fn font(&self) -> Font {
        Font::new(self.inner.navigate(NavStep::Font))
    }

    /// Queues a sibling paragraph insertion. The host accepts `Before` and
    /// `After` for a paragraph target.
    pub fn insert_paragraph(&self, text: &str, location: InsertLocation) -> Paragraph {
        let index = self.inner.queue(Operation::InsertParagraph {
            text: text.to_string(),
            location,
        });
        Paragraph::new(self.inner.result_of(index))
    }

    /// Queues an HTML insertion at the end of the paragraph, returning the
    /// range covering the inserted content. The host accepts `End` here.
    pub fn insert_html(&self, html: &str, location: InsertLocation) -> Range {
        let index = self.inner.queue(Operation::InsertHtml {
            html: html.to_string(),
            location,
        });
        Range::new(self.inner.result_of(index))
    }

    /// Queues a table insertion next to this paragraph. `values` is row
    /// major; the host pads missing cells with blanks and rejects values
    /// larger than `rows` by `columns` with `InvalidArgument`.
    pub fn insert_table(
        &self,
        rows: u32,
        columns: u32,
        location: InsertLocation,
        values: Vec<Vec<String>>,
    ) -> Table {
        let index = self.inner.queue(Operation::InsertTable {
            rows,
            columns,
            location,
            values,
        });
        Table::new(self.inner.result_of(index))
    }

    /// Queues a built-in style assignment.
    pub fn set_style_built_in(&self, style: BuiltInStyle) {
        self.inner.queue(Operation::SetStyleBuiltIn { style });
    }

    /// Queues a property load, readable after the next successful flush.
    pub fn load(&self, property: Property) {
        self.inner.queue(Operation::Load { property });
    }

    /// The paragraph text from the last successful flush that loaded it.
    pub fn text(&self) -> Result<String> {
        self.inner.loaded_string(Property::Text)
    }

    /// The paragraph style from the last successful flush that loaded it.
    pub fn style_built_in(&self) -> Result<BuiltInStyle> {
        let raw = self.inner.loaded_string(Property::StyleBuiltIn)?;
        raw.parse().map_err(|_| Error::PropertyType {
            property: Property::StyleBuiltIn,
            expected: "a built-in style name",
        })
    }
}
