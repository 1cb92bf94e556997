//! Operation records: the mutations and property-loads a batch can carry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where inserted content lands relative to the target object.
///
/// The location also decides whether the target range's extent grows to
/// include the new content:
///
/// * `Before` / `After` place the content as a sibling outside the target's
///   extent; a subsequent `text` load of the target is unchanged.
/// * `Start` / `End` place the content inside the target and extend its
///   extent to include it.
/// * `Replace` substitutes the target's content entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertLocation {
    Before,
    Start,
    End,
    After,
    Replace,
}

impl InsertLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsertLocation::Before => "Before",
            InsertLocation::Start => "Start",
            InsertLocation::End => "End",
            InsertLocation::After => "After",
            InsertLocation::Replace => "Replace",
        }
    }
}

impl fmt::Display for InsertLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in paragraph styles understood by the host.
///
/// Serialized by name (`"IntenseReference"`), matching the host's style
/// identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuiltInStyle {
    Normal,
    Title,
    Heading1,
    Heading2,
    Heading3,
    Quote,
    IntenseQuote,
    Emphasis,
    IntenseEmphasis,
    Strong,
    IntenseReference,
    ListParagraph,
}

impl BuiltInStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltInStyle::Normal => "Normal",
            BuiltInStyle::Title => "Title",
            BuiltInStyle::Heading1 => "Heading1",
            BuiltInStyle::Heading2 => "Heading2",
            BuiltInStyle::Heading3 => "Heading3",
            BuiltInStyle::Quote => "Quote",
            BuiltInStyle::IntenseQuote => "IntenseQuote",
            BuiltInStyle::Emphasis => "Emphasis",
            BuiltInStyle::IntenseEmphasis => "IntenseEmphasis",
            BuiltInStyle::Strong => "Strong",
            BuiltInStyle::IntenseReference => "IntenseReference",
            BuiltInStyle::ListParagraph => "ListParagraph",
        }
    }
}

impl fmt::Display for BuiltInStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a style name, accepting `IntenseReference`, `intenseReference`,
/// or `intense-reference` spellings.
impl FromStr for BuiltInStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let style = match normalized.as_str() {
            "normal" => BuiltInStyle::Normal,
            "title" => BuiltInStyle::Title,
            "heading1" => BuiltInStyle::Heading1,
            "heading2" => BuiltInStyle::Heading2,
            "heading3" => BuiltInStyle::Heading3,
            "quote" => BuiltInStyle::Quote,
            "intensequote" => BuiltInStyle::IntenseQuote,
            "emphasis" => BuiltInStyle::Emphasis,
            "intenseemphasis" => BuiltInStyle::IntenseEmphasis,
            "strong" => BuiltInStyle::Strong,
            "intensereference" => BuiltInStyle::IntenseReference,
            "listparagraph" => BuiltInStyle::ListParagraph,
            _ => return Err(UnknownStyle(s.to_string())),
        };
        Ok(style)
    }
}

/// Error returned when a style name does not match any built-in style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStyle(pub String);

impl fmt::Display for UnknownStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown built-in style: {}", self.0)
    }
}

impl std::error::Error for UnknownStyle {}

/// A partial update to character formatting. `None` fields are left
/// untouched by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    /// Hex color such as `#FF0000`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl FontUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.size.is_none()
            && self.color.is_none()
    }
}

/// A property a `load` operation can mark for retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    /// Plain text of a range or paragraph.
    Text,
    /// Built-in style of a paragraph.
    StyleBuiltIn,
    /// Font family name.
    Name,
    Bold,
    Italic,
    /// Font size in points.
    Size,
    Color,
    /// Cell values of a table.
    Values,
    /// Width of an inline picture, in points.
    Width,
    /// Height of an inline picture, in points.
    Height,
}

impl Property {
    pub fn as_str(&self) -> &'static str {
        match self {
            Property::Text => "text",
            Property::StyleBuiltIn => "styleBuiltIn",
            Property::Name => "name",
            Property::Bold => "bold",
            Property::Italic => "italic",
            Property::Size => "size",
            Property::Color => "color",
            Property::Values => "values",
            Property::Width => "width",
            Property::Height => "height",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One queued mutation or property-load.
///
/// The `op` tag and camelCase field names match the host's method names, so
/// a serialized record reads like the call it stands for:
///
/// ```json
/// { "op": "insertText", "text": "many", "location": "Replace" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Operation {
    InsertText {
        text: String,
        location: InsertLocation,
    },
    InsertParagraph {
        text: String,
        location: InsertLocation,
    },
    InsertHtml {
        html: String,
        location: InsertLocation,
    },
    InsertTable {
        rows: u32,
        columns: u32,
        location: InsertLocation,
        values: Vec<Vec<String>>,
    },
    InsertInlinePicture {
        base64: String,
        location: InsertLocation,
    },
    SetStyleBuiltIn {
        style: BuiltInStyle,
    },
    SetFont {
        update: FontUpdate,
    },
    Load {
        property: Property,
    },
}

impl Operation {
    /// The host method name, as used in debug-info error locations.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::InsertText { .. } => "insertText",
            Operation::InsertParagraph { .. } => "insertParagraph",
            Operation::InsertHtml { .. } => "insertHtml",
            Operation::InsertTable { .. } => "insertTable",
            Operation::InsertInlinePicture { .. } => "insertInlinePicture",
            Operation::SetStyleBuiltIn { .. } => "setStyleBuiltIn",
            Operation::SetFont { .. } => "setFont",
            Operation::Load { .. } => "load",
        }
    }
}
