//! In-memory document model behind the emulator.
//!
//! The document is a sequence of blocks: paragraphs carrying text, style,
//! character formatting and anchored pictures, with tables as sibling
//! blocks. Range arithmetic works on byte offsets into the body text,
//! which is the paragraph texts joined by single separators; tables take
//! no offset space. Blocks keep a stable id for the lifetime of the host,
//! so navigation results stay valid while positions shift.

use serde::Serialize;
use wordpane_protocol::BuiltInStyle;

pub(crate) type BlockId = u64;

/// Half-open span of byte offsets into the body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TextSpan {
    pub start: usize,
    pub end: usize,
}

impl TextSpan {
    pub(crate) fn collapsed(at: usize) -> TextSpan {
        TextSpan { start: at, end: at }
    }

    pub(crate) fn len(&self) -> usize {
        self.end - self.start
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Boundary adjustment every live range undergoes when body text moves.
///
/// Boundaries before the edit stay, boundaries after it shift. A range
/// start sitting exactly at an insertion moves with its content; a range
/// end there stays, so a neighbor ending at the insertion point does not
/// swallow the new text. Collapsed ranges move as a unit.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Shift {
    Insert { pos: usize, len: usize },
    Delete { start: usize, len: usize },
}

impl Shift {
    pub(crate) fn apply(&self, span: TextSpan) -> TextSpan {
        match *self {
            Shift::Insert { pos, len } => {
                if span.is_empty() {
                    if span.start >= pos {
                        TextSpan {
                            start: span.start + len,
                            end: span.end + len,
                        }
                    } else {
                        span
                    }
                } else {
                    TextSpan {
                        start: if span.start >= pos {
                            span.start + len
                        } else {
                            span.start
                        },
                        end: if span.end > pos { span.end + len } else { span.end },
                    }
                }
            }
            Shift::Delete { start, len } => {
                let end = start + len;
                let clamp = |b: usize| {
                    if b >= end {
                        b - len
                    } else if b > start {
                        start
                    } else {
                        b
                    }
                };
                TextSpan {
                    start: clamp(span.start),
                    end: clamp(span.end),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FontState {
    pub name: String,
    pub bold: bool,
    pub italic: bool,
    pub size: f32,
    pub color: String,
}

impl Default for FontState {
    fn default() -> Self {
        FontState {
            name: "Calibri".to_string(),
            bold: false,
            italic: false,
            size: 11.0,
            color: "#000000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PictureState {
    /// Decoded payload length.
    pub bytes: usize,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParagraphState {
    pub id: BlockId,
    pub text: String,
    pub style: BuiltInStyle,
    pub font: FontState,
    pub pictures: Vec<PictureState>,
}

impl ParagraphState {
    fn new(id: BlockId, text: String) -> ParagraphState {
        ParagraphState {
            id,
            text,
            style: BuiltInStyle::Normal,
            font: FontState::default(),
            pictures: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TableState {
    pub id: BlockId,
    pub rows: u32,
    pub columns: u32,
    /// Row major, padded to `rows` by `columns`.
    pub values: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Block {
    Paragraph(ParagraphState),
    Table(TableState),
}

impl Block {
    fn paragraph(&self) -> Option<&ParagraphState> {
        match self {
            Block::Paragraph(paragraph) => Some(paragraph),
            Block::Table(_) => None,
        }
    }
}

/// The mutable document. Always holds at least one paragraph.
pub(crate) struct DocumentState {
    blocks: Vec<Block>,
    selection: TextSpan,
    next_id: BlockId,
}

impl DocumentState {
    pub(crate) fn new(paragraph_texts: Vec<String>) -> DocumentState {
        let mut state = DocumentState {
            blocks: Vec::new(),
            selection: TextSpan::collapsed(0),
            next_id: 0,
        };
        for text in paragraph_texts {
            let id = state.alloc_id();
            state.blocks.push(Block::Paragraph(ParagraphState::new(id, text)));
        }
        if state.blocks.is_empty() {
            let id = state.alloc_id();
            state
                .blocks
                .push(Block::Paragraph(ParagraphState::new(id, String::new())));
        }
        state
    }

    fn alloc_id(&mut self) -> BlockId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn selection(&self) -> TextSpan {
        self.selection
    }

    pub(crate) fn set_selection(&mut self, span: TextSpan) {
        self.selection = span;
    }

    /// Moves the selection over the first occurrence of `needle` within a
    /// single paragraph. Returns false (selection untouched) if absent.
    pub(crate) fn select_first(&mut self, needle: &str) -> bool {
        if needle.is_empty() {
            return false;
        }
        let mut offset = 0;
        for block in &self.blocks {
            if let Block::Paragraph(paragraph) = block {
                if let Some(at) = paragraph.text.find(needle) {
                    self.selection = TextSpan {
                        start: offset + at,
                        end: offset + at + needle.len(),
                    };
                    return true;
                }
                offset += paragraph.text.len() + 1;
            }
        }
        false
    }

    /// The body text: paragraph texts joined by separators.
    pub(crate) fn body_text(&self) -> String {
        let mut text = String::new();
        for paragraph in self.paragraphs() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&paragraph.text);
        }
        text
    }

    pub(crate) fn slice(&self, span: TextSpan) -> String {
        self.body_text()[span.start..span.end].to_string()
    }

    pub(crate) fn paragraphs(&self) -> impl Iterator<Item = &ParagraphState> {
        self.blocks.iter().filter_map(Block::paragraph)
    }

    pub(crate) fn first_paragraph(&self) -> Option<&ParagraphState> {
        self.paragraphs().next()
    }

    pub(crate) fn last_paragraph(&self) -> Option<&ParagraphState> {
        self.paragraphs().last()
    }

    pub(crate) fn nth_paragraph(&self, n: usize) -> Option<&ParagraphState> {
        self.paragraphs().nth(n)
    }

    /// The first paragraph strictly after the block with `id`.
    pub(crate) fn paragraph_after(&self, id: BlockId) -> Option<&ParagraphState> {
        let index = self.block_index(id)?;
        self.blocks[index + 1..].iter().find_map(Block::paragraph)
    }

    pub(crate) fn block_index(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| match block {
            Block::Paragraph(paragraph) => paragraph.id == id,
            Block::Table(table) => table.id == id,
        })
    }

    pub(crate) fn paragraph_mut(&mut self, id: BlockId) -> Option<&mut ParagraphState> {
        self.blocks.iter_mut().find_map(|block| match block {
            Block::Paragraph(paragraph) if paragraph.id == id => Some(paragraph),
            _ => None,
        })
    }

    pub(crate) fn paragraph(&self, id: BlockId) -> Option<&ParagraphState> {
        self.paragraphs().find(|paragraph| paragraph.id == id)
    }

    pub(crate) fn table(&self, id: BlockId) -> Option<&TableState> {
        self.blocks.iter().find_map(|block| match block {
            Block::Table(table) if table.id == id => Some(table),
            _ => None,
        })
    }

    /// Body-text span of the paragraph with `id`.
    pub(crate) fn paragraph_span(&self, id: BlockId) -> Option<TextSpan> {
        let mut offset = 0;
        for paragraph in self.paragraphs() {
            let end = offset + paragraph.text.len();
            if paragraph.id == id {
                return Some(TextSpan { start: offset, end });
            }
            offset = end + 1;
        }
        None
    }

    /// The paragraph whose span contains `pos` (inclusive of its end).
    fn locate(&self, pos: usize) -> Option<(BlockId, usize)> {
        let mut offset = 0;
        for paragraph in self.paragraphs() {
            let end = offset + paragraph.text.len();
            if pos >= offset && pos <= end {
                return Some((paragraph.id, pos - offset));
            }
            offset = end + 1;
        }
        None
    }

    /// Splices `text` into the paragraph containing `pos`. Pure text edit;
    /// the caller owns range adjustment.
    pub(crate) fn insert_text(&mut self, pos: usize, text: &str) -> bool {
        let Some((id, local)) = self.locate(pos) else {
            return false;
        };
        match self.paragraph_mut(id) {
            Some(paragraph) => {
                paragraph.text.insert_str(local, text);
                true
            }
            None => false,
        }
    }

    /// Removes `span`, which must lie within a single paragraph.
    pub(crate) fn delete(&mut self, span: TextSpan) -> bool {
        if span.is_empty() {
            return true;
        }
        let Some((id, local)) = self.locate(span.start) else {
            return false;
        };
        match self.paragraph_mut(id) {
            Some(paragraph) if local + span.len() <= paragraph.text.len() => {
                paragraph.text.drain(local..local + span.len());
                true
            }
            _ => false,
        }
    }

    /// Inserts a fresh paragraph at a block position, returning its id.
    pub(crate) fn insert_paragraph_at(&mut self, block_index: usize, text: String) -> BlockId {
        let id = self.alloc_id();
        self.blocks
            .insert(block_index, Block::Paragraph(ParagraphState::new(id, text)));
        id
    }

    pub(crate) fn insert_table_at(
        &mut self,
        block_index: usize,
        rows: u32,
        columns: u32,
        values: Vec<Vec<String>>,
    ) -> BlockId {
        let id = self.alloc_id();
        self.blocks.insert(
            block_index,
            Block::Table(TableState {
                id,
                rows,
                columns,
                values,
            }),
        );
        id
    }

    pub(crate) fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub(crate) fn snapshot(&self) -> DocumentSnapshot {
        let blocks = self
            .blocks
            .iter()
            .map(|block| match block {
                Block::Paragraph(paragraph) => BlockSnapshot::Paragraph(ParagraphSnapshot {
                    text: paragraph.text.clone(),
                    style: paragraph.style,
                    font: FontSnapshot {
                        name: paragraph.font.name.clone(),
                        bold: paragraph.font.bold,
                        italic: paragraph.font.italic,
                        size: paragraph.font.size,
                        color: paragraph.font.color.clone(),
                    },
                    pictures: paragraph
                        .pictures
                        .iter()
                        .map(|picture| PictureSnapshot {
                            width: picture.width,
                            height: picture.height,
                            bytes: picture.bytes,
                        })
                        .collect(),
                }),
                Block::Table(table) => BlockSnapshot::Table(TableSnapshot {
                    rows: table.rows,
                    columns: table.columns,
                    values: table.values.clone(),
                }),
            })
            .collect();
        DocumentSnapshot {
            blocks,
            selection: SelectionSnapshot {
                start: self.selection.start,
                end: self.selection.end,
                text: self.slice(self.selection),
            },
        }
    }
}

/// Point-in-time copy of the emulated document, for rendering and
/// assertions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSnapshot {
    pub blocks: Vec<BlockSnapshot>,
    pub selection: SelectionSnapshot,
}

impl DocumentSnapshot {
    /// The paragraph blocks, in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &ParagraphSnapshot> {
        self.blocks.iter().filter_map(|block| match block {
            BlockSnapshot::Paragraph(paragraph) => Some(paragraph),
            BlockSnapshot::Table(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BlockSnapshot {
    Paragraph(ParagraphSnapshot),
    Table(TableSnapshot),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParagraphSnapshot {
    pub text: String,
    pub style: BuiltInStyle,
    pub font: FontSnapshot,
    pub pictures: Vec<PictureSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontSnapshot {
    pub name: String,
    pub bold: bool,
    pub italic: bool,
    pub size: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PictureSnapshot {
    pub width: f32,
    pub height: f32,
    pub bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSnapshot {
    pub rows: u32,
    pub columns: u32,
    pub values: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionSnapshot {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize) -> TextSpan {
        TextSpan { start, end }
    }

    #[test]
    fn empty_document_keeps_one_paragraph() {
        let state = DocumentState::new(Vec::new());
        assert_eq!(state.paragraphs().count(), 1);
        assert_eq!(state.body_text(), "");
    }

    #[test]
    fn select_first_finds_text_within_one_paragraph() {
        let mut state = DocumentState::new(vec!["alpha beta".to_string(), "beta gamma".to_string()]);
        assert!(state.select_first("beta"));
        assert_eq!(state.slice(state.selection()), "beta");
        assert_eq!(state.selection(), span(6, 10));

        assert!(!state.select_first("delta"));
        assert_eq!(state.selection(), span(6, 10));
    }

    #[test]
    fn insert_shift_moves_starts_but_not_abutting_ends() {
        let shift = Shift::Insert { pos: 5, len: 3 };
        // Neighbor ending at the insertion point keeps its text.
        assert_eq!(shift.apply(span(0, 5)), span(0, 5));
        // Content at the insertion point moves right.
        assert_eq!(shift.apply(span(5, 9)), span(8, 12));
        // A collapsed range at the point moves as a unit.
        assert_eq!(shift.apply(span(5, 5)), span(8, 8));
        assert_eq!(shift.apply(span(7, 9)), span(10, 12));
        assert_eq!(shift.apply(span(0, 3)), span(0, 3));
    }

    #[test]
    fn delete_shift_clamps_boundaries_inside_the_gap() {
        let shift = Shift::Delete { start: 2, len: 4 };
        assert_eq!(shift.apply(span(0, 2)), span(0, 2));
        assert_eq!(shift.apply(span(3, 5)), span(2, 2));
        assert_eq!(shift.apply(span(4, 8)), span(2, 4));
        assert_eq!(shift.apply(span(6, 9)), span(2, 5));
    }

    #[test]
    fn paragraph_spans_skip_table_blocks() {
        let mut state = DocumentState::new(vec!["one".to_string(), "two".to_string()]);
        let first = state.first_paragraph().map(|p| p.id).unwrap();
        state.insert_table_at(1, 1, 1, vec![vec!["x".to_string()]]);

        assert_eq!(state.paragraph_span(first), Some(span(0, 3)));
        let last = state.last_paragraph().map(|p| p.id).unwrap();
        assert_eq!(state.paragraph_span(last), Some(span(4, 7)));
        assert_eq!(state.body_text(), "one\ntwo");
        // Next paragraph navigation steps over the table.
        assert_eq!(state.paragraph_after(first).map(|p| p.id), Some(last));
    }

    #[test]
    fn text_edits_stay_inside_the_located_paragraph() {
        let mut state = DocumentState::new(vec!["abc".to_string(), "def".to_string()]);
        assert!(state.insert_text(3, "X"));
        assert_eq!(state.body_text(), "abcX\ndef");
        assert!(state.insert_text(5, "Y"));
        assert_eq!(state.body_text(), "abcX\nYdef");
        assert!(state.delete(span(0, 2)));
        assert_eq!(state.body_text(), "cX\nYdef");
        assert!(!state.insert_text(99, "Z"));
    }
}
