//! Batch execution against the in-memory document.
//!
//! Operations run strictly in batch order. Object paths resolve lazily,
//! at the first statement that uses them, and stay memoized for the rest
//! of the batch; ranges materialized this way track every later text edit
//! in the batch. A failing statement stops execution and reports the
//! host error payload; earlier statements stay applied.

use super::document::{BlockId, DocumentState, ParagraphState, PictureState, Shift, TextSpan};
use base64::Engine;
use serde_json::Value;
use std::collections::HashMap;
use wordpane_protocol::{
    BatchRequest, BatchResponse, FontUpdate, HostErrorPayload, InsertLocation, LoadedValue,
    NavStep, ObjectId, ObjectPath, Operation, OperationRecord, Property, codes,
};

pub(crate) fn run(
    state: &mut DocumentState,
    batch: &BatchRequest,
) -> Result<BatchResponse, HostErrorPayload> {
    let mut executor = Executor {
        state,
        decls: batch.objects.iter().map(|decl| (decl.id, decl.path)).collect(),
        resolved: HashMap::new(),
        results: HashMap::new(),
        ranges: Vec::new(),
        loaded: Vec::new(),
    };
    for record in &batch.operations {
        if let Err(fail) = executor.apply(record) {
            return Err(HostErrorPayload::new(fail.code, fail.message)
                .at(fail.location, record.index));
        }
    }
    Ok(BatchResponse {
        loaded: executor.loaded,
    })
}

/// What an object path resolved to. Paragraphs, tables and pictures are
/// held by stable id so positions may shift under them.
#[derive(Debug, Clone, Copy)]
enum Resolved {
    Document,
    Body,
    Paragraph(BlockId),
    Range(usize),
    Font(BlockId),
    Table(BlockId),
    Picture { paragraph: BlockId, slot: usize },
}

impl Resolved {
    fn kind(&self) -> &'static str {
        match self {
            Resolved::Document => "Document",
            Resolved::Body => "Body",
            Resolved::Paragraph(_) => "Paragraph",
            Resolved::Range(_) => "Range",
            Resolved::Font(_) => "Font",
            Resolved::Table(_) => "Table",
            Resolved::Picture { .. } => "InlinePicture",
        }
    }
}

/// A range materialized during this batch. Ranges created from the
/// selection write their extent back so the selection survives the batch.
struct LiveRange {
    span: TextSpan,
    tracks_selection: bool,
}

struct Fail {
    code: &'static str,
    location: String,
    message: String,
}

impl Fail {
    fn new(code: &'static str, location: impl Into<String>, message: impl Into<String>) -> Fail {
        Fail {
            code,
            location: location.into(),
            message: message.into(),
        }
    }
}

type Exec<T> = Result<T, Fail>;

struct Executor<'a> {
    state: &'a mut DocumentState,
    decls: HashMap<ObjectId, ObjectPath>,
    resolved: HashMap<ObjectId, Resolved>,
    /// Objects produced by already-executed statements, by statement index.
    results: HashMap<u32, Resolved>,
    ranges: Vec<LiveRange>,
    loaded: Vec<LoadedValue>,
}

impl Executor<'_> {
    fn apply(&mut self, record: &OperationRecord) -> Exec<()> {
        let target = self.resolve(record.target)?;
        match &record.operation {
            Operation::InsertText { text, location } => {
                let produced = self.insert_text(target, text, *location)?;
                self.results.insert(record.index, produced);
            }
            Operation::InsertParagraph { text, location } => {
                let produced = self.insert_paragraph(target, text, *location)?;
                self.results.insert(record.index, produced);
            }
            Operation::InsertHtml { html, location } => {
                let produced = self.insert_html(target, html, *location)?;
                self.results.insert(record.index, produced);
            }
            Operation::InsertTable {
                rows,
                columns,
                location,
                values,
            } => {
                let produced = self.insert_table(target, *rows, *columns, *location, values)?;
                self.results.insert(record.index, produced);
            }
            Operation::InsertInlinePicture { base64, location } => {
                let produced = self.insert_picture(target, base64, *location)?;
                self.results.insert(record.index, produced);
            }
            Operation::SetStyleBuiltIn { style } => {
                let Resolved::Paragraph(id) = target else {
                    return Err(Fail::new(
                        codes::NOT_IMPLEMENTED,
                        "Paragraph.styleBuiltIn",
                        format!("styleBuiltIn is not available on a {}", target.kind()),
                    ));
                };
                self.paragraph_mut(id, "Paragraph.styleBuiltIn")?.style = *style;
            }
            Operation::SetFont { update } => self.set_font(target, update)?,
            Operation::Load { property } => {
                let value = self.load(target, *property)?;
                self.loaded.push(LoadedValue {
                    target: record.target,
                    property: *property,
                    value,
                });
            }
        }
        Ok(())
    }

    fn resolve(&mut self, id: ObjectId) -> Exec<Resolved> {
        if let Some(resolved) = self.resolved.get(&id) {
            return Ok(*resolved);
        }
        let path = *self.decls.get(&id).ok_or_else(|| {
            Fail::new(
                codes::INVALID_OBJECT_PATH,
                "Batch.objects",
                format!("object {id} has no declaration in this batch"),
            )
        })?;
        let resolved = match path {
            ObjectPath::Document => Resolved::Document,
            ObjectPath::OperationResult { operation } => {
                *self.results.get(&operation).ok_or_else(|| {
                    Fail::new(
                        codes::INVALID_OBJECT_PATH,
                        "Batch.objects",
                        format!("statement {operation} has no result in this batch"),
                    )
                })?
            }
            ObjectPath::Navigate { from, step } => {
                let parent = self.resolve(from)?;
                self.step(parent, step)?
            }
        };
        self.resolved.insert(id, resolved);
        Ok(resolved)
    }

    fn step(&mut self, parent: Resolved, step: NavStep) -> Exec<Resolved> {
        match (parent, step) {
            (Resolved::Document, NavStep::Body) => Ok(Resolved::Body),
            (Resolved::Document, NavStep::Selection) => {
                let span = self.state.selection();
                self.ranges.push(LiveRange {
                    span,
                    tracks_selection: true,
                });
                Ok(Resolved::Range(self.ranges.len() - 1))
            }
            (Resolved::Body, NavStep::FirstParagraph) => self
                .state
                .first_paragraph()
                .map(|paragraph| Resolved::Paragraph(paragraph.id))
                .ok_or_else(|| {
                    Fail::new(
                        codes::ITEM_NOT_FOUND,
                        "ParagraphCollection.getFirst",
                        "the document has no paragraphs",
                    )
                }),
            (Resolved::Body, NavStep::LastParagraph) => self
                .state
                .last_paragraph()
                .map(|paragraph| Resolved::Paragraph(paragraph.id))
                .ok_or_else(|| {
                    Fail::new(
                        codes::ITEM_NOT_FOUND,
                        "ParagraphCollection.getLast",
                        "the document has no paragraphs",
                    )
                }),
            (Resolved::Body, NavStep::ParagraphAt { index }) => self
                .state
                .nth_paragraph(index as usize)
                .map(|paragraph| Resolved::Paragraph(paragraph.id))
                .ok_or_else(|| {
                    Fail::new(
                        codes::ITEM_NOT_FOUND,
                        "ParagraphCollection.getAt",
                        format!("no paragraph at index {index}"),
                    )
                }),
            (Resolved::Paragraph(id), NavStep::NextParagraph) => self
                .state
                .paragraph_after(id)
                .map(|paragraph| Resolved::Paragraph(paragraph.id))
                .ok_or_else(|| {
                    Fail::new(
                        codes::ITEM_NOT_FOUND,
                        "Paragraph.getNext",
                        "no paragraph follows this one",
                    )
                }),
            (Resolved::Paragraph(id), NavStep::Font) => Ok(Resolved::Font(id)),
            (parent, step) => Err(Fail::new(
                codes::INVALID_OBJECT_PATH,
                "Batch.objects",
                format!(
                    "cannot navigate {} from a {}",
                    step_label(step),
                    parent.kind()
                ),
            )),
        }
    }

    fn insert_text(
        &mut self,
        target: Resolved,
        text: &str,
        location: InsertLocation,
    ) -> Exec<Resolved> {
        const LOCATION: &str = "Range.insertText";
        let Resolved::Range(idx) = target else {
            return Err(Fail::new(
                codes::NOT_IMPLEMENTED,
                LOCATION,
                format!("insertText is not available on a {}", target.kind()),
            ));
        };
        if text.contains(['\n', '\r']) {
            return Err(Fail::new(
                codes::INVALID_ARGUMENT,
                LOCATION,
                "text must not contain paragraph breaks",
            ));
        }
        let span = self.ranges[idx].span;

        let (pos, new_target) = match location {
            InsertLocation::Before => (
                span.start,
                TextSpan {
                    start: span.start + text.len(),
                    end: span.end + text.len(),
                },
            ),
            InsertLocation::Start => (
                span.start,
                TextSpan {
                    start: span.start,
                    end: span.end + text.len(),
                },
            ),
            InsertLocation::End => (
                span.end,
                TextSpan {
                    start: span.start,
                    end: span.end + text.len(),
                },
            ),
            InsertLocation::After => (span.end, span),
            InsertLocation::Replace => {
                if !self.state.delete(span) {
                    return Err(out_of_bounds(LOCATION));
                }
                self.shift_ranges(
                    Shift::Delete {
                        start: span.start,
                        len: span.len(),
                    },
                    Some(idx),
                );
                if !self.state.insert_text(span.start, text) {
                    return Err(out_of_bounds(LOCATION));
                }
                self.shift_ranges(
                    Shift::Insert {
                        pos: span.start,
                        len: text.len(),
                    },
                    Some(idx),
                );
                let result = TextSpan {
                    start: span.start,
                    end: span.start + text.len(),
                };
                self.retarget(idx, result);
                return Ok(self.push_range(result));
            }
        };
        if !self.state.insert_text(pos, text) {
            return Err(out_of_bounds(LOCATION));
        }
        self.shift_ranges(
            Shift::Insert {
                pos,
                len: text.len(),
            },
            Some(idx),
        );
        self.retarget(idx, new_target);
        Ok(self.push_range(TextSpan {
            start: pos,
            end: pos + text.len(),
        }))
    }

    fn insert_paragraph(
        &mut self,
        target: Resolved,
        text: &str,
        location: InsertLocation,
    ) -> Exec<Resolved> {
        match target {
            Resolved::Body => {
                const LOCATION: &str = "Body.insertParagraph";
                reject_breaks(text, LOCATION)?;
                let (block_index, pos) = match location {
                    InsertLocation::Start => (0, 0),
                    InsertLocation::End => (self.state.block_count(), self.state.body_text().len()),
                    other => {
                        return Err(bad_location(LOCATION, other, "a body"));
                    }
                };
                let id = self.state.insert_paragraph_at(block_index, text.to_string());
                self.shift_ranges(
                    Shift::Insert {
                        pos,
                        len: text.len() + 1,
                    },
                    None,
                );
                Ok(Resolved::Paragraph(id))
            }
            Resolved::Paragraph(para_id) => {
                const LOCATION: &str = "Paragraph.insertParagraph";
                reject_breaks(text, LOCATION)?;
                let span = self.paragraph_span(para_id, LOCATION)?;
                let index = self.block_index(para_id, LOCATION)?;
                let (block_index, pos) = match location {
                    InsertLocation::Before => (index, span.start),
                    InsertLocation::After => (index + 1, span.end),
                    other => {
                        return Err(bad_location(LOCATION, other, "a paragraph"));
                    }
                };
                let id = self.state.insert_paragraph_at(block_index, text.to_string());
                self.shift_ranges(
                    Shift::Insert {
                        pos,
                        len: text.len() + 1,
                    },
                    None,
                );
                Ok(Resolved::Paragraph(id))
            }
            other => Err(Fail::new(
                codes::NOT_IMPLEMENTED,
                "Body.insertParagraph",
                format!("insertParagraph is not available on a {}", other.kind()),
            )),
        }
    }

    fn insert_html(
        &mut self,
        target: Resolved,
        html: &str,
        location: InsertLocation,
    ) -> Exec<Resolved> {
        const LOCATION: &str = "Paragraph.insertHtml";
        let Resolved::Paragraph(para_id) = target else {
            return Err(Fail::new(
                codes::NOT_IMPLEMENTED,
                LOCATION,
                format!("insertHtml is not available on a {}", target.kind()),
            ));
        };
        if location != InsertLocation::End {
            return Err(Fail::new(
                codes::NOT_IMPLEMENTED,
                LOCATION,
                format!("insertHtml supports only the End location, got {location}"),
            ));
        }
        let fragments = html_fragments(html);
        let span = self.paragraph_span(para_id, LOCATION)?;

        // First fragment extends the target paragraph in place.
        let first = &fragments[0];
        let pos = span.end;
        if !self.state.insert_text(pos, first) {
            return Err(out_of_bounds(LOCATION));
        }
        self.shift_ranges(
            Shift::Insert {
                pos,
                len: first.len(),
            },
            None,
        );
        let produced = self.push_range(TextSpan {
            start: pos,
            end: pos + first.len(),
        });

        // Remaining fragments become sibling paragraphs after the target.
        let mut block_index = self.block_index(para_id, LOCATION)? + 1;
        let mut chain_end = pos + first.len();
        for fragment in &fragments[1..] {
            self.state.insert_paragraph_at(block_index, fragment.clone());
            self.shift_ranges(
                Shift::Insert {
                    pos: chain_end,
                    len: fragment.len() + 1,
                },
                None,
            );
            chain_end += fragment.len() + 1;
            block_index += 1;
        }
        Ok(produced)
    }

    fn insert_table(
        &mut self,
        target: Resolved,
        rows: u32,
        columns: u32,
        location: InsertLocation,
        values: &[Vec<String>],
    ) -> Exec<Resolved> {
        const LOCATION: &str = "Paragraph.insertTable";
        let Resolved::Paragraph(para_id) = target else {
            return Err(Fail::new(
                codes::NOT_IMPLEMENTED,
                LOCATION,
                format!("insertTable is not available on a {}", target.kind()),
            ));
        };
        if rows == 0 || columns == 0 {
            return Err(Fail::new(
                codes::INVALID_ARGUMENT,
                LOCATION,
                "table dimensions must be positive",
            ));
        }
        if values.len() > rows as usize
            || values.iter().any(|row| row.len() > columns as usize)
        {
            return Err(Fail::new(
                codes::INVALID_ARGUMENT,
                LOCATION,
                format!("values exceed the declared {rows}x{columns} table size"),
            ));
        }
        let index = self.block_index(para_id, LOCATION)?;
        let block_index = match location {
            InsertLocation::Before => index,
            InsertLocation::After => index + 1,
            other => {
                return Err(bad_location(LOCATION, other, "a table"));
            }
        };
        let mut padded = Vec::with_capacity(rows as usize);
        for r in 0..rows as usize {
            let mut row = values.get(r).cloned().unwrap_or_default();
            row.resize(columns as usize, String::new());
            padded.push(row);
        }
        // Tables take no body-text offsets, so no ranges move.
        let id = self.state.insert_table_at(block_index, rows, columns, padded);
        Ok(Resolved::Table(id))
    }

    fn insert_picture(
        &mut self,
        target: Resolved,
        payload: &str,
        location: InsertLocation,
    ) -> Exec<Resolved> {
        const LOCATION: &str = "Body.insertInlinePictureFromBase64";
        let Resolved::Body = target else {
            return Err(Fail::new(
                codes::NOT_IMPLEMENTED,
                LOCATION,
                format!(
                    "insertInlinePictureFromBase64 is not available on a {}",
                    target.kind()
                ),
            ));
        };
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|_| {
                Fail::new(
                    codes::INVALID_ARGUMENT,
                    LOCATION,
                    "payload is not valid base64",
                )
            })?;
        let anchor = match location {
            InsertLocation::Start => self.state.first_paragraph(),
            InsertLocation::End => self.state.last_paragraph(),
            other => {
                return Err(bad_location(LOCATION, other, "an inline picture"));
            }
        };
        let anchor = anchor
            .map(|paragraph| paragraph.id)
            .ok_or_else(|| out_of_bounds(LOCATION))?;
        let paragraph = self.paragraph_mut(anchor, LOCATION)?;
        paragraph.pictures.push(PictureState {
            bytes: decoded.len(),
            width: 100.0,
            height: 100.0,
        });
        Ok(Resolved::Picture {
            paragraph: anchor,
            slot: paragraph.pictures.len() - 1,
        })
    }

    fn set_font(&mut self, target: Resolved, update: &FontUpdate) -> Exec<()> {
        const LOCATION: &str = "Font.set";
        let Resolved::Font(id) = target else {
            return Err(Fail::new(
                codes::NOT_IMPLEMENTED,
                LOCATION,
                format!("font updates are not available on a {}", target.kind()),
            ));
        };
        if let Some(size) = update.size {
            if size.is_nan() || size <= 0.0 {
                return Err(Fail::new(
                    codes::INVALID_ARGUMENT,
                    LOCATION,
                    "font size must be positive",
                ));
            }
        }
        let font = &mut self.paragraph_mut(id, LOCATION)?.font;
        if let Some(name) = &update.name {
            font.name = name.clone();
        }
        if let Some(bold) = update.bold {
            font.bold = bold;
        }
        if let Some(italic) = update.italic {
            font.italic = italic;
        }
        if let Some(size) = update.size {
            font.size = size;
        }
        if let Some(color) = &update.color {
            font.color = color.clone();
        }
        Ok(())
    }

    fn load(&self, target: Resolved, property: Property) -> Exec<Value> {
        match (target, property) {
            (Resolved::Paragraph(id), Property::Text) => Ok(Value::String(
                self.paragraph(id, "Paragraph.load")?.text.clone(),
            )),
            (Resolved::Paragraph(id), Property::StyleBuiltIn) => Ok(Value::String(
                self.paragraph(id, "Paragraph.load")?.style.as_str().to_string(),
            )),
            (Resolved::Range(idx), Property::Text) => {
                Ok(Value::String(self.state.slice(self.ranges[idx].span)))
            }
            (Resolved::Font(id), Property::Name) => Ok(Value::String(
                self.paragraph(id, "Font.load")?.font.name.clone(),
            )),
            (Resolved::Font(id), Property::Bold) => {
                Ok(Value::Bool(self.paragraph(id, "Font.load")?.font.bold))
            }
            (Resolved::Font(id), Property::Italic) => {
                Ok(Value::Bool(self.paragraph(id, "Font.load")?.font.italic))
            }
            (Resolved::Font(id), Property::Size) => {
                Ok(Value::from(self.paragraph(id, "Font.load")?.font.size))
            }
            (Resolved::Font(id), Property::Color) => Ok(Value::String(
                self.paragraph(id, "Font.load")?.font.color.clone(),
            )),
            (Resolved::Table(id), Property::Values) => {
                let table = self.state.table(id).ok_or_else(|| out_of_bounds("Table.load"))?;
                Ok(Value::Array(
                    table
                        .values
                        .iter()
                        .map(|row| {
                            Value::Array(
                                row.iter().map(|cell| Value::String(cell.clone())).collect(),
                            )
                        })
                        .collect(),
                ))
            }
            (Resolved::Picture { paragraph, slot }, Property::Width) => Ok(Value::from(
                self.picture(paragraph, slot, "InlinePicture.load")?.width,
            )),
            (Resolved::Picture { paragraph, slot }, Property::Height) => Ok(Value::from(
                self.picture(paragraph, slot, "InlinePicture.load")?.height,
            )),
            (target, property) => Err(Fail::new(
                codes::INVALID_ARGUMENT,
                format!("{}.load", target.kind()),
                format!(
                    "property {property} is not available on a {}",
                    target.kind()
                ),
            )),
        }
    }

    /// Applies `shift` to every live range except the one being edited,
    /// and to the persisted selection.
    fn shift_ranges(&mut self, shift: Shift, except: Option<usize>) {
        for (i, range) in self.ranges.iter_mut().enumerate() {
            if Some(i) != except {
                range.span = shift.apply(range.span);
            }
        }
        let selection = shift.apply(self.state.selection());
        self.state.set_selection(selection);
    }

    /// Gives the edited range its post-edit extent, writing the selection
    /// through when the range came from it.
    fn retarget(&mut self, idx: usize, span: TextSpan) {
        self.ranges[idx].span = span;
        if self.ranges[idx].tracks_selection {
            self.state.set_selection(span);
        }
    }

    fn push_range(&mut self, span: TextSpan) -> Resolved {
        self.ranges.push(LiveRange {
            span,
            tracks_selection: false,
        });
        Resolved::Range(self.ranges.len() - 1)
    }

    fn paragraph(&self, id: BlockId, location: &'static str) -> Exec<&ParagraphState> {
        self.state.paragraph(id).ok_or_else(|| out_of_bounds(location))
    }

    fn paragraph_mut(
        &mut self,
        id: BlockId,
        location: &'static str,
    ) -> Exec<&mut ParagraphState> {
        self.state
            .paragraph_mut(id)
            .ok_or_else(|| out_of_bounds(location))
    }

    fn picture(
        &self,
        paragraph: BlockId,
        slot: usize,
        location: &'static str,
    ) -> Exec<&PictureState> {
        self.paragraph(paragraph, location)?
            .pictures
            .get(slot)
            .ok_or_else(|| out_of_bounds(location))
    }

    fn paragraph_span(&self, id: BlockId, location: &'static str) -> Exec<TextSpan> {
        self.state
            .paragraph_span(id)
            .ok_or_else(|| out_of_bounds(location))
    }

    fn block_index(&self, id: BlockId, location: &'static str) -> Exec<usize> {
        self.state
            .block_index(id)
            .ok_or_else(|| out_of_bounds(location))
    }
}

fn out_of_bounds(location: &'static str) -> Fail {
    Fail::new(
        codes::GENERAL_EXCEPTION,
        location,
        "object no longer maps to document content",
    )
}

fn bad_location(location: &'static str, got: InsertLocation, what: &'static str) -> Fail {
    Fail::new(
        codes::INVALID_ARGUMENT,
        location,
        format!("location {got} is not valid for {what}"),
    )
}

fn reject_breaks(text: &str, location: &'static str) -> Exec<()> {
    if text.contains(['\n', '\r']) {
        return Err(Fail::new(
            codes::INVALID_ARGUMENT,
            location,
            "text must not contain paragraph breaks",
        ));
    }
    Ok(())
}

fn step_label(step: NavStep) -> &'static str {
    match step {
        NavStep::Body => "body",
        NavStep::Selection => "selection",
        NavStep::FirstParagraph => "firstParagraph",
        NavStep::LastParagraph => "lastParagraph",
        NavStep::NextParagraph => "nextParagraph",
        NavStep::ParagraphAt { .. } => "paragraphAt",
        NavStep::Font => "font",
    }
}

/// Splits an HTML fragment into paragraph texts: tags are dropped, each
/// `</p>` closes a paragraph, trailing text outside any `<p>` forms one
/// more. Always yields at least one fragment.
fn html_fragments(html: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut rest = html;
    loop {
        match rest.find('<') {
            None => {
                current.push_str(rest);
                break;
            }
            Some(open) => {
                current.push_str(&rest[..open]);
                match rest[open..].find('>') {
                    // Unterminated tag, drop the remainder.
                    None => break,
                    Some(close) => {
                        let tag = rest[open + 1..open + close].trim();
                        if tag.eq_ignore_ascii_case("/p") {
                            fragments.push(sanitize(std::mem::take(&mut current)));
                        }
                        rest = &rest[open + close + 1..];
                    }
                }
            }
        }
    }
    if !current.trim().is_empty() {
        fragments.push(sanitize(current));
    }
    if fragments.is_empty() {
        fragments.push(String::new());
    }
    fragments
}

fn sanitize(fragment: String) -> String {
    if fragment.contains(['\n', '\r']) {
        fragment.replace(['\n', '\r'], " ")
    } else {
        fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordpane_protocol::{BuiltInStyle, ObjectDecl};

    fn doc(paragraphs: &[&str]) -> DocumentState {
        DocumentState::new(paragraphs.iter().map(|text| text.to_string()).collect())
    }

    fn decl(id: ObjectId, path: ObjectPath) -> ObjectDecl {
        ObjectDecl { id, path }
    }

    fn op(index: u32, target: ObjectId, operation: Operation) -> OperationRecord {
        OperationRecord {
            index,
            target,
            operation,
        }
    }

    #[test]
    fn navigation_past_the_end_reports_statement_and_location() {
        let mut state = doc(&["only"]);
        // Paths resolve when first used: by the time statement 1 runs, the
        // insert has executed and the document has two paragraphs, so the
        // failing hop is the second getNext.
        let batch = BatchRequest {
            objects: vec![
                decl(0, ObjectPath::Document),
                decl(1, ObjectPath::Navigate { from: 0, step: NavStep::Body }),
                decl(2, ObjectPath::Navigate { from: 1, step: NavStep::FirstParagraph }),
                decl(3, ObjectPath::Navigate { from: 2, step: NavStep::NextParagraph }),
                decl(4, ObjectPath::Navigate { from: 3, step: NavStep::NextParagraph }),
            ],
            operations: vec![
                op(0, 1, Operation::InsertParagraph {
                    text: "applied before the failure".to_string(),
                    location: InsertLocation::End,
                }),
                op(1, 4, Operation::SetStyleBuiltIn { style: BuiltInStyle::Quote }),
            ],
        };

        let payload = run(&mut state, &batch).expect_err("navigation should fail");
        assert_eq!(payload.code(), codes::ITEM_NOT_FOUND);
        assert_eq!(payload.debug_info.error_location.as_deref(), Some("Paragraph.getNext"));
        assert_eq!(payload.debug_info.statement, Some(1));
        // Statements before the failing one stay applied.
        assert_eq!(state.body_text(), "only\napplied before the failure");
    }

    #[test]
    fn operation_results_do_not_survive_into_another_batch() {
        let mut state = doc(&["seed"]);
        let first = BatchRequest {
            objects: vec![
                decl(0, ObjectPath::Document),
                decl(1, ObjectPath::Navigate { from: 0, step: NavStep::Body }),
            ],
            operations: vec![op(0, 1, Operation::InsertParagraph {
                text: "fresh".to_string(),
                location: InsertLocation::End,
            })],
        };
        run(&mut state, &first).expect("first batch should apply");

        // A later batch referencing statement 0's result cannot resolve it.
        let second = BatchRequest {
            objects: vec![decl(2, ObjectPath::OperationResult { operation: 0 })],
            operations: vec![op(1, 2, Operation::SetStyleBuiltIn {
                style: BuiltInStyle::Quote,
            })],
        };
        let payload = run(&mut state, &second).expect_err("stale result should fail");
        assert_eq!(payload.code(), codes::INVALID_OBJECT_PATH);
        assert_eq!(payload.debug_info.statement, Some(1));
    }

    #[test]
    fn body_rejects_relative_insert_locations() {
        let mut state = doc(&["seed"]);
        let batch = BatchRequest {
            objects: vec![
                decl(0, ObjectPath::Document),
                decl(1, ObjectPath::Navigate { from: 0, step: NavStep::Body }),
            ],
            operations: vec![op(0, 1, Operation::InsertParagraph {
                text: "x".to_string(),
                location: InsertLocation::Before,
            })],
        };
        let payload = run(&mut state, &batch).expect_err("Before should be rejected");
        assert_eq!(payload.code(), codes::INVALID_ARGUMENT);
        assert_eq!(payload.debug_info.error_location.as_deref(), Some("Body.insertParagraph"));
        assert_eq!(state.body_text(), "seed");
    }

    #[test]
    fn short_table_values_are_padded_and_oversize_rejected() {
        let mut state = doc(&["anchor"]);
        let objects = vec![
            decl(0, ObjectPath::Document),
            decl(1, ObjectPath::Navigate { from: 0, step: NavStep::Body }),
            decl(2, ObjectPath::Navigate { from: 1, step: NavStep::FirstParagraph }),
            decl(3, ObjectPath::OperationResult { operation: 0 }),
        ];
        let batch = BatchRequest {
            objects: objects.clone(),
            operations: vec![
                op(0, 2, Operation::InsertTable {
                    rows: 2,
                    columns: 2,
                    location: InsertLocation::After,
                    values: vec![vec!["a".to_string()]],
                }),
                op(1, 3, Operation::Load { property: Property::Values }),
            ],
        };
        let response = run(&mut state, &batch).expect("short values should pad");
        assert_eq!(
            response.loaded[0].value,
            serde_json::json!([["a", ""], ["", ""]])
        );

        let oversize = BatchRequest {
            objects,
            operations: vec![op(2, 2, Operation::InsertTable {
                rows: 1,
                columns: 1,
                location: InsertLocation::After,
                values: vec![vec!["a".to_string(), "b".to_string()]],
            })],
        };
        let payload = run(&mut state, &oversize).expect_err("oversize values should fail");
        assert_eq!(payload.code(), codes::INVALID_ARGUMENT);
    }

    #[test]
    fn html_fragments_split_on_paragraph_closers() {
        let fragments = html_fragments(
            "<p style=\"font-family: verdana;\">Inserted HTML.</p><p>Another paragraph</p>",
        );
        assert_eq!(fragments, ["Inserted HTML.", "Another paragraph"]);

        assert_eq!(html_fragments("plain text"), ["plain text"]);
        assert_eq!(html_fragments("<b>kept</b> tail"), ["kept tail"]);
        assert_eq!(html_fragments(""), [""]);
    }
}
