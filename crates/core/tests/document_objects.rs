// Integration tests for the richer document objects
//
// Tests cover:
// - HTML insertion into a blank trailing paragraph
// - Table insertion next to a paragraph, with value padding
// - Inline pictures anchored to the last paragraph
// - Style assignment and paragraph addressing by index

use std::sync::Arc;
use wordpane::protocol::{codes, BuiltInStyle, InsertLocation, Property};
use wordpane::{EmulatorHost, Error, Session};

const TINY_PNG: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

fn seeded_host() -> Arc<EmulatorHost> {
    EmulatorHost::builder()
        .paragraph("first paragraph")
        .paragraph("second paragraph")
        .build()
}

#[tokio::test]
async fn test_insert_html_after_the_last_paragraph() {
    let host = seeded_host();
    let session = Session::acquire(host.clone());
    let paragraphs = session.document().body().paragraphs();

    let blank = paragraphs.last().insert_paragraph("", InsertLocation::After);
    let inserted = blank.insert_html(
        "<p style=\"font-family: verdana;\">Inserted HTML.</p><p>Another paragraph</p>",
        InsertLocation::End,
    );
    inserted.load_text();
    session.flush().await.expect("Failed to flush");

    assert_eq!(
        inserted.text().expect("Failed to read inserted range"),
        "Inserted HTML."
    );
    let snapshot = host.snapshot();
    let texts: Vec<&str> = snapshot
        .paragraphs()
        .map(|paragraph| paragraph.text.as_str())
        .collect();
    assert_eq!(
        texts,
        [
            "first paragraph",
            "second paragraph",
            "Inserted HTML.",
            "Another paragraph",
        ]
    );
}

#[tokio::test]
async fn test_insert_table_next_to_the_second_paragraph() {
    let host = seeded_host();
    let session = Session::acquire(host.clone());
    let second = session.document().body().paragraphs().first().next();

    let values = vec![
        vec!["Name".to_string(), "ID".to_string(), "Birth City".to_string()],
        vec!["Bob".to_string(), "434".to_string(), "Chicago".to_string()],
        vec!["Sue".to_string(), "719".to_string(), "Havana".to_string()],
    ];
    let table = second.insert_table(3, 3, InsertLocation::After, values.clone());
    table.load(Property::Values);
    session.flush().await.expect("Failed to flush");

    assert_eq!(table.values().expect("Failed to read values"), values);

    let snapshot = host.snapshot();
    let rendered = snapshot
        .blocks
        .iter()
        .find_map(|block| match block {
            wordpane::emulator::BlockSnapshot::Table(table) => Some(table),
            _ => None,
        })
        .expect("Table block missing from the snapshot");
    assert_eq!(rendered.rows, 3);
    assert_eq!(rendered.values[2][2], "Havana");
    // The paragraph text is untouched by the sibling table.
    assert_eq!(host.body_text(), "first paragraph\nsecond paragraph");
}

#[tokio::test]
async fn test_insert_inline_picture_at_the_end() {
    let host = seeded_host();
    let session = Session::acquire(host.clone());
    let body = session.document().body();

    let picture = body.insert_inline_picture_from_base64(TINY_PNG, InsertLocation::End);
    picture.load(Property::Width);
    picture.load(Property::Height);
    session.flush().await.expect("Failed to flush");

    assert_eq!(picture.width().expect("Failed to read width"), 100.0);
    assert_eq!(picture.height().expect("Failed to read height"), 100.0);

    let snapshot = host.snapshot();
    let last = snapshot
        .paragraphs()
        .last()
        .expect("Snapshot has no paragraphs");
    assert_eq!(last.pictures.len(), 1);
    assert!(last.pictures[0].bytes > 0);
}

#[tokio::test]
async fn test_invalid_base64_fails_the_flush() {
    let host = seeded_host();
    let session = Session::acquire(host);
    session
        .document()
        .body()
        .insert_inline_picture_from_base64("not base64!!!", InsertLocation::End);

    let error = session.flush().await.expect_err("flush should fail");
    match error {
        Error::HostCommunication {
            debug: Some(debug), ..
        } => {
            assert_eq!(debug.code, codes::INVALID_ARGUMENT);
            assert_eq!(
                debug.error_location.as_deref(),
                Some("Body.insertInlinePictureFromBase64")
            );
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_style_assignment_by_paragraph_index() {
    let host = seeded_host();
    let session = Session::acquire(host.clone());
    let second = session.document().body().paragraphs().at(1);

    second.set_style_built_in(BuiltInStyle::IntenseReference);
    second.load(Property::StyleBuiltIn);
    session.flush().await.expect("Failed to flush");

    assert_eq!(
        second.style_built_in().expect("Failed to read style"),
        BuiltInStyle::IntenseReference
    );
    let snapshot = host.snapshot();
    let styles: Vec<_> = snapshot
        .paragraphs()
        .map(|paragraph| paragraph.style)
        .collect();
    assert_eq!(styles, [BuiltInStyle::Normal, BuiltInStyle::IntenseReference]);
}

#[tokio::test]
async fn test_addressing_a_missing_paragraph_index_fails() {
    let host = seeded_host();
    let session = Session::acquire(host);
    let missing = session.document().body().paragraphs().at(5);
    missing.load(Property::Text);

    let error = session.flush().await.expect_err("flush should fail");
    match error {
        Error::Navigation { debug, .. } => {
            assert_eq!(debug.code, codes::ITEM_NOT_FOUND);
            assert_eq!(
                debug.error_location.as_deref(),
                Some("ParagraphCollection.getAt")
            );
        }
        other => panic!("unexpected error {other:?}"),
    }
}
