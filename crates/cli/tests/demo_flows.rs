//! Drives each demo subcommand against a freshly seeded emulator host and
//! checks the document it leaves behind.

use std::sync::Arc;

use wordpane::emulator::BlockSnapshot;
use wordpane::protocol::BuiltInStyle;
use wordpane::EmulatorHost;
use wordpane_cli::commands::{
    apply_style, change_font, insert_html, insert_image, insert_paragraph, insert_table,
    insert_text_into_range, insert_text_outside_range, replace_text,
};
use wordpane_cli::context::CommandContext;

fn seeded() -> (Arc<EmulatorHost>, CommandContext) {
    let ctx = CommandContext::new("Office 365".to_string(), None, false);
    (ctx.host(), ctx)
}

fn paragraph_texts(host: &EmulatorHost) -> Vec<String> {
    host.snapshot()
        .paragraphs()
        .map(|paragraph| paragraph.text.clone())
        .collect()
}

#[tokio::test]
async fn test_insert_paragraph_prepends_the_opener() {
    let (host, ctx) = seeded();
    insert_paragraph::execute(&host, &ctx)
        .await
        .expect("Failed to run insert-paragraph");

    let texts = paragraph_texts(&host);
    assert_eq!(texts.len(), 3);
    assert!(texts[0].starts_with("Office has several versions"));
    assert_eq!(
        texts[1],
        "Office 365 subscriptions receive monthly feature updates."
    );
}

#[tokio::test]
async fn test_apply_style_marks_the_first_paragraph() {
    let (host, ctx) = seeded();
    apply_style::execute(&host, &ctx)
        .await
        .expect("Failed to run apply-style");

    let snapshot = host.snapshot();
    let styles: Vec<BuiltInStyle> = snapshot
        .paragraphs()
        .map(|paragraph| paragraph.style)
        .collect();
    assert_eq!(styles, [BuiltInStyle::IntenseReference, BuiltInStyle::Normal]);
}

#[tokio::test]
async fn test_change_font_targets_the_second_paragraph() {
    let (host, ctx) = seeded();
    change_font::execute(&host, &ctx)
        .await
        .expect("Failed to run change-font");

    let snapshot = host.snapshot();
    let fonts: Vec<_> = snapshot
        .paragraphs()
        .map(|paragraph| paragraph.font.clone())
        .collect();
    assert_eq!(fonts[0].name, "Calibri");
    assert_eq!(fonts[1].name, "Courier New");
    assert!(fonts[1].bold);
    assert_eq!(fonts[1].size, 18.0);
}

#[tokio::test]
async fn test_insert_text_into_range_reports_the_grown_range() {
    let (host, ctx) = seeded();
    insert_text_into_range::execute(&host, &ctx)
        .await
        .expect("Failed to run insert-text-into-range");

    let texts = paragraph_texts(&host);
    assert_eq!(
        texts[0],
        "Office 365 (C2R) subscriptions receive monthly feature updates."
    );
    assert_eq!(
        texts.last().map(String::as_str),
        Some("Original range: Office 365 (C2R)")
    );
    assert_eq!(host.snapshot().selection.text, "Office 365 (C2R)");
}

#[tokio::test]
async fn test_insert_text_outside_range_leaves_the_range_alone() {
    let (host, ctx) = seeded();
    insert_text_outside_range::execute(&host, &ctx)
        .await
        .expect("Failed to run insert-text-outside-range");

    let texts = paragraph_texts(&host);
    assert_eq!(
        texts[0],
        "Office 2019, Office 365 subscriptions receive monthly feature updates."
    );
    assert_eq!(
        texts.last().map(String::as_str),
        Some("Current text of original range: Office 365")
    );
    assert_eq!(host.snapshot().selection.text, "Office 365");
}

#[tokio::test]
async fn test_replace_text_swaps_the_selection() {
    let (host, ctx) = seeded();
    replace_text::execute(&host, &ctx)
        .await
        .expect("Failed to run replace-text");

    let texts = paragraph_texts(&host);
    assert_eq!(
        texts[0],
        "many subscriptions receive monthly feature updates."
    );
    assert_eq!(host.snapshot().selection.text, "many");
}

#[tokio::test]
async fn test_insert_image_attaches_to_the_last_paragraph() {
    let (host, ctx) = seeded();
    insert_image::execute(&host, &ctx)
        .await
        .expect("Failed to run insert-image");

    let snapshot = host.snapshot();
    let last = snapshot
        .paragraphs()
        .last()
        .expect("Failed to find a paragraph");
    assert_eq!(last.pictures.len(), 1);
    assert_eq!(last.pictures[0].width, 100.0);
}

#[tokio::test]
async fn test_insert_html_appends_two_paragraphs() {
    let (host, ctx) = seeded();
    insert_html::execute(&host, &ctx)
        .await
        .expect("Failed to run insert-html");

    let texts = paragraph_texts(&host);
    assert_eq!(
        texts,
        [
            "Office 365 subscriptions receive monthly feature updates.",
            "Office 2016 and Office 2019 are one-time purchases.",
            "Inserted HTML.",
            "Another paragraph",
        ]
    );
}

#[tokio::test]
async fn test_insert_table_lands_after_the_second_paragraph() {
    let (host, ctx) = seeded();
    insert_table::execute(&host, &ctx)
        .await
        .expect("Failed to run insert-table");

    let snapshot = host.snapshot();
    assert_eq!(snapshot.blocks.len(), 3);
    match &snapshot.blocks[2] {
        BlockSnapshot::Table(table) => {
            assert_eq!((table.rows, table.columns), (3, 3));
            assert_eq!(table.values[0], ["Name", "ID", "Birth City"]);
            assert_eq!(table.values[1], ["Bob", "434", "Chicago"]);
        }
        BlockSnapshot::Paragraph(paragraph) => {
            panic!("expected a table block, found paragraph {:?}", paragraph.text)
        }
    }
}
