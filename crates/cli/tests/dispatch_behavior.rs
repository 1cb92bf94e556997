//! Dispatch-level behavior: the capability probe, input validation, and the
//! walkthrough's cumulative document.

use wordpane::emulator::BlockSnapshot;
use wordpane::protocol::{ApiVersion, BuiltInStyle};
use wordpane_cli::cli::Commands;
use wordpane_cli::commands::{self, walkthrough};
use wordpane_cli::context::CommandContext;

#[tokio::test]
async fn test_dispatch_runs_a_flow_end_to_end() {
    let ctx = CommandContext::new("Office 365".to_string(), None, false);
    commands::dispatch(Commands::ApplyStyle, &ctx)
        .await
        .expect("Failed to dispatch apply-style");
}

#[tokio::test]
async fn test_capped_api_version_warns_but_still_runs() {
    let ctx = CommandContext::new("Office 365".to_string(), Some(ApiVersion::new(1, 1)), false);
    commands::dispatch(Commands::InsertParagraph, &ctx)
        .await
        .expect("Failed to dispatch against a capped host");
}

#[tokio::test]
async fn test_empty_select_is_rejected() {
    let ctx = CommandContext::new(String::new(), None, false);
    assert!(commands::dispatch(Commands::ReplaceText, &ctx).await.is_err());
}

#[tokio::test]
async fn test_walkthrough_accumulates_every_edit() {
    let ctx = CommandContext::new("Office 365".to_string(), None, false);
    let host = ctx.host();
    walkthrough::execute(&host, &ctx)
        .await
        .expect("Failed to run the walkthrough");

    let snapshot = host.snapshot();
    assert_eq!(snapshot.blocks.len(), 8);

    let texts: Vec<&str> = snapshot
        .paragraphs()
        .map(|paragraph| paragraph.text.as_str())
        .collect();
    assert!(texts[0].starts_with("Office has several versions"));
    assert_eq!(
        texts[1],
        "Office 2019, many subscriptions receive monthly feature updates."
    );
    assert_eq!(
        &texts[3..],
        [
            "Original range: Office 365 (C2R)",
            "Current text of original range: Office 365 (C2R)",
            "Inserted HTML.",
            "Another paragraph",
        ]
    );

    // The styled opener, the re-fonted second paragraph, the picture on the
    // last report paragraph, the table after the second paragraph.
    let first = snapshot.paragraphs().next().expect("Failed to find the opener");
    assert_eq!(first.style, BuiltInStyle::IntenseReference);

    let second = snapshot.paragraphs().nth(1).expect("Failed to find the second paragraph");
    assert_eq!(second.font.name, "Courier New");

    let report = snapshot
        .paragraphs()
        .find(|paragraph| paragraph.text.starts_with("Current text"))
        .expect("Failed to find the report paragraph");
    assert_eq!(report.pictures.len(), 1);

    assert!(matches!(snapshot.blocks[2], BlockSnapshot::Table(_)));
    assert_eq!(snapshot.selection.text, "many");
}

#[tokio::test]
async fn test_walkthrough_runs_under_json_output() {
    let ctx = CommandContext::new("Office 365".to_string(), None, true);
    commands::dispatch(Commands::Walkthrough, &ctx)
        .await
        .expect("Failed to run the walkthrough with JSON output");
}
