use std::sync::Arc;

use tracing::info;
use wordpane::protocol::InsertLocation;
use wordpane::EmulatorHost;

use crate::context::CommandContext;
use crate::error::Result;
use crate::host::PaneSession;
use crate::render;

pub async fn execute(host: &Arc<EmulatorHost>, ctx: &CommandContext) -> Result<()> {
    info!(target = "wordpane", "inserting text into the selected range");

    let pane = PaneSession::open(host);
    let outcome = flow(&pane).await;
    pane.dispose();
    if let Err(error) = outcome {
        render::report_host_error(&error);
    }

    render::print_document(&host.snapshot(), ctx.json)
}

/// Inserting at `End` grows the range, so the text loaded by the second
/// flush includes the insertion.
pub(crate) async fn flow(pane: &PaneSession) -> wordpane::Result<()> {
    let selection = pane.document().get_selection();
    selection.insert_text(" (C2R)", InsertLocation::End);
    selection.load_text();
    pane.flush().await?;

    let text = selection.text()?;
    pane.document()
        .body()
        .insert_paragraph(&format!("Original range: {text}"), InsertLocation::End);
    pane.flush().await
}
