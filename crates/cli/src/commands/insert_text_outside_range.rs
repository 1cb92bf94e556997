use std::sync::Arc;

use tracing::info;
use wordpane::protocol::InsertLocation;
use wordpane::EmulatorHost;

use crate::context::CommandContext;
use crate::error::Result;
use crate::host::PaneSession;
use crate::render;

pub async fn execute(host: &Arc<EmulatorHost>, ctx: &CommandContext) -> Result<()> {
    info!(target = "wordpane", "inserting text before the selected range");

    let pane = PaneSession::open(host);
    let outcome = flow(&pane).await;
    pane.dispose();
    if let Err(error) = outcome {
        render::report_host_error(&error);
    }

    render::print_document(&host.snapshot(), ctx.json)
}

/// Inserting at `Before` leaves the range alone: the text loaded by the
/// second flush is the original selection, untouched.
pub(crate) async fn flow(pane: &PaneSession) -> wordpane::Result<()> {
    let selection = pane.document().get_selection();
    selection.insert_text("Office 2019, ", InsertLocation::Before);
    selection.load_text();
    pane.flush().await?;

    let text = selection.text()?;
    pane.document().body().insert_paragraph(
        &format!("Current text of original range: {text}"),
        InsertLocation::End,
    );
    pane.flush().await
}
