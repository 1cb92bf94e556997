use std::sync::Arc;

use tracing::info;
use wordpane::protocol::InsertLocation;
use wordpane::EmulatorHost;

use crate::context::CommandContext;
use crate::error::Result;
use crate::host::PaneSession;
use crate::render;

const FRAGMENT: &str =
    "<p style='font-family: verdana;'>Inserted HTML.</p><p>Another paragraph</p>";

pub async fn execute(host: &Arc<EmulatorHost>, ctx: &CommandContext) -> Result<()> {
    info!(target = "wordpane", "appending an HTML fragment");

    let pane = PaneSession::open(host);
    let outcome = flow(&pane).await;
    pane.dispose();
    if let Err(error) = outcome {
        render::report_host_error(&error);
    }

    render::print_document(&host.snapshot(), ctx.json)
}

pub(crate) async fn flow(pane: &PaneSession) -> wordpane::Result<()> {
    let blank = pane
        .document()
        .body()
        .paragraphs()
        .last()
        .insert_paragraph("", InsertLocation::After);
    blank.insert_html(FRAGMENT, InsertLocation::End);
    pane.flush().await
}
