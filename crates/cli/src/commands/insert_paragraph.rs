use std::sync::Arc;

use tracing::info;
use wordpane::protocol::InsertLocation;
use wordpane::EmulatorHost;

use crate::context::CommandContext;
use crate::error::Result;
use crate::host::PaneSession;
use crate::render;

const OPENING: &str = "Office has several versions, including Office 2016, Microsoft 365 subscription, and Office on the web.";

pub async fn execute(host: &Arc<EmulatorHost>, ctx: &CommandContext) -> Result<()> {
    info!(target = "wordpane", "inserting the opening paragraph");

    let pane = PaneSession::open(host);
    let outcome = flow(&pane).await;
    pane.dispose();
    if let Err(error) = outcome {
        render::report_host_error(&error);
    }

    render::print_document(&host.snapshot(), ctx.json)
}

pub(crate) async fn flow(pane: &PaneSession) -> wordpane::Result<()> {
    pane.document()
        .body()
        .insert_paragraph(OPENING, InsertLocation::Start);
    pane.flush().await
}
