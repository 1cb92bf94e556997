use std::sync::Arc;

use tracing::info;
use wordpane::protocol::InsertLocation;
use wordpane::EmulatorHost;

use crate::context::CommandContext;
use crate::demo;
use crate::error::Result;
use crate::host::PaneSession;
use crate::render;

pub async fn execute(host: &Arc<EmulatorHost>, ctx: &CommandContext) -> Result<()> {
    info!(target = "wordpane", "inserting the demo image");

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
        .insert_inline_picture_from_base64(demo::BASE64_IMAGE, InsertLocation::End);
    pane.flush().await
}
