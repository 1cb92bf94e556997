use std::sync::Arc;

use tracing::info;
use wordpane::protocol::FontUpdate;
use wordpane::EmulatorHost;

use crate::context::CommandContext;
use crate::error::Result;
use crate::host::PaneSession;
use crate::render;

pub async fn execute(host: &Arc<EmulatorHost>, ctx: &CommandContext) -> Result<()> {
    info!(target = "wordpane", "changing the second paragraph's font");

    let pane = PaneSession::open(host);
    let outcome = flow(&pane).await;
    pane.dispose();
    if let Err(error) = outcome {
        render::report_host_error(&error);
    }

    render::print_document(&host.snapshot(), ctx.json)
}

pub(crate) async fn flow(pane: &PaneSession) -> wordpane::Result<()> {
    let second = pane.document().body().paragraphs().first().next();
    second.font().set(FontUpdate {
        name: Some("Courier New".to_string()),
        bold: Some(true),
        size: Some(18.0),
        ..Default::default()
    });
    pane.flush().await
}
