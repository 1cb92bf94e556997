use std::sync::Arc;

use tracing::info;
use wordpane::protocol::BuiltInStyle;
use wordpane::EmulatorHost;

use crate::context::CommandContext;
use crate::error::Result;
use crate::host::PaneSession;
use crate::render;

pub async fn execute(host: &Arc<EmulatorHost>, ctx: &CommandContext) -> Result<()> {
    info!(target = "wordpane", "styling the first paragraph");

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
        .paragraphs()
        .first()
        .set_style_built_in(BuiltInStyle::IntenseReference);
    pane.flush().await
}
