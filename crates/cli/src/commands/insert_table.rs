use std::sync::Arc;

use tracing::info;
use wordpane::protocol::InsertLocation;
use wordpane::EmulatorHost;

use crate::context::CommandContext;
use crate::error::Result;
use crate::host::PaneSession;
use crate::render;

pub async fn execute(host: &Arc<EmulatorHost>, ctx: &CommandContext) -> Result<()> {
    info!(target = "wordpane", "inserting a table");

    let pane = PaneSession::open(host);
    let outcome = flow(&pane).await;
    pane.dispose();
    if let Err(error) = outcome {
        render::report_host_error(&error);
    }

    render::print_document(&host.snapshot(), ctx.json)
}

pub(crate) async fn flow(pane: &PaneSession) -> wordpane::Result<()> {
    let data: Vec<Vec<String>> = [
        ["Name", "ID", "Birth City"],
        ["Bob", "434", "Chicago"],
        ["Sue", "719", "Havana"],
    ]
    .into_iter()
    .map(|row| row.into_iter().map(String::from).collect())
    .collect();

    let second = pane.document().body().paragraphs().first().next();
    second.insert_table(3, 3, InsertLocation::After, data);
    pane.flush().await
}
