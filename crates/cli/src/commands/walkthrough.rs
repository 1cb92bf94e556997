use std::sync::Arc;

use colored::Colorize;
use tracing::info;
use wordpane::EmulatorHost;

use crate::context::CommandContext;
use crate::error::Result;
use crate::host::PaneSession;
use crate::render;

use super::{
    apply_style, change_font, insert_html, insert_image, insert_paragraph, insert_table,
    insert_text_into_range, insert_text_outside_range, replace_text,
};

/// Runs every demo flow in order against the one host. Each step acquires
/// and disposes its own session; the document carries over.
pub async fn execute(host: &Arc<EmulatorHost>, ctx: &CommandContext) -> Result<()> {
    info!(target = "wordpane", "running every demo flow in order");

    let pane = PaneSession::open(host);
    let outcome = insert_paragraph::flow(&pane).await;
    pane.dispose();
    after_step(host, ctx, "insert-paragraph", outcome)?;

    let pane = PaneSession::open(host);
    let outcome = apply_style::flow(&pane).await;
    pane.dispose();
    after_step(host, ctx, "apply-style", outcome)?;

    let pane = PaneSession::open(host);
    let outcome = change_font::flow(&pane).await;
    pane.dispose();
    after_step(host, ctx, "change-font", outcome)?;

    let pane = PaneSession::open(host);
    let outcome = insert_text_into_range::flow(&pane).await;
    pane.dispose();
    after_step(host, ctx, "insert-text-into-range", outcome)?;

    let pane = PaneSession::open(host);
    let outcome = insert_text_outside_range::flow(&pane).await;
    pane.dispose();
    after_step(host, ctx, "insert-text-outside-range", outcome)?;

    let pane = PaneSession::open(host);
    let outcome = replace_text::flow(&pane).await;
    pane.dispose();
    after_step(host, ctx, "replace-text", outcome)?;

    let pane = PaneSession::open(host);
    let outcome = insert_image::flow(&pane).await;
    pane.dispose();
    after_step(host, ctx, "insert-image", outcome)?;

    let pane = PaneSession::open(host);
    let outcome = insert_html::flow(&pane).await;
    pane.dispose();
    after_step(host, ctx, "insert-html", outcome)?;

    let pane = PaneSession::open(host);
    let outcome = insert_table::flow(&pane).await;
    pane.dispose();
    after_step(host, ctx, "insert-table", outcome)?;

    // JSON mode prints the finished document once instead of per step.
    if ctx.json {
        render::print_document(&host.snapshot(), true)?;
    }
    Ok(())
}

fn after_step(
    host: &Arc<EmulatorHost>,
    ctx: &CommandContext,
    name: &str,
    outcome: wordpane::Result<()>,
) -> Result<()> {
    if let Err(error) = outcome {
        render::report_host_error(&error);
    }
    if !ctx.json {
        println!("{}", format!("after {name}:").bold());
        render::print_document(&host.snapshot(), false)?;
        println!();
    }
    Ok(())
}
