pub mod apply_style;
pub mod change_font;
pub mod insert_html;
pub mod insert_image;
pub mod insert_paragraph;
pub mod insert_table;
pub mod insert_text_into_range;
pub mod insert_text_outside_range;
pub mod replace_text;
pub mod walkthrough;

use anyhow::anyhow;
use tracing::warn;
use wordpane::{HostTransport, WORD_API_SET, WORD_API_VERSION};

use crate::cli::Commands;
use crate::context::CommandContext;
use crate::error::Result;

pub async fn dispatch(command: Commands, ctx: &CommandContext) -> Result<()> {
    if ctx.select.is_empty() {
        return Err(anyhow!("--select needs a non-empty string").into());
    }

    let host = ctx.host();

    // The probe is local: the descriptor was learned when the transport
    // connected. An unsupported host gets a warning, not a refusal.
    let descriptor = host.descriptor();
    if !descriptor.is_set_supported(WORD_API_SET, WORD_API_VERSION) {
        warn!(
            target = "wordpane",
            set = WORD_API_SET,
            version = %WORD_API_VERSION,
            application = %descriptor.application,
            "host does not advertise the API level these flows were written for; continuing anyway"
        );
    }

    match command {
        Commands::InsertParagraph => insert_paragraph::execute(&host, ctx).await,
        Commands::ApplyStyle => apply_style::execute(&host, ctx).await,
        Commands::ChangeFont => change_font::execute(&host, ctx).await,
        Commands::InsertTextIntoRange => insert_text_into_range::execute(&host, ctx).await,
        Commands::InsertTextOutsideRange => insert_text_outside_range::execute(&host, ctx).await,
        Commands::ReplaceText => replace_text::execute(&host, ctx).await,
        Commands::InsertImage => insert_image::execute(&host, ctx).await,
        Commands::InsertHtml => insert_html::execute(&host, ctx).await,
        Commands::InsertTable => insert_table::execute(&host, ctx).await,
        Commands::Walkthrough => walkthrough::execute(&host, ctx).await,
    }
}
