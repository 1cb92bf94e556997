use clap::Parser;
use tracing::error;
use wordpane_cli::{cli::Cli, commands, context::CommandContext, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let ctx = CommandContext::new(cli.select, cli.max_api, cli.json);

    if let Err(err) = commands::dispatch(cli.command, &ctx).await {
        error!(target = "wordpane", error = %err, "command failed");
        std::process::exit(1);
    }
}
