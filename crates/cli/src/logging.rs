use tracing_subscriber::EnvFilter;

/// Maps `-v` counts onto a tracing filter. `RUST_LOG` wins when set.
///
/// Logs go to stderr; stdout carries the document rendering.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
