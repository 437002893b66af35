use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::toml_config::LogFormat;

/// Builds the filter used when `RUST_LOG` is not set.
pub fn default_filter(verbose: bool, level: Option<&str>) -> String {
    match (verbose, level) {
        (true, _) => "surface_predict=debug,warn".to_string(),
        (false, Some(level)) => format!("surface_predict={level}"),
        (false, None) => "surface_predict=warn".to_string(),
    }
}

/// Logs go to stderr; stdout is reserved for the prompts and the result line.
pub fn init_cli_logger(verbose: bool, level: Option<&str>, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, level)));

    let registry = tracing_subscriber::registry().with(filter);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}
