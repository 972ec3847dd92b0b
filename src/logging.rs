use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse a `--log-level` value, falling back to INFO on garbage.
pub fn parse_level(raw: &str) -> Level {
    Level::from_str(raw).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using INFO level.", raw);
        Level::INFO
    })
}

// stdout is reserved for the answer line, so every log record goes to stderr.
pub fn init_logging(log_level: Level) {
    let level_filter = LevelFilter::from_level(log_level);
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(stderr_layer.with_filter(level_filter))
        .init();
}
