use std::env;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "CLEAN_FOLDER_LOG";

pub fn init_logger() {
    // Defaults to `warn` so a normal run only prints the report.
    let filter = env::var(LOG_ENV).unwrap_or_else(|_| "warn".to_string());
    let filter_layer = EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter_layer)
        .init();
}
