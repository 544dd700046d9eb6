//! Logging initialization with environment-based formatters
//!
//! - Production: Structured JSON logs for the hosting platform's log drain
//! - Sandbox: Colorful, human-readable logs for development

use crate::config::get_environment;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Upstream HTTP stacks are noisy at `info`.
const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

/// Whether an environment name selects JSON output.
pub fn is_production(environment: &str) -> bool {
    matches!(
        environment.trim().to_lowercase().as_str(),
        "production" | "prod"
    )
}

/// Initialize logging for the environment named by `ENVIRONMENT`.
pub fn init_logging() {
    init_logging_for(&get_environment());
}

/// Initialize logging for an explicit environment name. `RUST_LOG`
/// overrides the default filter.
pub fn init_logging_for(environment: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let production = is_production(environment);

    let json = production.then(|| {
        fmt::layer()
            .json()
            .with_current_span(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stdout)
    });
    let pretty = (!production).then(|| {
        fmt::layer()
            .with_target(false)
            .with_ansi(true)
            .with_writer(std::io::stdout)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json)
        .with(pretty)
        .init();
}
