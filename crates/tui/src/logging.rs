use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

const DEFAULT_DIRECTIVE: &str = "info";

/// Route tracing output to the log file under the data directory.
///
/// The terminal belongs to the TUI, so nothing is written to stderr. Calling
/// this more than once keeps the first subscriber.
pub fn init(config: &AppConfig, filter: Option<String>) -> Result<()> {
    let env_filter = build_filter(filter)?;
    let log_path = config.log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("failed to open log file at {}", log_path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init();
    Ok(())
}

/// `--log` wins over `RUST_LOG`, which wins over the default directive.
fn build_filter(filter: Option<String>) -> Result<EnvFilter> {
    if let Some(filter) = filter {
        return EnvFilter::builder()
            .parse(&filter)
            .with_context(|| format!("invalid log directive '{filter}'"));
    }

    let directive: Directive = DEFAULT_DIRECTIVE
        .parse()
        .context("invalid default log directive")?;
    Ok(EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy())
}
