pub use tasktimer_core::config::*;

use anyhow::Context;

use crate::cli::Cli;

pub fn from_cli(cli: &Cli) -> anyhow::Result<AppConfig> {
    AppConfig::discover(ConfigOverrides {
        data_dir: cli.data_dir.clone(),
        tick_ms: cli.tick_ms,
        empty: cli.empty,
    })
    .context("failed to resolve configuration")
}
