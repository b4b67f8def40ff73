pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod tui;

pub use tasktimer_core as core;
pub use tasktimer_core::model;

pub use tasktimer_core::AppConfig;
