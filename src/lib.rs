pub use tasktimer_tui::cli;
pub use tasktimer_tui::commands;
pub use tasktimer_tui::config;
pub use tasktimer_tui::logging;
pub use tasktimer_tui::tui;
pub use tasktimer_tui::AppConfig;

pub use tasktimer_core as core;
pub use tasktimer_core::model;
pub use tasktimer_core::{format_time, TaskBoard, TaskCollection};
