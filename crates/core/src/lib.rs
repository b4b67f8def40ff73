pub mod board;
pub mod collection;
pub mod config;
pub mod format;
pub mod ids;
pub mod model;
pub mod registry;
pub mod timer;

pub use board::TaskBoard;
pub use collection::TaskCollection;
pub use config::{AppConfig, ConfigError, ConfigOverrides, Seed};
pub use format::format_time;
pub use ids::{ClockIds, IdSource, SequentialIds};
pub use model::*;
pub use registry::TimerRegistry;
pub use timer::TimerController;
