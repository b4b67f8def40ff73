use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::{BaseDirs, ProjectDirs};
use once_cell::sync::Lazy;
use thiserror::Error;

static DEFAULT_LOG_NAME: &str = "tasktimer.log";
static ENV_DATA_DIR: &str = "TASKTIMER_DATA_DIR";
static ENV_TICK_MS: &str = "TASKTIMER_TICK_MS";

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("dev", "tasktimer", "tasktimer"));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tick interval must be greater than zero milliseconds")]
    ZeroTickInterval,
    #[error("invalid tick interval '{0}': expected a whole number of milliseconds")]
    InvalidTickInterval(String),
    #[error("failed to create data directory at {}", .path.display())]
    CreateDataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to resolve the current directory")]
    CurrentDir(#[source] std::io::Error),
}

/// Which tasks a freshly mounted board starts with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Seed {
    #[default]
    Default,
    Empty,
}

/// Values supplied on the command line; they win over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub tick_ms: Option<u64>,
    pub empty: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    data_dir: PathBuf,
    log_path: PathBuf,
    tick_interval: Duration,
    seed: Seed,
}

impl AppConfig {
    /// Construct [`AppConfig`] by resolving every setting from the provided overrides,
    /// environment variables, and platform defaults.
    pub fn discover(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let data_dir = resolve_data_dir(overrides.data_dir)?;
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).map_err(|source| ConfigError::CreateDataDir {
                path: data_dir.clone(),
                source,
            })?;
        }

        let tick_interval = resolve_tick_interval(overrides.tick_ms, env::var(ENV_TICK_MS).ok())?;
        let seed = if overrides.empty {
            Seed::Empty
        } else {
            Seed::Default
        };

        Ok(Self::from_data_dir(data_dir)
            .with_tick_interval(tick_interval)?
            .with_seed(seed))
    }

    /// Construct [`AppConfig`] with default settings rooted at `data_dir`.
    pub fn from_data_dir(data_dir: PathBuf) -> Self {
        let log_path = data_dir.join(DEFAULT_LOG_NAME);
        Self {
            data_dir,
            log_path,
            tick_interval: DEFAULT_TICK_INTERVAL,
            seed: Seed::Default,
        }
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Result<Self, ConfigError> {
        if tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        self.tick_interval = tick_interval;
        Ok(self)
    }

    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }
}

fn resolve_tick_interval(
    tick_ms_override: Option<u64>,
    env_value: Option<String>,
) -> Result<Duration, ConfigError> {
    let millis = match (tick_ms_override, env_value) {
        (Some(ms), _) => ms,
        (None, Some(raw)) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidTickInterval(raw.clone()))?,
        (None, None) => return Ok(DEFAULT_TICK_INTERVAL),
    };

    if millis == 0 {
        return Err(ConfigError::ZeroTickInterval);
    }
    Ok(Duration::from_millis(millis))
}

fn resolve_data_dir(data_dir_override: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = data_dir_override {
        return Ok(dir);
    }

    if let Ok(env_dir) = env::var(ENV_DATA_DIR) {
        return Ok(PathBuf::from(env_dir));
    }

    if cfg!(debug_assertions) {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let dev_dir = manifest_dir.join("..").join("..").join("tmp").join("dev-tasktimer");
        return Ok(dev_dir);
    }

    if let Some(project) = &*PROJECT_DIRS {
        return Ok(project.data_dir().to_path_buf());
    }

    if let Some(base) = BaseDirs::new() {
        return Ok(base.home_dir().join(".tasktimer"));
    }

    Ok(env::current_dir()
        .map_err(ConfigError::CurrentDir)?
        .join(".tasktimer"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn discover_uses_overrides_and_creates_data_dir() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("nested").join("state");

        let config = AppConfig::discover(ConfigOverrides {
            data_dir: Some(data_dir.clone()),
            tick_ms: Some(250),
            empty: true,
        })
        .unwrap();

        assert!(data_dir.is_dir());
        assert_eq!(config.data_dir(), data_dir.as_path());
        assert_eq!(config.log_path(), data_dir.join("tasktimer.log").as_path());
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        assert_eq!(config.seed(), Seed::Empty);
    }

    #[test]
    fn from_data_dir_uses_defaults() {
        let config = AppConfig::from_data_dir(PathBuf::from("/tmp/tasktimer-test"));
        assert_eq!(config.tick_interval(), DEFAULT_TICK_INTERVAL);
        assert_eq!(config.seed(), Seed::Default);
    }

    #[test]
    fn tick_interval_prefers_override_over_env() {
        let interval = resolve_tick_interval(Some(10), Some("500".into())).unwrap();
        assert_eq!(interval, Duration::from_millis(10));

        let interval = resolve_tick_interval(None, Some(" 500 ".into())).unwrap();
        assert_eq!(interval, Duration::from_millis(500));

        let interval = resolve_tick_interval(None, None).unwrap();
        assert_eq!(interval, DEFAULT_TICK_INTERVAL);
    }

    #[test]
    fn tick_interval_rejects_zero_and_garbage() {
        assert!(matches!(
            resolve_tick_interval(Some(0), None),
            Err(ConfigError::ZeroTickInterval)
        ));
        assert!(matches!(
            resolve_tick_interval(None, Some("soon".into())),
            Err(ConfigError::InvalidTickInterval(raw)) if raw == "soon"
        ));
        assert!(matches!(
            AppConfig::from_data_dir(PathBuf::from("x")).with_tick_interval(Duration::ZERO),
            Err(ConfigError::ZeroTickInterval)
        ));
    }
}
