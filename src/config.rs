use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::goals::GoalTargets;
use crate::history::DEFAULT_TREND_DAYS;
use crate::logging::LogConfig;

const CONFIG_VERSION: &str = "1.0";

/// Contents of `config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// File bookkeeping
    #[serde(default)]
    pub metadata: ConfigMetadata,

    /// Daily goal targets
    #[serde(default)]
    pub goals: GoalTargets,

    /// Logging preferences
    #[serde(default)]
    pub logging: LogConfig,

    /// Terminal output preferences
    #[serde(default)]
    pub display: DisplaySettings,
}

/// Version and timestamps of a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigMetadata {
    /// Format version, currently "1.0"
    pub version: String,

    pub created_at: DateTime<Utc>,

    /// Bumped on every save
    pub updated_at: DateTime<Utc>,
}

/// Terminal output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Days shown in the report trend
    pub trend_days: usize,

    /// Colored terminal output
    pub color: bool,

    /// Seed the recommendation list with the welcome message
    pub show_welcome: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            trend_days: DEFAULT_TREND_DAYS,
            color: true,
            show_welcome: false,
        }
    }
}

impl Default for ConfigMetadata {
    fn default() -> Self {
        let now = Utc::now();

        Self {
            version: CONFIG_VERSION.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            metadata: ConfigMetadata::default(),
            goals: GoalTargets::default(),
            logging: LogConfig::default(),
            display: DisplaySettings::default(),
        }
    }
}

impl AppConfig {
    /// Read and validate a TOML config file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Invalid TOML in configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Write the config as TOML, creating parent directories
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Cannot create {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Cannot encode configuration as TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Cannot write {}", path.as_ref().display()))?;

        Ok(())
    }

    /// `~/.healthrs/config.toml`, or `./.healthrs/config.toml` without a home directory
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".healthrs")
            .join("config.toml")
    }

    /// The default config file, or built-in defaults when there is none
    ///
    /// A file that exists but fails to parse or validate is an error.
    pub fn load_or_default() -> Result<Self> {
        Self::load_or_default_from(Self::default_config_path())
    }

    /// Like `load_or_default`, for an explicit path
    pub fn load_or_default_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Configuration a command starts from
    ///
    /// An explicit `--config` file must exist, except when it is about to be
    /// created. The default location may be absent.
    pub fn resolve(explicit: Option<&Path>, initializing: bool) -> Result<Self> {
        match explicit {
            _ if initializing => Ok(Self::default()),
            Some(path) => Self::load_from_file(path),
            None => Self::load_or_default(),
        }
    }

    /// Reject goal targets that cannot be met
    pub fn validate(&self) -> Result<()> {
        let targets = [
            ("sleep", self.goals.sleep),
            ("water", self.goals.water),
            ("exercise", self.goals.exercise),
        ];
        for (name, target) in targets {
            if !target.is_finite() || target <= 0.0 {
                anyhow::bail!("Goal target for {} must be positive, got {}", name, target);
            }
        }
        if self.display.trend_days == 0 {
            anyhow::bail!("display.trend_days must be at least 1");
        }
        Ok(())
    }
}
