// TOML config adapter - Configuration hierarchy: CLI > Env > File > Defaults

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MatchVideoError, MatchVideoResult};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "match_video.toml";

pub const ENV_FFMPEG: &str = "MATCH_VIDEO_FFMPEG";
pub const ENV_FFPROBE: &str = "MATCH_VIDEO_FFPROBE";
pub const ENV_TEMP_DIR: &str = "MATCH_VIDEO_TEMP_DIR";
pub const ENV_LOG_LEVEL: &str = "MATCH_VIDEO_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "MATCH_VIDEO_LOG_FORMAT";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human-readable output
    Pretty,
    /// Single-line human-readable output
    #[default]
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl FromStr for LogFormat {
    type Err = MatchVideoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(MatchVideoError::Config(format!(
                "Invalid log format: {}. Valid formats: pretty, compact, json",
                s
            ))),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ffmpeg binary; looked up on PATH when unset
    pub ffmpeg_path: Option<PathBuf>,
    /// ffprobe binary; looked up on PATH when unset
    pub ffprobe_path: Option<PathBuf>,
    /// Parent directory for intermediate files; the system temp dir when unset
    pub temp_dir: Option<PathBuf>,
    pub log_level: String,
    pub log_format: LogFormat,
    /// File the configuration was loaded from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            ffprobe_path: None,
            temp_dir: None,
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            source: None,
        }
    }
}

/// Values given on the command line, applied last
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    match_video: Config,
}

impl Config {
    /// Build the configuration from defaults, file, process environment and CLI overrides
    pub fn load(overrides: &ConfigOverrides) -> MatchVideoResult<Self> {
        let mut config = match &overrides.config_file {
            Some(path) => Self::load_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_overrides(overrides)?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file with a `[match_video]` table
    pub fn load_file(path: &Path) -> MatchVideoResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MatchVideoError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_toml_str(&content)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> MatchVideoResult<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| MatchVideoError::Config(format!("Failed to parse TOML config: {}", e)))?;
        Ok(file.match_video)
    }

    /// Apply environment overrides, reading variables through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> MatchVideoResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_FFMPEG) {
            self.ffmpeg_path = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup(ENV_FFPROBE) {
            self.ffprobe_path = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup(ENV_TEMP_DIR) {
            self.temp_dir = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.log_level = value;
        }
        if let Some(value) = lookup(ENV_LOG_FORMAT) {
            self.log_format = value.parse()?;
        }

        Ok(())
    }

    /// Apply command-line overrides
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> MatchVideoResult<()> {
        if let Some(level) = &overrides.log_level {
            self.log_level = level.clone();
        }
        if let Some(format) = &overrides.log_format {
            self.log_format = format.parse()?;
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> MatchVideoResult<()> {
        let level = self.log_level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(MatchVideoError::Config(format!(
                "Invalid log level: {}. Valid levels: {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        if let Some(dir) = &self.temp_dir {
            if !dir.is_dir() {
                return Err(MatchVideoError::Config(format!(
                    "Temp directory does not exist: {}",
                    dir.display()
                )));
            }
        }

        Ok(())
    }
}
