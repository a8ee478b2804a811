use std::env;
use std::fmt;
use std::num::ParseIntError;
use std::path::PathBuf;

use crate::scoring::{RulesError, SamplingMode, ScoringConfig};

/// Distinguishes runtime behavior for different stages of deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration, read from the process environment and `.env`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let seed = match env::var("SCORING_SEED") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|source| ConfigError::InvalidSeed { value: raw, source })?,
            ),
            _ => None,
        };

        let jitter = match env::var("SCORING_JITTER") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidJitter { value: raw })?,
            Err(_) => true,
        };

        let rules_path = env::var("SCORING_RULES_PATH")
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringSettings {
                seed,
                jitter,
                rules_path,
            },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Inputs that shape a scoring run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringSettings {
    /// Fixed generator seed; the OS entropy source is used when absent.
    pub seed: Option<u64>,
    /// Draw scores uniformly from their ranges; midpoints when false.
    pub jitter: bool,
    pub rules_path: Option<PathBuf>,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            seed: None,
            jitter: true,
            rules_path: None,
        }
    }
}

impl ScoringSettings {
    /// Rule configuration from `rules_path` (or the defaults), with the jitter setting applied.
    pub fn scoring_config(&self) -> Result<ScoringConfig, ConfigError> {
        let config = match &self.rules_path {
            Some(path) => {
                ScoringConfig::from_path(path).map_err(|source| ConfigError::Rules {
                    path: path.clone(),
                    source,
                })?
            }
            None => ScoringConfig::default(),
        };
        Ok(config.with_sampling(SamplingMode::from_jitter(self.jitter)))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSeed {
        value: String,
        source: ParseIntError,
    },
    InvalidJitter {
        value: String,
    },
    Rules {
        path: PathBuf,
        source: RulesError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSeed { value, .. } => {
                write!(f, "SCORING_SEED must be an unsigned integer, got '{value}'")
            }
            ConfigError::InvalidJitter { value } => {
                write!(f, "SCORING_JITTER must be true or false, got '{value}'")
            }
            ConfigError::Rules { path, .. } => {
                write!(f, "rule file {} could not be loaded", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidSeed { source, .. } => Some(source),
            ConfigError::InvalidJitter { .. } => None,
            ConfigError::Rules { source, .. } => Some(source),
        }
    }
}
