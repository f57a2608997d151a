//! Host configuration, read from the environment.

use std::path::PathBuf;

use clicktech_sim::EngineConfig;

use crate::error::ConfigError;

const SEED_ENV_VAR: &str = "CLICKTECH_SEED";
const HIGH_SCORE_FILE_ENV_VAR: &str = "CLICKTECH_HIGHSCORE_FILE";
const FRAME_MS_ENV_VAR: &str = "CLICKTECH_FRAME_MS";

const DEFAULT_HIGH_SCORE_FILE: &str = "highscores.json";

/// ~30 frames per second.
pub const DEFAULT_FRAME_MS: u64 = 33;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: u64,
    pub high_score_path: PathBuf,
    /// Virtual and wall-clock length of one frame.
    pub frame_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: EngineConfig::default().seed,
            high_score_path: PathBuf::from(DEFAULT_HIGH_SCORE_FILE),
            frame_ms: DEFAULT_FRAME_MS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any key lookup. Unset or blank keys keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let mut config = Self::default();
        if let Some(raw) = value(SEED_ENV_VAR) {
            config.seed = raw.parse().map_err(|_| ConfigError::Invalid {
                name: SEED_ENV_VAR,
                expected: "an unsigned integer",
                value: raw.clone(),
            })?;
        }
        if let Some(raw) = value(HIGH_SCORE_FILE_ENV_VAR) {
            config.high_score_path = PathBuf::from(raw);
        }
        if let Some(raw) = value(FRAME_MS_ENV_VAR) {
            config.frame_ms = match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: FRAME_MS_ENV_VAR,
                        expected: "a positive number of milliseconds",
                        value: raw,
                    })
                }
            };
        }
        Ok(config)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            seed: self.seed,
            high_score_path: Some(self.high_score_path.clone()),
        }
    }
}
