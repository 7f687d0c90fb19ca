use thiserror::Error;

pub const ENV_ENABLED: &str = "FPS_METER_ENABLED";
pub const ENV_PERIOD_MODE: &str = "FPS_METER_PERIOD_MODE";
pub const ENV_TARGET_FPS: &str = "FPS_METER_TARGET_FPS";
pub const ENV_MAX_DELTA: &str = "FPS_METER_MAX_DELTA";

/// Startup settings for the meter and its host loop.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterConfig {
    pub enabled: bool,
    pub period_mode: bool,
    pub target_frame_rate: f64,
    /// Seconds. Used when a frame reports no elapsed time, and as the clamp
    /// for long frames.
    pub maximum_delta: f64,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            period_mode: false,
            target_frame_rate: 60.0,
            maximum_delta: 1.0 / 3.0,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{var}: expected a boolean, got {value:?}")]
    InvalidBool { var: &'static str, value: String },
    #[error("{var}: expected a positive number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

impl MeterConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from `lookup`, keeping defaults for unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_ENABLED) {
            config.enabled = parse_bool(ENV_ENABLED, &value)?;
        }
        if let Some(value) = lookup(ENV_PERIOD_MODE) {
            config.period_mode = parse_bool(ENV_PERIOD_MODE, &value)?;
        }
        if let Some(value) = lookup(ENV_TARGET_FPS) {
            config.target_frame_rate = parse_positive(ENV_TARGET_FPS, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_DELTA) {
            config.maximum_delta = parse_positive(ENV_MAX_DELTA, &value)?;
        }

        Ok(config)
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_owned(),
        }),
    }
}

fn parse_positive(var: &'static str, value: &str) -> Result<f64, ConfigError> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            var,
            value: value.to_owned(),
        }),
    }
}
