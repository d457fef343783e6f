// Controller tuning - content constants that used to be baked into states

use std::path::Path;

use serde::Deserialize;

use crate::game::world::AnimationId;

/// Tuning values for the player state machine.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    /// Seconds a single gather takes
    pub gather_duration: f32,
    /// Items credited per successful gather
    pub gather_yield: u32,
    /// Radius of the shake applied to a node while it is gathered
    pub gather_jitter: f32,
    /// Seconds a specialized ability's effect lingers after the cast completes
    pub effect_linger: f32,
    /// Animator state that blocks new actions while Ready
    pub ability_lockout: AnimationId,
    /// Seed for the gather jitter RNG
    pub rng_seed: u64,
}

/// Default tuning
pub const DEFAULT_CONFIG: ControllerConfig = ControllerConfig {
    gather_duration: 1.0,
    gather_yield: 5,
    gather_jitter: 0.1,
    effect_linger: 1.0,
    ability_lockout: AnimationId::AbilityFinish,
    rng_seed: 0,
};

impl Default for ControllerConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ControllerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Reject values that would stall or break the state machine
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gather_duration.is_finite() || self.gather_duration <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "gather_duration",
                reason: format!("must be positive and finite, got {}", self.gather_duration),
            });
        }
        if self.gather_yield == 0 {
            return Err(ConfigError::Invalid {
                field: "gather_yield",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.gather_jitter.is_finite() || self.gather_jitter < 0.0 {
            return Err(ConfigError::Invalid {
                field: "gather_jitter",
                reason: format!("must be finite and not negative, got {}", self.gather_jitter),
            });
        }
        if !self.effect_linger.is_finite() || self.effect_linger < 0.0 {
            return Err(ConfigError::Invalid {
                field: "effect_linger",
                reason: format!("must be finite and not negative, got {}", self.effect_linger),
            });
        }
        Ok(())
    }
}
