//! Tunable game parameters and their validation.
//!
//! The defaults are the values the game ships with. A host may load a
//! different [`GameConfig`] (for example a larger snap radius on very small
//! screens) and should run [`validate_config`] on it first.
//!
//! ```
//! use skipper_logic::config::{validate_config, GameConfig};
//!
//! let config = GameConfig::default();
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::Viewport;
use crate::progress::MAX_STARS;

/// Distance under which a released part snaps home. Deliberately generous.
pub const DEFAULT_SNAP_THRESHOLD: f32 = 100.0;

/// Game-wide settings shared by the mini-games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Boat assembly snap radius in screen units.
    pub snap_threshold: f32,
    /// Stars awarded for finishing a boat. There is no partial credit.
    pub stars_per_level: u8,
    /// Screen the layouts are resolved against.
    pub viewport: Viewport,
    /// Fixed seed for the memory deck shuffle (None = fresh entropy).
    pub memory_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            stars_per_level: MAX_STARS,
            viewport: Viewport::default(),
            memory_seed: None,
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Snap threshold must be a positive, finite distance.
    InvalidSnapThreshold(f32),
    /// Star reward outside 0–3.
    InvalidStarReward(u8),
    /// Viewport has a non-positive or non-finite dimension.
    InvalidViewport { width: f32, height: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidSnapThreshold(t) => {
                write!(f, "snap threshold must be positive, got {}", t)
            }
            ConfigError::InvalidStarReward(s) => {
                write!(f, "star reward must be 0-{}, got {}", MAX_STARS, s)
            }
            ConfigError::InvalidViewport { width, height } => {
                write!(f, "viewport must be positive, got {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &GameConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if !(config.snap_threshold.is_finite() && config.snap_threshold > 0.0) {
        errors.push(ConfigError::InvalidSnapThreshold(config.snap_threshold));
    }
    if config.stars_per_level > MAX_STARS {
        errors.push(ConfigError::InvalidStarReward(config.stars_per_level));
    }
    let vp = config.viewport;
    if !(vp.width.is_finite() && vp.height.is_finite() && vp.width > 0.0 && vp.height > 0.0) {
        errors.push(ConfigError::InvalidViewport {
            width: vp.width,
            height: vp.height,
        });
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&GameConfig::default()).is_empty());
    }

    #[test]
    fn test_collects_every_problem() {
        let config = GameConfig {
            snap_threshold: 0.0,
            stars_per_level: 4,
            viewport: Viewport::new(-1.0, 600.0),
            memory_seed: None,
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ConfigError::InvalidStarReward(4)));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let config = GameConfig {
            snap_threshold: f32::NAN,
            ..GameConfig::default()
        };
        assert_eq!(validate_config(&config).len(), 1);
    }
}
