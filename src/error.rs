//! Crate error types
//!
//! Gameplay itself never fails; only loading configuration does.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("pin capacity must be at least 1")]
    InvalidCapacity,

    #[error("collision threshold must be within (0, 180) degrees, got {0}")]
    InvalidThreshold(f32),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("level cap must be at least 1")]
    LevelCap,
}
