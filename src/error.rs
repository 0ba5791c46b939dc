//! Configuration errors
//!
//! The simulation itself never fails at runtime; everything that can go wrong
//! is a bad constant and is rejected when the engine is built.

use thiserror::Error;

/// Rejected engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tick rate must be a positive finite number, got {0}")]
    TickRate(f32),

    #[error("world extents must be positive, got {width}x{height}")]
    WorldExtent { width: f32, height: f32 },

    #[error("ground ({ground_y}) must lie below the ceiling ({ceiling_y})")]
    GroundAboveCeiling { ground_y: f32, ceiling_y: f32 },

    #[error("spawn probability must be within [0, 1], got {0}")]
    SpawnProbability(f32),

    #[error("velocity clamp is inverted: max upward {max_up} exceeds max fall {max_fall}")]
    VelocityClamp { max_up: f32, max_fall: f32 },

    #[error("obstacle half extent {half_extent} does not fit the usable band of height {usable}")]
    ObstacleTooLarge { half_extent: f32, usable: f32 },

    #[error("{name} must be non-negative, got {value}")]
    NegativeSpeed { name: &'static str, value: f32 },

    #[error("{name} must be positive, got {value}")]
    NonPositiveSize { name: &'static str, value: f32 },

    #[error("retire line {retire_x} must lie left of the reference column {reference_x}")]
    RetireBeyondReference { retire_x: f32, reference_x: f32 },

    #[error("spawn weights must be within [0, 1] and sum to at most 1 (ladder {ladder}, hazard {hazard})")]
    SpawnWeights { ladder: f32, hazard: f32 },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
