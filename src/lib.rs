//! Scroll Arcade - a deterministic engine for scrolling arcade games
//!
//! One engine drives both a vertical flight game (flap through gaps, the
//! ground kills) and a horizontal platformer (run, jump and climb over
//! scrolling ledges, the ground holds you).
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, generation, game state)
//! - `config`: Session constants and validation
//! - `timestep`: Fixed-rate scheduling support for hosts
//!
//! Rendering and raw input decoding live outside this crate; hosts read
//! [`sim::Snapshot`] and write intents through [`sim::IntentBuffer`].

pub mod config;
pub mod error;
pub mod sim;
pub mod timestep;

pub use config::{AvatarConfig, EngineConfig, SpawnConfig, SpawnKind, WorldConfig};
pub use error::{ConfigError, ConfigResult};
pub use sim::{Engine, GameStatus, Intent, IntentBuffer, IntentSet, Snapshot};
pub use timestep::FixedTimestep;

/// Tuning constants for the built-in presets
pub mod consts {
    /// Flight game tick rate (Hz)
    pub const FLIGHT_TICK_RATE: f32 = 30.0;
    /// Flight viewport (terminal columns x rows, one row kept for the HUD)
    pub const FLIGHT_VIEWPORT_WIDTH: f32 = 80.0;
    pub const FLIGHT_VIEWPORT_HEIGHT: f32 = 23.0;
    /// Bird kinematics, per tick
    pub const FLIGHT_GRAVITY: f32 = 0.32;
    pub const FLIGHT_FLAP_VY: f32 = -1.7;
    pub const FLIGHT_MAX_FALL_VY: f32 = 2.2;
    pub const FLIGHT_MAX_FLAP_VY: f32 = -2.2;
    /// Pipes: columns per tick (more than a pipe width), spawn chance per tick, opening height, width
    pub const FLIGHT_PIPE_SPEED: f32 = 3.1;
    pub const FLIGHT_SPAWN_PROBABILITY: f32 = 0.028;
    pub const FLIGHT_PIPE_GAP: f32 = 8.0;
    pub const FLIGHT_PIPE_WIDTH: f32 = 3.0;

    /// Platformer tick rate (Hz)
    pub const PLATFORMER_TICK_RATE: f32 = 60.0;
    /// Platformer window (pixels)
    pub const PLATFORMER_WINDOW_WIDTH: f32 = 800.0;
    pub const PLATFORMER_WINDOW_HEIGHT: f32 = 600.0;
    /// Runner kinematics in pixels per second (converted to per tick by the preset)
    pub const PLATFORMER_GRAVITY: f32 = 1200.0;
    pub const PLATFORMER_MOVE_SPEED: f32 = 220.0;
    pub const PLATFORMER_JUMP_SPEED: f32 = 520.0;
    pub const PLATFORMER_CLIMB_SPEED: f32 = 180.0;

    /// Longest frame the scheduler will account for (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.1;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
