//! Engine configuration
//!
//! Every constant that shapes a session lives here. Rates are expressed per
//! reference tick of `tick_rate`, matching the way the flight and platformer
//! games were tuned; the engine scales them by elapsed ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ConfigResult};

/// World extents and the fixed lines the simulation measures against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Visible world width
    pub width: f32,
    /// Visible world height
    pub height: f32,
    /// Lowest position of the avatar's bottom edge
    pub ground_y: f32,
    /// Highest position of the avatar's top edge
    pub ceiling_y: f32,
    /// Inset on both sides of the usable band when placing obstacles
    pub margin: f32,
    /// Far edge where new objects appear
    pub spawn_x: f32,
    /// Objects whose trailing edge is left of this line are retired
    pub retire_x: f32,
    /// Fixed horizontal reference column for scoring and gap collisions
    pub reference_x: f32,
}

/// Avatar spawn state and kinematics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarConfig {
    /// Spawn position (top-left of the bounding box)
    pub spawn: Vec2,
    /// Bounding box size (zero for a point avatar)
    pub size: Vec2,
    /// Vertical velocity set by a flap or jump (negative is upward)
    pub launch_velocity: f32,
    /// Most negative vertical velocity allowed
    pub max_up_velocity: f32,
    /// Most positive vertical velocity allowed
    pub max_fall_velocity: f32,
    /// Vertical velocity added per tick
    pub gravity: f32,
    /// Horizontal speed while a move intent is held
    pub move_speed: f32,
    /// Vertical speed while climbing
    pub climb_speed: f32,
}

/// Obstacle family produced by the generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpawnKind {
    /// Columns with a vertical opening
    Gaps { half_gap: f32, width: f32 },
    /// Ledges, ladders and hazards; platforms take the remaining weight
    Platforms {
        width: f32,
        thickness: f32,
        ladder_width: f32,
        ladder_height: f32,
        hazard_size: f32,
        ladder_weight: f32,
        hazard_weight: f32,
    },
}

impl SpawnKind {
    /// Largest vertical half extent any spawned object can have
    pub fn max_half_extent(&self) -> f32 {
        match *self {
            SpawnKind::Gaps { half_gap, .. } => half_gap,
            SpawnKind::Platforms {
                thickness,
                ladder_height,
                hazard_size,
                ..
            } => thickness.max(ladder_height).max(hazard_size) / 2.0,
        }
    }

    /// Horizontal extent of spawned objects
    pub fn width(&self) -> f32 {
        match *self {
            SpawnKind::Gaps { width, .. } | SpawnKind::Platforms { width, .. } => width,
        }
    }
}

/// Generation and scrolling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Chance of a spawn trial succeeding on a tick
    pub probability: f32,
    /// Minimum distance between the newest object and the spawn edge
    pub min_spacing: f32,
    /// Leftward speed of every world object
    pub scroll_speed: f32,
    pub kind: SpawnKind,
}

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Reference ticks per second
    pub tick_rate: f32,
    /// Touching the ground ends the run instead of grounding the avatar
    pub lethal_ground: bool,
    pub world: WorldConfig,
    pub avatar: AvatarConfig,
    pub spawn: SpawnConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::flight()
    }
}

impl EngineConfig {
    /// Terminal flight game: a point avatar flapping through pipe gaps
    pub fn flight() -> Self {
        let width = FLIGHT_VIEWPORT_WIDTH;
        let height = FLIGHT_VIEWPORT_HEIGHT;
        let reference_x = (width / 5.0).floor();
        Self {
            tick_rate: FLIGHT_TICK_RATE,
            lethal_ground: true,
            world: WorldConfig {
                width,
                height,
                ground_y: height - 2.0,
                ceiling_y: 0.0,
                margin: 2.0,
                spawn_x: width,
                retire_x: -2.0,
                reference_x,
            },
            avatar: AvatarConfig {
                spawn: Vec2::new(reference_x, (height / 2.0).floor()),
                size: Vec2::ZERO,
                launch_velocity: FLIGHT_FLAP_VY,
                max_up_velocity: FLIGHT_MAX_FLAP_VY,
                max_fall_velocity: FLIGHT_MAX_FALL_VY,
                gravity: FLIGHT_GRAVITY,
                move_speed: 0.0,
                climb_speed: 0.0,
            },
            spawn: SpawnConfig {
                probability: FLIGHT_SPAWN_PROBABILITY,
                min_spacing: (width * 0.05).round(),
                scroll_speed: FLIGHT_PIPE_SPEED,
                kind: SpawnKind::Gaps {
                    half_gap: FLIGHT_PIPE_GAP / 2.0,
                    width: FLIGHT_PIPE_WIDTH,
                },
            },
        }
    }

    /// Window platformer: a box avatar running over scrolling ledges
    pub fn platformer() -> Self {
        let width = PLATFORMER_WINDOW_WIDTH;
        let height = PLATFORMER_WINDOW_HEIGHT;
        let ground_y = height - 40.0;
        let size = Vec2::new(28.0, 36.0);
        Self {
            tick_rate: PLATFORMER_TICK_RATE,
            lethal_ground: false,
            world: WorldConfig {
                width,
                height,
                ground_y,
                ceiling_y: 0.0,
                margin: 40.0,
                spawn_x: width,
                retire_x: -20.0,
                reference_x: 100.0,
            },
            avatar: AvatarConfig {
                spawn: Vec2::new(60.0, ground_y - size.y),
                size,
                launch_velocity: -PLATFORMER_JUMP_SPEED / PLATFORMER_TICK_RATE,
                max_up_velocity: -12.0,
                max_fall_velocity: 12.0,
                gravity: PLATFORMER_GRAVITY / (PLATFORMER_TICK_RATE * PLATFORMER_TICK_RATE),
                move_speed: PLATFORMER_MOVE_SPEED / PLATFORMER_TICK_RATE,
                climb_speed: PLATFORMER_CLIMB_SPEED / PLATFORMER_TICK_RATE,
            },
            spawn: SpawnConfig {
                probability: 0.02,
                min_spacing: 160.0,
                scroll_speed: 2.0,
                kind: SpawnKind::Platforms {
                    width: 160.0,
                    thickness: 20.0,
                    ladder_width: 20.0,
                    ladder_height: 120.0,
                    hazard_size: 26.0,
                    ladder_weight: 0.2,
                    hazard_weight: 0.25,
                },
            },
        }
    }

    pub fn with_tick_rate(mut self, tick_rate: f32) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_spawn_probability(mut self, probability: f32) -> Self {
        self.spawn.probability = probability;
        self
    }

    pub fn with_scroll_speed(mut self, scroll_speed: f32) -> Self {
        self.spawn.scroll_speed = scroll_speed;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.avatar.gravity = gravity;
        self
    }

    pub fn with_kind(mut self, kind: SpawnKind) -> Self {
        self.spawn.kind = kind;
        self
    }

    /// Duration of one reference tick in seconds
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate
    }

    /// Vertical band obstacles may occupy: `(min_edge, max_edge)`
    pub fn usable_band(&self) -> (f32, f32) {
        (
            self.world.ceiling_y + self.world.margin,
            self.world.ground_y - self.world.margin,
        )
    }

    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(ConfigError::TickRate(self.tick_rate));
        }

        let world = &self.world;
        if !(world.width > 0.0 && world.height > 0.0) {
            return Err(ConfigError::WorldExtent {
                width: world.width,
                height: world.height,
            });
        }
        if world.ground_y <= world.ceiling_y {
            return Err(ConfigError::GroundAboveCeiling {
                ground_y: world.ground_y,
                ceiling_y: world.ceiling_y,
            });
        }
        if world.retire_x >= world.reference_x {
            return Err(ConfigError::RetireBeyondReference {
                retire_x: world.retire_x,
                reference_x: world.reference_x,
            });
        }

        let avatar = &self.avatar;
        if !(avatar.max_up_velocity <= avatar.max_fall_velocity) {
            return Err(ConfigError::VelocityClamp {
                max_up: avatar.max_up_velocity,
                max_fall: avatar.max_fall_velocity,
            });
        }
        for (name, value) in [
            ("move_speed", avatar.move_speed),
            ("climb_speed", avatar.climb_speed),
            ("min_spacing", self.spawn.min_spacing),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::NegativeSpeed { name, value });
            }
        }
        // Objects that never scroll never retire
        if !(self.spawn.scroll_speed > 0.0) {
            return Err(ConfigError::NonPositiveSize {
                name: "scroll_speed",
                value: self.spawn.scroll_speed,
            });
        }

        let probability = self.spawn.probability;
        if !(0.0..=1.0).contains(&probability) {
            return Err(ConfigError::SpawnProbability(probability));
        }

        let kind = &self.spawn.kind;
        if !(kind.width() > 0.0) {
            return Err(ConfigError::NonPositiveSize {
                name: "obstacle width",
                value: kind.width(),
            });
        }
        match *kind {
            SpawnKind::Gaps { half_gap, .. } => {
                if !(half_gap > 0.0) {
                    return Err(ConfigError::NonPositiveSize {
                        name: "half_gap",
                        value: half_gap,
                    });
                }
            }
            SpawnKind::Platforms {
                thickness,
                ladder_width,
                ladder_height,
                hazard_size,
                ladder_weight,
                hazard_weight,
                ..
            } => {
                for (name, value) in [
                    ("thickness", thickness),
                    ("ladder_width", ladder_width),
                    ("ladder_height", ladder_height),
                    ("hazard_size", hazard_size),
                ] {
                    if !(value > 0.0) {
                        return Err(ConfigError::NonPositiveSize { name, value });
                    }
                }
                let weights_ok = (0.0..=1.0).contains(&ladder_weight)
                    && (0.0..=1.0).contains(&hazard_weight)
                    && ladder_weight + hazard_weight <= 1.0;
                if !weights_ok {
                    return Err(ConfigError::SpawnWeights {
                        ladder: ladder_weight,
                        hazard: hazard_weight,
                    });
                }
            }
        }

        let (min_edge, max_edge) = self.usable_band();
        let usable = max_edge - min_edge;
        let half_extent = kind.max_half_extent();
        if 2.0 * half_extent > usable {
            return Err(ConfigError::ObstacleTooLarge {
                half_extent,
                usable,
            });
        }

        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(EngineConfig::flight().validate().is_ok());
        assert!(EngineConfig::platformer().validate().is_ok());
    }

    #[test]
    fn test_flight_preset_matches_terminal_tuning() {
        let config = EngineConfig::flight();
        assert_eq!(config.tick_rate, 30.0);
        assert_eq!(config.avatar.gravity, 0.32);
        assert_eq!(config.avatar.launch_velocity, -1.7);
        assert_eq!(config.avatar.max_fall_velocity, 2.2);
        assert_eq!(config.world.ground_y, config.world.height - 2.0);
        assert_eq!(config.world.reference_x, 16.0);
        assert!(config.lethal_ground);
        assert_eq!(
            config.spawn.kind,
            SpawnKind::Gaps {
                half_gap: 4.0,
                width: 3.0
            }
        );
    }

    #[test]
    fn test_rejects_non_positive_tick_rate() {
        let err = EngineConfig::flight().with_tick_rate(0.0).validate();
        assert!(matches!(err, Err(ConfigError::TickRate(_))));

        let err = EngineConfig::flight().with_tick_rate(f32::NAN).validate();
        assert!(matches!(err, Err(ConfigError::TickRate(_))));
    }

    #[test]
    fn test_rejects_gap_larger_than_world() {
        let config = EngineConfig::flight().with_kind(SpawnKind::Gaps {
            half_gap: 12.0,
            width: 3.0,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ObstacleTooLarge { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_spawn_probability() {
        let config = EngineConfig::flight().with_spawn_probability(1.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnProbability(_))
        ));
    }

    #[test]
    fn test_rejects_inverted_clamp() {
        let mut config = EngineConfig::flight();
        config.avatar.max_up_velocity = 3.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::VelocityClamp { .. })
        ));
    }

    #[test]
    fn test_rejects_stationary_world() {
        let mut config = EngineConfig::flight()
            .with_spawn_probability(1.0)
            .with_scroll_speed(0.0);
        config.spawn.min_spacing = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveSize {
                name: "scroll_speed",
                ..
            })
        ));

        let config = EngineConfig::flight().with_scroll_speed(f32::NAN);
        assert!(config.validate().is_err());
        assert!(EngineConfig::flight().with_scroll_speed(0.5).validate().is_ok());
    }

    #[test]
    fn test_rejects_retire_line_past_reference() {
        let mut config = EngineConfig::flight();
        config.world.retire_x = config.world.reference_x;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RetireBeyondReference { .. })
        ));
    }

    #[test]
    fn test_rejects_overweight_spawn_table() {
        let mut config = EngineConfig::platformer();
        if let SpawnKind::Platforms {
            ref mut ladder_weight,
            ref mut hazard_weight,
            ..
        } = config.spawn.kind
        {
            *ladder_weight = 0.7;
            *hazard_weight = 0.5;
        }
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnWeights { .. })
        ));
    }

    #[test]
    fn test_json_round_trip_and_validation() {
        let json = EngineConfig::platformer().to_json().unwrap();
        let parsed = EngineConfig::from_json(&json).unwrap();
        assert_eq!(parsed, EngineConfig::platformer());

        let broken = json.replace("\"tick_rate\": 60.0", "\"tick_rate\": -1.0");
        assert!(matches!(
            EngineConfig::from_json(&broken),
            Err(ConfigError::TickRate(_))
        ));

        assert!(matches!(
            EngineConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
