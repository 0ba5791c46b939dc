//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. A Playing
//! tick runs, in order: impulses, forces, position integration, world-bound
//! clamping, object advance and retirement, generation, collision and
//! scoring.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{self, Contact};
use super::generator;
use super::intent::{IntentBuffer, IntentSet};
use super::state::{GameState, GameStatus, Snapshot, WorldObject};
use crate::config::EngineConfig;
use crate::error::ConfigResult;

/// Clamp a vertical velocity to `[max_up, max_fall]`
#[inline]
pub fn clamp_vertical(vy: f32, max_up: f32, max_fall: f32) -> f32 {
    vy.clamp(max_up, max_fall)
}

/// Simulation engine: configuration, state, random source and intent buffer
#[derive(Debug, Clone)]
pub struct Engine<R = Pcg32> {
    config: EngineConfig,
    state: GameState,
    rng: R,
    seed: Option<u64>,
    intents: IntentBuffer,
}

impl Engine<Pcg32> {
    /// Engine with the default seeded random source
    pub fn new(config: EngineConfig, seed: u64) -> ConfigResult<Self> {
        let mut engine = Self::with_rng(config, Pcg32::seed_from_u64(seed))?;
        engine.seed = Some(seed);
        Ok(engine)
    }
}

impl<R: Rng> Engine<R> {
    /// Engine with a caller-supplied random source
    pub fn with_rng(config: EngineConfig, rng: R) -> ConfigResult<Self> {
        config.validate()?;
        let state = GameState::new(&config);
        Ok(Self {
            config,
            state,
            rng,
            seed: None,
            intents: IntentBuffer::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot(self.seed)
    }

    pub fn intents(&self) -> &IntentBuffer {
        &self.intents
    }

    /// Buffer the input adapter writes into between ticks
    pub fn intents_mut(&mut self) -> &mut IntentBuffer {
        &mut self.intents
    }

    /// Take this tick's intents from the owned buffer and step
    pub fn advance(&mut self, dt: f32) {
        let intents = self.intents.take();
        self.step(dt, &intents);
    }

    /// Advance the game by `dt` seconds
    pub fn step(&mut self, dt: f32, intents: &IntentSet) {
        match self.state.status {
            GameStatus::NotStarted => {
                if intents.wants_start() {
                    self.begin_run();
                }
            }
            GameStatus::GameOver => {
                if intents.restart {
                    self.state.reset_run(&self.config);
                    self.begin_run();
                }
            }
            GameStatus::Playing => self.play(dt, intents),
        }
    }

    fn begin_run(&mut self) {
        self.state.status = GameStatus::Playing;
        self.state.avatar.vel = Vec2::ZERO;
        self.state.runs += 1;
        log::info!("Run {} started", self.state.runs);
    }

    fn end_run(&mut self, cause: &str) {
        self.state.status = GameStatus::GameOver;
        self.state.best_score = self.state.best_score.max(self.state.score);
        log::info!(
            "Game over ({}) after {} ticks, score {}",
            cause,
            self.state.tick,
            self.state.score
        );
    }

    fn play(&mut self, dt: f32, intents: &IntentSet) {
        let ticks = dt * self.config.tick_rate;
        if !(ticks.is_finite() && ticks > 0.0) {
            log::trace!("Ignoring step with dt {}", dt);
            return;
        }
        self.state.tick += 1;

        let prev_bottom = self.state.avatar.bottom();
        let on_ladder = self.apply_impulses(intents);
        self.apply_forces(ticks, on_ladder);
        let avatar = &mut self.state.avatar;
        avatar.pos += avatar.vel * ticks;

        if self.clamp_to_world() {
            self.end_run("ground");
            return;
        }

        let retired = self.advance_objects(ticks);
        self.generate();

        if self.resolve_collisions(prev_bottom, &retired) {
            self.end_run("collision");
            return;
        }

        self.award(&retired);
    }

    /// Set velocities from intents; returns whether gravity is suspended
    fn apply_impulses(&mut self, intents: &IntentSet) -> bool {
        let cfg = &self.config.avatar;
        let avatar = &mut self.state.avatar;

        avatar.vel.x = intents.horizontal() * cfg.move_speed;

        // On a ladder the climb intents alone drive vertical motion
        let on_ladder = avatar.on_climbable;
        if on_ladder {
            avatar.vel.y = intents.vertical() * cfg.climb_speed;
        }

        // Flyers flap anywhere; runners need footing
        let can_launch = self.config.lethal_ground || avatar.on_ground || avatar.on_climbable;
        if intents.flap && can_launch {
            avatar.vel.y = cfg.launch_velocity;
            avatar.on_ground = false;
            return false;
        }
        on_ladder
    }

    fn apply_forces(&mut self, ticks: f32, on_ladder: bool) {
        let cfg = &self.config.avatar;
        let vel = &mut self.state.avatar.vel;
        if !on_ladder {
            vel.y += cfg.gravity * ticks;
        }
        vel.y = clamp_vertical(vel.y, cfg.max_up_velocity, cfg.max_fall_velocity);
    }

    /// Keep the avatar inside the world; returns true on a lethal ground hit
    fn clamp_to_world(&mut self) -> bool {
        let world = &self.config.world;
        let avatar = &mut self.state.avatar;
        avatar.on_ground = false;

        let max_x = (world.width - avatar.size.x).max(0.0);
        if avatar.pos.x < 0.0 {
            avatar.pos.x = 0.0;
            avatar.vel.x = 0.0;
        } else if avatar.pos.x > max_x {
            avatar.pos.x = max_x;
            avatar.vel.x = 0.0;
        }

        if avatar.pos.y < world.ceiling_y {
            avatar.pos.y = world.ceiling_y;
            avatar.vel.y = 0.0;
        }

        if avatar.bottom() >= world.ground_y {
            avatar.pos.y = world.ground_y - avatar.size.y;
            if self.config.lethal_ground {
                return true;
            }
            avatar.on_ground = true;
            avatar.vel.y = 0.0;
        }
        false
    }

    /// Scroll every object and retire those past the retire line
    ///
    /// Returns the objects retired this tick. Their final advance may have
    /// swept across the reference column, so collision and scoring still
    /// see them once.
    fn advance_objects(&mut self, ticks: f32) -> Vec<WorldObject> {
        let distance = self.config.spawn.scroll_speed * ticks;
        let retire_x = self.config.world.retire_x;
        let mut retired = Vec::new();

        self.state.objects.retain_mut(|obj| {
            obj.advance(distance);
            if obj.trailing_edge() >= retire_x {
                return true;
            }
            log::debug!("Retired object {}", obj.id);
            retired.push(obj.clone());
            false
        });
        retired
    }

    fn generate(&mut self) {
        let newest = self.state.objects.last();
        let Some(spawn) = generator::roll(&self.config, newest, &mut self.rng) else {
            return;
        };
        let id = self.state.next_object_id();
        log::debug!("Spawned object {} {:?} at x={}", id, spawn.kind, spawn.x);
        self.state
            .objects
            .push(WorldObject::new(id, spawn.x, spawn.width, spawn.kind));

        debug_assert!(
            self.state.objects.windows(2).all(|w| w[0].x <= w[1].x),
            "world objects out of scroll order"
        );
    }

    /// Classify contacts and apply support; returns true on a blocking contact
    fn resolve_collisions(&mut self, prev_bottom: f32, retired: &[WorldObject]) -> bool {
        let reference_x = self.config.world.reference_x;
        let mut support: Option<f32> = None;
        let mut climbable = false;

        for obj in self.state.objects.iter().chain(retired) {
            let contact = collision::resolve(&self.state.avatar, prev_bottom, reference_x, obj);
            if contact.is_blocking() {
                log::debug!("Blocked by object {}", obj.id);
                return true;
            }
            match contact {
                // Several tops crossed in one tick: land on the highest
                Contact::Supported { top } => {
                    support = Some(support.map_or(top, |t| t.min(top)));
                }
                Contact::Climbable => climbable = true,
                Contact::Blocked | Contact::None => {}
            }
        }

        let avatar = &mut self.state.avatar;
        avatar.on_climbable = climbable;
        if let Some(top) = support {
            avatar.pos.y = top - avatar.size.y;
            avatar.vel.y = 0.0;
            avatar.on_ground = true;
        }
        false
    }

    /// One point per object whose trailing edge crossed the reference column
    fn award(&mut self, retired: &[WorldObject]) {
        let reference_x = self.config.world.reference_x;
        let crossed = self
            .state
            .objects
            .iter()
            .chain(retired)
            .filter(|obj| obj.crossed(reference_x))
            .count() as u64;

        if crossed > 0 {
            self.state.score += crossed;
            self.state.best_score = self.state.best_score.max(self.state.score);
            log::debug!("Score {}", self.state.score);
        }
    }
}
