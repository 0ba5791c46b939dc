//! Game state and core simulation types
//!
//! Everything a renderer needs to draw a frame is reachable from [`Snapshot`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::EngineConfig;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Waiting for the first start intent
    #[default]
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run ended; frozen until restart
    GameOver,
}

/// The player-controlled entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Resting on the ground or a platform top
    pub on_ground: bool,
    /// Overlapping a ladder; climbing suspends gravity
    pub on_climbable: bool,
}

impl Avatar {
    /// Avatar at rest at the configured spawn point
    pub fn spawn(config: &EngineConfig) -> Self {
        Self {
            pos: config.avatar.spawn,
            vel: Vec2::ZERO,
            size: config.avatar.size,
            on_ground: false,
            on_climbable: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.pos, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Geometry of a world object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Solid column with an opening `[center - half_gap, center + half_gap)`
    Gap { center: f32, half_gap: f32 },
    /// One-way ledge, solid only from above
    Platform { top: f32, thickness: f32 },
    /// Climbable surface
    Ladder { top: f32, height: f32 },
    /// Lethal on contact
    Hazard { top: f32, size: f32 },
}

/// A scrolling obstacle or platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldObject {
    pub id: u32,
    /// Leading (left) edge
    pub x: f32,
    /// Leading edge before the most recent advance
    pub prev_x: f32,
    pub width: f32,
    pub kind: ObjectKind,
}

impl WorldObject {
    pub fn new(id: u32, x: f32, width: f32, kind: ObjectKind) -> Self {
        Self {
            id,
            x,
            prev_x: x,
            width,
            kind,
        }
    }

    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn prev_trailing_edge(&self) -> f32 {
        self.prev_x + self.width
    }

    /// Scroll left by `distance`, remembering where it was
    pub fn advance(&mut self, distance: f32) {
        self.prev_x = self.x;
        self.x -= distance;
    }

    /// Trailing edge went from right of `line` to on-or-left of it during the last advance
    pub fn crossed(&self, line: f32) -> bool {
        self.prev_trailing_edge() > line && self.trailing_edge() <= line
    }

    /// Opening `(top, bottom)` for gap obstacles
    pub fn opening(&self) -> Option<(f32, f32)> {
        match self.kind {
            ObjectKind::Gap { center, half_gap } => Some((center - half_gap, center + half_gap)),
            _ => None,
        }
    }

    /// Bounding box for rectangular kinds
    pub fn bounds(&self) -> Option<Rect> {
        let (top, height) = match self.kind {
            ObjectKind::Gap { .. } => return None,
            ObjectKind::Platform { top, thickness } => (top, thickness),
            ObjectKind::Ladder { top, height } => (top, height),
            ObjectKind::Hazard { top, size } => (top, size),
        };
        Some(Rect::new(self.x, top, self.width, height))
    }
}

/// Complete mutable state of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    pub avatar: Avatar,
    /// Scroll order: oldest (leftmost) first
    pub objects: Vec<WorldObject>,
    pub score: u64,
    /// Best score this session (not persisted)
    pub best_score: u64,
    /// Playing ticks in the current run
    pub tick: u64,
    /// Runs started this session
    pub runs: u32,
    next_id: u32,
}

impl GameState {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            status: GameStatus::NotStarted,
            avatar: Avatar::spawn(config),
            objects: Vec::new(),
            score: 0,
            best_score: 0,
            tick: 0,
            runs: 0,
            next_id: 1,
        }
    }

    /// Allocate a new object ID
    pub fn next_object_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Back to spawn defaults with an empty world and zero score
    pub fn reset_run(&mut self, config: &EngineConfig) {
        self.avatar = Avatar::spawn(config);
        self.objects.clear();
        self.score = 0;
        self.tick = 0;
    }

    pub fn snapshot(&self, seed: Option<u64>) -> Snapshot {
        Snapshot {
            seed,
            status: self.status,
            avatar: self.avatar.clone(),
            objects: self.objects.clone(),
            score: self.score,
            best_score: self.best_score,
            tick: self.tick,
            runs: self.runs,
        }
    }
}

/// Read-only copy of the state after a completed step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Seed of the default random source, if the engine was built from one
    pub seed: Option<u64>,
    pub status: GameStatus,
    pub avatar: Avatar,
    pub objects: Vec<WorldObject>,
    pub score: u64,
    pub best_score: u64,
    pub tick: u64,
    pub runs: u32,
}
