//! Abstract player commands
//!
//! The input adapter writes into an [`IntentBuffer`] between ticks; each tick
//! takes one [`IntentSet`] from it. Edge intents (start, flap, restart, quit)
//! latch until taken, level intents (move, climb) stay as held.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Start,
    /// Flap in the flight game, jump in the platformer
    Flap,
    MoveLeft,
    MoveRight,
    ClimbUp,
    ClimbDown,
    Restart,
    /// Read by the host only
    Quit,
}

impl Intent {
    /// Consumed once per press rather than sampled as held
    pub fn is_edge(&self) -> bool {
        matches!(
            self,
            Intent::Start | Intent::Flap | Intent::Restart | Intent::Quit
        )
    }
}

/// Commands active for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentSet {
    pub start: bool,
    pub flap: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub climb_up: bool,
    pub climb_down: bool,
    pub restart: bool,
}

impl IntentSet {
    pub fn flap() -> Self {
        Self {
            flap: true,
            ..Default::default()
        }
    }

    pub fn restart() -> Self {
        Self {
            restart: true,
            ..Default::default()
        }
    }

    /// -1, 0 or 1; opposing moves cancel
    pub fn horizontal(&self) -> f32 {
        (self.move_right as i8 - self.move_left as i8) as f32
    }

    /// -1 (up), 0 or 1 (down); opposing climbs cancel
    pub fn vertical(&self) -> f32 {
        (self.climb_down as i8 - self.climb_up as i8) as f32
    }

    pub fn wants_start(&self) -> bool {
        self.start || self.flap
    }
}

/// Merge set written by the input adapter between ticks
#[derive(Debug, Clone, Default)]
pub struct IntentBuffer {
    latched: IntentSet,
    held: IntentSet,
    quit: bool,
}

impl IntentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Edge intents latch; level intents become held.
    pub fn press(&mut self, intent: Intent) {
        match intent {
            Intent::Start => self.latched.start = true,
            Intent::Flap => self.latched.flap = true,
            Intent::Restart => self.latched.restart = true,
            Intent::Quit => self.quit = true,
            level => self.hold(level, true),
        }
    }

    /// Set whether a level intent is currently held; edge intents ignore release
    pub fn hold(&mut self, intent: Intent, held: bool) {
        match intent {
            Intent::MoveLeft => self.held.move_left = held,
            Intent::MoveRight => self.held.move_right = held,
            Intent::ClimbUp => self.held.climb_up = held,
            Intent::ClimbDown => self.held.climb_down = held,
            edge if held => self.press(edge),
            _ => {}
        }
    }

    /// Sample for the next tick, clearing latched edges
    pub fn take(&mut self) -> IntentSet {
        let latched = std::mem::take(&mut self.latched);
        IntentSet {
            start: latched.start,
            flap: latched.flap,
            restart: latched.restart,
            ..self.held
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}
