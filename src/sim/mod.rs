//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep, rates scaled per reference tick
//! - Seeded RNG only
//! - Stable iteration order (scroll order, which is also spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod generator;
pub mod intent;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::Contact;
pub use generator::Spawn;
pub use intent::{Intent, IntentBuffer, IntentSet};
pub use rect::Rect;
pub use state::{Avatar, GameState, GameStatus, ObjectKind, Snapshot, WorldObject};
pub use tick::{Engine, clamp_vertical};
