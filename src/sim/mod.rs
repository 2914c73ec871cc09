//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call per timer firing, no wall-clock time
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, detect, first_hit};
pub use input::{Direction, InputState};
pub use spawner::{advance_obstacles, evict_offscreen, maybe_spawn, should_spawn, spawn_and_advance};
pub use state::{Arena, GamePhase, GameState, Obstacle, Player, SpawnSide};
pub use tick::{TickOutcome, begin_frame, resolve, tick};
