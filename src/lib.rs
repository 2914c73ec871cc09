//! Circle Dodge - steer a circle to the top of the canvas without getting hit
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, win/loss)
//! - `renderer`: Drawing-surface abstraction and the per-frame draw pass
//! - `game`: The fixed-period game loop tying simulation, drawing and session together
//! - `platform`: Timer/session capabilities, headless and browser implementations
//! - `settings`: Difficulty presets and host-provided configuration

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::GameLoop;
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Timer period between ticks (40 ticks per second)
    pub const TICK_PERIOD_MS: u32 = 25;

    /// Default canvas dimensions
    pub const DEFAULT_WIDTH: f32 = 600.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 10.0;
    pub const PLAYER_SPEED_X: f32 = 5.0;
    pub const PLAYER_SPEED_Y: f32 = 5.0;
    /// Player starts this far above the bottom edge (keeps the whole circle visible)
    pub const PLAYER_START_OFFSET: f32 = 10.0;
    pub const STARTING_LIVES: u8 = 3;

    /// Obstacle defaults
    pub const OBSTACLE_RADIUS: f32 = 5.0;
    /// Horizontal drift per tick
    pub const OBSTACLE_SPEED: f32 = 1.0;

    /// Spawn band: obstacles appear with y in [SPAWN_MARGIN_TOP, height - SPAWN_MARGIN_BOTTOM]
    pub const SPAWN_MARGIN_TOP: f32 = 10.0;
    pub const SPAWN_MARGIN_BOTTOM: f32 = 50.0;
}
