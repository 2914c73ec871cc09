//! Game state and core simulation types
//!
//! Everything a session owns lives in [`GameState`]. Restarting a session means
//! dropping the state and building a new one.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player reached the top edge
    Won,
    /// Player ran out of lives
    Lost,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Playfield dimensions (canvas pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Bottom-centre start position for the player
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height - PLAYER_START_OFFSET)
    }

    /// Inclusive (min, max) range of obstacle spawn heights
    pub fn spawn_band(&self) -> (i32, i32) {
        let min = SPAWN_MARGIN_TOP as i32;
        let max = (self.height - SPAWN_MARGIN_BOTTOM).floor() as i32;
        (min, max.max(min))
    }

    /// Whether vertical steps of `speed_y` from the start position land exactly on y == 0
    pub fn win_reachable(&self, speed_y: f32) -> bool {
        let start = self.player_start().y;
        speed_y > 0.0 && start >= 0.0 && (start % speed_y) == 0.0
    }
}

/// Which canvas edge an obstacle entered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnSide {
    /// Enters at x = 0, drifts right
    Left,
    /// Enters at x = width, drifts left
    Right,
}

impl SpawnSide {
    /// Horizontal origin for an obstacle entering from this side
    pub fn origin_x(&self, arena: &Arena) -> f32 {
        match self {
            SpawnSide::Left => 0.0,
            SpawnSide::Right => arena.width,
        }
    }

    /// Per-tick horizontal velocity
    pub fn velocity_x(&self) -> f32 {
        match self {
            SpawnSide::Left => OBSTACLE_SPEED,
            SpawnSide::Right => -OBSTACLE_SPEED,
        }
    }
}

/// The player-controlled circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Step size per tick on each axis
    pub speed: Vec2,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            speed: Vec2::new(PLAYER_SPEED_X, PLAYER_SPEED_Y),
        }
    }
}

/// A drifting obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub side: SpawnSide,
}

impl Obstacle {
    pub fn new(id: u32, side: SpawnSide, arena: &Arena, y: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(side.origin_x(arena), y),
            radius: OBSTACLE_RADIUS,
            side,
        }
    }

    /// Move one tick toward the opposite edge
    pub fn advance(&mut self) {
        self.pos.x += self.side.velocity_x();
    }

    /// True once the whole circle has passed the edge opposite its entry side
    pub fn is_past_far_edge(&self, arena: &Arena) -> bool {
        match self.side {
            SpawnSide::Left => self.pos.x - self.radius > arena.width,
            SpawnSide::Right => self.pos.x + self.radius < 0.0,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub arena: Arena,
    /// Ticks since the session started (first tick is frame 1)
    pub frame_counter: u64,
    /// Ticks between obstacle-pair spawns
    pub spawn_interval: u32,
    pub lives: u8,
    pub player: Player,
    /// Live obstacles in spawn order (left/right pairs stay adjacent)
    pub obstacles: Vec<Obstacle>,
    pub phase: GamePhase,
    /// Drop obstacles once they leave the canvas on the far side
    pub evict_offscreen: bool,
    pub(crate) rng: Pcg32,
    pub(crate) next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, arena: Arena, spawn_interval: u32) -> Self {
        if !arena.win_reachable(PLAYER_SPEED_Y) {
            log::warn!(
                "Arena height {} never lines up with y == 0 at step {}; the top is unreachable",
                arena.height,
                PLAYER_SPEED_Y
            );
        }

        Self {
            seed,
            arena,
            frame_counter: 0,
            spawn_interval,
            lives: STARTING_LIVES,
            player: Player::new(arena.player_start()),
            obstacles: Vec::new(),
            phase: GamePhase::Playing,
            evict_offscreen: false,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Put the player back at the bottom-centre start position
    pub fn reset_player(&mut self) {
        self.player.pos = self.arena.player_start();
    }

    /// Draw a seed for the session that replaces this one
    pub fn successor_seed(&mut self) -> u64 {
        use rand::RngCore;
        self.rng.next_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(7, Arena::default(), 25);
        assert_eq!(state.lives, 3);
        assert_eq!(state.frame_counter, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos, Vec2::new(300.0, 590.0));
        assert_eq!(state.player.radius, 10.0);
    }

    #[test]
    fn test_spawn_band() {
        assert_eq!(Arena::new(480.0, 320.0).spawn_band(), (10, 270));
        // Degenerate canvas collapses to the top margin
        assert_eq!(Arena::new(100.0, 40.0).spawn_band(), (10, 10));
    }

    #[test]
    fn test_win_reachable() {
        assert!(Arena::new(600.0, 600.0).win_reachable(5.0));
        assert!(!Arena::new(600.0, 603.0).win_reachable(5.0));
    }

    #[test]
    fn test_obstacle_far_edge() {
        let arena = Arena::new(100.0, 100.0);
        let mut left = Obstacle::new(1, SpawnSide::Left, &arena, 50.0);
        left.pos.x = 105.0;
        assert!(!left.is_past_far_edge(&arena));
        left.pos.x = 105.5;
        assert!(left.is_past_far_edge(&arena));

        let mut right = Obstacle::new(2, SpawnSide::Right, &arena, 50.0);
        assert_eq!(right.pos.x, 100.0);
        right.pos.x = -6.0;
        assert!(right.is_past_far_edge(&arena));
    }

    #[test]
    fn test_successor_seed_is_deterministic() {
        let mut a = GameState::new(42, Arena::default(), 25);
        let mut b = GameState::new(42, Arena::default(), 25);
        assert_eq!(a.successor_seed(), b.successor_seed());
    }
}
