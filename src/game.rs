//! The per-tick game loop
//!
//! Owns everything a session has (simulation state plus held keys) and runs one
//! tick per timer firing: advance the field, draw it, resolve the frame, then
//! move the player. When a run ends the user is told, every piece of session
//! state is thrown away and rebuilt, and the host is asked to restart.

use crate::renderer::{Surface, draw_frame};
use crate::settings::{Difficulty, Settings};
use crate::sim::{self, Direction, GameState, InputState, TickOutcome};

/// Host side effects triggered when a run ends
pub trait Session {
    /// Show an end-of-run message
    fn notify(&mut self, message: &str);
    /// Start the host over from scratch
    fn restart(&mut self);
}

/// A single game session
pub struct GameLoop {
    settings: Settings,
    state: GameState,
    input: InputState,
}

impl GameLoop {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let state = Self::fresh_state(&settings, seed);
        log::info!(
            "New session: {} difficulty (spawn every {} ticks), seed {}",
            settings.difficulty.as_str(),
            settings.spawn_interval(),
            seed
        );
        Self {
            settings,
            state,
            input: InputState::default(),
        }
    }

    fn fresh_state(settings: &Settings, seed: u64) -> GameState {
        let mut state = GameState::new(seed, settings.arena(), settings.spawn_interval());
        state.evict_offscreen = settings.evict_offscreen;
        state
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether no tick has run yet in this session
    pub fn is_fresh(&self) -> bool {
        self.state.frame_counter == 0
    }

    pub fn key_down(&mut self, key: &str) -> Option<Direction> {
        self.input.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) -> Option<Direction> {
        self.input.key_up(key)
    }

    /// Choose the spawn cadence; only allowed before the first tick
    ///
    /// Returns whether the change was applied.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if !self.is_fresh() {
            log::warn!(
                "Ignoring difficulty change to {} mid-session",
                difficulty.as_str()
            );
            return false;
        }
        self.settings.difficulty = difficulty;
        self.state.spawn_interval = difficulty.spawn_interval();
        log::info!(
            "Difficulty set to {} (spawn every {} ticks)",
            difficulty.as_str(),
            difficulty.spawn_interval()
        );
        true
    }

    /// Discard the session and start a new one seeded from the old run
    pub fn reset(&mut self) {
        let seed = self.state.successor_seed();
        self.restart(seed);
    }

    /// Discard the session and start a new one
    pub fn restart(&mut self, seed: u64) {
        self.state = Self::fresh_state(&self.settings, seed);
        self.input.clear();
        log::info!("Session restarted with seed {}", seed);
    }

    /// Run one timer firing
    pub fn tick<S, N>(&mut self, surface: &mut S, session: &mut N) -> TickOutcome
    where
        S: Surface + ?Sized,
        N: Session + ?Sized,
    {
        sim::begin_frame(&mut self.state);
        draw_frame(surface, &self.state);

        let outcome = sim::resolve(&mut self.state);
        if let Some(message) = outcome.message() {
            log::info!(
                "{} after {} frames ({} obstacles on the field)",
                message,
                self.state.frame_counter,
                self.state.obstacles.len()
            );
            session.notify(message);
            self.reset();
            session.restart();
            return outcome;
        }

        self.input.apply(&mut self.state.player);
        outcome
    }
}
