//! Fixed-period simulation tick
//!
//! A tick is split into phases so the game loop can draw between advancing
//! the field and resolving the outcome, the same order the frame is shown in:
//! 1. [`begin_frame`]: count the frame, spawn and drift obstacles
//! 2. (caller draws)
//! 3. [`resolve`]: win check, then collision / life loss
//! 4. [`InputState::apply`]: move the player for the next frame

use super::collision::first_hit;
use super::input::InputState;
use super::spawner::spawn_and_advance;
use super::state::{GamePhase, GameState};

/// What a tick did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing notable happened
    Continue,
    /// Player was hit but still has lives; it is back at the start position
    LifeLost { remaining: u8 },
    /// Player reached the top edge
    Won,
    /// Player was hit on its last life
    Lost,
}

impl TickOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickOutcome::Won | TickOutcome::Lost)
    }

    /// Message shown to the user when the session ends
    pub fn message(&self) -> Option<&'static str> {
        match self {
            TickOutcome::Won => Some("You Win!"),
            TickOutcome::Lost => Some("You Lose"),
            _ => None,
        }
    }

    fn from_phase(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Playing => TickOutcome::Continue,
            GamePhase::Won => TickOutcome::Won,
            GamePhase::Lost => TickOutcome::Lost,
        }
    }
}

/// Count the frame, then spawn and drift obstacles
pub fn begin_frame(state: &mut GameState) {
    state.frame_counter += 1;
    spawn_and_advance(state);
}

/// Evaluate the end-of-frame conditions
///
/// The top edge is only reached at exactly y == 0. A collision costs one life
/// and sends the player back to the start; losing the last life ends the run.
pub fn resolve(state: &mut GameState) -> TickOutcome {
    if state.phase.is_terminal() {
        return TickOutcome::from_phase(state.phase);
    }

    if state.player.pos.y == 0.0 {
        state.phase = GamePhase::Won;
        log::info!("Reached the top on frame {}", state.frame_counter);
        return TickOutcome::Won;
    }

    if let Some(index) = first_hit(&state.player, &state.obstacles) {
        state.lives = state.lives.saturating_sub(1);
        state.reset_player();
        log::debug!(
            "Frame {}: hit obstacle {} ({} lives left)",
            state.frame_counter,
            state.obstacles[index].id,
            state.lives
        );

        if state.lives == 0 {
            state.phase = GamePhase::Lost;
            log::info!("Out of lives on frame {}", state.frame_counter);
            return TickOutcome::Lost;
        }
        return TickOutcome::LifeLost {
            remaining: state.lives,
        };
    }

    TickOutcome::Continue
}

/// Advance the game state by one tick without drawing
///
/// A state that already ended is left untouched.
pub fn tick(state: &mut GameState, input: &InputState) -> TickOutcome {
    if state.phase.is_terminal() {
        return TickOutcome::from_phase(state.phase);
    }

    begin_frame(state);
    let outcome = resolve(state);
    input.apply(&mut state.player);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Arena, Obstacle, SpawnSide};
    use glam::Vec2;

    fn fresh_state() -> GameState {
        GameState::new(12345, Arena::default(), 25)
    }

    /// Obstacle parked on top of the player's start position
    fn obstacle_on_start(state: &GameState) -> Obstacle {
        let start = state.arena.player_start();
        let mut o = Obstacle::new(999, SpawnSide::Left, &state.arena, start.y);
        o.pos.x = start.x;
        o
    }

    #[test]
    fn test_first_tick_spawns_pair() {
        let mut state = fresh_state();
        let outcome = tick(&mut state, &InputState::default());
        assert_eq!(outcome, TickOutcome::Continue);
        assert_eq!(state.frame_counter, 1);
        assert_eq!(state.obstacles.len(), 2);
    }

    #[test]
    fn test_spawn_frames_medium() {
        let mut state = fresh_state();
        let mut counts = Vec::new();
        for _ in 0..76 {
            tick(&mut state, &InputState::default());
            counts.push(state.obstacles.len());
        }
        // counts[i] is the obstacle count after frame i + 1
        assert_eq!(counts[23], 2);
        assert_eq!(counts[24], 4);
        assert_eq!(counts[25], 4);
        assert_eq!(counts[49], 6);
        assert_eq!(counts[74], 8);
    }

    #[test]
    fn test_collision_costs_a_life() {
        let mut state = fresh_state();
        state.player.pos = Vec2::new(42.0, 300.0);
        let mut o = obstacle_on_start(&state);
        o.pos = Vec2::new(45.0, 300.0);
        state.obstacles.push(o);

        let outcome = resolve(&mut state);
        assert_eq!(outcome, TickOutcome::LifeLost { remaining: 2 });
        assert_eq!(state.lives, 2);
        assert_eq!(state.player.pos, Vec2::new(300.0, 590.0));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_last_life_loses() {
        let mut state = fresh_state();
        state.lives = 1;
        let o = obstacle_on_start(&state);
        state.obstacles.push(o);

        let outcome = resolve(&mut state);
        assert_eq!(outcome, TickOutcome::Lost);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::Lost);
        assert_eq!(outcome.message(), Some("You Lose"));
    }

    #[test]
    fn test_win_at_exactly_zero() {
        let mut state = fresh_state();
        state.player.pos.y = 0.0;
        // Sitting on an obstacle does not matter once the top is reached
        let mut o = obstacle_on_start(&state);
        o.pos = state.player.pos;
        state.obstacles.push(o);
        state.lives = 1;

        assert_eq!(resolve(&mut state), TickOutcome::Won);
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.lives, 1);
    }

    #[test]
    fn test_no_win_past_zero() {
        let mut state = fresh_state();
        state.player.pos.y = -0.5;
        assert_eq!(resolve(&mut state), TickOutcome::Continue);
        state.player.pos.y = 0.5;
        assert_eq!(resolve(&mut state), TickOutcome::Continue);
    }

    #[test]
    fn test_climb_to_top_wins() {
        // Interval 0: only the frame-1 pair, which stays near the side edges
        let mut state = GameState::new(5, Arena::default(), 0);
        let input = InputState {
            up: true,
            ..Default::default()
        };

        let mut outcome = TickOutcome::Continue;
        let mut ticks = 0;
        while !outcome.is_terminal() && ticks < 1000 {
            outcome = tick(&mut state, &input);
            ticks += 1;
        }

        // 590 / 5 = 118 steps up, seen on the following tick
        assert_eq!(outcome, TickOutcome::Won);
        assert_eq!(ticks, 119);
    }

    #[test]
    fn test_terminal_state_is_frozen() {
        let mut state = fresh_state();
        state.phase = GamePhase::Lost;
        let frame = state.frame_counter;
        assert_eq!(tick(&mut state, &InputState::default()), TickOutcome::Lost);
        assert_eq!(state.frame_counter, frame);
    }

    #[test]
    fn test_input_applied_after_resolve() {
        let mut state = fresh_state();
        state.player.pos.y = 5.0;
        let input = InputState {
            up: true,
            ..Default::default()
        };
        // Moves onto y == 0 this tick, the win shows up on the next one
        assert_eq!(tick(&mut state, &input), TickOutcome::Continue);
        assert_eq!(state.player.pos.y, 0.0);
        assert_eq!(tick(&mut state, &InputState::default()), TickOutcome::Won);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999, Arena::default(), 10);
        let mut b = GameState::new(99999, Arena::default(), 10);
        let inputs = [
            InputState {
                left: true,
                ..Default::default()
            },
            InputState {
                up: true,
                ..Default::default()
            },
            InputState::default(),
        ];

        for i in 0..300 {
            let input = &inputs[i % inputs.len()];
            assert_eq!(tick(&mut a, input), tick(&mut b, input));
        }

        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.player, b.player);
        assert_eq!(a.lives, b.lives);
    }
}
