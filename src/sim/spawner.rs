//! Obstacle spawning and drift
//!
//! A pair of obstacles enters on frame 1 and on every multiple of the spawn
//! interval: one from each side edge, each at its own random height. Every
//! obstacle then drifts one unit per tick toward the opposite edge.

use rand::Rng;

use super::state::{Arena, GameState, Obstacle, SpawnSide};

/// Whether a new pair enters on this frame
///
/// An interval of zero only spawns on frame 1.
pub fn should_spawn(frame: u64, interval: u32) -> bool {
    frame == 1 || (interval > 0 && frame % interval as u64 == 0)
}

/// Build the obstacle pair for this frame, if any
///
/// The left obstacle gets `first_id`, the right one `first_id + 1`.
pub fn maybe_spawn<R: Rng>(
    frame: u64,
    interval: u32,
    arena: &Arena,
    rng: &mut R,
    first_id: u32,
) -> Option<[Obstacle; 2]> {
    if !should_spawn(frame, interval) {
        return None;
    }

    let (min_y, max_y) = arena.spawn_band();
    let left_y = rng.random_range(min_y..=max_y) as f32;
    let right_y = rng.random_range(min_y..=max_y) as f32;

    Some([
        Obstacle::new(first_id, SpawnSide::Left, arena, left_y),
        Obstacle::new(first_id + 1, SpawnSide::Right, arena, right_y),
    ])
}

/// Move every obstacle one tick along its drift direction
pub fn advance_obstacles(obstacles: &mut [Obstacle]) {
    for obstacle in obstacles.iter_mut() {
        obstacle.advance();
    }
}

/// Remove obstacles that have fully left the canvas, keeping spawn order
///
/// Returns how many were removed.
pub fn evict_offscreen(obstacles: &mut Vec<Obstacle>, arena: &Arena) -> usize {
    let before = obstacles.len();
    obstacles.retain(|o| !o.is_past_far_edge(arena));
    before - obstacles.len()
}

/// Spawn this frame's pair (if due), then drift everything including the new pair
pub fn spawn_and_advance(state: &mut GameState) {
    let pair = maybe_spawn(
        state.frame_counter,
        state.spawn_interval,
        &state.arena,
        &mut state.rng,
        state.next_id,
    );

    if let Some(pair) = pair {
        state.next_id += 2;
        log::debug!(
            "Frame {}: spawned pair at y={} / y={} ({} obstacles)",
            state.frame_counter,
            pair[0].pos.y,
            pair[1].pos.y,
            state.obstacles.len() + 2
        );
        state.obstacles.extend(pair);
    }

    advance_obstacles(&mut state.obstacles);

    if state.evict_offscreen {
        let removed = evict_offscreen(&mut state.obstacles, &state.arena);
        if removed > 0 {
            log::debug!("Frame {}: evicted {} obstacles", state.frame_counter, removed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_cadence_medium() {
        let spawned: Vec<u64> = (1..=100).filter(|&f| should_spawn(f, 25)).collect();
        assert_eq!(spawned, vec![1, 25, 50, 75, 100]);
        assert!(!should_spawn(26, 25));
    }

    #[test]
    fn test_zero_interval_only_spawns_first_frame() {
        assert!(should_spawn(1, 0));
        assert!((2..500).all(|f| !should_spawn(f, 0)));
    }

    #[test]
    fn test_pair_origins() {
        let arena = Arena::new(480.0, 320.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let [left, right] = maybe_spawn(1, 25, &arena, &mut rng, 10).unwrap();

        assert_eq!(left.side, SpawnSide::Left);
        assert_eq!(left.pos.x, 0.0);
        assert_eq!(left.id, 10);
        assert_eq!(right.side, SpawnSide::Right);
        assert_eq!(right.pos.x, 480.0);
        assert_eq!(right.id, 11);
        assert_eq!(left.radius, 5.0);
    }

    #[test]
    fn test_no_pair_off_cadence() {
        let arena = Arena::default();
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(maybe_spawn(26, 25, &arena, &mut rng, 1).is_none());
    }

    #[test]
    fn test_advance_drifts_toward_centre() {
        let arena = Arena::new(200.0, 200.0);
        let mut obstacles = vec![
            Obstacle::new(1, SpawnSide::Left, &arena, 50.0),
            Obstacle::new(2, SpawnSide::Right, &arena, 60.0),
        ];
        advance_obstacles(&mut obstacles);
        advance_obstacles(&mut obstacles);
        assert_eq!(obstacles[0].pos.x, 2.0);
        assert_eq!(obstacles[1].pos.x, 198.0);
        // Height never changes
        assert_eq!(obstacles[0].pos.y, 50.0);
        assert_eq!(obstacles[1].pos.y, 60.0);
    }

    #[test]
    fn test_spawn_and_advance_keeps_pairs_in_order() {
        let mut state = GameState::new(3, Arena::default(), 5);
        for _ in 0..20 {
            state.frame_counter += 1;
            spawn_and_advance(&mut state);
        }

        // Frames 1, 5, 10, 15, 20
        assert_eq!(state.obstacles.len(), 10);
        for pair in state.obstacles.chunks(2) {
            assert_eq!(pair[0].side, SpawnSide::Left);
            assert_eq!(pair[1].side, SpawnSide::Right);
            assert!(pair[0].id < pair[1].id);
        }
        // First pair spawned on frame 1 and has drifted 20 ticks
        assert_eq!(state.obstacles[0].pos.x, 20.0);
        assert_eq!(state.obstacles[1].pos.x, 580.0);
        // Newest pair moved on the frame it appeared
        assert_eq!(state.obstacles[8].pos.x, 1.0);
    }

    #[test]
    fn test_obstacles_persist_without_eviction() {
        let mut state = GameState::new(3, Arena::new(20.0, 100.0), 1000);
        for _ in 0..100 {
            state.frame_counter += 1;
            spawn_and_advance(&mut state);
        }
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.obstacles[0].pos.x, 100.0);
        assert_eq!(state.obstacles[1].pos.x, -80.0);
    }

    #[test]
    fn test_eviction_removes_far_side_obstacles() {
        let mut state = GameState::new(3, Arena::new(20.0, 100.0), 1000);
        state.evict_offscreen = true;
        for _ in 0..26 {
            state.frame_counter += 1;
            spawn_and_advance(&mut state);
        }
        // x = 26 > 20 + 5 and x = -6 < -5
        assert!(state.obstacles.is_empty());
    }

    proptest! {
        #[test]
        fn prop_spawned_heights_in_band(seed in any::<u64>(), height in 60u32..2000) {
            let arena = Arena::new(300.0, height as f32);
            let mut rng = Pcg32::seed_from_u64(seed);
            let [left, right] = maybe_spawn(1, 25, &arena, &mut rng, 1).unwrap();
            let max = height as f32 - 50.0;
            for obstacle in [left, right] {
                prop_assert!(obstacle.pos.y >= 10.0 && obstacle.pos.y <= max);
                prop_assert_eq!(obstacle.pos.y.fract(), 0.0);
            }
            prop_assert_eq!(left.pos.x, 0.0);
            prop_assert_eq!(right.pos.x, 300.0);
        }

        #[test]
        fn prop_spawn_only_on_first_frame_or_multiples(frame in 1u64..100_000, interval in 1u32..500) {
            let expected = frame == 1 || frame % interval as u64 == 0;
            prop_assert_eq!(should_spawn(frame, interval), expected);
        }
    }
}
