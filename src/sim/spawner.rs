//! Obstacle spawning, scrolling and retirement

use rand::Rng;

use super::state::{GameState, ObstacleKind};
use crate::tuning::Tuning;

/// Scroll every obstacle left by the current speed and drop the ones that
/// have fully left the field. Order is preserved.
pub fn advance_obstacles(state: &mut GameState, tuning: &Tuning) {
    let speed = state.scroll_speed;
    for obstacle in &mut state.obstacles {
        obstacle.x -= speed;
    }
    state.obstacles.retain(|o| !o.is_off_screen(tuning));
}

/// Spawn one obstacle at the right edge when the cadence comes due.
/// Returns the new obstacle's ID.
pub fn spawn_due(state: &mut GameState, tuning: &Tuning) -> Option<u32> {
    let interval = u64::from(tuning.spawn_interval.max(1));
    if state.frame_counter == 0 || !state.frame_counter.is_multiple_of(interval) {
        return None;
    }
    let kind = random_kind(&mut state.rng);
    let id = state.push_obstacle(tuning.field_width, kind);
    log::debug!("Spawned {:?} obstacle #{} at tick {}", kind, id, state.frame_counter);
    Some(id)
}

/// Uniform choice between the two kinds
pub fn random_kind<R: Rng + ?Sized>(rng: &mut R) -> ObstacleKind {
    if rng.random_bool(0.5) {
        ObstacleKind::High
    } else {
        ObstacleKind::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn running(seed: u64, tuning: &Tuning) -> GameState {
        let mut state = GameState::new(seed, tuning);
        state.restart(seed, tuning);
        state
    }

    #[test]
    fn test_advance_moves_and_keeps_order() {
        let tuning = Tuning::default();
        let mut state = running(1, &tuning);
        let a = state.push_obstacle(300.0, ObstacleKind::Low);
        let b = state.push_obstacle(600.0, ObstacleKind::High);

        advance_obstacles(&mut state, &tuning);
        let ids: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(state.obstacles[0].x, 300.0 - tuning.base_speed);
        assert_eq!(state.obstacles[1].x, 600.0 - tuning.base_speed);
    }

    #[test]
    fn test_retires_only_fully_off_screen() {
        let tuning = Tuning::default();
        let mut state = running(1, &tuning);
        let w = tuning.obstacle_width;
        // Right edge lands exactly on 0: still on screen
        state.push_obstacle(-w + tuning.base_speed, ObstacleKind::Low);
        // Right edge lands at -1: gone
        state.push_obstacle(-w + tuning.base_speed - 1.0, ObstacleKind::Low);
        let keep = state.push_obstacle(400.0, ObstacleKind::High);

        advance_obstacles(&mut state, &tuning);
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.obstacles[1].id, keep);
    }

    #[test]
    fn test_spawn_cadence() {
        let tuning = Tuning::default();
        let mut state = running(3, &tuning);
        for t in 1..=(tuning.spawn_interval as u64 * 3) {
            state.frame_counter = t;
            let spawned = spawn_due(&mut state, &tuning);
            assert_eq!(spawned.is_some(), t % tuning.spawn_interval as u64 == 0);
        }
        assert_eq!(state.obstacles.len(), 3);
        assert!(state.obstacles.iter().all(|o| o.x == tuning.field_width));
    }

    #[test]
    fn test_nothing_spawns_on_tick_zero() {
        let tuning = Tuning::default();
        let mut state = running(3, &tuning);
        assert_eq!(spawn_due(&mut state, &tuning), None);
    }

    #[test]
    fn test_kinds_roughly_uniform() {
        let mut rng = Pcg32::seed_from_u64(99);
        let high = (0..2000)
            .filter(|_| random_kind(&mut rng) == ObstacleKind::High)
            .count();
        assert!((800..1200).contains(&high), "high = {high}");
    }

    #[test]
    fn test_same_seed_same_kinds() {
        let mut a = Pcg32::seed_from_u64(5);
        let mut b = Pcg32::seed_from_u64(5);
        for _ in 0..64 {
            assert_eq!(random_kind(&mut a), random_kind(&mut b));
        }
    }

    #[test]
    fn test_lifetime_matches_travel_distance() {
        let tuning = Tuning::default();
        let mut state = running(1, &tuning);
        state.push_obstacle(tuning.field_width, ObstacleKind::Low);
        let mut ticks = 0u32;
        while !state.obstacles.is_empty() {
            advance_obstacles(&mut state, &tuning);
            ticks += 1;
        }
        let travelled = ticks as f32 * state.scroll_speed;
        let expected = tuning.field_width + tuning.obstacle_width;
        assert!(travelled >= expected);
        assert!(travelled - expected <= state.scroll_speed);
    }
}
