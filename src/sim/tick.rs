//! Fixed-step simulation tick
//!
//! One call advances a running session by exactly one display frame.

use super::state::{GamePhase, GameState};
use super::{animation, collision, physics, score, spawner};
use crate::tuning::Tuning;

/// Commands that apply at the start of a tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump before integrating (ignored mid-air)
    pub jump: bool,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session was not running; nothing changed
    Skipped,
    /// Still running, schedule the next tick
    Continue,
    /// The player hit an obstacle; the session is now over
    Collision { obstacle_id: u32 },
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) -> TickOutcome {
    if state.phase != GamePhase::Running {
        return TickOutcome::Skipped;
    }

    state.frame_counter += 1;

    if input.jump {
        physics::jump(&mut state.player, tuning);
    }
    physics::integrate(&mut state.player, tuning);

    spawner::advance_obstacles(state, tuning);
    spawner::spawn_due(state, tuning);

    if let Some(hit) = collision::first_collision(&state.player, &state.obstacles, tuning) {
        let obstacle_id = hit.id;
        state.phase = GamePhase::GameOver;
        return TickOutcome::Collision { obstacle_id };
    }

    animation::advance_animation(&mut state.player, state.frame_counter, tuning);
    score::advance_score(state, tuning);

    TickOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;

    fn running(seed: u64, tuning: &Tuning) -> GameState {
        let mut state = GameState::new(seed, tuning);
        state.restart(seed, tuning);
        state
    }

    #[test]
    fn test_idle_and_game_over_do_not_tick() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        assert_eq!(tick(&mut state, &TickInput::default(), &tuning), TickOutcome::Skipped);
        assert_eq!(state.frame_counter, 0);

        state.phase = GamePhase::GameOver;
        assert_eq!(tick(&mut state, &TickInput::default(), &tuning), TickOutcome::Skipped);
        assert_eq!(state.frame_counter, 0);
    }

    #[test]
    fn test_hundred_ticks_score_ten() {
        let tuning = Tuning::default();
        let mut state = running(1, &tuning);
        for _ in 0..100 {
            assert_eq!(tick(&mut state, &TickInput::default(), &tuning), TickOutcome::Continue);
        }
        assert_eq!(state.score, 10);
        assert_eq!(state.frame_counter, 100);
    }

    #[test]
    fn test_first_spawn_on_tick_130() {
        let tuning = Tuning::default();
        let mut state = running(1, &tuning);
        for _ in 0..129 {
            tick(&mut state, &TickInput::default(), &tuning);
        }
        assert!(state.obstacles.is_empty());
        tick(&mut state, &TickInput::default(), &tuning);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, tuning.field_width);
    }

    #[test]
    fn test_collision_ends_run_without_scoring() {
        let tuning = Tuning::default();
        let mut state = running(1, &tuning);
        // Nine quiet ticks, the tenth would score
        for _ in 0..9 {
            tick(&mut state, &TickInput::default(), &tuning);
        }
        let id = state.push_obstacle(150.0 + tuning.base_speed, ObstacleKind::Low);
        let outcome = tick(&mut state, &TickInput::default(), &tuning);
        assert_eq!(outcome, TickOutcome::Collision { obstacle_id: id });
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_jump_input_lifts_player() {
        let tuning = Tuning::default();
        let mut state = running(1, &tuning);
        tick(&mut state, &TickInput { jump: true }, &tuning);
        assert!(state.player.jumping);
        assert!(state.player.y < tuning.ground_y);
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let mut a = running(99999, &tuning);
        let mut b = running(99999, &tuning);
        for i in 0..1000u32 {
            let input = TickInput { jump: i % 37 == 0 };
            let oa = tick(&mut a, &input, &tuning);
            let ob = tick(&mut b, &input, &tuning);
            assert_eq!(oa, ob);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.player, b.player);
    }
}
