//! Game state and core simulation types
//!
//! Everything a session mutates between ticks lives here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Mounted, never started
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended by a collision
    GameOver,
}

/// The runner
///
/// `y` is the screen-space y of the player's feet, so it equals the ground
/// line when grounded and shrinks while airborne. Negative `vel_y` is rising.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub y: f32,
    pub vel_y: f32,
    pub jumping: bool,
    /// Index into the run cycle
    pub frame_index: u32,
}

impl Player {
    /// A player standing on the ground line
    pub fn grounded(tuning: &Tuning) -> Self {
        Self {
            y: tuning.ground_y,
            vel_y: 0.0,
            jumping: false,
            frame_index: 0,
        }
    }

    /// Distance of the feet above the ground line (0 when grounded)
    #[inline]
    pub fn height_above_ground(&self, tuning: &Tuning) -> f32 {
        tuning.ground_y - self.y
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        !self.jumping
    }
}

/// Obstacle variants; each has its own sprite row and vertical placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Sits on the ground; must be jumped
    Low,
    /// Hangs above the ground; jumping into it ends the run
    High,
}

impl ObstacleKind {
    /// Row in the obstacle sprite sheet
    pub fn sprite_row(self) -> u32 {
        match self {
            ObstacleKind::Low => 0,
            ObstacleKind::High => 1,
        }
    }

    /// Height of the obstacle's bottom edge above the ground line
    pub fn lift(self, tuning: &Tuning) -> f32 {
        match self {
            ObstacleKind::Low => tuning.low_obstacle_lift,
            ObstacleKind::High => tuning.high_obstacle_lift,
        }
    }
}

/// A scrolling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge in field coordinates
    pub x: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// Right edge in field coordinates
    #[inline]
    pub fn right(&self, tuning: &Tuning) -> f32 {
        self.x + tuning.obstacle_width
    }

    /// True once the obstacle has fully left the field on the left
    #[inline]
    pub fn is_off_screen(&self, tuning: &Tuning) -> bool {
        self.right(tuning) < 0.0
    }
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current run
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    pub score: u64,
    /// Per-tick horizontal displacement of every obstacle
    pub scroll_speed: f32,
    /// Ticks since the last (re)start
    pub frame_counter: u64,
    pub player: Player,
    /// Active obstacles, oldest (nearest the player) first
    pub obstacles: Vec<Obstacle>,
    /// Obstacle kind source
    pub(crate) rng: Pcg32,
    /// Next obstacle ID
    next_id: u32,
}

impl GameState {
    /// Create an idle state with the given seed
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            score: 0,
            scroll_speed: tuning.base_speed,
            frame_counter: 0,
            player: Player::grounded(tuning),
            obstacles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Reinitialize every mutable field for a fresh run and enter `Running`
    pub fn restart(&mut self, seed: u64, tuning: &Tuning) {
        *self = Self::new(seed, tuning);
        self.phase = GamePhase::Running;
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a scripted obstacle at `x`
    pub fn push_obstacle(&mut self, x: f32, kind: ObstacleKind) -> u32 {
        let id = self.next_obstacle_id();
        self.obstacles.push(Obstacle { id, x, kind });
        id
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_and_grounded() {
        let tuning = Tuning::default();
        let state = GameState::new(7, &tuning);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.player.y, tuning.ground_y);
        assert_eq!(state.player.height_above_ground(&tuning), 0.0);
        assert!(state.player.is_grounded());
        assert_eq!(state.scroll_speed, tuning.base_speed);
    }

    #[test]
    fn test_restart_resets_everything() {
        let tuning = Tuning::default();
        let mut state = GameState::new(7, &tuning);
        state.score = 42;
        state.frame_counter = 900;
        state.scroll_speed = tuning.top_speed;
        state.player.jumping = true;
        state.player.y = 100.0;
        state.push_obstacle(300.0, ObstacleKind::Low);
        state.phase = GamePhase::GameOver;

        state.restart(8, &tuning);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.frame_counter, 0);
        assert_eq!(state.scroll_speed, tuning.base_speed);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player, Player::grounded(&tuning));
        assert_eq!(state.seed, 8);
    }

    #[test]
    fn test_obstacle_off_screen_edge() {
        let tuning = Tuning::default();
        let mut o = Obstacle {
            id: 1,
            x: -tuning.obstacle_width,
            kind: ObstacleKind::Low,
        };
        assert!(!o.is_off_screen(&tuning));
        o.x -= 0.5;
        assert!(o.is_off_screen(&tuning));
    }
}
