//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable obstacle order (oldest first)
//! - No rendering or platform dependencies

pub mod animation;
pub mod collision;
pub mod physics;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;

pub use animation::{AnimState, Sprite, SpriteFrame, frame_for, sprite_for};
pub use collision::{Aabb, first_collision, obstacle_hitbox, player_hitbox};
pub use score::{SpeedTier, speed_for_score};
pub use state::{GamePhase, GameState, Obstacle, ObstacleKind, Player};
pub use tick::{TickInput, TickOutcome, tick};
