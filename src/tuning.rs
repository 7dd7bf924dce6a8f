//! Data-driven game balance
//!
//! Every constant the simulation reads lives in [`Tuning`]. The defaults are
//! the shipped game; a host may override them with JSON for playtesting.

use serde::{Deserialize, Serialize};

use crate::error::TuningError;

/// Simulation and layout constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Logical width of the play field
    pub field_width: f32,
    /// Logical height of the play field
    pub field_height: f32,
    /// Screen-space y of the ground line (player feet when grounded)
    pub ground_y: f32,

    /// Downward acceleration per tick
    pub gravity: f32,
    /// Upward velocity applied by a jump
    pub jump_impulse: f32,

    /// Fixed left edge of the player sprite
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal inset of the hit-box on each side of the sprite
    pub player_hitbox_inset_x: f32,
    /// Vertical inset of the hit-box from the top of the sprite
    pub player_hitbox_inset_top: f32,

    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// Lift of a low obstacle above the ground line
    pub low_obstacle_lift: f32,
    /// Lift of a high obstacle above the ground line
    pub high_obstacle_lift: f32,

    /// Ticks between obstacle spawns
    pub spawn_interval: u32,
    /// Ticks between score increments
    pub score_interval: u32,
    /// Number of frames in the run cycle
    pub run_frames: u32,
    /// Ticks each run-cycle frame is held
    pub frame_delay: u32,

    pub base_speed: f32,
    pub middle_speed: f32,
    pub top_speed: f32,
    /// Score at which the middle speed starts
    pub middle_threshold: u64,
    /// Scores strictly above this run at the top speed
    pub top_threshold: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 300.0,
            ground_y: 250.0,

            gravity: 0.6,
            jump_impulse: 12.0,

            player_x: 120.0,
            player_width: 88.0,
            player_height: 94.0,
            player_hitbox_inset_x: 16.0,
            player_hitbox_inset_top: 10.0,

            obstacle_width: 48.0,
            obstacle_height: 48.0,
            low_obstacle_lift: 0.0,
            high_obstacle_lift: 100.0,

            spawn_interval: 130,
            score_interval: 10,
            run_frames: 6,
            frame_delay: 6,

            base_speed: 6.0,
            middle_speed: 8.0,
            top_speed: 10.0,
            middle_threshold: 500,
            top_threshold: 1500,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.spawn_interval == 0 || self.score_interval == 0 || self.frame_delay == 0 {
            return Err(TuningError::Invalid("cadences must be at least one tick".into()));
        }
        if self.run_frames == 0 {
            return Err(TuningError::Invalid("run cycle needs at least one frame".into()));
        }
        if self.middle_threshold > self.top_threshold {
            return Err(TuningError::Invalid(format!(
                "middle threshold {} is above top threshold {}",
                self.middle_threshold, self.top_threshold
            )));
        }
        if self.base_speed < 0.0 || self.middle_speed < 0.0 || self.top_speed < 0.0 {
            return Err(TuningError::Invalid("scroll speeds must be non-negative".into()));
        }
        if self.gravity <= 0.0 || self.jump_impulse <= 0.0 {
            return Err(TuningError::Invalid("gravity and jump impulse must be positive".into()));
        }
        if self.ground_y <= 0.0 || self.ground_y > self.field_height {
            return Err(TuningError::Invalid(format!(
                "ground line {} is outside the field",
                self.ground_y
            )));
        }
        Ok(())
    }

    /// Left edge of the player hit-box
    #[inline]
    pub fn player_hitbox_left(&self) -> f32 {
        self.player_x + self.player_hitbox_inset_x
    }

    /// Right edge of the player hit-box
    #[inline]
    pub fn player_hitbox_right(&self) -> f32 {
        self.player_x + self.player_width - self.player_hitbox_inset_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_default_player_hitbox_edges() {
        let t = Tuning::default();
        assert_eq!(t.player_hitbox_left(), 136.0);
        assert_eq!(t.player_hitbox_right(), 192.0);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "gravity": 0.8, "spawn_interval": 90 }"#).unwrap();
        assert_eq!(t.gravity, 0.8);
        assert_eq!(t.spawn_interval, 90);
        assert_eq!(t.score_interval, Tuning::default().score_interval);
    }

    #[test]
    fn test_rejects_zero_cadence() {
        let err = Tuning::from_json(r#"{ "score_interval": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let err = Tuning::from_json(r#"{ "middle_threshold": 2000 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }
}
