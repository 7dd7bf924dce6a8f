//! Score cadence and speed tiers

use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::tuning::Tuning;

/// Scroll-speed band selected by the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpeedTier {
    Base,
    Middle,
    Top,
}

impl SpeedTier {
    pub fn for_score(score: u64, tuning: &Tuning) -> Self {
        if score > tuning.top_threshold {
            SpeedTier::Top
        } else if score >= tuning.middle_threshold {
            SpeedTier::Middle
        } else {
            SpeedTier::Base
        }
    }

    pub fn speed(self, tuning: &Tuning) -> f32 {
        match self {
            SpeedTier::Base => tuning.base_speed,
            SpeedTier::Middle => tuning.middle_speed,
            SpeedTier::Top => tuning.top_speed,
        }
    }
}

#[inline]
pub fn speed_for_score(score: u64, tuning: &Tuning) -> f32 {
    SpeedTier::for_score(score, tuning).speed(tuning)
}

/// Bump the score on cadence, then recompute speed from the current score
pub fn advance_score(state: &mut GameState, tuning: &Tuning) {
    let interval = u64::from(tuning.score_interval.max(1));
    if state.frame_counter > 0 && state.frame_counter.is_multiple_of(interval) {
        state.score += 1;
    }

    let speed = speed_for_score(state.score, tuning);
    if speed != state.scroll_speed {
        log::debug!(
            "Speed tier {:?} at score {}",
            SpeedTier::for_score(state.score, tuning),
            state.score
        );
        state.scroll_speed = speed;
    }
}
