//! Runner sprite animation
//!
//! Two states. On the ground the run cycle loops, one frame every
//! `frame_delay` ticks. In the air a single jump frame is held and the run
//! cycle is parked at frame 0 so landing restarts it from the top.

use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::tuning::Tuning;

/// Animation state, derived from `Player::jumping`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimState {
    RunningCycle,
    Jumping,
}

/// Which sprite sheet the runner is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Run,
    Jump,
}

/// A sheet plus the column to cut from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteFrame {
    pub sprite: Sprite,
    pub column: u32,
}

#[inline]
pub fn anim_state(jumping: bool) -> AnimState {
    if jumping {
        AnimState::Jumping
    } else {
        AnimState::RunningCycle
    }
}

#[inline]
pub fn sprite_for(jumping: bool) -> Sprite {
    match anim_state(jumping) {
        AnimState::Jumping => Sprite::Jump,
        AnimState::RunningCycle => Sprite::Run,
    }
}

/// Frame to draw for the given state
pub fn frame_for(jumping: bool, frame_index: u32) -> SpriteFrame {
    match anim_state(jumping) {
        AnimState::Jumping => SpriteFrame {
            sprite: Sprite::Jump,
            column: 0,
        },
        AnimState::RunningCycle => SpriteFrame {
            sprite: Sprite::Run,
            column: frame_index,
        },
    }
}

/// Step the run cycle for tick `frame_counter`
pub fn advance_animation(player: &mut Player, frame_counter: u64, tuning: &Tuning) {
    if player.jumping {
        player.frame_index = 0;
        return;
    }
    let delay = u64::from(tuning.frame_delay.max(1));
    if frame_counter.is_multiple_of(delay) {
        player.frame_index += 1;
        if player.frame_index >= tuning.run_frames {
            player.frame_index = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_cycle_advances_on_cadence_and_wraps() {
        let tuning = Tuning::default();
        let mut p = Player::grounded(&tuning);
        let mut seen = Vec::new();
        let total = u64::from(tuning.frame_delay * tuning.run_frames);
        for t in 1..=total {
            advance_animation(&mut p, t, &tuning);
            if t % u64::from(tuning.frame_delay) == 0 {
                seen.push(p.frame_index);
            }
        }
        let expected: Vec<u32> = (1..tuning.run_frames).chain(std::iter::once(0)).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_frame_held_between_cadence_ticks() {
        let tuning = Tuning::default();
        let mut p = Player::grounded(&tuning);
        for t in 1..u64::from(tuning.frame_delay) {
            advance_animation(&mut p, t, &tuning);
            assert_eq!(p.frame_index, 0);
        }
    }

    #[test]
    fn test_airborne_holds_jump_frame() {
        let tuning = Tuning::default();
        let mut p = Player::grounded(&tuning);
        p.frame_index = 3;
        p.jumping = true;
        for t in 1..40 {
            advance_animation(&mut p, t, &tuning);
            assert_eq!(p.frame_index, 0);
            assert_eq!(
                frame_for(p.jumping, p.frame_index),
                SpriteFrame { sprite: Sprite::Jump, column: 0 }
            );
        }
    }

    #[test]
    fn test_sprite_selection_is_pure() {
        assert_eq!(sprite_for(false), Sprite::Run);
        assert_eq!(sprite_for(true), Sprite::Jump);
        assert_eq!(frame_for(false, 4), SpriteFrame { sprite: Sprite::Run, column: 4 });
        assert_eq!(frame_for(true, 4), SpriteFrame { sprite: Sprite::Jump, column: 0 });
    }
}
