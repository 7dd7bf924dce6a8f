//! Vertical physics for the runner
//!
//! Semi-implicit Euler at one step per tick: velocity first, then position.

use super::state::Player;
use crate::tuning::Tuning;

/// Advance the player by one tick under gravity, landing on the ground line
pub fn integrate(player: &mut Player, tuning: &Tuning) {
    if !player.jumping {
        // Grounded players stay pinned
        player.y = tuning.ground_y;
        player.vel_y = 0.0;
        return;
    }

    player.vel_y += tuning.gravity;
    player.y += player.vel_y;

    if player.y >= tuning.ground_y {
        player.y = tuning.ground_y;
        player.vel_y = 0.0;
        player.jumping = false;
    }
}

/// Apply the jump impulse if grounded. Returns false (and changes nothing) mid-air.
pub fn jump(player: &mut Player, tuning: &Tuning) -> bool {
    if player.jumping {
        return false;
    }
    player.vel_y = -tuning.jump_impulse;
    player.jumping = true;
    player.frame_index = 0;
    true
}
