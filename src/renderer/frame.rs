//! Draw lists
//!
//! A [`Frame`] is the complete picture for one tick, built from state alone.
//! Backends replay it; tests inspect it.

use super::sprites::{SheetId, SpriteAtlas, obstacle_source, player_source};
use crate::sim::{GameState, Player, frame_for};
use crate::tuning::Tuning;

pub const SKY_COLOR: &str = "#e4f4ff";
pub const GROUND_COLOR: &str = "#6a9c45";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear { w: f32, h: f32 },
    FillRect { rect: Rect, color: &'static str },
    Sprite { sheet: SheetId, src: Rect, dst: Rect },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub cmds: Vec<DrawCmd>,
}

impl Frame {
    /// Sprite commands only
    pub fn sprites(&self) -> impl Iterator<Item = (SheetId, &Rect)> {
        self.cmds.iter().filter_map(|cmd| match cmd {
            DrawCmd::Sprite { sheet, dst, .. } => Some((*sheet, dst)),
            _ => None,
        })
    }

    fn background(tuning: &Tuning) -> Self {
        let w = tuning.field_width;
        let h = tuning.field_height;
        let ground = tuning.ground_y;
        Self {
            cmds: vec![
                DrawCmd::Clear { w, h },
                DrawCmd::FillRect {
                    rect: Rect { x: 0.0, y: 0.0, w, h: ground },
                    color: SKY_COLOR,
                },
                DrawCmd::FillRect {
                    rect: Rect { x: 0.0, y: ground, w, h: h - ground },
                    color: GROUND_COLOR,
                },
            ],
        }
    }

    fn push_player(&mut self, player: &Player, tuning: &Tuning, atlas: &SpriteAtlas) {
        let frame = frame_for(player.jumping, player.frame_index);
        let sheet = SheetId::from(frame.sprite);
        if !atlas.is_loaded(sheet) {
            return;
        }
        self.cmds.push(DrawCmd::Sprite {
            sheet,
            src: player_source(frame, tuning),
            dst: Rect {
                x: tuning.player_x,
                y: player.y - tuning.player_height,
                w: tuning.player_width,
                h: tuning.player_height,
            },
        });
    }
}

/// The surface before a run: background plus the standing runner
pub fn idle_frame(tuning: &Tuning, atlas: &SpriteAtlas) -> Frame {
    let mut frame = Frame::background(tuning);
    frame.push_player(&Player::grounded(tuning), tuning, atlas);
    frame
}

/// The surface for the current tick. Sheets that are not loaded are skipped.
pub fn build_frame(state: &GameState, tuning: &Tuning, atlas: &SpriteAtlas) -> Frame {
    let mut frame = Frame::background(tuning);
    frame.push_player(&state.player, tuning, atlas);

    if atlas.is_loaded(SheetId::Obstacles) {
        for obstacle in &state.obstacles {
            let bottom = tuning.ground_y - obstacle.kind.lift(tuning);
            frame.cmds.push(DrawCmd::Sprite {
                sheet: SheetId::Obstacles,
                src: obstacle_source(obstacle.kind, tuning),
                dst: Rect {
                    x: obstacle.x,
                    y: bottom - tuning.obstacle_height,
                    w: tuning.obstacle_width,
                    h: tuning.obstacle_height,
                },
            });
        }
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::sprites::LoadStatus;
    use crate::sim::ObstacleKind;

    #[test]
    fn test_idle_frame_without_assets_is_background_only() {
        let t = Tuning::default();
        let frame = idle_frame(&t, &SpriteAtlas::new());
        assert_eq!(frame.cmds.len(), 3);
        assert!(matches!(frame.cmds[0], DrawCmd::Clear { w, h } if w == 800.0 && h == 300.0));
        assert_eq!(frame.sprites().count(), 0);
    }

    #[test]
    fn test_idle_frame_shows_runner_once_loaded() {
        let t = Tuning::default();
        let frame = idle_frame(&t, &SpriteAtlas::all_loaded());
        let sprites: Vec<_> = frame.sprites().collect();
        assert_eq!(sprites.len(), 1);
        assert_eq!(sprites[0].0, SheetId::PlayerRun);
        assert_eq!(sprites[0].1.y + sprites[0].1.h, t.ground_y);
    }

    #[test]
    fn test_running_frame_draws_player_and_obstacles() {
        let t = Tuning::default();
        let mut state = GameState::new(1, &t);
        state.restart(1, &t);
        state.push_obstacle(400.0, ObstacleKind::Low);
        state.push_obstacle(700.0, ObstacleKind::High);
        state.player.jumping = true;

        let frame = build_frame(&state, &t, &SpriteAtlas::all_loaded());
        let sheets: Vec<SheetId> = frame.sprites().map(|(s, _)| s).collect();
        assert_eq!(
            sheets,
            vec![SheetId::PlayerJump, SheetId::Obstacles, SheetId::Obstacles]
        );
        let high_dst = frame.sprites().nth(2).unwrap().1;
        assert_eq!(high_dst.y + high_dst.h, t.ground_y - t.high_obstacle_lift);
    }

    #[test]
    fn test_failed_sheet_is_skipped() {
        let t = Tuning::default();
        let mut state = GameState::new(1, &t);
        state.restart(1, &t);
        state.push_obstacle(400.0, ObstacleKind::Low);

        let mut atlas = SpriteAtlas::all_loaded();
        atlas.set_status(SheetId::Obstacles, LoadStatus::Failed);
        let frame = build_frame(&state, &t, &atlas);
        let sheets: Vec<SheetId> = frame.sprites().map(|(s, _)| s).collect();
        assert_eq!(sheets, vec![SheetId::PlayerRun]);
    }
}
