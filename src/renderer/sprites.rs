//! Sprite sheets: where each image lives, how it is cut, whether it loaded

use serde::{Deserialize, Serialize};

use super::frame::Rect;
use crate::sim::{ObstacleKind, Sprite, SpriteFrame};
use crate::tuning::Tuning;

/// The three images the runner draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetId {
    PlayerRun,
    PlayerJump,
    Obstacles,
}

impl SheetId {
    pub const ALL: [SheetId; 3] = [SheetId::PlayerRun, SheetId::PlayerJump, SheetId::Obstacles];

    /// File name relative to the asset base URL
    pub fn file_name(self) -> &'static str {
        match self {
            SheetId::PlayerRun => "runner-run.png",
            SheetId::PlayerJump => "runner-jump.png",
            SheetId::Obstacles => "obstacles.png",
        }
    }

    fn index(self) -> usize {
        match self {
            SheetId::PlayerRun => 0,
            SheetId::PlayerJump => 1,
            SheetId::Obstacles => 2,
        }
    }
}

impl From<Sprite> for SheetId {
    fn from(sprite: Sprite) -> Self {
        match sprite {
            Sprite::Run => SheetId::PlayerRun,
            Sprite::Jump => SheetId::PlayerJump,
        }
    }
}

/// Image load progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadStatus {
    #[default]
    Pending,
    Loaded,
    /// Stays failed; the sheet is simply never drawn
    Failed,
}

/// Load status of every sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpriteAtlas {
    status: [LoadStatus; 3],
}

impl SpriteAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// All sheets marked loaded, for headless rendering
    pub fn all_loaded() -> Self {
        Self {
            status: [LoadStatus::Loaded; 3],
        }
    }

    pub fn set_status(&mut self, sheet: SheetId, status: LoadStatus) {
        self.status[sheet.index()] = status;
    }

    pub fn status(&self, sheet: SheetId) -> LoadStatus {
        self.status[sheet.index()]
    }

    #[inline]
    pub fn is_loaded(&self, sheet: SheetId) -> bool {
        self.status(sheet) == LoadStatus::Loaded
    }

    /// True once any sheet has finished loading
    pub fn any_loaded(&self) -> bool {
        self.status.contains(&LoadStatus::Loaded)
    }
}

/// Source rectangle of a runner frame inside its sheet
pub fn player_source(frame: SpriteFrame, tuning: &Tuning) -> Rect {
    Rect {
        x: frame.column as f32 * tuning.player_width,
        y: 0.0,
        w: tuning.player_width,
        h: tuning.player_height,
    }
}

/// Source rectangle of an obstacle kind inside the obstacle sheet
pub fn obstacle_source(kind: ObstacleKind, tuning: &Tuning) -> Rect {
    Rect {
        x: 0.0,
        y: kind.sprite_row() as f32 * tuning.obstacle_height,
        w: tuning.obstacle_width,
        h: tuning.obstacle_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tracking() {
        let mut atlas = SpriteAtlas::new();
        assert!(!atlas.any_loaded());
        atlas.set_status(SheetId::Obstacles, LoadStatus::Failed);
        assert!(!atlas.any_loaded());
        atlas.set_status(SheetId::PlayerRun, LoadStatus::Loaded);
        assert!(atlas.any_loaded());
        assert!(atlas.is_loaded(SheetId::PlayerRun));
        assert!(!atlas.is_loaded(SheetId::PlayerJump));
        assert_eq!(atlas.status(SheetId::Obstacles), LoadStatus::Failed);
    }

    #[test]
    fn test_source_rects() {
        let t = Tuning::default();
        let run = player_source(SpriteFrame { sprite: Sprite::Run, column: 3 }, &t);
        assert_eq!(run.x, 3.0 * t.player_width);
        assert_eq!(run.w, t.player_width);
        let high = obstacle_source(ObstacleKind::High, &t);
        assert_eq!(high.y, t.obstacle_height);
        assert_eq!(obstacle_source(ObstacleKind::Low, &t).y, 0.0);
    }
}
