//! Gym Dash - an endless-runner reflex minigame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, score)
//! - `session`: Run lifecycle, frame scheduling and the command queue
//! - `input`: Keyboard gate that keeps Space away from text fields
//! - `renderer`: Draw lists and the canvas 2D backend
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::{MountError, TuningError};
pub use session::{Command, CommandQueue, FrameHandle, GameSession, Hud, Scheduler};
pub use tuning::Tuning;

/// Host page contract
pub mod consts {
    /// Canvas the runner mounts onto
    pub const CANVAS_ID: &str = "runner-canvas";
    /// Sprite directory when the canvas has no `data-assets` attribute
    pub const DEFAULT_ASSET_BASE: &str = "assets/runner";
    /// Canvas attribute holding a JSON tuning override
    pub const TUNING_ATTR: &str = "data-tuning";
    pub const ASSETS_ATTR: &str = "data-assets";

    /// HUD element IDs
    pub const HUD_SCORE_ID: &str = "runner-score";
    pub const HUD_START_PROMPT_ID: &str = "runner-start-prompt";
    pub const HUD_GAME_OVER_ID: &str = "runner-game-over";
    pub const HUD_FINAL_SCORE_ID: &str = "runner-final-score";
}
