//! Rendering module
//!
//! Frames are built as plain draw lists and replayed onto a 2D canvas.

pub mod frame;
pub mod sprites;
#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use frame::{DrawCmd, Frame, Rect, build_frame, idle_frame};
pub use sprites::{LoadStatus, SheetId, SpriteAtlas};
