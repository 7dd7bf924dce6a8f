//! Keyboard gate between the page and the runner
//!
//! The runner shares the page with forms and chat boxes, so Space only belongs
//! to the game when focus is not in something that takes text.

use crate::session::Command;
use crate::sim::GamePhase;

/// The one key the runner listens to
pub const CONTROL_KEY: &str = " ";
pub const CONTROL_CODE: &str = "Space";

/// `<input type=...>` values that take typed text
const TEXT_INPUT_TYPES: &[&str] = &[
    "", "text", "search", "email", "url", "tel", "password", "number",
];

/// ARIA roles that mark a custom text field
const TEXT_ROLES: &[&str] = &["textbox", "searchbox"];

/// What the host knows about the element holding focus
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusTarget {
    /// Upper- or lower-case tag name, e.g. `INPUT`
    pub tag_name: String,
    /// `type` attribute, for inputs
    pub input_type: Option<String>,
    /// `role` attribute
    pub role: Option<String>,
    /// `isContentEditable`
    pub content_editable: bool,
}

/// Focus classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusClass {
    TextEntry,
    Other,
}

pub fn classify_focus(target: &FocusTarget) -> FocusClass {
    if target.content_editable {
        return FocusClass::TextEntry;
    }
    if let Some(role) = &target.role {
        let role = role.trim().to_ascii_lowercase();
        if TEXT_ROLES.contains(&role.as_str()) {
            return FocusClass::TextEntry;
        }
    }
    let tag = target.tag_name.to_ascii_lowercase();
    match tag.as_str() {
        "textarea" => FocusClass::TextEntry,
        "input" => {
            let ty = target
                .input_type
                .as_deref()
                .unwrap_or("")
                .trim()
                .to_ascii_lowercase();
            if TEXT_INPUT_TYPES.contains(&ty.as_str()) {
                FocusClass::TextEntry
            } else {
                FocusClass::Other
            }
        }
        _ => FocusClass::Other,
    }
}

/// A key-down as seen by the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// `KeyboardEvent.key`
    pub key: String,
    /// `KeyboardEvent.code`
    pub code: String,
    /// IME composition in progress
    pub is_composing: bool,
    /// Where the event was aimed
    pub focus: FocusClass,
}

impl KeyPress {
    pub fn is_control_key(&self) -> bool {
        self.code == CONTROL_CODE || self.key == CONTROL_KEY
    }
}

/// Verdict for one key-down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Leave the event alone entirely
    Ignore,
    /// Swallow the browser default and hand the command to the session
    Dispatch(Command),
}

impl GateDecision {
    /// Whether the host should call `preventDefault`
    pub fn prevents_default(self) -> bool {
        matches!(self, GateDecision::Dispatch(_))
    }
}

/// Decide what a key-down means for a session in `phase`
pub fn gate_key(press: &KeyPress, phase: GamePhase) -> GateDecision {
    if press.is_composing || !press.is_control_key() {
        return GateDecision::Ignore;
    }
    if press.focus == FocusClass::TextEntry {
        return GateDecision::Ignore;
    }
    match phase {
        GamePhase::Idle | GamePhase::GameOver => GateDecision::Dispatch(Command::Start),
        GamePhase::Running => GateDecision::Dispatch(Command::Jump),
    }
}
