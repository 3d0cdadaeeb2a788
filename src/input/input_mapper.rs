//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard and mouse input to sketch actions like Spawn, ToggleMotion, etc.
//! Actions that change the world are turned into queued commands by the caller.

use orbital_core::{Command, Setting, ShapeKind};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Gravity change per key press
pub const GRAVITY_STEP: f32 = 0.5;
/// Randomize change per key press
pub const RANDOMIZE_STEP: f32 = 5.0;
/// Shape size change per key press
pub const SIZE_STEP: f32 = 5.0;

/// Actions triggered by user input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Spawn the selected kind under the cursor (left click)
    Spawn,
    /// Start or pause motion (Space)
    ToggleMotion,
    /// Clear, pause and repaint (R key)
    Restart,
    /// Choose the kind spawned by clicks (1/2/3)
    SelectKind(ShapeKind),
    /// Toggle the bouncy border (B key)
    ToggleBouncyBorder,
    /// Nudge a numeric setting (arrow keys, brackets)
    Adjust(Setting, f32),
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Exit application (Escape)
    Exit,
}

impl InputAction {
    /// The world command for this action, if it changes the world
    ///
    /// `cursor` is the last known pointer position in canvas pixels.
    pub fn to_command(self, cursor: Option<(f32, f32)>) -> Option<Command> {
        match self {
            InputAction::Spawn => cursor.map(|(x, y)| Command::SpawnAt { x, y }),
            InputAction::ToggleMotion => Some(Command::ToggleRunning),
            InputAction::Restart => Some(Command::Restart),
            InputAction::SelectKind(kind) => Some(Command::Configure(
                orbital_core::ConfigPatch::default().with_kind(kind),
            )),
            InputAction::ToggleBouncyBorder => Some(Command::ToggleBouncyBorder),
            InputAction::Adjust(setting, delta) => Some(Command::Adjust { setting, delta }),
            InputAction::ToggleFullscreen | InputAction::Exit => None,
        }
    }
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `None` for releases and unbound keys
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Space => Some(InputAction::ToggleMotion),
            KeyCode::KeyR => Some(InputAction::Restart),
            KeyCode::Digit1 | KeyCode::Numpad1 => Some(InputAction::SelectKind(ShapeKind::Circle)),
            KeyCode::Digit2 | KeyCode::Numpad2 => Some(InputAction::SelectKind(ShapeKind::Square)),
            KeyCode::Digit3 | KeyCode::Numpad3 => Some(InputAction::SelectKind(ShapeKind::Triangle)),
            KeyCode::KeyB => Some(InputAction::ToggleBouncyBorder),
            KeyCode::ArrowUp => Some(InputAction::Adjust(Setting::Gravity, GRAVITY_STEP)),
            KeyCode::ArrowDown => Some(InputAction::Adjust(Setting::Gravity, -GRAVITY_STEP)),
            KeyCode::ArrowRight => Some(InputAction::Adjust(Setting::Randomize, RANDOMIZE_STEP)),
            KeyCode::ArrowLeft => Some(InputAction::Adjust(Setting::Randomize, -RANDOMIZE_STEP)),
            KeyCode::BracketRight => Some(InputAction::Adjust(Setting::ShapeSize, SIZE_STEP)),
            KeyCode::BracketLeft => Some(InputAction::Adjust(Setting::ShapeSize, -SIZE_STEP)),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::Escape => Some(InputAction::Exit),
            _ => None,
        }
    }

    /// Map mouse button to an action
    ///
    /// Returns `Some(Spawn)` for a left press
    pub fn map_mouse_button(button: MouseButton, state: ElementState) -> Option<InputAction> {
        if button == MouseButton::Left && state == ElementState::Pressed {
            Some(InputAction::Spawn)
        } else {
            None
        }
    }
}
