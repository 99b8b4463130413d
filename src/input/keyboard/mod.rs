//! Keyboard-related types for the shell input abstraction

use crate::utils::{Serial, SurfaceId};

use super::PressState;

/// A key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Timestamp with millisecond granularity, with an undefined base
    pub time: u32,
    /// Raw keycode
    pub keycode: u32,
    /// Whether the key was pressed or released
    pub state: PressState,
}

/// Serialized modifiers state
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ModifiersState {
    /// Serial of the modifiers change
    pub serial: Option<Serial>,
    /// Depressed modifiers
    pub depressed: u32,
    /// Latched modifiers
    pub latched: u32,
    /// Locked modifiers
    pub locked: u32,
    /// Active layout group
    pub group: u32,
}

/// Access to a keyboard device of a seat
pub trait KeyboardHandle {
    /// The surface currently holding the keyboard focus
    fn focus(&self) -> Option<SurfaceId>;
    /// Move the keyboard focus
    fn set_focus(&mut self, focus: Option<SurfaceId>);
    /// Serial of the last key press that could have started a grab
    fn grab_serial(&self) -> Option<Serial>;

    /// Whether the launcher menu capture is installed on this keyboard
    fn is_captured(&self) -> bool;
    /// Install the launcher menu capture, replacing the regular dispatch
    fn start_capture(&mut self);
    /// Restore the regular dispatch
    fn end_capture(&mut self);

    /// Send a key event to the focused client
    fn send_key(&mut self, event: &KeyEvent);
    /// Send a modifiers update to the focused client
    fn send_modifiers(&mut self, modifiers: &ModifiersState);
}
