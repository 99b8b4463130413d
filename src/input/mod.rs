//! Input device contracts
//!
//! The shell modules do not drive input devices themselves. The compositor owns
//! the seats and their keyboards, pointers and touch devices, and exposes each of
//! them through one of the handle traits of this module:
//!
//! - [`KeyboardHandle`](keyboard::KeyboardHandle)
//! - [`PointerHandle`](pointer::PointerHandle)
//! - [`TouchHandle`](touch::TouchHandle)
//!
//! A handle gives access to the device focus, to the serial of the last event that
//! could have initiated a grab, and to the capture switch used by the launcher menu
//! to redirect the device to itself. While a device is captured, the compositor must
//! route its events through [`LauncherMenu::with_capture`](crate::shell::launcher_menu::LauncherMenu::with_capture)
//! instead of its normal dispatch.

use bitflags::bitflags;

pub mod keyboard;
pub mod pointer;
pub mod touch;

bitflags! {
    /// Set of input device classes of a seat
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DeviceCapabilities: u32 {
        /// The seat has a keyboard
        const KEYBOARD = 1;
        /// The seat has a pointer
        const POINTER = 1 << 1;
        /// The seat has a touch device
        const TOUCH = 1 << 2;
    }
}

/// State of a key or a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PressState {
    /// Released
    Released,
    /// Pressed
    Pressed,
}
