use std::time::Duration;

use tracing::{debug, trace};

use crate::{
    input::{
        keyboard::{KeyEvent, KeyboardHandle, ModifiersState},
        pointer::{AxisFrame, AxisSource, ButtonEvent, MotionEvent, PointerHandle},
        touch::{self, TouchHandle},
        DeviceCapabilities, PressState,
    },
    shell::ShellHost,
    utils::{SeatId, SurfaceId, ViewId},
};

/// What the capturing session should do after a relayed event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStatus {
    /// Keep capturing
    Continue,
    /// End the capture and dismiss the menu
    Dismiss,
}

/// The menu a capture redirects input to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CaptureTarget {
    pub surface: SurfaceId,
    pub view: Option<ViewId>,
}

/// Input capture of a single seat
///
/// One instance is created lazily per seat the first time a menu is shown on it,
/// and is reused by every following menu until the seat goes away. It is only
/// active while a menu is shown.
#[derive(Debug)]
pub struct SeatCapture {
    seat: SeatId,
    target: Option<CaptureTarget>,
    captured: DeviceCapabilities,
    initial_up: bool,
    grab_time: u32,
    dismiss_delay: Duration,
}

impl SeatCapture {
    pub(crate) fn new(seat: SeatId, dismiss_delay: Duration) -> Self {
        SeatCapture {
            seat,
            target: None,
            captured: DeviceCapabilities::empty(),
            initial_up: true,
            grab_time: 0,
            dismiss_delay,
        }
    }

    /// The seat this capture belongs to
    pub fn seat(&self) -> SeatId {
        self.seat
    }

    /// Whether a menu currently owns this capture
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    /// The devices this capture got installed on when it started
    pub fn captured_devices(&self) -> DeviceCapabilities {
        self.captured
    }

    /// Whether no pointer button was held down since the capture started,
    /// or one got released since
    pub fn initial_buttons_released(&self) -> bool {
        self.initial_up
    }

    pub(crate) fn start<H: ShellHost>(&mut self, host: &mut H, target: CaptureTarget) {
        let mut captured = DeviceCapabilities::empty();

        if let Some(keyboard) = host.keyboard(&self.seat) {
            if !keyboard.is_captured() {
                keyboard.set_focus(Some(target.surface));
                keyboard.start_capture();
                captured |= DeviceCapabilities::KEYBOARD;
            }
        }

        let mut buttons_up = true;
        if let Some(pointer) = host.pointer(&self.seat) {
            if !pointer.is_captured() {
                pointer.set_focus(target.view.map(|view| (view, (0.0, 0.0).into())));
                pointer.start_capture();
                captured |= DeviceCapabilities::POINTER;
            }
            buttons_up = pointer.button_count() == 0;
            self.grab_time = pointer.grab_time();
        }

        if let Some(touch) = host.touch(&self.seat) {
            if !touch.is_captured() {
                touch.set_focus(target.view);
                touch.start_capture();
                captured |= DeviceCapabilities::TOUCH;
            }
        }

        self.initial_up = buttons_up;
        self.captured = captured;
        self.target = Some(target);
        debug!(seat = ?self.seat, devices = ?captured, initial_up = buttons_up, "Seat capture started");
    }

    pub(crate) fn end<H: ShellHost>(&mut self, host: &mut H) {
        if let Some(keyboard) = host.keyboard(&self.seat) {
            if keyboard.is_captured() {
                keyboard.end_capture();
            }
        }
        if let Some(pointer) = host.pointer(&self.seat) {
            if pointer.is_captured() {
                pointer.end_capture();
            }
        }
        if let Some(touch) = host.touch(&self.seat) {
            if touch.is_captured() {
                touch.end_capture();
            }
        }

        self.target = None;
        debug!(seat = ?self.seat, "Seat capture ended");
    }

    pub(crate) fn forget_view(&mut self, view: &ViewId) {
        if let Some(target) = self.target.as_mut() {
            if target.view.as_ref() == Some(view) {
                target.view = None;
            }
        }
    }

    fn menu_view<H: ShellHost>(&self, host: &H) -> Option<ViewId> {
        self.target
            .and_then(|target| target.view)
            .filter(|view| host.view_alive(view))
    }
}

/// Keyboard side of a seat capture
pub trait KeyboardCapture<H: ShellHost> {
    /// A key was pressed or released
    fn key(&mut self, host: &mut H, event: &KeyEvent) -> CaptureStatus;
    /// The modifiers changed
    fn modifiers(&mut self, host: &mut H, modifiers: &ModifiersState) -> CaptureStatus;
    /// The compositor revoked the capture of the keyboard
    fn keyboard_cancel(&mut self, host: &mut H) -> CaptureStatus;
}

/// Pointer side of a seat capture
pub trait PointerCapture<H: ShellHost> {
    /// The pointer focus needs to be computed again
    fn pointer_focus(&mut self, host: &mut H) -> CaptureStatus;
    /// The pointer moved
    fn pointer_motion(&mut self, host: &mut H, event: &MotionEvent) -> CaptureStatus;
    /// A button was pressed or released
    fn pointer_button(&mut self, host: &mut H, event: &ButtonEvent) -> CaptureStatus;
    /// A scroll happened
    fn pointer_axis(&mut self, host: &mut H, frame: &AxisFrame) -> CaptureStatus;
    /// The source of the following scroll events
    fn pointer_axis_source(&mut self, host: &mut H, source: AxisSource) -> CaptureStatus;
    /// End of a group of pointer events
    fn pointer_frame(&mut self, host: &mut H) -> CaptureStatus;
    /// The compositor revoked the capture of the pointer
    fn pointer_cancel(&mut self, host: &mut H) -> CaptureStatus;
}

/// Touch side of a seat capture
pub trait TouchCapture<H: ShellHost> {
    /// A touch point appeared
    fn touch_down(&mut self, host: &mut H, event: &touch::DownEvent) -> CaptureStatus;
    /// A touch point disappeared
    fn touch_up(&mut self, host: &mut H, event: &touch::UpEvent) -> CaptureStatus;
    /// A touch point moved
    fn touch_motion(&mut self, host: &mut H, event: &touch::MotionEvent) -> CaptureStatus;
    /// End of a group of touch events
    fn touch_frame(&mut self, host: &mut H) -> CaptureStatus;
    /// The compositor revoked the capture of the touch device
    fn touch_cancel(&mut self, host: &mut H) -> CaptureStatus;
}

impl<H: ShellHost> KeyboardCapture<H> for SeatCapture {
    fn key(&mut self, host: &mut H, event: &KeyEvent) -> CaptureStatus {
        if let Some(keyboard) = host.keyboard(&self.seat) {
            keyboard.send_key(event);
        }
        CaptureStatus::Continue
    }

    fn modifiers(&mut self, host: &mut H, modifiers: &ModifiersState) -> CaptureStatus {
        if let Some(keyboard) = host.keyboard(&self.seat) {
            keyboard.send_modifiers(modifiers);
        }
        CaptureStatus::Continue
    }

    fn keyboard_cancel(&mut self, _host: &mut H) -> CaptureStatus {
        debug!(seat = ?self.seat, "Keyboard capture cancelled");
        CaptureStatus::Dismiss
    }
}

impl<H: ShellHost> PointerCapture<H> for SeatCapture {
    fn pointer_focus(&mut self, host: &mut H) -> CaptureStatus {
        let menu_view = self.menu_view(host);
        let Some(location) = host.pointer(&self.seat).map(|pointer| pointer.location()) else {
            return CaptureStatus::Continue;
        };

        // nothing but the menu may get the pointer while captured
        let focus = host
            .pick_view(location)
            .filter(|(view, _)| Some(*view) == menu_view);

        if let Some(pointer) = host.pointer(&self.seat) {
            pointer.set_focus(focus);
        }
        CaptureStatus::Continue
    }

    fn pointer_motion(&mut self, host: &mut H, event: &MotionEvent) -> CaptureStatus {
        if let Some(pointer) = host.pointer(&self.seat) {
            pointer.send_motion(event);
        }
        CaptureStatus::Continue
    }

    fn pointer_button(&mut self, host: &mut H, event: &ButtonEvent) -> CaptureStatus {
        let menu_view = self.menu_view(host);
        let Some(pointer) = host.pointer(&self.seat) else {
            return CaptureStatus::Continue;
        };

        let initial_up = self.initial_up;
        if event.state == PressState::Released {
            self.initial_up = true;
        }

        if menu_view.is_some() && pointer.focus() == menu_view {
            pointer.send_button(event);
            return CaptureStatus::Continue;
        }

        if event.state != PressState::Released {
            return CaptureStatus::Continue;
        }

        let held = Duration::from_millis(u64::from(event.time.wrapping_sub(self.grab_time)));
        if initial_up || held > self.dismiss_delay {
            trace!(seat = ?self.seat, initial_up, ?held, "Release outside of the menu");
            CaptureStatus::Dismiss
        } else {
            trace!(seat = ?self.seat, ?held, "Ignoring release of the opening click");
            CaptureStatus::Continue
        }
    }

    fn pointer_axis(&mut self, host: &mut H, frame: &AxisFrame) -> CaptureStatus {
        if let Some(pointer) = host.pointer(&self.seat) {
            pointer.send_axis(frame);
        }
        CaptureStatus::Continue
    }

    fn pointer_axis_source(&mut self, host: &mut H, source: AxisSource) -> CaptureStatus {
        if let Some(pointer) = host.pointer(&self.seat) {
            pointer.send_axis_source(source);
        }
        CaptureStatus::Continue
    }

    fn pointer_frame(&mut self, host: &mut H) -> CaptureStatus {
        if let Some(pointer) = host.pointer(&self.seat) {
            pointer.send_frame();
        }
        CaptureStatus::Continue
    }

    fn pointer_cancel(&mut self, _host: &mut H) -> CaptureStatus {
        debug!(seat = ?self.seat, "Pointer capture cancelled");
        CaptureStatus::Dismiss
    }
}

impl<H: ShellHost> TouchCapture<H> for SeatCapture {
    fn touch_down(&mut self, host: &mut H, event: &touch::DownEvent) -> CaptureStatus {
        if let Some(touch) = host.touch(&self.seat) {
            touch.send_down(event);
        }
        CaptureStatus::Continue
    }

    fn touch_up(&mut self, host: &mut H, event: &touch::UpEvent) -> CaptureStatus {
        if let Some(touch) = host.touch(&self.seat) {
            touch.send_up(event);
        }
        CaptureStatus::Continue
    }

    fn touch_motion(&mut self, host: &mut H, event: &touch::MotionEvent) -> CaptureStatus {
        if let Some(touch) = host.touch(&self.seat) {
            touch.send_motion(event);
        }
        CaptureStatus::Continue
    }

    fn touch_frame(&mut self, host: &mut H) -> CaptureStatus {
        if let Some(touch) = host.touch(&self.seat) {
            touch.send_frame();
        }
        CaptureStatus::Continue
    }

    fn touch_cancel(&mut self, _host: &mut H) -> CaptureStatus {
        debug!(seat = ?self.seat, "Touch capture cancelled");
        CaptureStatus::Dismiss
    }
}
