//! Pointer-related types for the shell input abstraction

use crate::utils::{Local, Logical, Point, Serial, ViewId};

use super::PressState;

/// Pointer motion event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionEvent {
    /// Location of the pointer in compositor space
    pub location: Point<f64, Logical>,
    /// Timestamp of the event, with millisecond granularity
    pub time: u32,
}

/// Pointer button event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    /// Serial of the event
    pub serial: Serial,
    /// Timestamp with millisecond granularity, with an undefined base.
    pub time: u32,
    /// Button that produced the event, as a linux input event code
    pub button: u32,
    /// Physical state of the button
    pub state: PressState,
}

/// Source of an axis event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisSource {
    /// Scroll wheel
    Wheel,
    /// Finger on a touchpad
    Finger,
    /// Continuous movement, like a trackpoint
    Continuous,
    /// Side movement of a scroll wheel
    WheelTilt,
}

/// A frame of pointer axis events
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AxisFrame {
    /// Timestamp of the axis event
    pub time: u32,
    /// Raw scroll value per axis of the event
    pub axis: (f64, f64),
    /// Discrete representation of scroll value per axis, if available
    pub v120: Option<(i32, i32)>,
}

/// Access to a pointer device of a seat
pub trait PointerHandle {
    /// Current location of the pointer in compositor space
    fn location(&self) -> Point<f64, Logical>;
    /// Number of buttons currently held down
    fn button_count(&self) -> usize;
    /// The view currently holding the pointer focus
    fn focus(&self) -> Option<ViewId>;
    /// Move the pointer focus to a view, at the given view-local position
    fn set_focus(&mut self, focus: Option<(ViewId, Point<f64, Local>)>);
    /// Serial of the last button press that could have started a grab
    fn grab_serial(&self) -> Option<Serial>;
    /// Timestamp of the button press that started the current grab
    fn grab_time(&self) -> u32;

    /// Whether the launcher menu capture is installed on this pointer
    fn is_captured(&self) -> bool;
    /// Install the launcher menu capture, replacing the regular dispatch
    fn start_capture(&mut self);
    /// Restore the regular dispatch
    fn end_capture(&mut self);

    /// Send a motion event to the focused client
    fn send_motion(&mut self, event: &MotionEvent);
    /// Send a button event to the focused client
    fn send_button(&mut self, event: &ButtonEvent);
    /// Send an axis frame to the focused client
    fn send_axis(&mut self, frame: &AxisFrame);
    /// Send the source of the following axis events to the focused client
    fn send_axis_source(&mut self, source: AxisSource);
    /// Close the current group of pointer events
    fn send_frame(&mut self);
}
