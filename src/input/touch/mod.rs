//! Touch-related types for the shell input abstraction

use crate::utils::{Local, Point, Serial, ViewId};

/// Identifier of a touch point
pub type TouchSlot = i32;

/// A new touch point appeared
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DownEvent {
    /// Slot of this event
    pub slot: TouchSlot,
    /// Location of the touch, local to the focused view
    pub location: Point<f64, Local>,
    /// Timestamp of the event, with millisecond granularity
    pub time: u32,
}

/// A touch point disappeared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpEvent {
    /// Slot of this event
    pub slot: TouchSlot,
    /// Timestamp of the event, with millisecond granularity
    pub time: u32,
}

/// A touch point moved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionEvent {
    /// Slot of this event
    pub slot: TouchSlot,
    /// Location of the touch, local to the focused view
    pub location: Point<f64, Local>,
    /// Timestamp of the event, with millisecond granularity
    pub time: u32,
}

/// Access to a touch device of a seat
pub trait TouchHandle {
    /// The view currently holding the touch focus
    fn focus(&self) -> Option<ViewId>;
    /// Move the touch focus
    fn set_focus(&mut self, focus: Option<ViewId>);
    /// Serial of the last touch down that could have started a grab
    fn grab_serial(&self) -> Option<Serial>;

    /// Whether the launcher menu capture is installed on this device
    fn is_captured(&self) -> bool;
    /// Install the launcher menu capture, replacing the regular dispatch
    fn start_capture(&mut self);
    /// Restore the regular dispatch
    fn end_capture(&mut self);

    /// Send a down event to the focused client
    fn send_down(&mut self, event: &DownEvent);
    /// Send an up event to the focused client
    fn send_up(&mut self, event: &UpEvent);
    /// Send a motion event to the focused client
    fn send_motion(&mut self, event: &MotionEvent);
    /// Close the current group of touch events
    fn send_frame(&mut self);
}
