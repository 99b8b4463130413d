//! Placement of the launcher menu
//!
//! The functions of this module are pure, the session gathers the current scene
//! geometry and applies the result to the menu view.

use crate::utils::{Logical, Point, Rectangle, Size, ViewId};

/// Where a menu was requested to appear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPosition {
    /// Centered on the menu output
    Centered,
    /// At the current pointer location of the capturing seat
    AtPointer,
    /// Right below a rectangle of another surface
    AtSurface(Anchor),
}

/// The rectangle of a view the menu is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    /// The view the rectangle is relative to, cleared when that view is destroyed
    pub view: Option<ViewId>,
    /// The rectangle, relative to the view origin
    pub rect: Rectangle<i32, Logical>,
}

/// Top-left corner of a menu centered on an output
pub fn centered(output: Rectangle<i32, Logical>, menu_size: Size<i32, Logical>) -> Point<i32, Logical> {
    let offset = output.size.half().to_point() - menu_size.half().to_point();
    output.loc + offset
}

/// Top-left corner of a menu opened at the pointer
///
/// The menu size is not taken into account, the menu grows from the pointer
/// towards the bottom-right.
pub fn at_pointer(pointer: Point<f64, Logical>) -> Point<i32, Logical> {
    pointer.to_i32_trunc()
}

/// Top-left corner of a menu attached below the bottom edge of an anchor rectangle
pub fn at_surface(target_origin: Point<i32, Logical>, anchor: Rectangle<i32, Logical>) -> Point<i32, Logical> {
    let loc = target_origin + anchor.loc;
    (loc.x, loc.y + anchor.size.h).into()
}
