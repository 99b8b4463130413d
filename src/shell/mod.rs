//! Desktop-shell modules and the scene host they plug into
//!
//! Each shell module is a small protocol handler bound to a single compositor-wide
//! object. None of them own any scene object: surfaces, views, outputs and seats all
//! live in the compositor, which exposes them through the [`ShellHost`] trait. The
//! modules keep identifiers to these objects and must be told when they disappear
//! through the module-specific `*_destroyed` notifications.
//!
//! Currently provided modules:
//!
//! - [`launcher_menu`]: a popup menu that captures the input of a seat while shown

use thiserror::Error;

use crate::{
    input::{keyboard::KeyboardHandle, pointer::PointerHandle, touch::TouchHandle},
    utils::{Local, Logical, OutputId, Point, Rectangle, SeatId, Size, SurfaceId, ViewId},
};

pub mod launcher_menu;

/// Scene layers a shell module can insert its views into
///
/// Listed from bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    /// Desktop background
    Background,
    /// Regular application windows
    Normal,
    /// Docks and panels
    Top,
    /// Shell user interface, above everything else
    Ui,
}

/// Errors of a role assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoleError {
    /// Another surface already holds this role
    #[error("another surface has this role already")]
    Taken,
    /// The surface already carries a different role
    #[error("surface already has the {existing} role")]
    Incompatible {
        /// Name of the role the surface carries
        existing: &'static str,
    },
}

/// The host failed to allocate a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the compositor ran out of memory")]
pub struct NoMemory;

/// Contract between the shell modules and the compositor scene graph
///
/// All identifiers handed to the host may refer to objects that have been destroyed
/// since, the liveness queries allow to detect this before acting on them. Query
/// methods return `None` for dead objects.
pub trait ShellHost {
    /// Keyboard device handle type
    type Keyboard: KeyboardHandle;
    /// Pointer device handle type
    type Pointer: PointerHandle;
    /// Touch device handle type
    type Touch: TouchHandle;

    /// All seats, in creation order
    fn seats(&self) -> Vec<SeatId>;
    /// The keyboard of a seat, if it has one
    fn keyboard(&mut self, seat: &SeatId) -> Option<&mut Self::Keyboard>;
    /// The pointer of a seat, if it has one
    fn pointer(&mut self, seat: &SeatId) -> Option<&mut Self::Pointer>;
    /// The touch device of a seat, if it has one
    fn touch(&mut self, seat: &SeatId) -> Option<&mut Self::Touch>;

    /// All outputs, in creation order
    fn outputs(&self) -> Vec<OutputId>;
    /// Geometry of an output in compositor space
    fn output_geometry(&self, output: &OutputId) -> Option<Rectangle<i32, Logical>>;

    /// Whether the surface still exists
    fn surface_alive(&self, surface: &SurfaceId) -> bool;
    /// Current size of the surface content
    fn surface_size(&self, surface: &SurfaceId) -> Option<Size<i32, Logical>>;
    /// The output the surface is mostly displayed on
    fn surface_output(&self, surface: &SurfaceId) -> Option<OutputId>;
    /// The first view of the surface
    fn surface_primary_view(&self, surface: &SurfaceId) -> Option<ViewId>;
    /// Assign a role to a surface
    ///
    /// A role can only be assigned once per surface, assigning the same role again succeeds.
    fn set_role(&mut self, surface: &SurfaceId, role: &'static str) -> Result<(), RoleError>;
    /// Mark the surface content as damaged
    fn damage_surface(&mut self, surface: &SurfaceId);

    /// Create a new, unmapped, view of a surface
    fn create_view(&mut self, surface: &SurfaceId) -> Result<ViewId, NoMemory>;
    /// Destroy a view, damaging whatever was below it
    fn destroy_view(&mut self, view: &ViewId);
    /// Whether the view still exists
    fn view_alive(&self, view: &ViewId) -> bool;
    /// Location of the view in compositor space
    fn view_position(&self, view: &ViewId) -> Option<Point<i32, Logical>>;
    /// Move the view
    fn set_view_position(&mut self, view: &ViewId, position: Point<i32, Logical>);
    /// Whether the view has been mapped into a layer
    fn view_is_mapped(&self, view: &ViewId) -> bool;
    /// Map the view, inserting it on top of the given layer
    fn map_view(&mut self, view: &ViewId, layer: Layer);
    /// Damage the area of the scene covered by the view
    fn damage_below(&mut self, view: &ViewId);

    /// The topmost view under a location, with the location translated into the view
    fn pick_view(&self, location: Point<f64, Logical>) -> Option<(ViewId, Point<f64, Local>)>;
    /// Schedule a repaint of all outputs
    fn schedule_repaint(&mut self);
}
