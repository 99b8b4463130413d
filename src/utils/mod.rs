//! Various utilities functions and types

mod geometry;
mod ids;
mod serial;

pub use self::geometry::{Coordinate, Local, Logical, Point, Rectangle, Size};
pub use self::ids::{ClientId, OutputId, SeatId, SurfaceId, ViewId};
pub use self::serial::{Serial, SerialCounter};
