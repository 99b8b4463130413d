//! Opaque identifiers for objects owned by the scene host
//!
//! The shell modules never own surfaces, views, seats or outputs. They only
//! remember the identifier the host handed out and ask the host whether the
//! object is still alive before acting on it.

macro_rules! host_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw identifier handed out by the host
            #[inline]
            pub const fn from_raw(raw: u64) -> Self {
                $name(raw)
            }

            /// The raw identifier
            #[inline]
            pub const fn as_raw(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            #[inline]
            fn from(raw: u64) -> Self {
                $name(raw)
            }
        }
    };
}

host_id!(
    /// Identifier of a client surface
    SurfaceId
);
host_id!(
    /// Identifier of a view, the placement of a surface in the scene graph
    ViewId
);
host_id!(
    /// Identifier of an input seat
    SeatId
);
host_id!(
    /// Identifier of an output
    OutputId
);
host_id!(
    /// Identifier of a connected client
    ClientId
);
