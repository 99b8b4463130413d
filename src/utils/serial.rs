use std::sync::atomic::{AtomicU32, Ordering};

/// Event-ordering token stamped on input events
///
/// The compositor remembers the serial of the last event of each device that could
/// start a grab. Show requests echo one back, and are only honored if it is still
/// that last serial.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Serial(pub(crate) u32);

impl From<u32> for Serial {
    #[inline]
    fn from(n: u32) -> Self {
        Serial(n)
    }
}

impl From<Serial> for u32 {
    #[inline]
    fn from(serial: Serial) -> u32 {
        serial.0
    }
}

/// Source of [`Serial`]s for the input events of a compositor
///
/// Wraps around on overflow, never handing out `0`.
#[derive(Debug)]
pub struct SerialCounter {
    next: AtomicU32,
}

impl SerialCounter {
    /// Create a counter whose first serial is `initial`, or `1` if `initial` is `0`
    pub const fn new(initial: u32) -> Self {
        SerialCounter {
            next: AtomicU32::new(initial),
        }
    }

    /// Stamp a new event
    pub fn next_serial(&self) -> Serial {
        let _ = self.next.compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire);
        Serial(self.next.fetch_add(1, Ordering::AcqRel))
    }
}

impl Default for SerialCounter {
    fn default() -> Self {
        SerialCounter::new(1)
    }
}
