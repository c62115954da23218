//! Monotonic time source

/// Millisecond clock
///
/// Values wrap at `u32::MAX`; consumers compare timestamps with
/// `wrapping_sub`.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed point
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}
