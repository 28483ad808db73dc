//! Millisecond timestamp source for the minimum re-read interval gate.

/// A monotonic millisecond clock.
///
/// Timestamps are relative to an arbitrary epoch and wrap at `u32::MAX`.
/// The driver only ever subtracts two timestamps with wrapping arithmetic,
/// so wraparound is harmless as long as the clock itself keeps counting.
pub trait MonotonicClock {
    /// Milliseconds elapsed since the clock's epoch.
    fn now_ms(&mut self) -> u32;
}

/// Any `FnMut() -> u32` works as a clock, e.g. a closure over the HAL's
/// uptime counter.
impl<F> MonotonicClock for F
where
    F: FnMut() -> u32,
{
    fn now_ms(&mut self) -> u32 {
        self()
    }
}
