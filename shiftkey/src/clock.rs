//! Millisecond clock source.

use embassy_time::Instant;

/// A monotonic millisecond counter.
///
/// Readings never decrease, except for one wraparound back to a low value after
/// the counter's range is exhausted. [`crate::overflow::OverflowGuard`] detects
/// that wraparound.
pub trait Clock {
    /// Current reading in milliseconds.
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Clock backed by the embassy time driver.
///
/// The 64-bit embassy tick counter is truncated to 32 bits of milliseconds, so
/// the reading wraps after about 49.7 days.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}

/// Milliseconds elapsed between `since` and `now`.
///
/// Saturates to zero when `since` is ahead of `now`, which only happens across a
/// wraparound that hasn't been handled yet.
pub(crate) fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.saturating_sub(since)
}
