//! Clock wraparound detection.

/// Remembers the last clock reading and reports when the clock went backwards.
///
/// The clock only ever goes backwards when it wraps. Every timestamp taken before
/// the wrap is then meaningless, so the owner must discard its timing state when
/// [`OverflowGuard::check`] returns true.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OverflowGuard {
    last_seen: Option<u32>,
}

impl OverflowGuard {
    pub const fn new() -> Self {
        Self { last_seen: None }
    }

    /// Record `now` and return true if it is lower than the previous reading.
    ///
    /// The first reading only sets the baseline.
    pub fn check(&mut self, now: u32) -> bool {
        let wrapped = matches!(self.last_seen, Some(last) if now < last);
        self.last_seen = Some(now);
        wrapped
    }

    pub fn last_seen(&self) -> Option<u32> {
        self.last_seen
    }
}
