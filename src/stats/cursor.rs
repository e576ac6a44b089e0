/// Backward, wrapping position in the match log. Lives in memory only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryCursor {
    index: Option<usize>,
}

impl HistoryCursor {
    /// Moves `offset` entries back (forward when negative) in a log of `len`
    /// records and returns the new position. `len` must be non-zero.
    ///
    /// From the reset position the cursor sits one past the newest record, so
    /// `step(1, len)` lands on `len - 1`.
    pub fn step(&mut self, offset: i64, len: usize) -> usize {
        debug_assert!(len > 0);
        let len = len as i64;
        let base = self.index.map_or(len, |i| i as i64);
        let shift = offset.rem_euclid(len);
        let next = (base - shift).rem_euclid(len) as usize;
        self.index = Some(next);
        next
    }

    pub fn reset(&mut self) {
        self.index = None;
    }

    pub fn position(&self) -> Option<usize> {
        self.index
    }
}
