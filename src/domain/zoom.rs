/// One end of a zoom range: either a concrete sample index or "the data extremity".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bound {
    #[default]
    Unbounded,
    At(usize),
}

/// The sub-interval of sample indices on the time axis.
/// `start: Unbounded` resolves to 0 and `end: Unbounded` to `len - 1` at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoomRange {
    pub start: Bound,
    pub end: Bound,
}

impl ZoomRange {
    pub const UNBOUNDED: Self = Self {
        start: Bound::Unbounded,
        end: Bound::Unbounded,
    };

    /// A concrete range with its ends put in order.
    pub fn between(a: usize, b: usize) -> Self {
        Self {
            start: Bound::At(a.min(b)),
            end: Bound::At(a.max(b)),
        }
    }

    #[inline]
    pub fn is_unbounded(&self) -> bool {
        *self == Self::UNBOUNDED
    }

    /// Resolve sentinels against a series of `len` samples.
    /// Returns `None` for an empty series or when a concrete end no longer fits the series
    /// (a stale range: the caller must reset rather than index out of bounds).
    pub fn resolve(&self, len: usize) -> Option<(usize, usize)> {
        if len == 0 {
            return None;
        }
        let last = len - 1;
        let start = match self.start {
            Bound::Unbounded => 0,
            Bound::At(i) => i,
        };
        let end = match self.end {
            Bound::Unbounded => last,
            Bound::At(i) => i,
        };
        if start > last || end > last || start > end {
            return None;
        }
        Some((start, end))
    }

    /// True when every concrete index is valid for a series of `len` samples.
    pub fn fits(&self, len: usize) -> bool {
        self.is_unbounded() || self.resolve(len).is_some()
    }
}
