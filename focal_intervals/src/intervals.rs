use std::cmp::{max, min, Ordering};

/// Two tick positions, read from `start` towards `end`.
///
/// Unlike a mathematical interval, the order of the two positions carries
/// meaning: `[10 -> 20]` and `[20 -> 10]` cover the same ticks but point in
/// opposite directions.
///
/// ```text
///     start          end
///       |------------>        direction  1
///       <------------|        direction -1
///       |                     direction  0  (zero length)
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DirectedInterval {
    pub start: i64,
    pub end: i64,
}

impl DirectedInterval {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// The span covering every representable tick.  This is what the
    /// complement-style combinators (Nand, Nor, Not...) are relative to.
    pub fn universe() -> Self {
        Self::new(i64::MIN, i64::MAX)
    }

    /// An ascending interval covering min(a,b)..max(a,b)
    pub fn ascending(a: i64, b: i64) -> Self {
        Self::new(min(a, b), max(a, b))
    }

    /// -1, 0 or 1
    pub fn direction(&self) -> i64 {
        match self.end.cmp(&self.start) {
            Ordering::Greater => 1,
            Ordering::Less => -1,
            Ordering::Equal => 0,
        }
    }

    /// Signed length (end - start).  Saturates for intervals wider than what
    /// an i64 can measure, which only happens near the universe bounds.
    pub fn length(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }

    pub fn abs_length(&self) -> i64 {
        self.length().saturating_abs()
    }

    /// Same as length, but never zero so that it can safely be used as a
    /// denominator.
    pub fn non_zero_length(&self) -> i64 {
        match self.length() {
            0 => 1,
            len => len,
        }
    }

    pub fn is_zero_length(&self) -> bool {
        self.start == self.end
    }

    /// The smallest of the two positions, whatever the direction
    pub fn min(&self) -> i64 {
        min(self.start, self.end)
    }

    /// The largest of the two positions, whatever the direction
    pub fn max(&self) -> i64 {
        max(self.start, self.end)
    }

    pub fn is_ascending(&self) -> bool {
        self.end > self.start
    }

    /// Same span, opposite direction
    pub fn reverse(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// The same span, made ascending
    pub fn normalized(&self) -> Self {
        Self::ascending(self.start, self.end)
    }

    /// Return an interval covering the same span as self, oriented like
    /// `like`.  Zero-length references leave the span ascending.
    pub fn oriented_like(&self, like: &DirectedInterval) -> Self {
        if like.direction() < 0 {
            Self::new(self.max(), self.min())
        } else {
            self.normalized()
        }
    }

    /// Move both endpoints
    pub fn shifted(&self, offset: i64) -> Self {
        Self::new(
            self.start.saturating_add(offset),
            self.end.saturating_add(offset),
        )
    }

    /// Whether the position is within the span (both ends included)
    pub fn contains(&self, position: i64) -> bool {
        self.min() <= position && position <= self.max()
    }

    /// Whether all the span of other is within the span of self
    pub fn contains_interval(&self, other: &DirectedInterval) -> bool {
        self.min() <= other.min() && other.max() <= self.max()
    }

    /// The common part of the two spans, as an ascending interval.  When the
    /// two do not intersect, this is a zero-length interval located at the
    /// boundary closest to both.
    pub fn overlap(p: &DirectedInterval, q: &DirectedInterval) -> Self {
        let lower = max(p.min(), q.min());
        let upper = min(p.max(), q.max());
        if upper < lower {
            Self::new(lower, lower)
        } else {
            Self::new(lower, upper)
        }
    }

    /// The smallest ascending span that covers both intervals
    pub fn extent(p: &DirectedInterval, q: &DirectedInterval) -> Self {
        Self::new(min(p.min(), q.min()), max(p.max(), q.max()))
    }

    /// The overlap of the two intervals, oriented like `p`.  None if they
    /// share no more than a single position.
    pub fn intersection(
        p: &DirectedInterval,
        q: &DirectedInterval,
    ) -> Option<Self> {
        let ov = Self::overlap(p, q);
        if ov.is_zero_length() {
            None
        } else {
            Some(ov.oriented_like(p))
        }
    }

    /// Whether the two spans share at least one position (touching counts)
    pub fn touches(&self, other: &DirectedInterval) -> bool {
        self.min() <= other.max() && other.min() <= self.max()
    }

    /// Map a position proportionally from the span of `from` onto the span
    /// of `to`, preserving the relative location (start maps to start).
    pub fn remap_position(
        position: i64,
        from: &DirectedInterval,
        to: &DirectedInterval,
    ) -> i64 {
        let from_len = i128::from(from.non_zero_length());
        let offset = i128::from(position) - i128::from(from.start);
        let to_len = i128::from(to.end) - i128::from(to.start);
        let mapped = offset
            .checked_mul(to_len)
            .map_or(i128::MAX, |scaled| scaled / from_len)
            .saturating_add(i128::from(to.start));
        i64::try_from(mapped).unwrap_or(if mapped < 0 {
            i64::MIN
        } else {
            i64::MAX
        })
    }
}

impl From<(i64, i64)> for DirectedInterval {
    fn from(value: (i64, i64)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<std::ops::Range<i64>> for DirectedInterval {
    fn from(value: std::ops::Range<i64>) -> Self {
        Self::new(value.start, value.end)
    }
}

impl std::fmt::Display for DirectedInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} -> {}]", self.start, self.end)
    }
}
