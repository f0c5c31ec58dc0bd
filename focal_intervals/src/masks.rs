use crate::combinators::BoolOp;
use crate::errors::MaskError;
use crate::intervals::DirectedInterval;
use crate::truth_tables::TruthTable;
use itertools::Itertools;

/// The boolean value of a mask at some position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaskState {
    True,
    False,
    Unknown, //  outside of the mask
}

impl From<bool> for MaskState {
    fn from(value: bool) -> Self {
        if value {
            MaskState::True
        } else {
            MaskState::False
        }
    }
}

/// A single interval split into alternating true and false segments.
///
/// The first and last breakpoints are the ends of the interval, the others
/// are where the value flips.  Breakpoints are strictly monotonic, either
/// ascending or descending, which gives the direction of the mask.
///
/// ```text
///     start_state = true,  breakpoints = [0, 10, 25, 30]
///
///     0         10             25   30
///     [TTTTTTTTT][FFFFFFFFFFFFFF][TTTT]
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MaskedInterval {
    start_state: bool,
    breakpoints: Vec<i64>,
}

impl MaskedInterval {
    /// Validate the breakpoints: there must be at least two, the first two
    /// must differ (they set the direction) and all others must continue
    /// strictly in that direction.
    pub fn new(
        start_state: bool,
        breakpoints: Vec<i64>,
    ) -> Result<Self, MaskError> {
        let (first, second) = match breakpoints.as_slice() {
            [first, second, ..] => (*first, *second),
            _ => return Err(MaskError::TooFewBreakpoints(breakpoints.len())),
        };
        if first == second {
            return Err(MaskError::ZeroLengthFirstSegment(first));
        }
        let ascending = second > first;
        if let Some((index, (_, position))) = breakpoints
            .iter()
            .tuple_windows()
            .enumerate()
            .find(|(_, (prev, next))| (next > prev) != ascending || next == prev)
        {
            return Err(MaskError::NonMonotonic {
                index: index + 1,
                position: *position,
            });
        }
        Ok(Self {
            start_state,
            breakpoints,
        })
    }

    /// A mask that is true on the whole interval
    pub fn from_interval(interval: &DirectedInterval) -> Result<Self, MaskError> {
        Self::new(true, vec![interval.start, interval.end])
    }

    /// Rebuild a mask from its span and true segments.  The segments must
    /// be ordered along the span and not touch each other.  This is the
    /// inverse of [`MaskedInterval::segments()`].
    pub fn from_segments(
        span: &DirectedInterval,
        segments: &[DirectedInterval],
    ) -> Result<Self, MaskError> {
        let start_state =
            segments.first().is_some_and(|s| s.start == span.start);
        let mut breakpoints = Vec::with_capacity(segments.len() * 2 + 2);
        if !start_state {
            breakpoints.push(span.start);
        }
        for s in segments {
            breakpoints.push(s.start);
            breakpoints.push(s.end);
        }
        if breakpoints.last() != Some(&span.end) {
            breakpoints.push(span.end);
        }
        Self::new(start_state, breakpoints)
    }

    pub fn start_state(&self) -> bool {
        self.start_state
    }

    pub fn breakpoints(&self) -> &[i64] {
        &self.breakpoints
    }

    pub fn is_ascending(&self) -> bool {
        self.span().is_ascending()
    }

    /// 1 or -1
    pub fn direction(&self) -> i64 {
        self.span().direction()
    }

    /// From the first to the last breakpoint
    pub fn span(&self) -> DirectedInterval {
        DirectedInterval::new(
            self.breakpoints.first().copied().unwrap_or_default(),
            self.breakpoints.last().copied().unwrap_or_default(),
        )
    }

    /// True when no segment is true
    pub fn is_empty(&self) -> bool {
        !self.start_state && self.breakpoints.len() <= 2
    }

    /// Number of segments (true or false)
    pub fn segment_count(&self) -> usize {
        self.breakpoints.len() - 1
    }

    /// The value of the segment containing the position.  Interior
    /// breakpoints belong to the segment that starts there, and the end of
    /// the span to the last segment.
    pub fn mask_at_position(&self, position: i64) -> MaskState {
        if !self.span().contains(position) {
            return MaskState::Unknown;
        }
        let interior = self
            .breakpoints
            .get(1..self.breakpoints.len() - 1)
            .unwrap_or_default();
        let passed = if self.is_ascending() {
            interior.partition_point(|b| *b <= position)
        } else {
            interior.partition_point(|b| *b >= position)
        };
        MaskState::from(self.start_state ^ (passed % 2 == 1))
    }

    /// The true segments, in the direction of the mask
    pub fn segments(&self) -> Vec<DirectedInterval> {
        let offset = usize::from(!self.start_state);
        self.breakpoints
            .iter()
            .skip(offset)
            .tuples()
            .map(|(start, end)| DirectedInterval::new(*start, *end))
            .collect()
    }

    /// The same mask, read in ascending order
    pub fn ascending(&self) -> MaskedInterval {
        if self.is_ascending() {
            self.clone()
        } else {
            self.reversed()
        }
    }

    /// The same segments, with breakpoints in the opposite direction
    pub fn reversed(&self) -> MaskedInterval {
        let last_segment_is_odd = self.segment_count() % 2 == 0;
        MaskedInterval {
            start_state: self.start_state ^ last_segment_is_odd,
            breakpoints: self.breakpoints.iter().rev().copied().collect(),
        }
    }

    /// Swap the true and false segments
    pub fn invert(&self) -> MaskedInterval {
        MaskedInterval {
            start_state: !self.start_state,
            breakpoints: self.breakpoints.clone(),
        }
    }

    /// Combine two masks through a truth table.  The result is ascending,
    /// and None when it has no true segment.
    ///
    /// Outside of its span, a mask reads as the inverse of its
    /// `start_state`.  A mask starting false is therefore true beyond its
    /// ends, even though [`MaskedInterval::mask_at_position`] reports
    /// `Unknown` there: `(false, [0, 10, 20, 30])` and `[25, 50]` give
    /// `[30, 50]`.
    pub fn combine(
        &self,
        other: &MaskedInterval,
        op: BoolOp,
    ) -> Option<MaskedInterval> {
        let breakpoints = TruthTable::new(self, other).apply(op);
        MaskedInterval::new(true, breakpoints).ok()
    }

    /// Move every breakpoint proportionally from one span onto another.
    /// Segments that shrink to nothing are dropped and their neighbours
    /// merged, so the result is None only when the whole span collapses.
    pub fn remap(
        &self,
        from: &DirectedInterval,
        to: &DirectedInterval,
    ) -> Option<MaskedInterval> {
        let mut start_state = self.start_state;
        let mut breakpoints = Vec::with_capacity(self.breakpoints.len());
        let mut state = self.start_state;
        let mut last_kept: Option<bool> = None;
        for (prev, next) in self
            .breakpoints
            .iter()
            .map(|b| DirectedInterval::remap_position(*b, from, to))
            .tuple_windows()
        {
            if prev != next {
                match last_kept {
                    None => {
                        start_state = state;
                        breakpoints.push(prev);
                        breakpoints.push(next);
                    }
                    Some(kept) if kept == state => {
                        if let Some(end) = breakpoints.last_mut() {
                            *end = next;
                        }
                    }
                    Some(_) => breakpoints.push(next),
                }
                last_kept = Some(state);
            }
            state = !state;
        }
        MaskedInterval::new(start_state, breakpoints).ok()
    }
}

impl std::fmt::Display for MaskedInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut state = self.start_state;
        write!(f, "{}", self.breakpoints.first().copied().unwrap_or_default())?;
        for b in self.breakpoints.iter().skip(1) {
            write!(f, " {} {}", if state { "T" } else { "F" }, b)?;
            state = !state;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn di(start: i64, end: i64) -> DirectedInterval {
        DirectedInterval::new(start, end)
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            MaskedInterval::new(true, vec![]),
            Err(MaskError::TooFewBreakpoints(0))
        );
        assert_eq!(
            MaskedInterval::new(true, vec![4]),
            Err(MaskError::TooFewBreakpoints(1))
        );
        assert_eq!(
            MaskedInterval::new(true, vec![4, 4, 5]),
            Err(MaskError::ZeroLengthFirstSegment(4))
        );
        assert_eq!(
            MaskedInterval::new(true, vec![0, 10, 5]),
            Err(MaskError::NonMonotonic {
                index: 2,
                position: 5
            })
        );
        assert_eq!(
            MaskedInterval::new(false, vec![30, 20, 20]),
            Err(MaskError::NonMonotonic {
                index: 2,
                position: 20
            })
        );
        assert!(MaskedInterval::new(false, vec![30, 20, 10, -5]).is_ok());
    }

    #[test]
    fn test_mask_at_position() {
        let m = MaskedInterval::new(true, vec![0, 10, 25, 30]).unwrap();
        assert_eq!(m.mask_at_position(-1), MaskState::Unknown);
        assert_eq!(m.mask_at_position(0), MaskState::True);
        assert_eq!(m.mask_at_position(9), MaskState::True);
        assert_eq!(m.mask_at_position(10), MaskState::False);
        assert_eq!(m.mask_at_position(24), MaskState::False);
        assert_eq!(m.mask_at_position(25), MaskState::True);
        assert_eq!(m.mask_at_position(30), MaskState::True);
        assert_eq!(m.mask_at_position(31), MaskState::Unknown);

        let m = MaskedInterval::new(false, vec![30, 20, 10]).unwrap();
        assert_eq!(m.mask_at_position(31), MaskState::Unknown);
        assert_eq!(m.mask_at_position(30), MaskState::False);
        assert_eq!(m.mask_at_position(21), MaskState::False);
        assert_eq!(m.mask_at_position(20), MaskState::True);
        assert_eq!(m.mask_at_position(10), MaskState::True);
        assert_eq!(m.mask_at_position(9), MaskState::Unknown);
    }

    #[test]
    fn test_segments_round_trip() {
        for (state, bps) in [
            (true, vec![0, 10, 20]),
            (false, vec![0, 10, 20]),
            (true, vec![0, 10, 20, 30]),
            (false, vec![0, 10, 20, 30]),
            (false, vec![50, 40, 0, -10, -20]),
            (false, vec![1, 2]),
        ] {
            let m = MaskedInterval::new(state, bps).unwrap();
            let segments = m.segments();
            let back = MaskedInterval::from_segments(&m.span(), &segments);
            assert_eq!(back, Ok(m.clone()), "{m}");
        }

        let m = MaskedInterval::new(false, vec![0, 10, 20, 30]).unwrap();
        assert_eq!(m.segments(), vec![di(10, 20)]);
        let m = MaskedInterval::new(true, vec![30, 20, 10, 0]).unwrap();
        assert_eq!(m.segments(), vec![di(30, 20), di(10, 0)]);
    }

    #[test]
    fn test_empty() {
        assert!(MaskedInterval::new(false, vec![0, 10]).unwrap().is_empty());
        assert!(!MaskedInterval::new(true, vec![0, 10]).unwrap().is_empty());
        assert!(!MaskedInterval::new(false, vec![0, 5, 10])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_reversed() {
        let m = MaskedInterval::new(true, vec![0, 10, 25, 30]).unwrap();
        let r = m.reversed();
        assert_eq!(r.breakpoints(), &[30, 25, 10, 0]);
        assert!(r.start_state());
        assert_eq!(r.reversed(), m);

        let m = MaskedInterval::new(true, vec![0, 10, 25]).unwrap();
        let r = m.reversed();
        assert!(!r.start_state());
        for pos in [0, 5, 20, 25] {
            assert_eq!(r.mask_at_position(pos), m.mask_at_position(pos));
        }
    }

    #[test]
    fn test_combine() {
        let m = MaskedInterval::new(true, vec![0, 10, 25, 30]).unwrap();
        let other = MaskedInterval::from_interval(&di(5, 28)).unwrap();
        assert_eq!(
            m.combine(&other, BoolOp::And),
            Some(MaskedInterval::new(true, vec![5, 10, 25, 28]).unwrap())
        );
        assert_eq!(m.combine(&other, BoolOp::Never), None);
        assert_eq!(
            m.invert().segments(),
            vec![di(10, 25)],
        );
        assert_eq!(format!("{m}"), "0 T 10 F 25 T 30");
    }

    #[test]
    fn test_remap() {
        let m = MaskedInterval::new(true, vec![0, 10, 20, 30]).unwrap();
        assert_eq!(
            m.remap(&di(0, 30), &di(0, 300)),
            Some(MaskedInterval::new(true, vec![0, 100, 200, 300]).unwrap())
        );
        assert_eq!(
            m.remap(&di(0, 30), &di(30, 0)),
            Some(MaskedInterval::new(true, vec![30, 20, 10, 0]).unwrap())
        );

        // The first segment vanishes
        assert_eq!(
            m.remap(&di(0, 30), &di(0, 2)),
            Some(MaskedInterval::new(false, vec![0, 1, 2]).unwrap())
        );

        // The false segment vanishes, both true ones merge
        let m = MaskedInterval::new(true, vec![0, 10, 11, 30]).unwrap();
        assert_eq!(
            m.remap(&di(0, 30), &di(0, 3)),
            Some(MaskedInterval::new(true, vec![0, 3]).unwrap())
        );

        assert_eq!(m.remap(&di(0, 30), &di(5, 5)), None);
    }

    #[test]
    fn test_combine_outside_span() {
        let m = MaskedInterval::new(false, vec![0, 10, 20, 30]).unwrap();
        let other = MaskedInterval::from_interval(&di(25, 50)).unwrap();
        assert_eq!(m.mask_at_position(40), MaskState::Unknown);
        assert_eq!(
            m.combine(&other, BoolOp::And),
            Some(MaskedInterval::new(true, vec![30, 50]).unwrap())
        );
    }
}
