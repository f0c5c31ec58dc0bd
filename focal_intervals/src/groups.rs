use crate::combinators::BoolOp;
use crate::comparisons::{compare, Comparison};
use crate::errors::MaskError;
use crate::intervals::DirectedInterval;
use crate::masks::MaskedInterval;
use crate::truth_tables::TruthTable;
use itertools::Itertools;

/// How two groups are combined
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupOp {
    Bool(BoolOp),
    Compare(Comparison),
}

/// An ordered sequence of directed intervals, usually laid out tip to tail.
///
/// Positions are stored flat (start, end, start, end...).  Clearing the
/// group keeps the buffer, and later additions reuse its slots, since
/// groups are typically recomputed many times in a row.
#[derive(Clone, Debug, Default)]
pub struct IntervalGroup {
    positions: Vec<i64>,
    count: usize,
}

impl IntervalGroup {
    pub fn from_intervals<'a>(
        intervals: impl IntoIterator<Item = &'a DirectedInterval>,
    ) -> Self {
        let mut group = IntervalGroup::default();
        for intv in intervals {
            group.add(*intv);
        }
        group
    }

    /// Build a group from a flat list of positions, read two by two.  A
    /// trailing odd position is ignored.
    pub fn from_breakpoints(breakpoints: &[i64]) -> Self {
        let mut group = IntervalGroup::default();
        group.set_from_breakpoints(breakpoints);
        group
    }

    /// Number of intervals in the group
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Append an interval, reusing a previously cleared slot if possible
    pub fn add_position(&mut self, start: i64, end: i64) {
        let slot = self.count * 2;
        if let Some(stored) = self.positions.get_mut(slot..slot + 2) {
            stored.copy_from_slice(&[start, end]);
        } else {
            self.positions.truncate(slot);
            self.positions.push(start);
            self.positions.push(end);
        }
        self.count += 1;
    }

    pub fn add(&mut self, interval: DirectedInterval) {
        self.add_position(interval.start, interval.end);
    }

    /// Remove all intervals (the storage is kept for reuse)
    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Replace the contents with the given flat positions
    pub fn set_from_breakpoints(&mut self, breakpoints: &[i64]) {
        self.clear();
        for (start, end) in breakpoints.iter().tuples() {
            self.add_position(*start, *end);
        }
    }

    /// The positions currently in use: always 2 * count values, in
    /// insertion order.
    pub fn positions(&self) -> &[i64] {
        self.positions.get(..self.count * 2).unwrap_or_default()
    }

    pub fn get(&self, index: usize) -> Option<DirectedInterval> {
        if index >= self.count {
            return None;
        }
        if let Some(&[start, end]) = self.positions.get(index * 2..index * 2 + 2)
        {
            Some(DirectedInterval::new(start, end))
        } else {
            None
        }
    }

    pub fn set(&mut self, index: usize, interval: DirectedInterval) -> bool {
        if index >= self.count {
            return false;
        }
        match self.positions.get_mut(index * 2..index * 2 + 2) {
            Some(stored) => {
                stored.copy_from_slice(&[interval.start, interval.end]);
                true
            }
            None => false,
        }
    }

    pub fn first(&self) -> Option<DirectedInterval> {
        self.get(0)
    }

    pub fn last(&self) -> Option<DirectedInterval> {
        self.count.checked_sub(1).and_then(|idx| self.get(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = DirectedInterval> + '_ {
        self.positions()
            .iter()
            .tuples()
            .map(|(start, end)| DirectedInterval::new(*start, *end))
    }

    /// Smallest position of all intervals
    pub fn min_extent(&self) -> Option<i64> {
        self.positions().iter().min().copied()
    }

    /// Largest position of all intervals
    pub fn max_extent(&self) -> Option<i64> {
        self.positions().iter().max().copied()
    }

    /// The ascending span covering all intervals
    pub fn extent(&self) -> Option<DirectedInterval> {
        Some(DirectedInterval::new(self.min_extent()?, self.max_extent()?))
    }

    /// The union of all intervals, as ascending runs sorted left to right.
    /// Touching intervals are merged, zero-length ones dropped.
    pub fn merged(&self) -> Vec<DirectedInterval> {
        let mut result: Vec<DirectedInterval> = Vec::new();
        for intv in self
            .iter()
            .filter(|i| !i.is_zero_length())
            .map(|i| i.normalized())
            .sorted_by_key(|i| i.start)
        {
            if let Some(last) = result.last_mut().filter(|l| l.end >= intv.start)
            {
                last.end = last.end.max(intv.end);
            } else {
                result.push(intv);
            }
        }
        result
    }

    /// Same as merged, flattened.  The result is strictly ascending.
    pub fn merged_positions(&self) -> Vec<i64> {
        self.merged()
            .iter()
            .flat_map(|intv| [intv.start, intv.end])
            .collect()
    }

    /// Encode the group as a run-length mask
    pub fn to_mask(&self) -> Result<MaskedInterval, MaskError> {
        MaskedInterval::new(true, self.merged_positions())
    }

    /// Move every position proportionally from one span onto another
    pub fn remap(&mut self, from: &DirectedInterval, to: &DirectedInterval) {
        let limit = self.count * 2;
        for pos in self.positions.iter_mut().take(limit) {
            *pos = DirectedInterval::remap_position(*pos, from, to);
        }
    }

    /// Replace the contents of self with the result of combining it with
    /// other.
    ///
    /// Boolean functions are computed through a truth table, so functions
    /// that are true outside of their operands are clipped to the span of
    /// the breakpoints.  Comparisons look at the extents of both groups and
    /// leave at most one interval.
    pub fn compute_with(&mut self, other: &IntervalGroup, op: GroupOp) {
        match op {
            GroupOp::Bool(bool_op) => {
                let breakpoints =
                    TruthTable::from_groups(self, other).apply(bool_op);
                self.set_from_breakpoints(&breakpoints);
            }
            GroupOp::Compare(cmp) => {
                let found = match (self.extent(), other.extent()) {
                    (Some(a), Some(b)) => compare(cmp, &a, &b),
                    (None, _) | (_, None) => None,
                };
                self.clear();
                if let Some(intv) = found {
                    self.add(intv);
                }
            }
        }
        log::trace!("group {:?} -> {}", op, self);
    }

    /// Boolean combination of two single intervals through the truth table
    pub fn from_bool(
        op: BoolOp,
        p: &DirectedInterval,
        q: &DirectedInterval,
    ) -> Self {
        let mut group = IntervalGroup::from_intervals([p]);
        group.compute_with(&IntervalGroup::from_intervals([q]), GroupOp::Bool(op));
        group
    }
}

impl PartialEq for IntervalGroup {
    /// Same intervals in the same order (spare capacity is irrelevant)
    fn eq(&self, other: &Self) -> bool {
        self.positions() == other.positions()
    }
}

impl Eq for IntervalGroup {}

impl std::fmt::Display for IntervalGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "empty")
        } else {
            write!(f, "{}", self.iter().join(", "))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn di(start: i64, end: i64) -> DirectedInterval {
        DirectedInterval::new(start, end)
    }

    #[test]
    fn test_storage_reuse() {
        let mut g = IntervalGroup::default();
        g.add_position(0, 10);
        g.add_position(10, 20);
        g.add_position(20, 35);
        assert_eq!(g.count(), 3);
        assert_eq!(g.positions(), &[0, 10, 10, 20, 20, 35]);

        g.clear();
        assert!(g.is_empty());
        assert!(g.positions().is_empty());
        assert_eq!(g.get(0), None);

        g.add_position(5, 6);
        assert_eq!(g.count(), 1);
        assert_eq!(g.positions(), &[5, 6]);
        assert_eq!(g.first(), Some(di(5, 6)));
        assert_eq!(g.last(), Some(di(5, 6)));
        assert_eq!(g.positions.len(), 6); //  storage kept

        g.add(di(8, 7));
        g.add(di(1, 2));
        g.add(di(3, 4));
        assert_eq!(g.count(), 4);
        assert_eq!(g.positions(), &[5, 6, 8, 7, 1, 2, 3, 4]);
        assert!(g.set(1, di(9, 9)));
        assert!(!g.set(4, di(9, 9)));
        assert_eq!(g.get(1), Some(di(9, 9)));
    }

    #[test]
    fn test_extent() {
        let g = IntervalGroup::from_intervals(&[di(10, 0), di(30, 20)]);
        assert_eq!(g.min_extent(), Some(0));
        assert_eq!(g.max_extent(), Some(30));
        assert_eq!(g.extent(), Some(di(0, 30)));
        assert_eq!(IntervalGroup::default().extent(), None);
        assert_eq!(format!("{g}"), "[10 -> 0], [30 -> 20]");
    }

    #[test]
    fn test_merged() {
        let g = IntervalGroup::from_intervals(&[
            di(30, 20),
            di(0, 10),
            di(5, 15),
            di(15, 18),
            di(40, 40),
        ]);
        assert_eq!(g.merged(), vec![di(0, 18), di(20, 30)]);
        assert_eq!(g.merged_positions(), vec![0, 18, 20, 30]);
    }

    #[test]
    fn test_bool() {
        let mut g = IntervalGroup::from_intervals(&[di(0, 10), di(20, 30)]);
        let other = IntervalGroup::from_intervals(&[di(5, 25)]);
        g.compute_with(&other, GroupOp::Bool(BoolOp::And));
        assert_eq!(g, IntervalGroup::from_intervals(&[di(5, 10), di(20, 25)]));

        let mut g = IntervalGroup::from_intervals(&[di(0, 10), di(20, 30)]);
        g.compute_with(&other, GroupOp::Bool(BoolOp::Or));
        assert_eq!(g, IntervalGroup::from_intervals(&[di(0, 30)]));

        let mut g = IntervalGroup::from_intervals(&[di(0, 10), di(20, 30)]);
        g.compute_with(&other, GroupOp::Bool(BoolOp::Never));
        assert!(g.is_empty());

        assert_eq!(
            IntervalGroup::from_bool(BoolOp::Or, &di(20, 10), &di(15, 25)),
            IntervalGroup::from_intervals(&[di(10, 25)])
        );
    }

    #[test]
    fn test_compare() {
        let other = IntervalGroup::from_intervals(&[di(10, 20)]);

        let mut g = IntervalGroup::from_intervals(&[di(0, 5), di(5, 15)]);
        g.compute_with(&other, GroupOp::Compare(Comparison::ContainedBy));
        assert_eq!(g, IntervalGroup::from_intervals(&[di(10, 15)]));

        let mut g = IntervalGroup::from_intervals(&[di(0, 5)]);
        g.compute_with(&other, GroupOp::Compare(Comparison::GreaterThan));
        assert!(g.is_empty());

        let mut g = IntervalGroup::default();
        g.compute_with(&other, GroupOp::Compare(Comparison::LessThan));
        assert!(g.is_empty());
    }

    #[test]
    fn test_remap() {
        let mut g = IntervalGroup::from_intervals(&[di(0, 5), di(5, 10)]);
        g.remap(&di(0, 10), &di(100, 120));
        assert_eq!(g.positions(), &[100, 110, 110, 120]);
    }

    #[test]
    fn test_to_mask() {
        let g = IntervalGroup::from_intervals(&[di(0, 5), di(10, 20)]);
        let mask = g.to_mask().unwrap();
        assert!(mask.start_state());
        assert_eq!(mask.breakpoints(), &[0, 5, 10, 20]);
        assert!(IntervalGroup::default().to_mask().is_err());
    }
}
