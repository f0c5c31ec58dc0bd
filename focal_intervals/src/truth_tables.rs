use crate::combinators::BoolOp;
use crate::groups::IntervalGroup;
use crate::masks::MaskedInterval;
use itertools::{EitherOrBoth, Itertools};

/// The state of both operands, starting at one breakpoint and until the
/// next one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TruthRow {
    pub position: i64,
    pub left: bool,
    pub right: bool,
}

/// All the breakpoints of two run-length encoded operands, sorted in
/// ascending order, each annotated with the boolean state of each side.
///
/// Any of the sixteen boolean functions can then be applied to the table,
/// which gives the breakpoints of the combined result.
///
/// ```text
///    left      F  [T T T T T T]  F  F  F  F
///    right     F  F  F  [T T T T T T T]   F
///    rows         10     15     20     25
///    Xor          T      F      T      F     => 10 15 20 25
/// ```
#[derive(Clone, Debug, Default)]
pub struct TruthTable {
    rows: Vec<TruthRow>,
}

/// One operand: its initial state and ascending breakpoints
struct Side<'a> {
    start_state: bool,
    breakpoints: &'a [i64],
}

impl Side<'_> {
    /// Scanning starts outside of the operand, so with the opposite of its
    /// start state.  The state toggles at each breakpoint, and is back to
    /// its outside value after the last one.
    fn state_after(&self, index: usize, current: bool) -> bool {
        if index + 1 == self.breakpoints.len() {
            !self.start_state
        } else {
            !current
        }
    }
}

impl TruthTable {
    /// Build the table for two masks.  They can have any direction.
    pub fn new(left: &MaskedInterval, right: &MaskedInterval) -> Self {
        let left = left.ascending();
        let right = right.ascending();
        Self::from_sides(
            Side {
                start_state: left.start_state(),
                breakpoints: left.breakpoints(),
            },
            Side {
                start_state: right.start_state(),
                breakpoints: right.breakpoints(),
            },
        )
    }

    /// Build the table for two groups of intervals.  Overlapping members of
    /// a group are merged first, so each group reads as a mask that starts
    /// true.
    pub fn from_groups(left: &IntervalGroup, right: &IntervalGroup) -> Self {
        let left = left.merged_positions();
        let right = right.merged_positions();
        Self::from_sides(
            Side {
                start_state: true,
                breakpoints: &left,
            },
            Side {
                start_state: true,
                breakpoints: &right,
            },
        )
    }

    fn from_sides(left: Side, right: Side) -> Self {
        let mut left_state = !left.start_state;
        let mut right_state = !right.start_state;
        let rows = left
            .breakpoints
            .iter()
            .enumerate()
            .merge_join_by(right.breakpoints.iter().enumerate(), |l, r| {
                l.1.cmp(r.1)
            })
            .map(|pair| {
                let position = match pair {
                    EitherOrBoth::Both((li, lp), (ri, _)) => {
                        left_state = left.state_after(li, left_state);
                        right_state = right.state_after(ri, right_state);
                        *lp
                    }
                    EitherOrBoth::Left((li, lp)) => {
                        left_state = left.state_after(li, left_state);
                        *lp
                    }
                    EitherOrBoth::Right((ri, rp)) => {
                        right_state = right.state_after(ri, right_state);
                        *rp
                    }
                };
                TruthRow {
                    position,
                    left: left_state,
                    right: right_state,
                }
            })
            .collect();
        TruthTable { rows }
    }

    pub fn rows(&self) -> &[TruthRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Apply a boolean function to the table, and return the ascending
    /// breakpoints of the result.  The output always starts with a
    /// transition into true, so reads as a mask whose start state is true,
    /// and always has an even number of breakpoints.
    pub fn apply(&self, op: BoolOp) -> Vec<i64> {
        let mut result = Vec::new();
        let mut current = false;
        for row in &self.rows {
            let value = op.eval(row.left, row.right);
            if value != current {
                result.push(row.position);
                current = value;
            }
        }

        if current {
            if let Some(last) = self.rows.last() {
                // A run opened on the final row has no length
                if result.last() == Some(&last.position) {
                    result.pop();
                } else {
                    result.push(last.position);
                }
            }
        }
        log::trace!("truth table {op}: {} rows -> {result:?}", self.rows.len());
        result
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::intervals::DirectedInterval;

    fn group(positions: &[(i64, i64)]) -> IntervalGroup {
        let mut g = IntervalGroup::default();
        for (s, e) in positions {
            g.add_position(*s, *e);
        }
        g
    }

    #[test]
    fn test_rows() {
        let table =
            TruthTable::from_groups(&group(&[(10, 20)]), &group(&[(15, 25)]));
        assert_eq!(
            table.rows(),
            &[
                TruthRow { position: 10, left: true, right: false },
                TruthRow { position: 15, left: true, right: true },
                TruthRow { position: 20, left: false, right: true },
                TruthRow { position: 25, left: false, right: false },
            ]
        );
    }

    #[test]
    fn test_apply() {
        let table =
            TruthTable::from_groups(&group(&[(10, 20)]), &group(&[(15, 25)]));
        assert_eq!(table.apply(BoolOp::Or), vec![10, 25]);
        assert_eq!(table.apply(BoolOp::And), vec![15, 20]);
        assert_eq!(table.apply(BoolOp::Xor), vec![10, 15, 20, 25]);
        assert_eq!(table.apply(BoolOp::BInhibitsA), vec![10, 15]);
        assert!(table.apply(BoolOp::Never).is_empty());

        // Functions true outside the operands are clipped to the table
        assert_eq!(table.apply(BoolOp::Nand), vec![10, 15, 20, 25]);
        assert_eq!(table.apply(BoolOp::Always), vec![10, 25]);
        assert_eq!(table.apply(BoolOp::NotA), vec![20, 25]);
    }

    #[test]
    fn test_shared_breakpoints() {
        let table =
            TruthTable::from_groups(&group(&[(0, 10)]), &group(&[(10, 0)]));
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.apply(BoolOp::And), vec![0, 10]);
        assert!(table.apply(BoolOp::Xor).is_empty());
    }

    #[test]
    fn test_masks() {
        let left = MaskedInterval::new(true, vec![0, 10, 20, 30]).unwrap();
        let right =
            MaskedInterval::from_interval(&DirectedInterval::new(25, 5))
                .unwrap();
        let table = TruthTable::new(&left, &right);
        assert_eq!(table.apply(BoolOp::And), vec![5, 10, 20, 25]);
        assert_eq!(table.apply(BoolOp::Or), vec![0, 30]);
    }
}
