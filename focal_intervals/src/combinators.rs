use crate::intervals::DirectedInterval;
use itertools::Itertools;

/// The sixteen functions of two boolean inputs.
///
/// A is the left operand, B the right one.  The variants are listed in the
/// order of their truth table read as a 4-bit number, most significant bit
/// first:
///
/// ```text
///    A:  F F T T
///    B:  F T F T
///        -------
///        0 0 0 0   Never
///        0 0 0 1   And
///        0 0 1 0   BInhibitsA     A and not B
///        0 0 1 1   TransferA
///        0 1 0 0   AInhibitsB     B and not A
///        0 1 0 1   TransferB
///        0 1 1 0   Xor
///        0 1 1 1   Or
///        1 0 0 0   Nor
///        1 0 0 1   Xnor
///        1 0 1 0   NotB
///        1 0 1 1   BImpliesA      A or not B
///        1 1 0 0   NotA
///        1 1 0 1   AImpliesB      B or not A
///        1 1 1 0   Nand
///        1 1 1 1   Always
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoolOp {
    Never,
    And,
    BInhibitsA,
    TransferA,
    AInhibitsB,
    TransferB,
    Xor,
    Or,
    Nor,
    Xnor,
    NotB,
    BImpliesA,
    NotA,
    AImpliesB,
    Nand,
    Always,
}

impl BoolOp {
    pub const ALL: [BoolOp; 16] = [
        BoolOp::Never,
        BoolOp::And,
        BoolOp::BInhibitsA,
        BoolOp::TransferA,
        BoolOp::AInhibitsB,
        BoolOp::TransferB,
        BoolOp::Xor,
        BoolOp::Or,
        BoolOp::Nor,
        BoolOp::Xnor,
        BoolOp::NotB,
        BoolOp::BImpliesA,
        BoolOp::NotA,
        BoolOp::AImpliesB,
        BoolOp::Nand,
        BoolOp::Always,
    ];

    /// Apply the function to two boolean inputs
    pub fn eval(&self, a: bool, b: bool) -> bool {
        match self {
            BoolOp::Never => false,
            BoolOp::And => a && b,
            BoolOp::BInhibitsA => a && !b,
            BoolOp::TransferA => a,
            BoolOp::AInhibitsB => !a && b,
            BoolOp::TransferB => b,
            BoolOp::Xor => a != b,
            BoolOp::Or => a || b,
            BoolOp::Nor => !(a || b),
            BoolOp::Xnor => a == b,
            BoolOp::NotB => !b,
            BoolOp::BImpliesA => a || !b,
            BoolOp::NotA => !a,
            BoolOp::AImpliesB => !a || b,
            BoolOp::Nand => !(a && b),
            BoolOp::Always => true,
        }
    }

    /// The function that returns the opposite of self for every input
    pub fn complement(&self) -> BoolOp {
        match self {
            BoolOp::Never => BoolOp::Always,
            BoolOp::And => BoolOp::Nand,
            BoolOp::BInhibitsA => BoolOp::AImpliesB,
            BoolOp::TransferA => BoolOp::NotA,
            BoolOp::AInhibitsB => BoolOp::BImpliesA,
            BoolOp::TransferB => BoolOp::NotB,
            BoolOp::Xor => BoolOp::Xnor,
            BoolOp::Or => BoolOp::Nor,
            BoolOp::Nor => BoolOp::Or,
            BoolOp::Xnor => BoolOp::Xor,
            BoolOp::NotB => BoolOp::TransferB,
            BoolOp::BImpliesA => BoolOp::AInhibitsB,
            BoolOp::NotA => BoolOp::TransferA,
            BoolOp::AImpliesB => BoolOp::BInhibitsA,
            BoolOp::Nand => BoolOp::And,
            BoolOp::Always => BoolOp::Never,
        }
    }

    /// Whether the function is true when neither input is.  Such functions
    /// extend to the whole tick line outside of their operands.
    pub fn is_true_outside(&self) -> bool {
        self.eval(false, false)
    }

    pub fn name(&self) -> &'static str {
        match self {
            BoolOp::Never => "never",
            BoolOp::And => "and",
            BoolOp::BInhibitsA => "b_inhibits_a",
            BoolOp::TransferA => "transfer_a",
            BoolOp::AInhibitsB => "a_inhibits_b",
            BoolOp::TransferB => "transfer_b",
            BoolOp::Xor => "xor",
            BoolOp::Or => "or",
            BoolOp::Nor => "nor",
            BoolOp::Xnor => "xnor",
            BoolOp::NotB => "not_b",
            BoolOp::BImpliesA => "b_implies_a",
            BoolOp::NotA => "not_a",
            BoolOp::AImpliesB => "a_implies_b",
            BoolOp::Nand => "nand",
            BoolOp::Always => "always",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase().replace('-', "_");
        BoolOp::ALL.into_iter().find(|op| op.name() == lower)
    }

    /// Combine two single intervals, see [`combine`]
    pub fn combine(
        &self,
        p: &DirectedInterval,
        q: &DirectedInterval,
    ) -> Vec<DirectedInterval> {
        combine(*self, p, q)
    }
}

impl std::fmt::Display for BoolOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Combine two directed intervals with one of the sixteen boolean functions.
///
/// The result is the list of maximal runs of ticks for which the function
/// is true, looking at the whole tick line (from `i64::MIN` to `i64::MAX`).
/// So the complement-like functions (Nor, Nand, NotA,...) extend to the
/// limits of the universe.
///
/// A few functions keep the orientation of their operands rather than
/// returning ascending runs:
///   * TransferA and TransferB return their operand unchanged
///   * And returns the intersection, oriented like p
///   * Or on two disjoint intervals returns both intervals unchanged
///
/// ```text
///     P       [-----]
///     Q                  [-----]
///
///     And                             (nothing)
///     Or      [-----]    [-----]
///     Xor     [-----]    [-----]
///     Nand  [-------------------------]    (universe)
///     Nor   [-]     [----]     [------]
/// ```
pub fn combine(
    op: BoolOp,
    p: &DirectedInterval,
    q: &DirectedInterval,
) -> Vec<DirectedInterval> {
    match op {
        BoolOp::TransferA => vec![*p],
        BoolOp::TransferB => vec![*q],
        BoolOp::And => DirectedInterval::intersection(p, q)
            .into_iter()
            .collect(),
        BoolOp::Or if !p.touches(q) => vec![*p, *q],
        BoolOp::Never
        | BoolOp::BInhibitsA
        | BoolOp::AInhibitsB
        | BoolOp::Xor
        | BoolOp::Or
        | BoolOp::Nor
        | BoolOp::Xnor
        | BoolOp::NotB
        | BoolOp::BImpliesA
        | BoolOp::NotA
        | BoolOp::AImpliesB
        | BoolOp::Nand
        | BoolOp::Always => true_runs(op, p, q),
    }
}

/// Evaluate op on every elementary segment of the tick line delimited by the
/// endpoints of p and q, and merge consecutive true segments.
fn true_runs(
    op: BoolOp,
    p: &DirectedInterval,
    q: &DirectedInterval,
) -> Vec<DirectedInterval> {
    let a = p.normalized();
    let b = q.normalized();
    let mut result: Vec<DirectedInterval> = Vec::new();

    for (lo, hi) in [i64::MIN, a.start, a.end, b.start, b.end, i64::MAX]
        .into_iter()
        .sorted()
        .dedup()
        .tuple_windows()
    {
        let in_a = a.start <= lo && hi <= a.end;
        let in_b = b.start <= lo && hi <= b.end;
        if !op.eval(in_a, in_b) {
            continue;
        }
        if let Some(last) = result.last_mut().filter(|l| l.end == lo) {
            last.end = hi;
        } else {
            result.push(DirectedInterval::new(lo, hi));
        }
    }
    result
}

/// Intersection of two intervals, oriented like p.
pub fn and(p: &DirectedInterval, q: &DirectedInterval) -> Vec<DirectedInterval> {
    combine(BoolOp::And, p, q)
}

/// Union of the two intervals
pub fn or(p: &DirectedInterval, q: &DirectedInterval) -> Vec<DirectedInterval> {
    combine(BoolOp::Or, p, q)
}

/// Symmetric difference
pub fn xor(p: &DirectedInterval, q: &DirectedInterval) -> Vec<DirectedInterval> {
    combine(BoolOp::Xor, p, q)
}

/// Everything but the intersection
pub fn nand(
    p: &DirectedInterval,
    q: &DirectedInterval,
) -> Vec<DirectedInterval> {
    combine(BoolOp::Nand, p, q)
}

/// Everything but the union
pub fn nor(p: &DirectedInterval, q: &DirectedInterval) -> Vec<DirectedInterval> {
    combine(BoolOp::Nor, p, q)
}
