use crate::intervals::DirectedInterval;
use std::cmp::{max, min};

/// Ordering comparisons between two intervals A (self) and B (other).
///
/// Each comparison returns the part of A (or of B, for Contains) that
/// satisfies the relation, or nothing.  The same policy is used for single
/// numbers, groups of intervals and transforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comparison {
    GreaterThan,
    GreaterThanOrEqual,
    GreaterThanAndEqual,
    ContainedBy,
    Equals,
    Contains,
    LessThanAndEqual,
    LessThanOrEqual,
    LessThan,
}

impl Comparison {
    pub const ALL: [Comparison; 9] = [
        Comparison::GreaterThan,
        Comparison::GreaterThanOrEqual,
        Comparison::GreaterThanAndEqual,
        Comparison::ContainedBy,
        Comparison::Equals,
        Comparison::Contains,
        Comparison::LessThanAndEqual,
        Comparison::LessThanOrEqual,
        Comparison::LessThan,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Comparison::GreaterThan => "greater_than",
            Comparison::GreaterThanOrEqual => "greater_than_or_equal",
            Comparison::GreaterThanAndEqual => "greater_than_and_equal",
            Comparison::ContainedBy => "contained_by",
            Comparison::Equals => "equals",
            Comparison::Contains => "contains",
            Comparison::LessThanAndEqual => "less_than_and_equal",
            Comparison::LessThanOrEqual => "less_than_or_equal",
            Comparison::LessThan => "less_than",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::GreaterThan => ">",
            Comparison::GreaterThanOrEqual => ">=",
            Comparison::GreaterThanAndEqual => ">&=",
            Comparison::ContainedBy => "⊆",
            Comparison::Equals => "==",
            Comparison::Contains => "⊇",
            Comparison::LessThanAndEqual => "<&=",
            Comparison::LessThanOrEqual => "<=",
            Comparison::LessThan => "<",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase().replace('-', "_");
        Comparison::ALL
            .into_iter()
            .find(|op| op.name() == lower || op.symbol() == lower)
    }

    /// See [`compare`]
    pub fn apply(
        &self,
        a: &DirectedInterval,
        b: &DirectedInterval,
    ) -> Option<DirectedInterval> {
        compare(*self, a, b)
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Compare A with B.
///
/// Only the extremes of each interval matter (their direction is ignored
/// for the test).  The result is the single interval satisfying the
/// relation, oriented like A, or None when the candidate has zero length.
///
/// ```text
///     A            [--------]
///     B       [-------]
///
///     GreaterThan         [-]      (part of A above B)
///     ContainedBy  [-----]         (part of A inside B)
///     LessThan                     (nothing)
/// ```
///
/// The LessThan family is the mirror image (x -> -x) of the GreaterThan
/// family.  GreaterThanAndEqual keeps A whole only when it straddles the
/// top of B from inside, and otherwise falls back to the part of A above
/// the bottom of B when A starts at or below B and ends above it.
pub fn compare(
    op: Comparison,
    a: &DirectedInterval,
    b: &DirectedInterval,
) -> Option<DirectedInterval> {
    let (min_a, max_a) = (a.min(), a.max());
    let (min_b, max_b) = (b.min(), b.max());

    let candidate = match op {
        Comparison::GreaterThan => {
            if min_a > max_b {
                (min_a, max_a)
            } else if max_a > max_b {
                (max(min_a, max_b), max_a)
            } else {
                (0, 0)
            }
        }
        Comparison::GreaterThanOrEqual => {
            if min_a >= min_b {
                (min_a, max_a)
            } else if max_a >= min_b {
                (max(min_a, min_b), max_a)
            } else {
                (0, 0)
            }
        }
        Comparison::GreaterThanAndEqual => {
            if min_a < max_b && min_a > min_b && max_a > max_b {
                (min_a, max_a)
            } else if min_a <= min_b && max_a > max_b {
                (max(min_a, min_b), max_a)
            } else {
                (0, 0)
            }
        }
        Comparison::ContainedBy => {
            if min_a >= min_b && max_a <= max_b {
                (min_a, max_a)
            } else {
                (max(min_a, min_b), min(max_a, max_b))
            }
        }
        Comparison::Equals => {
            if min_a == min_b && max_a == max_b {
                (min_a, max_a)
            } else {
                (0, 0)
            }
        }
        Comparison::Contains => {
            if min_b >= min_a && max_b <= max_a {
                (min_b, max_b)
            } else {
                (max(min_b, min_a), min(max_b, max_a))
            }
        }
        Comparison::LessThanAndEqual => {
            if max_a > min_b && max_a < max_b && min_a < min_b {
                (min_a, max_a)
            } else if max_a >= max_b && min_a < min_b {
                (min_a, min(max_a, max_b))
            } else {
                (0, 0)
            }
        }
        Comparison::LessThanOrEqual => {
            if max_a <= max_b {
                (min_a, max_a)
            } else if min_a <= max_b {
                (min_a, min(max_a, max_b))
            } else {
                (0, 0)
            }
        }
        Comparison::LessThan => {
            if max_a < min_b {
                (min_a, max_a)
            } else if min_a < min_b {
                (min_a, min(max_a, min_b))
            } else {
                (0, 0)
            }
        }
    };

    // Partial overlaps that do not exist come out reversed
    if candidate.1 <= candidate.0 {
        None
    } else {
        Some(DirectedInterval::new(candidate.0, candidate.1).oriented_like(a))
    }
}
