//! This crate provides operations on directed intervals of integer ticks.
//!
//! A directed interval is a pair of positions where the order matters:
//! `[0 -> 10]` and `[10 -> 0]` cover the same ticks but point in opposite
//! directions.  On top of these, the crate provides
//!
//!  |Type                |Description
//!  |--------------------|-------------------------------------------------
//!  |[`DirectedInterval`]|two tick positions, with length and direction
//!  |[`IntervalGroup`]   |an ordered sequence of directed intervals
//!  |[`MaskedInterval`]  |one interval split into alternating true/false runs
//!  |[`TruthTable`]      |the breakpoints of two operands with their states
//!
//! Two families of operations combine intervals:
//!
//! * the sixteen boolean functions of two inputs ([`BoolOp`]), either on
//!   two single intervals ([`combine`]) or through a truth table for groups
//!   and masks;
//! * ordering comparisons ([`Comparison`]), which return the part of the
//!   first operand satisfying the relation.
//!
//! ```text
//!        [------ A ------]
//!               [----- B -------]
//!
//!        [----------------------]     Or
//!               [--------]            And
//!        [------)        (------]     Xor
//!        [------)                     BInhibitsA  (A and not B)
//!                        (------]     AInhibitsB  (B and not A)
//!        [------]                     LessThan    (part of A below B)
//!               [--------]            ContainedBy (part of A inside B)
//! ```
//!
//! When the two intervals do not overlap:
//! ```text
//!      [---A---]   [----B----]
//!
//!      [-------]   [---------]    Or, Xor
//!                                 And is empty
//!  [-------------------------------]   Nand (every representable tick)
//! ```

mod combinators;
mod comparisons;
mod errors;
mod groups;
mod intervals;
mod masks;
mod truth_tables;

pub use crate::combinators::{and, combine, nand, nor, or, xor, BoolOp};
pub use crate::comparisons::{compare, Comparison};
pub use crate::errors::MaskError;
pub use crate::groups::{GroupOp, IntervalGroup};
pub use crate::intervals::DirectedInterval;
pub use crate::masks::{MaskState, MaskedInterval};
pub use crate::truth_tables::{TruthRow, TruthTable};
