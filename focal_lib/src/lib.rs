//! Numbers as directed intervals.
//!
//! Every number is a pair of integer tick positions, read through a
//! [`domains::Domain`] whose basis interval gives the unit and the positive
//! direction.  The value of a number is a [`ranges::PRange`], where the end
//! of the interval gives the real part and its start the imaginary part.
//!
//! On top of arithmetic, numbers can be combined with any of the sixteen
//! boolean functions of two inputs, or compared, in which case the result
//! is the set of intervals where the relation holds (empty for "false").
//! [`transforms::Transform`] applies one such operation in stages.
//!
//! The geometry itself lives in the `focal_intervals` crate.

pub mod domains;
pub mod errors;
pub mod ids;
pub mod masked_numbers;
pub mod number_groups;
pub mod numbers;
pub mod operations;
pub mod polarities;
pub mod ranges;
pub mod transforms;
pub mod workspaces;
