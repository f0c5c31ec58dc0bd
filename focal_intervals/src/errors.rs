/// Reasons why a list of breakpoints cannot describe a masked interval
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    #[error("a mask needs at least two breakpoints, got {0}")]
    TooFewBreakpoints(usize),

    #[error("the first segment of a mask has zero length (at {0})")]
    ZeroLengthFirstSegment(i64),

    #[error("breakpoint #{index} ({position}) overlaps or reverses the direction of the mask")]
    NonMonotonic { index: usize, position: i64 },
}
