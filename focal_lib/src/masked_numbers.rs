use crate::errors::Error;
use crate::polarities::Polarity;
use focal_intervals::{BoolOp, DirectedInterval, MaskState, MaskedInterval};

/// A boolean segmentation of a single interval, with a polarity
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskedNumber {
    mask: MaskedInterval,
    polarity: Polarity,
}

impl MaskedNumber {
    pub fn new(mask: MaskedInterval, polarity: Polarity) -> Self {
        MaskedNumber { mask, polarity }
    }

    /// Re-encode a list of true segments over a span
    pub fn from_segments(
        span: &DirectedInterval,
        segments: &[DirectedInterval],
        polarity: Polarity,
    ) -> Result<Self, Error> {
        Ok(MaskedNumber {
            mask: MaskedInterval::from_segments(span, segments)?,
            polarity,
        })
    }

    pub fn mask(&self) -> &MaskedInterval {
        &self.mask
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn set_polarity(&mut self, polarity: Polarity) {
        self.polarity = polarity;
    }

    pub fn span(&self) -> DirectedInterval {
        self.mask.span()
    }

    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    pub fn mask_at_position(&self, position: i64) -> MaskState {
        self.mask.mask_at_position(position)
    }

    /// The true segments, each tagged with the polarity of the number
    pub fn segments(&self) -> Vec<(DirectedInterval, Polarity)> {
        self.mask
            .segments()
            .into_iter()
            .map(|s| (s, self.polarity))
            .collect()
    }

    /// Combine through the truth table.  The result keeps the polarity of
    /// self, and is None when nothing is true.  A mask starting false
    /// reads as true outside of its span (see [`MaskedInterval::combine`]).
    pub fn combine(&self, other: &MaskedNumber, op: BoolOp) -> Option<Self> {
        Some(MaskedNumber {
            mask: self.mask.combine(&other.mask, op)?,
            polarity: self.polarity,
        })
    }

    /// Same span, true and false segments swapped
    pub fn invert(&self) -> Self {
        MaskedNumber {
            mask: self.mask.invert(),
            polarity: self.polarity,
        }
    }

    /// Move every breakpoint proportionally between two spans.  Segments
    /// that shrink to nothing are dropped, and the result is None when the
    /// whole span collapses.
    pub fn remap(
        &self,
        from: &DirectedInterval,
        to: &DirectedInterval,
    ) -> Option<Self> {
        Some(MaskedNumber {
            mask: self.mask.remap(from, to)?,
            polarity: self.polarity,
        })
    }
}

impl std::fmt::Display for MaskedNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.mask, self.polarity)
    }
}
