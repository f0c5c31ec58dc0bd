use crate::errors::Error;
use crate::masked_numbers::MaskedNumber;
use crate::polarities::Polarity;
use focal_intervals::{DirectedInterval, GroupOp, IntervalGroup};
use itertools::Itertools;

/// An ordered set of numbers sharing a domain, each with its own polarity.
///
/// Focals are stored in one `IntervalGroup`, polarities in a parallel
/// list.  Both always have the same length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NumberGroup {
    focals: IntervalGroup,
    polarities: Vec<Polarity>,
}

impl NumberGroup {
    pub fn from_focal(focal: DirectedInterval, polarity: Polarity) -> Self {
        let mut group = NumberGroup::default();
        group.add(focal, polarity);
        group
    }

    pub fn from_parts(
        focals: IntervalGroup,
        polarities: Vec<Polarity>,
    ) -> Result<Self, Error> {
        if focals.count() != polarities.len() {
            return Err(Error::PolarityCount {
                focals: focals.count(),
                polarities: polarities.len(),
            });
        }
        Ok(NumberGroup {
            focals,
            polarities,
        })
    }

    /// All focals share the same polarity
    pub fn uniform(focals: IntervalGroup, polarity: Polarity) -> Self {
        let polarities = vec![polarity; focals.count()];
        NumberGroup {
            focals,
            polarities,
        }
    }

    pub fn add(&mut self, focal: DirectedInterval, polarity: Polarity) {
        self.focals.add(focal);
        self.polarities.push(polarity);
    }

    pub fn clear(&mut self) {
        self.focals.clear();
        self.polarities.clear();
    }

    pub fn count(&self) -> usize {
        self.focals.count()
    }

    /// An empty group is the "false" result of a boolean or comparison
    pub fn is_empty(&self) -> bool {
        self.focals.is_empty()
    }

    pub fn focals(&self) -> &IntervalGroup {
        &self.focals
    }

    pub fn polarities(&self) -> &[Polarity] {
        &self.polarities
    }

    pub fn get(&self, index: usize) -> Option<(DirectedInterval, Polarity)> {
        Some((self.focals.get(index)?, *self.polarities.get(index)?))
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (DirectedInterval, Polarity)> + '_ {
        self.focals.iter().zip(self.polarities.iter().copied())
    }

    /// The polarity of the first member, which boolean results inherit
    pub fn first_polarity(&self) -> Option<Polarity> {
        self.polarities.first().copied()
    }

    pub fn set_focal(&mut self, index: usize, focal: DirectedInterval) -> bool {
        self.focals.set(index, focal)
    }

    pub fn set_polarity(&mut self, index: usize, polarity: Polarity) -> bool {
        match self.polarities.get_mut(index) {
            Some(p) => {
                *p = polarity;
                true
            }
            None => false,
        }
    }

    pub fn set_all_polarities(&mut self, polarity: Polarity) {
        self.polarities.iter_mut().for_each(|p| *p = polarity);
    }

    /// Ascending span of all members
    pub fn extent(&self) -> Option<DirectedInterval> {
        self.focals.extent()
    }

    /// Replace the group with the result of combining it with other.
    /// The members of the result all take the polarity of the first
    /// member of self (or of other when self was empty).
    pub fn compute_with(&mut self, other: &NumberGroup, op: GroupOp) {
        let polarity = self
            .first_polarity()
            .or_else(|| other.first_polarity())
            .unwrap_or_default();
        self.focals.compute_with(&other.focals, op);
        self.polarities.clear();
        self.polarities.resize(self.focals.count(), polarity);
    }

    /// Move all members proportionally between two spans
    pub fn remap(&mut self, from: &DirectedInterval, to: &DirectedInterval) {
        self.focals.remap(from, to);
    }

    /// Run-length encoding of the union of the members
    pub fn to_masked(&self) -> Result<MaskedNumber, Error> {
        Ok(MaskedNumber::new(
            self.focals.to_mask()?,
            self.first_polarity().unwrap_or_default(),
        ))
    }
}

impl std::fmt::Display for NumberGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "empty")
        } else {
            write!(
                f,
                "{}",
                self.iter().map(|(i, p)| format!("{i} {p}")).join(", ")
            )
        }
    }
}
