use crate::errors::Error;
use crate::ids::{DomainId, NumberId};
use crate::masked_numbers::MaskedNumber;
use crate::number_groups::NumberGroup;
use crate::polarities::Polarity;
use focal_intervals::{DirectedInterval, MaskedInterval};

/// What a number means for its domain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Role {
    // The unit of the domain.  Its focal never changes.
    Basis,

    // The working range of the domain
    MinMax,

    #[default]
    Ordinary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberKind {
    // A single directed interval
    Plain {
        focal: DirectedInterval,
        polarity: Polarity,
    },

    // Several intervals, typically the result of a boolean operation
    Group(NumberGroup),

    // A run-length encoded boolean result
    Masked(MaskedNumber),
}

impl NumberKind {
    pub fn plain(focal: DirectedInterval, polarity: Polarity) -> Self {
        NumberKind::Plain { focal, polarity }
    }
}

/// A directed interval read through a domain.
///
/// Numbers are owned by the store of their domain.  Removing one from the
/// store detaches it, after which it can no longer be used in operations
/// until it is adopted again.
#[derive(Debug, Clone)]
pub struct Number {
    id: NumberId,
    domain: Option<DomainId>,
    role: Role,
    kind: NumberKind,
}

impl Number {
    pub(crate) fn new(
        id: NumberId,
        domain: DomainId,
        role: Role,
        kind: NumberKind,
    ) -> Self {
        Number {
            id,
            domain: Some(domain),
            role,
            kind,
        }
    }

    pub fn id(&self) -> NumberId {
        self.id
    }

    /// None once the number was removed from its domain
    pub fn domain(&self) -> Option<DomainId> {
        self.domain
    }

    pub fn is_valid(&self) -> bool {
        self.domain.is_some()
    }

    pub(crate) fn detach(&mut self) {
        self.domain = None;
    }

    pub(crate) fn attach(&mut self, domain: DomainId) {
        self.domain = Some(domain);
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_basis(&self) -> bool {
        self.role == Role::Basis
    }

    pub fn kind(&self) -> &NumberKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut NumberKind {
        &mut self.kind
    }

    pub fn is_plain(&self) -> bool {
        matches!(self.kind, NumberKind::Plain { .. })
    }

    /// The basis is always aligned with itself.  A group reports the
    /// polarity of its first member.
    pub fn polarity(&self) -> Polarity {
        if self.is_basis() {
            return Polarity::Aligned;
        }
        match &self.kind {
            NumberKind::Plain { polarity, .. } => *polarity,
            NumberKind::Group(g) => {
                g.first_polarity().unwrap_or(Polarity::Unknown)
            }
            NumberKind::Masked(m) => m.polarity(),
        }
    }

    /// The single interval covered by the number.  For groups, this is the
    /// ascending extent of the members (zero-length at the origin when the
    /// group is empty).
    pub fn focal(&self) -> DirectedInterval {
        match &self.kind {
            NumberKind::Plain { focal, .. } => *focal,
            NumberKind::Group(g) => g.extent().unwrap_or_default(),
            NumberKind::Masked(m) => m.span(),
        }
    }

    /// The direction of the number relative to the tick line, given the
    /// basis of its domain.
    pub fn direction(&self, basis: &DirectedInterval) -> i64 {
        basis.direction() * self.polarity().direction()
    }

    /// The intervals making up this number, each with its polarity.
    /// Masked numbers are split into their true segments.
    pub fn parts(&self) -> Vec<(DirectedInterval, Polarity)> {
        match &self.kind {
            NumberKind::Plain { focal, .. } => {
                vec![(*focal, self.polarity())]
            }
            NumberKind::Group(g) => g.iter().collect(),
            NumberKind::Masked(m) => m.segments(),
        }
    }

    /// The number seen as a group of intervals
    pub fn to_group(&self) -> NumberGroup {
        match &self.kind {
            NumberKind::Group(g) => g.clone(),
            NumberKind::Plain { .. } | NumberKind::Masked(_) => {
                let mut group = NumberGroup::default();
                for (focal, polarity) in self.parts() {
                    group.add(focal, polarity);
                }
                group
            }
        }
    }

    /// The number as a run-length encoded mask over its span.  A plain
    /// number is true over its whole focal, so cannot have zero length.
    pub fn to_masked(&self) -> Result<MaskedNumber, Error> {
        match &self.kind {
            NumberKind::Plain { focal, .. } => Ok(MaskedNumber::new(
                MaskedInterval::from_interval(focal)?,
                self.polarity(),
            )),
            NumberKind::Group(g) => g.to_masked(),
            NumberKind::Masked(m) => Ok(m.clone()),
        }
    }
}

impl PartialEq for Number {
    /// Same polarity and same intervals, whatever the ids
    fn eq(&self, other: &Self) -> bool {
        if self.polarity() != other.polarity() {
            return false;
        }
        match (&self.kind, &other.kind) {
            (
                NumberKind::Plain { focal: a, .. },
                NumberKind::Plain { focal: b, .. },
            ) => a == b,
            (NumberKind::Group(a), NumberKind::Group(b)) => a == b,
            (NumberKind::Masked(a), NumberKind::Masked(b)) => a == b,
            (
                NumberKind::Plain { .. }
                | NumberKind::Group(_)
                | NumberKind::Masked(_),
                _,
            ) => false,
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            NumberKind::Plain { focal, .. } => {
                write!(f, "{}: {} {}", self.id, focal, self.polarity())
            }
            NumberKind::Group(g) => write!(f, "{}: {{{}}}", self.id, g),
            NumberKind::Masked(m) => write!(f, "{}: <{}>", self.id, m),
        }
    }
}
