use crate::ids::{DomainId, NumberId};
use focal_intervals::MaskError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown domain {0}")]
    UnknownDomain(DomainId),

    #[error("number {number} is not registered in domain {domain}")]
    UnknownNumber { number: NumberId, domain: DomainId },

    #[error("number {0} is not attached to any domain")]
    Detached(NumberId),

    #[error("number {number} belongs to domain {owner}, not {domain}")]
    WrongDomain {
        number: NumberId,
        owner: DomainId,
        domain: DomainId,
    },

    #[error("the basis of domain {0} cannot be modified or removed")]
    ImmutableBasis(DomainId),

    #[error("group has {focals} intervals but {polarities} polarities")]
    PolarityCount { focals: usize, polarities: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("{0} has no representable value")]
    Undefined(String),

    #[error("{0}")]
    Mask(#[from] MaskError),
}
