use crate::domains::{Domain, DomainSettings};
use crate::errors::Error;
use crate::ids::{DomainId, Ids, NumberId};
use crate::number_groups::NumberGroup;
use crate::numbers::Number;
use crate::operations::OperationKind;
use crate::polarities::Polarity;
use crate::ranges::PRange;
use focal_intervals::DirectedInterval;
use std::collections::BTreeMap;

/// All the domains of an application, with the ids they draw from.
///
/// This is the context object that callers pass around instead of a
/// global registry.
#[derive(Debug, Default)]
pub struct Workspace {
    pub ids: Ids,
    domains: BTreeMap<DomainId, Domain>,
}

impl Workspace {
    pub fn create_domain(&mut self, settings: DomainSettings) -> DomainId {
        let domain = Domain::new(&mut self.ids, settings);
        let id = domain.id();
        self.domains.insert(id, domain);
        id
    }

    pub fn remove_domain(&mut self, id: DomainId) -> Option<Domain> {
        self.domains.remove(&id)
    }

    pub fn domains(&self) -> impl Iterator<Item = &Domain> {
        self.domains.values()
    }

    pub fn domain(&self, id: DomainId) -> Result<&Domain, Error> {
        self.domains.get(&id).ok_or(Error::UnknownDomain(id))
    }

    pub fn domain_mut(&mut self, id: DomainId) -> Result<&mut Domain, Error> {
        self.domains.get_mut(&id).ok_or(Error::UnknownDomain(id))
    }

    /// A domain together with the ids, which creating numbers requires
    pub fn domain_and_ids(
        &mut self,
        id: DomainId,
    ) -> Result<(&mut Domain, &mut Ids), Error> {
        let domain = self.domains.get_mut(&id).ok_or(Error::UnknownDomain(id))?;
        Ok((domain, &mut self.ids))
    }

    /// Which domain stores this number, if any
    pub fn find_domain(&self, number: NumberId) -> Option<DomainId> {
        self.domains
            .values()
            .find(|d| d.contains(number))
            .map(Domain::id)
    }

    pub fn create_number(
        &mut self,
        domain: DomainId,
        focal: DirectedInterval,
        polarity: Polarity,
    ) -> Result<NumberId, Error> {
        let (domain, ids) = self.domain_and_ids(domain)?;
        Ok(domain.create_number(ids, focal, polarity))
    }

    pub fn create_number_from_range(
        &mut self,
        domain: DomainId,
        range: &PRange,
        polarity: Polarity,
    ) -> Result<NumberId, Error> {
        let (domain, ids) = self.domain_and_ids(domain)?;
        Ok(domain.create_number_from_range(ids, range, polarity))
    }

    /// Whether the number was found and removed
    pub fn remove_number(&mut self, domain: DomainId, number: NumberId) -> bool {
        self.domains
            .get_mut(&domain)
            .and_then(|d| d.remove_number(number))
            .is_some()
    }

    pub fn value(
        &self,
        domain: DomainId,
        number: NumberId,
    ) -> Result<PRange, Error> {
        self.domain(domain)?.value(number)
    }

    pub fn set_value(
        &mut self,
        domain: DomainId,
        number: NumberId,
        value: &PRange,
    ) -> Result<(), Error> {
        self.domain_mut(domain)?.set_value(number, value)
    }

    pub fn apply_operation(
        &self,
        domain: DomainId,
        left: NumberId,
        right: Option<NumberId>,
        kind: OperationKind,
        repeats: Option<NumberId>,
    ) -> Result<NumberGroup, Error> {
        self.domain(domain)?
            .apply_operation(left, right, kind, repeats)
    }

    pub fn internal_numbers(
        &mut self,
        domain: DomainId,
        number: NumberId,
    ) -> Result<Vec<Number>, Error> {
        let (domain, ids) = self.domain_and_ids(domain)?;
        domain.internal_numbers(ids, number)
    }
}
