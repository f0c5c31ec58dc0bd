use crate::errors::Error;
use crate::ids::{DomainId, Ids, NumberId, OwnerId};
use crate::masked_numbers::MaskedNumber;
use crate::number_groups::NumberGroup;
use crate::numbers::{Number, NumberKind, Role};
use crate::operations::OperationKind;
use crate::polarities::Polarity;
use crate::ranges::PRange;
use crate::transforms::{Stage, Transform};
use focal_intervals::{BoolOp, Comparison, DirectedInterval, GroupOp};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

//--------------------------------------------------------------
// Settings
//--------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct DomainSettings {
    // Whatever the domain belongs to.  Never interpreted here.
    pub owner: OwnerId,

    pub name: String,

    // The unit of the domain: its length is one, and its direction is the
    // positive direction for all numbers.
    pub basis: DirectedInterval,

    // The working range, used to clamp numbers
    pub min_max: DirectedInterval,

    // If true, one tick is worth the length of the basis, instead of one
    // basis being worth its length in ticks.
    pub is_reciprocal: bool,
}

impl DomainSettings {
    pub fn new(basis: DirectedInterval, min_max: DirectedInterval) -> Self {
        DomainSettings {
            basis,
            min_max,
            ..DomainSettings::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_owner(mut self, owner: OwnerId) -> Self {
        self.owner = owner;
        self
    }

    pub fn reciprocal(mut self, is_reciprocal: bool) -> Self {
        self.is_reciprocal = is_reciprocal;
        self
    }
}

impl Default for DomainSettings {
    fn default() -> Self {
        DomainSettings {
            owner: OwnerId::default(),
            name: String::new(),
            basis: DirectedInterval::new(0, 100),
            min_max: DirectedInterval::new(-1000, 1000),
            is_reciprocal: false,
        }
    }
}

//--------------------------------------------------------------
// Domain
//--------------------------------------------------------------

/// A scale on which numbers are read.
///
/// The basis gives the unit and the positive direction: a number's value is
/// the position of its endpoints, measured from the start of the basis in
/// multiples of the basis length.  The domain owns all its numbers,
/// including the basis and the min/max range.
///
/// ```text
///    ticks      -20    0     10    20    30
///    basis             [-----]
///    number     [-------------------------]     value = 2i + 3
/// ```
#[derive(Debug)]
pub struct Domain {
    id: DomainId,
    owner: OwnerId,
    name: String,
    basis: DirectedInterval,
    basis_id: NumberId,
    min_max_id: NumberId,
    is_reciprocal: bool,
    numbers: BTreeMap<NumberId, Number>,
}

impl Domain {
    pub fn new(ids: &mut Ids, settings: DomainSettings) -> Self {
        if settings.basis.is_zero_length() {
            log::warn!(
                "domain '{}' has a zero-length basis at {}, using one tick",
                settings.name,
                settings.basis.start,
            );
        }
        let mut domain = Domain {
            id: ids.next_domain(),
            owner: settings.owner,
            name: settings.name,
            basis: settings.basis,
            basis_id: NumberId::default(),
            min_max_id: NumberId::default(),
            is_reciprocal: settings.is_reciprocal,
            numbers: BTreeMap::new(),
        };
        domain.basis_id = domain.register(
            ids,
            Role::Basis,
            NumberKind::plain(settings.basis, Polarity::Aligned),
        );
        domain.min_max_id = domain.register(
            ids,
            Role::MinMax,
            NumberKind::plain(settings.min_max, Polarity::Aligned),
        );
        log::debug!(
            "created domain {} '{}' basis={} min_max={}{}",
            domain.id,
            domain.name,
            domain.basis,
            settings.min_max,
            if domain.is_reciprocal {
                " reciprocal"
            } else {
                ""
            },
        );
        domain
    }

    pub fn id(&self) -> DomainId {
        self.id
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn basis(&self) -> DirectedInterval {
        self.basis
    }

    pub fn basis_id(&self) -> NumberId {
        self.basis_id
    }

    pub fn min_max_id(&self) -> NumberId {
        self.min_max_id
    }

    pub fn min_max(&self) -> DirectedInterval {
        self.numbers
            .get(&self.min_max_id)
            .map(Number::focal)
            .unwrap_or_default()
    }

    pub fn is_reciprocal(&self) -> bool {
        self.is_reciprocal
    }

    /// Number of values in one tick
    pub fn tick_to_basis_ratio(&self) -> Decimal {
        let len = Decimal::from(self.basis.non_zero_length());
        if self.is_reciprocal {
            len
        } else {
            Decimal::ONE / len
        }
    }

    //----------------------------------------------------------
    // Number store
    //----------------------------------------------------------

    /// All numbers of the domain, in creation order
    pub fn numbers(&self) -> impl Iterator<Item = &Number> {
        self.numbers.values()
    }

    /// Number of stored numbers, including the basis and min/max
    pub fn count(&self) -> usize {
        self.numbers.len()
    }

    pub fn contains(&self, id: NumberId) -> bool {
        self.numbers.contains_key(&id)
    }

    pub fn get(&self, id: NumberId) -> Option<&Number> {
        self.numbers.get(&id)
    }

    /// Same as get, but not finding the number is an error
    pub fn number(&self, id: NumberId) -> Result<&Number, Error> {
        self.numbers.get(&id).ok_or(Error::UnknownNumber {
            number: id,
            domain: self.id,
        })
    }

    /// Numbers that can be modified: everything but the basis
    fn number_mut(&mut self, id: NumberId) -> Result<&mut Number, Error> {
        if id == self.basis_id {
            return Err(Error::ImmutableBasis(self.id));
        }
        self.numbers.get_mut(&id).ok_or(Error::UnknownNumber {
            number: id,
            domain: self.id,
        })
    }

    /// The only place where numbers get their id.  The number refers to
    /// this domain, but is not stored.
    fn new_number(&self, ids: &mut Ids, role: Role, kind: NumberKind) -> Number {
        let number = Number::new(ids.next_number(), self.id, role, kind);
        log::trace!("domain {}: new number {}", self.id, number);
        number
    }

    fn register(
        &mut self,
        ids: &mut Ids,
        role: Role,
        kind: NumberKind,
    ) -> NumberId {
        let number = self.new_number(ids, role, kind);
        let id = number.id();
        self.numbers.insert(id, number);
        id
    }

    pub fn create_number(
        &mut self,
        ids: &mut Ids,
        focal: DirectedInterval,
        polarity: Polarity,
    ) -> NumberId {
        self.register(ids, Role::Ordinary, NumberKind::plain(focal, polarity))
    }

    pub fn create_number_from_ticks(
        &mut self,
        ids: &mut Ids,
        start: i64,
        end: i64,
    ) -> NumberId {
        self.create_number(
            ids,
            DirectedInterval::new(start, end),
            Polarity::Aligned,
        )
    }

    pub fn create_number_from_range(
        &mut self,
        ids: &mut Ids,
        range: &PRange,
        polarity: Polarity,
    ) -> NumberId {
        let focal = self.create_focal_from_range(range, polarity);
        self.create_number(ids, focal, polarity)
    }

    pub fn create_group(
        &mut self,
        ids: &mut Ids,
        group: NumberGroup,
    ) -> NumberId {
        self.register(ids, Role::Ordinary, NumberKind::Group(group))
    }

    pub fn create_masked(
        &mut self,
        ids: &mut Ids,
        masked: MaskedNumber,
    ) -> NumberId {
        self.register(ids, Role::Ordinary, NumberKind::Masked(masked))
    }

    /// A number of this domain that is not kept in the store.  It can be
    /// stored later with [`Domain::adopt`].
    pub fn create_detached(&self, ids: &mut Ids, kind: NumberKind) -> Number {
        let mut number = self.new_number(ids, Role::Ordinary, kind);
        number.detach();
        number
    }

    /// Remove a number from the store, and return it detached from the
    /// domain.  The basis and min/max are never removed.
    pub fn remove_number(&mut self, id: NumberId) -> Option<Number> {
        if id == self.basis_id || id == self.min_max_id {
            log::debug!("domain {}: cannot remove {}", self.id, id);
            return None;
        }
        let mut number = self.numbers.remove(&id)?;
        number.detach();
        log::debug!("domain {}: removed {}", self.id, id);
        Some(number)
    }

    /// Store a detached number (or one created for this domain)
    pub fn adopt(&mut self, mut number: Number) -> Result<NumberId, Error> {
        match number.domain() {
            Some(owner) if owner != self.id => {
                return Err(Error::WrongDomain {
                    number: number.id(),
                    owner,
                    domain: self.id,
                });
            }
            Some(_) | None => {}
        }
        number.attach(self.id);
        let id = number.id();
        self.numbers.insert(id, number);
        Ok(id)
    }

    //----------------------------------------------------------
    // Values
    //----------------------------------------------------------

    fn tick_to_value(&self, tick: i64) -> Result<Decimal, Error> {
        let offset = Decimal::from(tick) - Decimal::from(self.basis.start);
        let len = Decimal::from(self.basis.non_zero_length());
        let value = if self.is_reciprocal {
            offset.checked_mul(len)
        } else {
            offset.checked_div(len)
        };
        value.ok_or_else(|| Error::Undefined(format!("tick {tick}")))
    }

    /// Nearest tick for a value, saturating at the ends of the tick line
    fn value_to_tick(&self, value: Decimal) -> i64 {
        let len = self.basis.non_zero_length();
        let dlen = Decimal::from(len);
        let offset = if self.is_reciprocal {
            value.checked_div(dlen)
        } else {
            value.checked_mul(dlen)
        };
        let ticks = offset
            .map(|o| {
                o.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            })
            .and_then(|o| o.to_i64())
            .unwrap_or(if value.is_sign_negative() == (len < 0) {
                i64::MAX
            } else {
                i64::MIN
            });
        self.basis.start.saturating_add(ticks)
    }

    /// The value of a focal read with the given polarity.  Inverted numbers
    /// are read against the basis, so both parts change sign.
    pub fn get_value_of(
        &self,
        focal: &DirectedInterval,
        polarity: Polarity,
    ) -> Result<PRange, Error> {
        let start = self.tick_to_value(focal.start)?;
        let end = self.tick_to_value(focal.end)?;
        Ok(match polarity {
            Polarity::Inverted => PRange::new(start, -end),
            Polarity::Aligned | Polarity::None | Polarity::Unknown => {
                PRange::new(-start, end)
            }
        })
    }

    /// The inverse of [`Domain::get_value_of`], rounded to whole ticks
    pub fn create_focal_from_range(
        &self,
        range: &PRange,
        polarity: Polarity,
    ) -> DirectedInterval {
        let (start, end) = match polarity {
            Polarity::Inverted => (range.start, -range.end),
            Polarity::Aligned | Polarity::None | Polarity::Unknown => {
                (-range.start, range.end)
            }
        };
        DirectedInterval::new(self.value_to_tick(start), self.value_to_tick(end))
    }

    /// The value of a number of this domain, stored or not
    pub fn value_of(&self, number: &Number) -> Result<PRange, Error> {
        match number.domain() {
            None => Err(Error::Detached(number.id())),
            Some(owner) if owner != self.id => Err(Error::WrongDomain {
                number: number.id(),
                owner,
                domain: self.id,
            }),
            Some(_) => self.get_value_of(&number.focal(), number.polarity()),
        }
    }

    pub fn value(&self, id: NumberId) -> Result<PRange, Error> {
        self.value_of(self.number(id)?)
    }

    /// Move the endpoints of a number so that it has the given value
    pub fn set_value(&mut self, id: NumberId, value: &PRange) -> Result<(), Error> {
        let polarity = self.number(id)?.polarity();
        let focal = self.create_focal_from_range(value, polarity);
        self.set_focal(id, focal)
    }

    /// Change the endpoints of a number.  Groups and masks are stretched
    /// proportionally from their current span onto the new focal.  Mask
    /// segments squeezed to nothing are dropped, and a mask whose whole
    /// span collapses becomes a plain number.
    pub fn set_focal(
        &mut self,
        id: NumberId,
        focal: DirectedInterval,
    ) -> Result<(), Error> {
        let number = self.number_mut(id)?;
        let old = number.focal();
        let collapsed = match number.kind_mut() {
            NumberKind::Plain { focal: f, .. } => {
                *f = focal;
                None
            }
            NumberKind::Group(g) => {
                g.remap(&old, &focal);
                None
            }
            NumberKind::Masked(m) => match m.remap(&old, &focal) {
                Some(remapped) => {
                    *m = remapped;
                    None
                }
                None => Some(m.polarity()),
            },
        };
        if let Some(polarity) = collapsed {
            *number.kind_mut() = NumberKind::plain(focal, polarity);
        }
        log::trace!("domain {}: {} focal {} -> {}", self.id, id, old, focal);
        Ok(())
    }

    pub fn set_start_tick(&mut self, id: NumberId, tick: i64) -> Result<(), Error> {
        let focal = self.number(id)?.focal();
        self.set_focal(id, DirectedInterval::new(tick, focal.end))
    }

    pub fn set_end_tick(&mut self, id: NumberId, tick: i64) -> Result<(), Error> {
        let focal = self.number(id)?.focal();
        self.set_focal(id, DirectedInterval::new(focal.start, tick))
    }

    pub fn set_polarity(
        &mut self,
        id: NumberId,
        polarity: Polarity,
    ) -> Result<(), Error> {
        match self.number_mut(id)?.kind_mut() {
            NumberKind::Plain { polarity: p, .. } => *p = polarity,
            NumberKind::Group(g) => g.set_all_polarities(polarity),
            NumberKind::Masked(m) => m.set_polarity(polarity),
        }
        Ok(())
    }

    pub fn set_min_max(&mut self, focal: DirectedInterval) -> Result<(), Error> {
        self.set_focal(self.min_max_id, focal)
    }

    //----------------------------------------------------------
    // Rounding
    //----------------------------------------------------------

    /// Round to whole basis units
    pub fn round_value_to_basis(&self, value: &PRange) -> PRange {
        value.round()
    }

    /// Round to the nearest value that falls on whole ticks
    pub fn round_value_to_tick(&self, value: &PRange) -> Result<PRange, Error> {
        let focal = self.create_focal_from_range(value, Polarity::Aligned);
        self.get_value_of(&focal, Polarity::Aligned)
    }

    /// Snap both endpoints to the nearest multiple of the basis length,
    /// counted from the start of the basis.
    pub fn round_focal_to_basis(
        &self,
        focal: &DirectedInterval,
    ) -> DirectedInterval {
        let len = self.basis.non_zero_length();
        let dlen = Decimal::from(len);
        let snap = |tick: i64| {
            let offset =
                Decimal::from(tick) - Decimal::from(self.basis.start);
            let units = (offset / dlen)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
                .unwrap_or_default();
            self.basis.start.saturating_add(units.saturating_mul(len))
        };
        DirectedInterval::new(snap(focal.start), snap(focal.end))
    }

    /// Keep both endpoints within the working range
    pub fn clamp_to_min_max(&self, focal: &DirectedInterval) -> DirectedInterval {
        let range = self.min_max();
        DirectedInterval::new(
            focal.start.clamp(range.min(), range.max()),
            focal.end.clamp(range.min(), range.max()),
        )
    }

    //----------------------------------------------------------
    // Arithmetic
    //----------------------------------------------------------

    /// Compute a new value for `target` from its current value and the
    /// value of `other`, and write it back.
    fn update_value(
        &mut self,
        target: NumberId,
        other: NumberId,
        op: impl FnOnce(&PRange, &PRange) -> Result<PRange, Error>,
    ) -> Result<PRange, Error> {
        let value = op(&self.value(target)?, &self.value(other)?)?;
        self.set_value(target, &value)?;
        self.value(target)
    }

    /// Each of these replaces the value of target and returns the new
    /// value, as read back from its (rounded) ticks.
    pub fn add(
        &mut self,
        target: NumberId,
        other: NumberId,
    ) -> Result<PRange, Error> {
        self.update_value(target, other, |a, b| a.checked_add(b))
    }

    pub fn subtract(
        &mut self,
        target: NumberId,
        other: NumberId,
    ) -> Result<PRange, Error> {
        self.update_value(target, other, |a, b| a.checked_sub(b))
    }

    pub fn multiply(
        &mut self,
        target: NumberId,
        other: NumberId,
    ) -> Result<PRange, Error> {
        self.update_value(target, other, |a, b| a.multiply(b))
    }

    pub fn divide(
        &mut self,
        target: NumberId,
        other: NumberId,
    ) -> Result<PRange, Error> {
        self.update_value(target, other, |a, b| a.divide(b))
    }

    /// The exponent is the real part of the other number
    pub fn pow(
        &mut self,
        target: NumberId,
        other: NumberId,
    ) -> Result<PRange, Error> {
        self.update_value(target, other, |a, b| a.pow(b.end))
    }

    pub fn negate(&mut self, target: NumberId) -> Result<PRange, Error> {
        let value = -self.value(target)?;
        self.set_value(target, &value)?;
        self.value(target)
    }

    /// Read the number against the basis, without moving it
    pub fn invert_polarity(&mut self, target: NumberId) -> Result<(), Error> {
        let polarity = self.number(target)?.polarity().invert();
        self.set_polarity(target, polarity)
    }

    //----------------------------------------------------------
    // Booleans and comparisons
    //----------------------------------------------------------

    /// The part of left that satisfies the comparison with right
    pub fn compare(
        &self,
        left: NumberId,
        right: NumberId,
        op: Comparison,
    ) -> Result<Option<DirectedInterval>, Error> {
        let a = self.number(left)?.focal();
        let b = self.number(right)?.focal();
        Ok(focal_intervals::compare(op, &a, &b))
    }

    /// Combine two numbers as groups of intervals.  An empty group means
    /// false.
    pub fn combine(
        &self,
        left: NumberId,
        right: NumberId,
        op: BoolOp,
    ) -> Result<NumberGroup, Error> {
        let mut result = self.number(left)?.to_group();
        result.compute_with(&self.number(right)?.to_group(), GroupOp::Bool(op));
        Ok(result)
    }

    /// Combine two numbers as masks.  None means false.
    pub fn combine_masked(
        &self,
        left: NumberId,
        right: NumberId,
        op: BoolOp,
    ) -> Result<Option<MaskedNumber>, Error> {
        let left = self.number(left)?.to_masked()?;
        let right = self.number(right)?.to_masked()?;
        Ok(left.combine(&right, op))
    }

    /// Split a number into one plain number per interval (per true segment
    /// for masked numbers).  The results are not stored.
    pub fn internal_numbers(
        &self,
        ids: &mut Ids,
        id: NumberId,
    ) -> Result<Vec<Number>, Error> {
        Ok(self
            .number(id)?
            .parts()
            .into_iter()
            .map(|(focal, polarity)| {
                self.new_number(
                    ids,
                    Role::Ordinary,
                    NumberKind::plain(focal, polarity),
                )
            })
            .collect())
    }

    /// Run an operation from start to end, and return its result
    pub fn apply_operation(
        &self,
        left: NumberId,
        right: Option<NumberId>,
        kind: OperationKind,
        repeats: Option<NumberId>,
    ) -> Result<NumberGroup, Error> {
        let mut transform = Transform::new(left, right, repeats, kind);
        transform.apply(self, Stage::Start)?;
        transform.apply(self, Stage::End)?;
        Ok(transform.into_result())
    }
}
