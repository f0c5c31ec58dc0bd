use crate::domains::Domain;
use crate::errors::Error;
use crate::ids::NumberId;
use crate::number_groups::NumberGroup;
use crate::operations::{ArithmeticOp, OperationKind};
use crate::ranges::PRange;
use rust_decimal::Decimal;

/// Where an operation is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stage {
    // Reset the result to the left operand
    Start,

    // Only reported, for consumers that animate the operation (0.0 to 1.0)
    Partial(f32),

    // Combine the result with the right operand
    End,
}

/// What happened during one call to [`Transform::apply`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformEvent {
    Started,
    Progress(f32),

    // `matched` is false when the result is empty, which terminates any
    // loop driven by this transform.
    Ended { matched: bool },
}

/// The staged application of an operation between two numbers of the same
/// domain.
///
/// The result is a group of numbers.  For boolean operations and
/// comparisons, an empty result means "false".
#[derive(Debug, Clone)]
pub struct Transform {
    left: NumberId,
    right: Option<NumberId>,
    repeats: Option<NumberId>,
    kind: OperationKind,
    result: NumberGroup,
    started: bool,
}

impl Transform {
    /// `repeats` is a number whose value (its real part) scales the right
    /// operand.  It defaults to one.
    pub fn new(
        left: NumberId,
        right: Option<NumberId>,
        repeats: Option<NumberId>,
        kind: OperationKind,
    ) -> Self {
        Transform {
            left,
            right,
            repeats,
            kind,
            result: NumberGroup::default(),
            started: false,
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn left(&self) -> NumberId {
        self.left
    }

    pub fn right(&self) -> Option<NumberId> {
        self.right
    }

    pub fn result(&self) -> &NumberGroup {
        &self.result
    }

    pub fn into_result(self) -> NumberGroup {
        self.result
    }

    /// False once the result is empty
    pub fn is_live(&self) -> bool {
        !self.result.is_empty()
    }

    pub fn apply(
        &mut self,
        domain: &Domain,
        stage: Stage,
    ) -> Result<TransformEvent, Error> {
        match stage {
            Stage::Start => {
                self.start(domain)?;
                Ok(TransformEvent::Started)
            }
            Stage::Partial(progress) => {
                log::trace!("transform {}: {:.0}%", self.kind, progress * 100.0);
                Ok(TransformEvent::Progress(progress))
            }
            Stage::End => {
                if !self.started {
                    self.start(domain)?;
                }
                self.end(domain)?;
                self.started = false;
                log::debug!("transform {}: ended with {}", self.kind, self.result);
                Ok(TransformEvent::Ended {
                    matched: self.is_live(),
                })
            }
        }
    }

    fn start(&mut self, domain: &Domain) -> Result<(), Error> {
        self.result = domain.number(self.left)?.to_group();
        self.started = true;
        log::debug!("transform {}: started from {}", self.kind, self.result);
        Ok(())
    }

    fn repeats(&self, domain: &Domain) -> Result<Decimal, Error> {
        match self.repeats {
            Some(id) => Ok(domain.value(id)?.end),
            None => Ok(Decimal::ONE),
        }
    }

    fn end(&mut self, domain: &Domain) -> Result<(), Error> {
        match self.kind {
            OperationKind::Arithmetic(op) => self.end_arithmetic(domain, op),
            OperationKind::Bool(_) | OperationKind::Compare(_) => {
                let other = match self.right {
                    Some(id) => domain.number(id)?.to_group(),
                    None => self.result.clone(),
                };
                if let Some(op) = self.kind.group_op() {
                    self.result.compute_with(&other, op);
                }
                Ok(())
            }
        }
    }

    /// Each member of the result is converted to its value, combined, and
    /// converted back to ticks, keeping its polarity.
    fn end_arithmetic(
        &mut self,
        domain: &Domain,
        op: ArithmeticOp,
    ) -> Result<(), Error> {
        let repeats = self.repeats(domain)?;
        let right: Option<PRange> = match self.right {
            Some(id) => Some(domain.value(id)?),
            None => None,
        };
        let mut updated = NumberGroup::default();
        for (focal, polarity) in self.result.iter() {
            let value = domain.get_value_of(&focal, polarity)?;
            let value = op.apply(&value, right.as_ref(), repeats)?;
            updated.add(domain.create_focal_from_range(&value, polarity), polarity);
        }
        self.result = updated;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::domains::{Domain, DomainSettings};
    use crate::errors::Error;
    use crate::ids::Ids;
    use crate::operations::OperationKind;
    use crate::polarities::Polarity;
    use crate::transforms::{Stage, Transform, TransformEvent};
    use focal_intervals::{BoolOp, Comparison, DirectedInterval};

    fn di(start: i64, end: i64) -> DirectedInterval {
        DirectedInterval::new(start, end)
    }

    fn setup() -> (Ids, Domain) {
        let mut ids = Ids::default();
        let d = Domain::new(
            &mut ids,
            DomainSettings::new(di(0, 10), di(-1000, 1000)),
        );
        (ids, d)
    }

    #[test]
    fn test_stages() {
        let (mut ids, mut d) = setup();
        let a = d.create_number_from_ticks(&mut ids, 0, 20);
        let b = d.create_number_from_ticks(&mut ids, 0, 30);
        let mut t = Transform::new(a, Some(b), None, OperationKind::ADD);
        assert!(!t.is_live());

        assert_eq!(t.apply(&d, Stage::Start), Ok(TransformEvent::Started));
        assert_eq!(t.result().get(0), Some((di(0, 20), Polarity::Aligned)));

        // Partial only reports
        assert_eq!(
            t.apply(&d, Stage::Partial(0.5)),
            Ok(TransformEvent::Progress(0.5))
        );
        assert_eq!(t.result().get(0), Some((di(0, 20), Polarity::Aligned)));

        assert_eq!(
            t.apply(&d, Stage::End),
            Ok(TransformEvent::Ended { matched: true })
        );
        assert_eq!(t.result().get(0), Some((di(0, 50), Polarity::Aligned)));
        assert!(t.is_live());

        // The operands were not modified
        assert_eq!(d.number(a).unwrap().focal(), di(0, 20));
    }

    #[test]
    fn test_add_repeats() {
        let (mut ids, mut d) = setup();
        let a = d.create_number_from_ticks(&mut ids, 0, 20);
        let b = d.create_number_from_ticks(&mut ids, 0, 30);
        let two = d.create_number_from_ticks(&mut ids, 0, 20);

        let repeated = d
            .apply_operation(a, Some(b), OperationKind::ADD, Some(two))
            .unwrap();

        let once = d.apply_operation(a, Some(b), OperationKind::ADD, None).unwrap();
        let (focal, _) = once.get(0).unwrap();
        let c = d.create_number(&mut ids, focal, Polarity::Aligned);
        let twice = d.apply_operation(c, Some(b), OperationKind::ADD, None).unwrap();

        assert_eq!(repeated, twice);
        assert_eq!(repeated.get(0), Some((di(0, 80), Polarity::Aligned)));
    }

    #[test]
    fn test_multiply_repeats() {
        let (mut ids, mut d) = setup();
        let a = d.create_number_from_ticks(&mut ids, 0, 20);
        let b = d.create_number_from_ticks(&mut ids, 0, 30);
        let two = d.create_number_from_ticks(&mut ids, 0, 20);

        let repeated = d
            .apply_operation(a, Some(b), OperationKind::MULTIPLY, Some(two))
            .unwrap();

        // Square b first
        let squared = d
            .apply_operation(b, Some(b), OperationKind::MULTIPLY, None)
            .unwrap();
        let (focal, _) = squared.get(0).unwrap();
        let b2 = d.create_number(&mut ids, focal, Polarity::Aligned);
        let expected = d
            .apply_operation(a, Some(b2), OperationKind::MULTIPLY, None)
            .unwrap();

        assert_eq!(repeated, expected);
        assert_eq!(repeated.get(0), Some((di(0, 180), Polarity::Aligned)));
    }

    #[test]
    fn test_unary() {
        let (mut ids, mut d) = setup();
        let a = d.create_number_from_ticks(&mut ids, 0, 30);
        let two = d.create_number_from_ticks(&mut ids, 0, 20);
        let r = d
            .apply_operation(a, None, OperationKind::SUBTRACT, Some(two))
            .unwrap();
        assert_eq!(r.get(0), Some((di(0, -60), Polarity::Aligned)));
        let r = d
            .apply_operation(a, None, OperationKind::POW, Some(two))
            .unwrap();
        assert_eq!(r.get(0), Some((di(0, 90), Polarity::Aligned)));
    }

    #[test]
    fn test_bool_and_compare() {
        let (mut ids, mut d) = setup();
        let a = d.create_number_from_ticks(&mut ids, 10, 20);
        let b = d.create_number_from_ticks(&mut ids, 30, 40);

        let or = d
            .apply_operation(a, Some(b), OperationKind::Bool(BoolOp::Or), None)
            .unwrap();
        assert_eq!(or.count(), 2);

        let mut t =
            Transform::new(a, Some(b), None, OperationKind::Bool(BoolOp::And));
        assert_eq!(
            t.apply(&d, Stage::End),
            Ok(TransformEvent::Ended { matched: false })
        );
        assert!(!t.is_live());

        let gt = d
            .apply_operation(
                b,
                Some(a),
                OperationKind::Compare(Comparison::GreaterThan),
                None,
            )
            .unwrap();
        assert_eq!(gt.get(0), Some((di(30, 40), Polarity::Aligned)));

        // Without right, the result is combined with itself
        let same = d
            .apply_operation(
                a,
                None,
                OperationKind::Compare(Comparison::Equals),
                None,
            )
            .unwrap();
        assert_eq!(same.get(0), Some((di(10, 20), Polarity::Aligned)));
    }

    #[test]
    fn test_unknown_operand() {
        let (mut ids, mut d) = setup();
        let a = d.create_number_from_ticks(&mut ids, 10, 20);
        let gone = d.create_number_from_ticks(&mut ids, 0, 5);
        d.remove_number(gone);
        assert_eq!(
            d.apply_operation(a, Some(gone), OperationKind::ADD, None),
            Err(Error::UnknownNumber {
                number: gone,
                domain: d.id()
            })
        );
    }
}
