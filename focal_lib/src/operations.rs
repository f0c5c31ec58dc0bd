use crate::errors::Error;
use crate::ranges::PRange;
use focal_intervals::{BoolOp, Comparison, GroupOp};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Pow,
}

impl ArithmeticOp {
    pub const ALL: [ArithmeticOp; 5] = [
        ArithmeticOp::Add,
        ArithmeticOp::Subtract,
        ArithmeticOp::Multiply,
        ArithmeticOp::Divide,
        ArithmeticOp::Pow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Subtract => "subtract",
            ArithmeticOp::Multiply => "multiply",
            ArithmeticOp::Divide => "divide",
            ArithmeticOp::Pow => "pow",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Subtract => "-",
            ArithmeticOp::Multiply => "*",
            ArithmeticOp::Divide => "/",
            ArithmeticOp::Pow => "^",
        }
    }

    /// Combine a value with the right operand, repeated.
    ///
    /// With a right operand, `repeats` scales it: added or subtracted
    /// `repeats` times, used as a factor `repeats` times (or its
    /// `repeats`-th root for a division), or for powers, `repeats` raises
    /// the exponent (the real part of right).
    ///
    /// Without one, the value is combined with itself: multiplied by
    /// `repeats` (negated for a subtraction), raised to `repeats`, or to its
    /// reciprocal for a division.
    pub fn apply(
        &self,
        value: &PRange,
        right: Option<&PRange>,
        repeats: Decimal,
    ) -> Result<PRange, Error> {
        let root = || {
            Decimal::ONE
                .checked_div(repeats)
                .ok_or(Error::DivisionByZero)
        };
        match right {
            Some(r) => match self {
                ArithmeticOp::Add => value.checked_add(&r.scale(repeats)?),
                ArithmeticOp::Subtract => {
                    value.checked_sub(&r.scale(repeats)?)
                }
                ArithmeticOp::Multiply => value.multiply(&r.pow(repeats)?),
                ArithmeticOp::Divide => value.divide(&r.pow(root()?)?),
                ArithmeticOp::Pow => {
                    let exponent = PRange::real(r.end).pow(repeats)?;
                    value.pow(exponent.end)
                }
            },
            None => match self {
                ArithmeticOp::Add => value.scale(repeats),
                ArithmeticOp::Subtract => value.scale(-repeats),
                ArithmeticOp::Multiply | ArithmeticOp::Pow => {
                    value.pow(repeats)
                }
                ArithmeticOp::Divide => value.pow(root()?),
            },
        }
    }
}

/// Any operation a transform can apply between two numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Arithmetic(ArithmeticOp),
    Bool(BoolOp),
    Compare(Comparison),
}

impl OperationKind {
    pub const ADD: OperationKind = OperationKind::Arithmetic(ArithmeticOp::Add);
    pub const SUBTRACT: OperationKind =
        OperationKind::Arithmetic(ArithmeticOp::Subtract);
    pub const MULTIPLY: OperationKind =
        OperationKind::Arithmetic(ArithmeticOp::Multiply);
    pub const DIVIDE: OperationKind =
        OperationKind::Arithmetic(ArithmeticOp::Divide);
    pub const POW: OperationKind = OperationKind::Arithmetic(ArithmeticOp::Pow);

    /// Parse the name or symbol of an operation, e.g. "add", "+", "xor",
    /// "contained_by" or ">=".
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        ArithmeticOp::ALL
            .into_iter()
            .find(|op| op.name() == lower || op.symbol() == lower)
            .map(OperationKind::Arithmetic)
            .or_else(|| BoolOp::from_name(name).map(OperationKind::Bool))
            .or_else(|| {
                Comparison::from_name(name).map(OperationKind::Compare)
            })
    }

    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::Arithmetic(op) => op.name(),
            OperationKind::Bool(op) => op.name(),
            OperationKind::Compare(op) => op.name(),
        }
    }

    /// How interval groups combine for this operation, if it is not
    /// arithmetic.
    pub fn group_op(&self) -> Option<GroupOp> {
        match self {
            OperationKind::Arithmetic(_) => None,
            OperationKind::Bool(op) => Some(GroupOp::Bool(*op)),
            OperationKind::Compare(op) => Some(GroupOp::Compare(*op)),
        }
    }

    /// Every operation this crate knows about
    pub fn all() -> impl Iterator<Item = OperationKind> {
        ArithmeticOp::ALL
            .into_iter()
            .map(OperationKind::Arithmetic)
            .chain(BoolOp::ALL.into_iter().map(OperationKind::Bool))
            .chain(Comparison::ALL.into_iter().map(OperationKind::Compare))
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod test {
    use crate::errors::Error;
    use crate::operations::{ArithmeticOp, OperationKind};
    use crate::ranges::PRange;
    use focal_intervals::{BoolOp, Comparison};
    use rust_decimal_macros::dec;

    #[test]
    fn test_names() {
        for op in OperationKind::all() {
            assert_eq!(OperationKind::from_name(op.name()), Some(op), "{op}");
        }
        assert_eq!(OperationKind::from_name("+"), Some(OperationKind::ADD));
        assert_eq!(OperationKind::from_name("^"), Some(OperationKind::POW));
        assert_eq!(
            OperationKind::from_name("-"),
            Some(OperationKind::SUBTRACT)
        );
        assert_eq!(
            OperationKind::from_name("<="),
            Some(OperationKind::Compare(Comparison::LessThanOrEqual))
        );
        assert_eq!(
            OperationKind::from_name("Contained-By"),
            Some(OperationKind::Compare(Comparison::ContainedBy))
        );
        assert_eq!(
            OperationKind::from_name("XOR"),
            Some(OperationKind::Bool(BoolOp::Xor))
        );
        assert_eq!(OperationKind::from_name("modulo"), None);
    }

    #[test]
    fn test_repeats() {
        let value = PRange::real(dec!(2));
        let right = PRange::real(dec!(3));

        // Adding twice
        let add = |v: &PRange, k| ArithmeticOp::Add.apply(v, Some(&right), k);
        let once = add(&value, dec!(1)).unwrap();
        let twice = add(&once, dec!(1)).unwrap();
        assert_eq!(add(&value, dec!(2)), Ok(twice));
        assert_eq!(twice, PRange::real(dec!(8)));
        assert_eq!(
            ArithmeticOp::Subtract.apply(&value, Some(&right), dec!(2)),
            Ok(PRange::real(dec!(-4)))
        );

        // Squaring right before multiplying
        assert_eq!(
            ArithmeticOp::Multiply.apply(&value, Some(&right), dec!(2)),
            Ok(PRange::real(dec!(18)))
        );
        let nine = PRange::real(dec!(9));
        assert_eq!(
            ArithmeticOp::Divide
                .apply(&PRange::real(dec!(18)), Some(&nine), dec!(2))
                .map(|v| v.round_dp(6)),
            Ok(PRange::real(dec!(6)))
        );
        assert_eq!(
            ArithmeticOp::Subtract.apply(&value, Some(&right), dec!(1)),
            ArithmeticOp::Add.apply(&value, Some(&-right), dec!(1)),
        );
        assert_eq!(
            ArithmeticOp::Pow.apply(&value, Some(&right), dec!(2)),
            Ok(PRange::real(dec!(512)))
        );
        assert_eq!(
            ArithmeticOp::Divide.apply(&value, Some(&right), dec!(0)),
            Err(Error::DivisionByZero)
        );
    }

    #[test]
    fn test_unary() {
        let value = PRange::real(dec!(3));
        assert_eq!(
            ArithmeticOp::Add.apply(&value, None, dec!(2)),
            Ok(PRange::real(dec!(6)))
        );
        assert_eq!(
            ArithmeticOp::Subtract.apply(&value, None, dec!(2)),
            Ok(PRange::real(dec!(-6)))
        );
        assert_eq!(
            ArithmeticOp::Multiply.apply(&value, None, dec!(2)),
            Ok(PRange::real(dec!(9)))
        );
        assert_eq!(
            ArithmeticOp::Pow.apply(&value, None, dec!(3)),
            Ok(PRange::real(dec!(27)))
        );
        assert_eq!(
            ArithmeticOp::Divide
                .apply(&PRange::real(dec!(9)), None, dec!(2))
                .map(|v| v.round_dp(6)),
            Ok(PRange::real(dec!(3)))
        );
    }
}
