use crate::errors::Error;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// The value of a number, relative to its domain's basis.
///
/// The pair reads as a complex number: `end` is the real part (where the
/// number ends, in basis units) and `start` the imaginary part (where it
/// starts, read against the basis).  A number starting at the origin of
/// its basis is therefore a plain real value.
///
/// ```text
///    basis   [0 -> 10]
///    focal   [-20 -> 30]      value = 2i + 3
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PRange {
    pub start: Decimal,
    pub end: Decimal,
}

impl PRange {
    pub const ZERO: PRange = PRange {
        start: Decimal::ZERO,
        end: Decimal::ZERO,
    };
    pub const ONE: PRange = PRange {
        start: Decimal::ZERO,
        end: Decimal::ONE,
    };

    pub fn new(start: Decimal, end: Decimal) -> Self {
        PRange { start, end }
    }

    /// A value with no imaginary part
    pub fn real(end: Decimal) -> Self {
        PRange {
            start: Decimal::ZERO,
            end,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.start.is_zero() && self.end.is_zero()
    }

    /// Both parts are whole numbers
    pub fn is_integer(&self) -> bool {
        self.start.fract().is_zero() && self.end.fract().is_zero()
    }

    pub fn round_dp(&self, dp: u32) -> Self {
        PRange {
            start: self.start.round_dp(dp),
            end: self.end.round_dp(dp),
        }
    }

    /// Round both parts to whole numbers, midpoints away from zero
    pub fn round(&self) -> Self {
        let round = |d: Decimal| {
            d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        };
        PRange {
            start: round(self.start),
            end: round(self.end),
        }
    }

    /// Componentwise sum
    pub fn checked_add(&self, rhs: &PRange) -> Result<Self, Error> {
        Ok(PRange {
            start: checked(self.start.checked_add(rhs.start))?,
            end: checked(self.end.checked_add(rhs.end))?,
        })
    }

    pub fn checked_sub(&self, rhs: &PRange) -> Result<Self, Error> {
        Ok(PRange {
            start: checked(self.start.checked_sub(rhs.start))?,
            end: checked(self.end.checked_sub(rhs.end))?,
        })
    }

    /// Multiply both parts by a scalar
    pub fn scale(&self, factor: Decimal) -> Result<Self, Error> {
        Ok(PRange {
            start: checked(self.start.checked_mul(factor))?,
            end: checked(self.end.checked_mul(factor))?,
        })
    }

    /// Complex multiplication
    pub fn multiply(&self, rhs: &PRange) -> Result<Self, Error> {
        let real = checked(
            checked(self.end.checked_mul(rhs.end))?
                .checked_sub(checked(self.start.checked_mul(rhs.start))?),
        )?;
        let imaginary = checked(
            checked(self.start.checked_mul(rhs.end))?
                .checked_add(checked(self.end.checked_mul(rhs.start))?),
        )?;
        Ok(PRange {
            start: imaginary,
            end: real,
        })
    }

    /// Complex division
    pub fn divide(&self, rhs: &PRange) -> Result<Self, Error> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let norm = checked(
            checked(rhs.end.checked_mul(rhs.end))?
                .checked_add(checked(rhs.start.checked_mul(rhs.start))?),
        )?;
        let conjugate = PRange {
            start: -rhs.start,
            end: rhs.end,
        };
        let num = self.multiply(&conjugate)?;
        Ok(PRange {
            start: checked(num.start.checked_div(norm))?,
            end: checked(num.end.checked_div(norm))?,
        })
    }

    pub fn reciprocal(&self) -> Result<Self, Error> {
        PRange::ONE.divide(self)
    }

    /// Integer power, computed exactly
    pub fn powi(&self, exponent: i64) -> Result<Self, Error> {
        if exponent < 0 {
            return self.powi(exponent.saturating_neg())?.reciprocal();
        }
        let mut result = PRange::ONE;
        let mut base = *self;
        let mut remaining = exponent.unsigned_abs();
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.multiply(&base)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.multiply(&base)?;
            }
        }
        Ok(result)
    }

    /// Raise to any real power.  Whole exponents are exact, others go
    /// through the polar form and lose some precision.
    pub fn pow(&self, exponent: Decimal) -> Result<Self, Error> {
        if exponent.fract().is_zero() {
            if let Some(e) = exponent.to_i64() {
                return self.powi(e);
            }
        }
        if self.is_zero() {
            return if exponent.is_sign_negative() {
                Err(Error::DivisionByZero)
            } else {
                Ok(PRange::ZERO)
            };
        }

        let undefined = || Error::Undefined(format!("{self} ^ {exponent}"));
        let real = self.end.to_f64().ok_or_else(undefined)?;
        let imaginary = self.start.to_f64().ok_or_else(undefined)?;
        let exp = exponent.to_f64().ok_or_else(undefined)?;
        let modulus = real.hypot(imaginary).powf(exp);
        let angle = imaginary.atan2(real) * exp;
        let (sin, cos) = angle.sin_cos();
        Ok(PRange {
            start: Decimal::from_f64(modulus * sin).ok_or_else(undefined)?,
            end: Decimal::from_f64(modulus * cos).ok_or_else(undefined)?,
        })
    }
}

fn checked(value: Option<Decimal>) -> Result<Decimal, Error> {
    value.ok_or_else(|| Error::Undefined("arithmetic overflow".into()))
}

impl From<Decimal> for PRange {
    fn from(value: Decimal) -> Self {
        PRange::real(value)
    }
}

impl core::ops::Neg for PRange {
    type Output = PRange;

    fn neg(self) -> Self::Output {
        PRange {
            start: -self.start,
            end: -self.end,
        }
    }
}

impl std::fmt::Display for PRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}i {}", self.start.normalize(), self.end.normalize())
    }
}

#[cfg(test)]
mod test {
    use crate::errors::Error;
    use crate::ranges::PRange;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_add_sub() {
        let a = PRange::new(dec!(1), dec!(2));
        let b = PRange::new(dec!(-3), dec!(0.5));
        assert_eq!(a.checked_add(&b), Ok(PRange::new(dec!(-2), dec!(2.5))));
        assert_eq!(a.checked_sub(&b), Ok(PRange::new(dec!(4), dec!(1.5))));
        assert_eq!(-a, PRange::new(dec!(-1), dec!(-2)));
        assert_eq!(
            a.scale(dec!(2)).unwrap(),
            PRange::new(dec!(2), dec!(4))
        );
    }

    #[test]
    fn test_overflow() {
        let big = PRange::real(Decimal::MAX);
        assert!(matches!(big.checked_add(&big), Err(Error::Undefined(_))));
        assert!(matches!(
            (-big).checked_sub(&big),
            Err(Error::Undefined(_))
        ));
        assert!(matches!(big.scale(dec!(2)), Err(Error::Undefined(_))));
        assert!(matches!(big.multiply(&big), Err(Error::Undefined(_))));
    }

    #[test]
    fn test_multiply() {
        // (2 + 1i) * (3 + 0i)
        let a = PRange::new(dec!(1), dec!(2));
        assert_eq!(
            a.multiply(&PRange::real(dec!(3))).unwrap(),
            PRange::new(dec!(3), dec!(6))
        );
        // i * i = -1
        let i = PRange::new(dec!(1), dec!(0));
        assert_eq!(i.multiply(&i).unwrap(), PRange::real(dec!(-1)));
        assert_eq!(
            PRange::real(dec!(2)).multiply(&PRange::real(dec!(3))).unwrap(),
            PRange::real(dec!(6))
        );
    }

    #[test]
    fn test_divide() {
        let a = PRange::new(dec!(3), dec!(6));
        assert_eq!(
            a.divide(&PRange::real(dec!(3))).unwrap(),
            PRange::new(dec!(1), dec!(2))
        );
        let i = PRange::new(dec!(1), dec!(0));
        assert_eq!(PRange::ONE.divide(&i).unwrap(), PRange::new(dec!(-1), dec!(0)));
        assert_eq!(a.divide(&PRange::ZERO), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_pow() {
        let two = PRange::real(dec!(2));
        assert_eq!(two.powi(10).unwrap(), PRange::real(dec!(1024)));
        assert_eq!(two.powi(0).unwrap(), PRange::ONE);
        assert_eq!(two.powi(-2).unwrap(), PRange::real(dec!(0.25)));
        assert_eq!(two.pow(dec!(3)).unwrap(), PRange::real(dec!(8)));

        let four = PRange::real(dec!(4));
        assert_eq!(
            four.pow(dec!(0.5)).unwrap().round_dp(6),
            PRange::real(dec!(2))
        );

        // sqrt(-1) = i
        let minus_one = PRange::real(dec!(-1));
        assert_eq!(
            minus_one.pow(dec!(0.5)).unwrap().round_dp(6),
            PRange::new(dec!(1), dec!(0))
        );
        assert_eq!(PRange::ZERO.pow(dec!(-0.5)), Err(Error::DivisionByZero));
        assert_eq!(PRange::ZERO.powi(-1), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", PRange::new(dec!(1.50), dec!(-2))),
            "1.5i -2"
        );
    }
}
