use rust_decimal::Decimal;

/// Whether a number is read along the direction of its domain's basis, or
/// against it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Polarity {
    #[default]
    Aligned,
    Inverted,
    None,
    Unknown,
}

impl Polarity {
    /// 1 for aligned, -1 for inverted, 0 otherwise
    pub fn direction(&self) -> i64 {
        match self {
            Polarity::Aligned => 1,
            Polarity::Inverted => -1,
            Polarity::None | Polarity::Unknown => 0,
        }
    }

    /// Values read against the basis change sign.  Numbers with no known
    /// polarity are read as aligned.
    pub fn value_sign(&self) -> Decimal {
        match self {
            Polarity::Inverted => Decimal::NEGATIVE_ONE,
            Polarity::Aligned | Polarity::None | Polarity::Unknown => {
                Decimal::ONE
            }
        }
    }

    pub fn has_polarity(&self) -> bool {
        matches!(self, Polarity::Aligned | Polarity::Inverted)
    }

    pub fn invert(&self) -> Polarity {
        match self {
            Polarity::Aligned => Polarity::Inverted,
            Polarity::Inverted => Polarity::Aligned,
            Polarity::None => Polarity::None,
            Polarity::Unknown => Polarity::Unknown,
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarity::Aligned => write!(f, "aligned"),
            Polarity::Inverted => write!(f, "inverted"),
            Polarity::None => write!(f, "none"),
            Polarity::Unknown => write!(f, "unknown"),
        }
    }
}
