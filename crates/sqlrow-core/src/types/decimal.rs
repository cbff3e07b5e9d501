use derive_more::{Display, FromStr};
use rust_decimal::Decimal as WrappedDecimal;

///
/// Decimal
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd)]
pub struct Decimal(WrappedDecimal);

impl Decimal {
    /// Construct a decimal from mantissa and scale.
    #[must_use]
    pub fn new(num: i64, scale: u32) -> Self {
        Self(WrappedDecimal::new(num, scale))
    }

    #[must_use]
    pub fn from_i64(n: i64) -> Self {
        Self(WrappedDecimal::from(n))
    }

    #[must_use]
    pub fn from_u64(n: u64) -> Self {
        Self(WrappedDecimal::from(n))
    }
}

impl From<WrappedDecimal> for Decimal {
    fn from(inner: WrappedDecimal) -> Self {
        Self(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_does_not_affect_ordering() {
        assert_eq!(Decimal::new(150, 2), Decimal::new(15, 1));
        assert!(Decimal::new(149, 2) < Decimal::new(15, 1));
    }

    #[test]
    fn integral_constructors_match_mantissa_form() {
        assert_eq!(Decimal::from_i64(-3), Decimal::new(-3, 0));
        assert_eq!(Decimal::from_u64(u64::MAX).to_string(), u64::MAX.to_string());
    }

    #[test]
    fn parses_from_text() {
        let parsed: Decimal = "12.34".parse().expect("decimal text");

        assert_eq!(parsed, Decimal::new(1234, 2));
        assert!("twelve".parse::<Decimal>().is_err());
    }
}
