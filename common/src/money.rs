//! [`Money`]-related definitions.

use std::str::FromStr;

use derive_more::{Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

/// Amount of money.
///
/// The system is single-currency, so no currency dimension is carried.
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, Into, Ord, PartialEq,
    PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Money(Decimal);

impl Money {
    /// [`Money`] amount of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Money`] with the provided amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns the amount of this [`Money`].
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s).map(Self).map_err(|_| "invalid amount")
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use std::{fmt, str::FromStr as _};

    use rust_decimal::{prelude::ToPrimitive as _, Decimal};
    use serde::{de, Deserializer, Serializer};

    use super::Money;

    impl serde::Serialize for Money {
        fn serialize<S: Serializer>(
            &self,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            let amount = self.amount();
            if amount.is_integer() {
                if let Some(int) = amount.to_i64() {
                    return serializer.serialize_i64(int);
                }
            }
            serializer.serialize_f64(
                amount.to_f64().ok_or_else(|| {
                    serde::ser::Error::custom("`Money` amount overflow")
                })?,
            )
        }
    }

    impl<'de> serde::Deserialize<'de> for Money {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Self, D::Error> {
            deserializer.deserialize_any(Visitor)
        }
    }

    /// [`de::Visitor`] accepting both JSON numbers and their string
    /// renderings.
    struct Visitor;

    impl de::Visitor<'_> for Visitor {
        type Value = Money;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
            Ok(Money(Decimal::from(v)))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
            Ok(Money(Decimal::from(v)))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
            Decimal::try_from(v)
                .map(Money)
                .map_err(|_| E::custom("invalid amount"))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
            Money::from_str(v).map_err(E::custom)
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Money;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45").unwrap(),
            Money::new(decimal("123.45")),
        );
        assert_eq!(Money::from_str("0").unwrap(), Money::ZERO);
        assert_eq!(
            Money::from_str("-55.1").unwrap(),
            Money::new(decimal("-55.1")),
        );

        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("12f").is_err());
        assert!(Money::from_str("$12").is_err());
    }

    #[test]
    fn deserializes_from_number_and_string() {
        assert_eq!(
            serde_json::from_str::<Money>("1200").unwrap(),
            Money::new(decimal("1200")),
        );
        assert_eq!(
            serde_json::from_str::<Money>("1200.50").unwrap(),
            Money::new(decimal("1200.5")),
        );
        assert_eq!(
            serde_json::from_str::<Money>("\"1300\"").unwrap(),
            Money::new(decimal("1300")),
        );

        assert!(serde_json::from_str::<Money>("\"12 dollars\"").is_err());
        assert!(serde_json::from_str::<Money>("true").is_err());
    }

    #[test]
    fn serializes_integers_without_fraction() {
        assert_eq!(
            serde_json::to_string(&Money::new(decimal("1300"))).unwrap(),
            "1300",
        );
        assert_eq!(
            serde_json::to_string(&Money::new(decimal("99.5"))).unwrap(),
            "99.5",
        );
    }
}
