//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

/// Floating-point percentage.
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Percent(Decimal);

impl Percent {
    /// [`Percent`] of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Percent`] by checking the provided values is
    /// greater than `0` and less than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        if val < Decimal::ZERO || val > Decimal::ONE_HUNDRED {
            None
        } else {
            #[expect(
                clippy::allow_attributes,
                reason = "TODO: Remove once clippy is fixed"
            )]
            #[allow(unsafe_code, reason = "invariants checked already")]
            Some(unsafe { Self::new_unchecked(val) })
        }
    }

    /// Creates a new [`Percent`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided value must be greater than `0` and less than `100`.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(val: Decimal) -> Self {
        Self(val)
    }

    /// Returns the value of this [`Percent`].
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use std::{fmt, str::FromStr as _};

    use rust_decimal::{prelude::ToPrimitive as _, Decimal};
    use serde::{de, Deserializer, Serializer};

    use super::Percent;

    impl serde::Serialize for Percent {
        fn serialize<S: Serializer>(
            &self,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            let value = self.value();
            if value.is_integer() {
                if let Some(int) = value.to_i64() {
                    return serializer.serialize_i64(int);
                }
            }
            serializer.serialize_f64(
                value.to_f64().ok_or_else(|| {
                    serde::ser::Error::custom("`Percent` value overflow")
                })?,
            )
        }
    }

    impl<'de> serde::Deserialize<'de> for Percent {
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
        type Value = Percent;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a percentage as a number or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Percent, E> {
            Percent::new(Decimal::from(v))
                .ok_or_else(|| E::custom("percent out of range"))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Percent, E> {
            Percent::new(Decimal::from(v))
                .ok_or_else(|| E::custom("percent out of range"))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Percent, E> {
            Decimal::try_from(v)
                .ok()
                .and_then(Percent::new)
                .ok_or_else(|| E::custom("percent out of range"))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Percent, E> {
            Percent::from_str(v).map_err(E::custom)
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod spec {
    use rust_decimal::Decimal;

    use super::Percent;

    #[test]
    fn bounds_are_enforced() {
        assert!(Percent::new(Decimal::ZERO).is_some());
        assert!(Percent::new(Decimal::ONE_HUNDRED).is_some());
        assert!(Percent::new(Decimal::from(-1)).is_none());
        assert!(Percent::new(Decimal::from(101)).is_none());
    }

    #[test]
    fn deserializes_from_number_and_string() {
        assert_eq!(
            serde_json::from_str::<Percent>("6.25").unwrap(),
            Percent::new("6.25".parse().unwrap()).unwrap(),
        );
        assert_eq!(
            serde_json::from_str::<Percent>("\"6.25\"").unwrap(),
            Percent::new("6.25".parse().unwrap()).unwrap(),
        );

        assert!(serde_json::from_str::<Percent>("250").is_err());
        assert!(serde_json::from_str::<Percent>("\"abc\"").is_err());
    }
}
