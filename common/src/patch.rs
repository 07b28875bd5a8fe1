//! Tri-state field values for partial updates.

/// Value of a single field in a partial update.
///
/// Distinguishes a field absent from the payload ([`Patch::Omitted`], the
/// current value is kept) from a field explicitly set to `null`
/// ([`Patch::Null`], the current value is cleared).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Patch<T> {
    /// Field is absent from the payload.
    #[default]
    Omitted,

    /// Field is explicitly set to `null`.
    Null,

    /// Field is set to the provided value.
    Value(T),
}

impl<T> Patch<T> {
    /// Indicates whether this [`Patch`] leaves the current value untouched.
    #[must_use]
    pub const fn is_omitted(&self) -> bool {
        matches!(self, Self::Omitted)
    }

    /// Maps the [`Patch::Value`] with the provided function.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Self::Omitted => Patch::Omitted,
            Self::Null => Patch::Null,
            Self::Value(v) => Patch::Value(f(v)),
        }
    }

    /// Maps the [`Patch::Value`] with the provided fallible function.
    ///
    /// # Errors
    ///
    /// Propagates the error of the provided function.
    pub fn try_map<U, E>(
        self,
        f: impl FnOnce(T) -> Result<U, E>,
    ) -> Result<Patch<U>, E> {
        Ok(match self {
            Self::Omitted => Patch::Omitted,
            Self::Null => Patch::Null,
            Self::Value(v) => Patch::Value(f(v)?),
        })
    }

    /// Applies this [`Patch`] onto the provided nullable slot.
    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Self::Omitted => {}
            Self::Null => *slot = None,
            Self::Value(v) => *slot = Some(v),
        }
    }

    /// Resolves this [`Patch`] against the current nullable value.
    #[must_use]
    pub fn resolve(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Omitted => current,
            Self::Null => None,
            Self::Value(v) => Some(v),
        }
    }

    /// Converts this [`Patch`] into an [`Option`], collapsing
    /// [`Patch::Null`] and [`Patch::Omitted`] into [`None`].
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Omitted | Self::Null => None,
            Self::Value(v) => Some(v),
        }
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.
    //!
    //! [`Patch`] fields must carry `#[serde(default)]` so that an absent
    //! field deserializes into [`Patch::Omitted`], while an explicit `null`
    //! deserializes into [`Patch::Null`].

    use serde::{Deserialize, Deserializer};

    use super::Patch;

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Self, D::Error> {
            Ok(match Option::<T>::deserialize(deserializer)? {
                None => Self::Null,
                Some(v) => Self::Value(v),
            })
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod spec {
    use serde::Deserialize;

    use super::Patch;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        notes: Patch<String>,

        #[serde(default)]
        amount: Patch<i64>,
    }

    #[test]
    fn absent_null_and_value_are_distinguished() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.notes, Patch::Omitted);
        assert_eq!(body.amount, Patch::Omitted);

        let body: Body =
            serde_json::from_str(r#"{"notes": null, "amount": 5}"#).unwrap();
        assert_eq!(body.notes, Patch::Null);
        assert_eq!(body.amount, Patch::Value(5));
    }

    #[test]
    fn applies_merge_semantics() {
        let mut notes = Some("old".to_owned());

        Patch::Omitted.apply_to(&mut notes);
        assert_eq!(notes.as_deref(), Some("old"));

        Patch::Value("new".to_owned()).apply_to(&mut notes);
        assert_eq!(notes.as_deref(), Some("new"));

        Patch::<String>::Null.apply_to(&mut notes);
        assert_eq!(notes, None);
    }

    #[test]
    fn resolves_against_current() {
        assert_eq!(Patch::Omitted.resolve(Some(1)), Some(1));
        assert_eq!(Patch::Null.resolve(Some(1)), None);
        assert_eq!(Patch::Value(2).resolve(Some(1)), Some(2));
        assert_eq!(Patch::Value(2).resolve(None), Some(2));
    }

    #[test]
    fn try_map_propagates_parse_failures() {
        let patch = Patch::Value("7".to_owned());
        assert_eq!(
            patch.try_map(|s| s.parse::<i64>()).unwrap(),
            Patch::Value(7),
        );

        let patch = Patch::Value("seven".to_owned());
        assert!(patch.try_map(|s| s.parse::<i64>()).is_err());

        let patch = Patch::<String>::Omitted;
        assert_eq!(
            patch.try_map(|s| s.parse::<i64>()).unwrap(),
            Patch::Omitted,
        );
    }
}
