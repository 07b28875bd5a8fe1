//! [`Transaction`] definitions.

use common::{Date, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::property;
#[cfg(doc)]
use crate::domain::Property;

/// Ledger transaction of a [`Property`].
///
/// Append-only: every recorded [`Transaction`] is a new row, with no
/// natural-key deduplication.
#[derive(Clone, Debug)]
pub struct Transaction {
    /// ID of this [`Transaction`].
    pub id: Id,

    /// ID of the [`Property`] this [`Transaction`] belongs to.
    pub property_id: property::Id,

    /// Amount of this [`Transaction`].
    pub amount: Money,

    /// [`Date`] of this [`Transaction`].
    pub date: Date,

    /// [`Kind`] of this [`Transaction`].
    pub kind: Kind,

    /// Free-form [`Notes`].
    pub notes: Option<Notes>,
}

/// ID of a [`Transaction`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Kind of a [`Transaction`] (`Repair`, `Insurance`, ...; may be empty).
///
/// Deliberately free-form: the vocabulary is owned by the UI.
#[derive(AsRef, Clone, Debug, Default, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Kind(String);

impl Kind {
    /// Creates a new [`Kind`] if the given `kind` is valid.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Option<Self> {
        let kind = kind.into();
        (kind.len() <= 512).then_some(Self(kind))
    }
}

impl FromStr for Kind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Kind`")
    }
}

/// Free-form notes on a [`Transaction`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Notes(String);

impl Notes {
    /// Creates a new [`Notes`] if the given `notes` are valid.
    #[must_use]
    pub fn new(notes: impl Into<String>) -> Option<Self> {
        let notes = notes.into();
        (notes.len() <= 4096).then_some(Self(notes))
    }
}

impl FromStr for Notes {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Notes`")
    }
}
