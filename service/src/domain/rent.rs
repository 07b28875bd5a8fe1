//! [`RentEntry`] definitions.

use common::{Date, Money, Month};
use derive_more::{AsRef, Display, FromStr};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

use crate::domain::property;
#[cfg(doc)]
use crate::domain::Property;

/// Rent collected for a [`Property`] in a single calendar month.
///
/// Identified by its natural [`Key`]: at most one entry exists per
/// ([`property::Id`], [`Month`], [`Year`]) triple, and every write merges
/// into the existing entry instead of duplicating it.
#[derive(Clone, Debug)]
pub struct RentEntry {
    /// ID of the [`Property`] this [`RentEntry`] belongs to.
    pub property_id: property::Id,

    /// [`Month`] this [`RentEntry`] covers.
    pub month: Month,

    /// [`Year`] this [`RentEntry`] covers.
    pub year: Year,

    /// Rent amount collected.
    pub rent_amount: Money,

    /// [`Date`] the rent was deposited.
    pub date_deposited: Option<Date>,

    /// [`CheckNumber`] of the rent check.
    pub check_number: Option<CheckNumber>,

    /// Free-form [`Notes`].
    pub notes: Option<Notes>,
}

impl RentEntry {
    /// Returns the natural [`Key`] of this [`RentEntry`].
    #[must_use]
    pub fn key(&self) -> Key {
        Key {
            property_id: self.property_id,
            month: self.month,
            year: self.year,
        }
    }
}

/// Natural key of a [`RentEntry`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Key {
    /// ID of the [`Property`] the entry belongs to.
    pub property_id: property::Id,

    /// [`Month`] the entry covers.
    pub month: Month,

    /// [`Year`] the entry covers.
    pub year: Year,
}

/// Calendar year of a [`RentEntry`].
pub type Year = i32;

/// Number of the check a rent payment arrived with.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct CheckNumber(String);

impl CheckNumber {
    /// Creates a new [`CheckNumber`] if the given `num` is valid.
    #[must_use]
    pub fn new(num: impl Into<String>) -> Option<Self> {
        let num = num.into();
        Self::check(&num).then_some(Self(num))
    }

    /// Checks whether the given `num` is a valid [`CheckNumber`].
    fn check(num: impl AsRef<str>) -> bool {
        let num = num.as_ref();
        num.trim() == num && !num.is_empty() && num.len() <= 64
    }
}

impl FromStr for CheckNumber {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `CheckNumber`")
    }
}

/// Free-form notes on a [`RentEntry`].
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
