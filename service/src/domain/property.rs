//! [`Property`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Portfolio property.
///
/// Root entity of the portfolio: every other entity except a
/// [`Contact`](crate::domain::Contact) references it by [`Id`].
#[derive(Clone, Debug)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// [`Name`] of this [`Property`].
    pub name: Name,

    /// [`Address`] of this [`Property`].
    pub address: Address,

    /// [`Owner`] of this [`Property`].
    pub owner: Owner,

    /// [`Kind`] of this [`Property`].
    pub kind: Kind,

    /// Occupancy [`Status`] of this [`Property`].
    pub status: Status,

    /// [`DateTime`] when this [`Property`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Property`].
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

/// Name of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Address of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `address` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        address.trim() == address
            && !address.is_empty()
            && address.len() <= 512
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

/// Owner of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Owner(String);

impl Owner {
    /// Creates a new [`Owner`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `owner` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(owner: impl Into<String>) -> Self {
        Self(owner.into())
    }

    /// Creates a new [`Owner`] if the given `owner` is valid.
    #[must_use]
    pub fn new(owner: impl Into<String>) -> Option<Self> {
        let owner = owner.into();
        Self::check(&owner).then_some(Self(owner))
    }

    /// Checks whether the given `owner` is a valid [`Owner`].
    fn check(owner: impl AsRef<str>) -> bool {
        let owner = owner.as_ref();
        owner.trim() == owner && !owner.is_empty() && owner.len() <= 512
    }
}

impl FromStr for Owner {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Owner`")
    }
}

/// Kind of a [`Property`] (`Residential`, `Commercial`, ...).
///
/// Deliberately free-form: the vocabulary is owned by the UI.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Kind(String);

impl Kind {
    /// Creates a new [`Kind`] if the given `kind` is valid.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Option<Self> {
        let kind = kind.into();
        Self::check(&kind).then_some(Self(kind))
    }

    /// Checks whether the given `kind` is a valid [`Kind`].
    fn check(kind: impl AsRef<str>) -> bool {
        let kind = kind.as_ref();
        kind.trim() == kind && !kind.is_empty() && kind.len() <= 512
    }
}

impl Default for Kind {
    fn default() -> Self {
        Self("Residential".into())
    }
}

impl FromStr for Kind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Kind`")
    }
}

/// Occupancy status of a [`Property`] (`Vacant`, `Occupied`, ...).
///
/// Deliberately free-form: the vocabulary is owned by the UI.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Status(String);

impl Status {
    /// Creates a new [`Status`] if the given `status` is valid.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Option<Self> {
        let status = status.into();
        Self::check(&status).then_some(Self(status))
    }

    /// Checks whether the given `status` is a valid [`Status`].
    fn check(status: impl AsRef<str>) -> bool {
        let status = status.as_ref();
        status.trim() == status && !status.is_empty() && status.len() <= 512
    }
}

impl Default for Status {
    fn default() -> Self {
        Self("Vacant".into())
    }
}

impl FromStr for Status {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Status`")
    }
}

/// [`DateTime`] when a [`Property`] was created.
pub type CreationDateTime = DateTimeOf<(Property, unit::Creation)>;
