//! [`Loan`] definitions.

use common::{Date, Money, Percent};
use derive_more::{AsRef, Display, FromStr};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

use crate::domain::{property, purchase};
#[cfg(doc)]
use crate::domain::{Property, PurchaseDetails};

/// Loan financing a [`Property`] purchase.
///
/// At most one [`Loan`] exists per ([`property::Id`], [`purchase::Id`])
/// pair.
#[derive(Clone, Debug)]
pub struct Loan {
    /// User-assigned [`Number`] identifying this [`Loan`].
    pub id: Number,

    /// ID of the [`Property`] this [`Loan`] finances.
    pub property_id: property::Id,

    /// ID of the [`PurchaseDetails`] this [`Loan`] finances.
    pub purchase_id: purchase::Id,

    /// Principal amount of this [`Loan`].
    pub loan_amount: Money,

    /// [`Lender`] issuing this [`Loan`].
    pub lender: Lender,

    /// Yearly interest rate of this [`Loan`].
    pub interest_rate: Percent,

    /// Term of this [`Loan`], in months.
    pub loan_term: TermMonths,

    /// [`Date`] this [`Loan`] starts.
    pub loan_start: Option<Date>,

    /// [`Date`] this [`Loan`] ends.
    pub loan_end: Option<Date>,

    /// Amortization period of this [`Loan`], in months.
    pub amortization_period: TermMonths,

    /// Monthly payment of this [`Loan`].
    pub monthly_payment: Money,

    /// [`Kind`] of this [`Loan`].
    pub kind: Kind,

    /// Indicator whether this [`Loan`] has a balloon payment.
    pub balloon_payment: bool,

    /// Indicator whether this [`Loan`] has a prepayment penalty.
    pub prepayment_penalty: bool,

    /// Indicator whether this [`Loan`] was refinanced.
    pub refinanced: bool,

    /// [`Status`] of this [`Loan`].
    pub status: Status,

    /// Free-form [`Notes`].
    pub notes: Notes,
}

/// User-assigned number identifying a [`Loan`].
///
/// Unlike other entities, a [`Loan`] is keyed by this number rather than a
/// generated ID.
#[derive(
    AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Number(String);

impl Number {
    /// Creates a new [`Number`] if the given `num` is valid.
    #[must_use]
    pub fn new(num: impl Into<String>) -> Option<Self> {
        let num = num.into();
        Self::check(&num).then_some(Self(num))
    }

    /// Checks whether the given `num` is a valid [`Number`].
    fn check(num: impl AsRef<str>) -> bool {
        let num = num.as_ref();
        num.trim() == num && !num.is_empty() && num.len() <= 64
    }
}

impl FromStr for Number {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Number`")
    }
}

/// Term of a [`Loan`], in months.
pub type TermMonths = u16;

/// Lender issuing a [`Loan`] (may be empty).
#[derive(AsRef, Clone, Debug, Default, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Lender(String);

impl Lender {
    /// Creates a new [`Lender`] if the given `lender` is valid.
    #[must_use]
    pub fn new(lender: impl Into<String>) -> Option<Self> {
        let lender = lender.into();
        (lender.len() <= 512).then_some(Self(lender))
    }
}

impl FromStr for Lender {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Lender`")
    }
}

/// Kind of a [`Loan`] (`Conventional`, `FHA`, ...; may be empty).
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

/// Status of a [`Loan`] (`Active`, `Paid Off`, ...; may be empty).
///
/// Deliberately free-form: the vocabulary is owned by the UI.
#[derive(AsRef, Clone, Debug, Default, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Status(String);

impl Status {
    /// Creates a new [`Status`] if the given `status` is valid.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Option<Self> {
        let status = status.into();
        (status.len() <= 512).then_some(Self(status))
    }
}

impl FromStr for Status {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Status`")
    }
}

/// Free-form notes on a [`Loan`] (may be empty).
#[derive(AsRef, Clone, Debug, Default, Display, Eq, PartialEq)]
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
