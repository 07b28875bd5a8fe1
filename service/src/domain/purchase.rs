//! [`PurchaseDetails`] definitions.

use common::{define_kind, Date, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{property, Property};

/// Purchase record of a [`Property`].
///
/// Exactly one row exists per [`Property`]; its absence means the record is
/// pending auto-creation on first view.
#[derive(Clone, Debug)]
pub struct PurchaseDetails {
    /// ID of this [`PurchaseDetails`].
    pub id: Id,

    /// ID of the [`Property`] this [`PurchaseDetails`] belongs to.
    pub property_id: property::Id,

    /// [`Date`] the purchase was closed.
    pub closing_date: Option<Date>,

    /// Purchase price.
    pub purchase_price: Money,

    /// Closing costs.
    pub closing_costs: Money,

    /// Earnest money deposit.
    pub earnest_money: Money,

    /// Down payment.
    pub down_payment: Money,

    /// [`Financing`] of the purchase, once known.
    pub financing: Option<Financing>,

    /// How the [`Property`] was acquired.
    pub acquisition: Acquisition,

    /// [`Party`] that bought the [`Property`].
    pub buyer: Party,

    /// [`Party`] that sold the [`Property`].
    pub seller: Party,

    /// Free-form [`Notes`].
    pub notes: Notes,
}

impl PurchaseDetails {
    /// Creates the seed [`PurchaseDetails`] auto-created on the first view
    /// of the provided [`Property`].
    ///
    /// The closing date is seeded with the [`Property`]'s creation date,
    /// everything else starts out empty.
    #[must_use]
    pub fn seeded(property: &Property) -> Self {
        Self {
            id: Id::new(),
            property_id: property.id,
            closing_date: Some(property.created_at.date()),
            purchase_price: Money::ZERO,
            closing_costs: Money::ZERO,
            earnest_money: Money::ZERO,
            down_payment: Money::ZERO,
            financing: None,
            acquisition: Acquisition::default(),
            buyer: Party::default(),
            seller: Party::default(),
            notes: Notes::default(),
        }
    }
}

/// ID of a [`PurchaseDetails`].
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

define_kind! {
    #[doc = "Financing of a [`PurchaseDetails`]."]
    enum Financing {
        #[doc = "Purchase financed with a loan."]
        Loan = 1,

        #[doc = "All-cash purchase."]
        Cash = 2,

        #[doc = "Any other financing arrangement."]
        Other = 3,
    }
}

impl Financing {
    /// Indicates whether this [`Financing`] involves a loan.
    #[must_use]
    pub const fn is_loan(self) -> bool {
        matches!(self, Self::Loan)
    }
}

/// How a [`Property`] was acquired (may be empty).
#[derive(AsRef, Clone, Debug, Default, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Acquisition(String);

impl Acquisition {
    /// Creates a new [`Acquisition`] if the given `acquisition` is valid.
    #[must_use]
    pub fn new(acquisition: impl Into<String>) -> Option<Self> {
        let acquisition = acquisition.into();
        (acquisition.len() <= 512).then_some(Self(acquisition))
    }
}

impl FromStr for Acquisition {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Acquisition`")
    }
}

/// Buying or selling party of a purchase (may be empty).
#[derive(AsRef, Clone, Debug, Default, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Party(String);

impl Party {
    /// Creates a new [`Party`] if the given `party` is valid.
    #[must_use]
    pub fn new(party: impl Into<String>) -> Option<Self> {
        let party = party.into();
        (party.len() <= 512).then_some(Self(party))
    }
}

impl FromStr for Party {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Party`")
    }
}

/// Free-form notes on a purchase (may be empty).
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

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{DateTime, Money};

    use crate::domain::{property, Property};

    use super::{Financing, PurchaseDetails};

    #[test]
    fn seeded_details_start_from_the_property_creation_date() {
        let property = Property {
            id: property::Id::new(),
            name: property::Name::new("Oak St").unwrap(),
            address: property::Address::new("1 Oak St").unwrap(),
            owner: property::Owner::new("Jane").unwrap(),
            kind: property::Kind::default(),
            status: property::Status::default(),
            created_at: DateTime::now().coerce(),
        };

        let details = PurchaseDetails::seeded(&property);

        assert_eq!(details.property_id, property.id);
        assert_eq!(details.closing_date, Some(property.created_at.date()));
        assert_eq!(details.purchase_price, Money::ZERO);
        assert_eq!(details.down_payment, Money::ZERO);
        assert_eq!(details.financing, None);
        assert_eq!(AsRef::<str>::as_ref(&details.buyer), "");
        assert_eq!(AsRef::<str>::as_ref(&details.notes), "");
    }

    #[test]
    fn financing_parses_case_insensitively() {
        assert_eq!(Financing::from_str("Loan").unwrap(), Financing::Loan);
        assert_eq!(Financing::from_str("LOAN").unwrap(), Financing::Loan);
        assert_eq!(Financing::from_str("cash").unwrap(), Financing::Cash);

        assert!(Financing::from_str("Mortgage").is_err());
    }

    #[test]
    fn only_loan_financing_indicates_a_loan() {
        assert!(Financing::Loan.is_loan());
        assert!(!Financing::Cash.is_loan());
        assert!(!Financing::Other.is_loan());
    }
}
