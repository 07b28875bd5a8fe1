//! [`Contact`] definitions.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::sync::LazyLock;

use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::EnumString;
use uuid::Uuid;

/// Address-book contact.
///
/// The only entity not tied to a property; name uniqueness is a UI-side
/// convention, not a store invariant.
#[derive(Clone, Debug)]
pub struct Contact {
    /// ID of this [`Contact`].
    pub id: Id,

    /// [`Name`] of this [`Contact`].
    pub name: Name,

    /// [`Phone`] of this [`Contact`].
    pub phone: Option<Phone>,

    /// [`Email`] of this [`Contact`].
    pub email: Option<Email>,

    /// [`Kind`] of this [`Contact`].
    pub kind: Kind,

    /// Free-form [`Notes`].
    pub notes: Option<Notes>,
}

/// ID of a [`Contact`].
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

/// Name of a [`Contact`].
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

/// Phone number of a [`Contact`], normalized to exactly 10 digits.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] by normalizing the given `number`.
    ///
    /// Separators are stripped and a leading `1` country code is dropped;
    /// [`None`] is returned unless exactly 10 digits remain.
    #[must_use]
    pub fn new(number: impl AsRef<str>) -> Option<Self> {
        let number = number.as_ref();
        if number.chars().any(|c| {
            !c.is_ascii_digit() && !"()-.+ \t".contains(c)
        }) {
            return None;
        }

        let digits =
            number.matches(|c: char| c.is_ascii_digit()).collect::<String>();
        let digits = match digits.len() {
            10 => digits,
            11 => digits.strip_prefix('1')?.to_owned(),
            _ => return None,
        };

        Some(Self(digits))
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// Email address of a [`Contact`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 512 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Kind of a [`Contact`].
#[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, PartialEq)]
#[repr(u8)]
#[strum(ascii_case_insensitive)]
pub enum Kind {
    /// Personal contact.
    Personal = 1,

    /// Tenant of a property.
    Tenant = 2,

    /// Contractor working on a property.
    Contractor = 3,

    /// Vendor supplying a property.
    Vendor = 4,

    /// Property manager.
    Manager = 5,

    /// Emergency contact.
    #[display("Emergency Contact")]
    #[strum(to_string = "Emergency Contact", serialize = "EmergencyContact")]
    EmergencyContact = 6,

    /// Any other contact.
    #[default]
    Other = 7,
}

impl Kind {
    /// Converts this [`Kind`] into its [`u8`] representation.
    #[must_use]
    pub const fn u8(self) -> u8 {
        self as u8
    }

    /// Creates a new [`Kind`] from its [`u8`] representation.
    #[must_use]
    pub const fn from_u8(num: u8) -> Option<Self> {
        Some(match num {
            1 => Self::Personal,
            2 => Self::Tenant,
            3 => Self::Contractor,
            4 => Self::Vendor,
            5 => Self::Manager,
            6 => Self::EmergencyContact,
            7 => Self::Other,
            _ => return None,
        })
    }
}

#[cfg(feature = "postgres")]
impl FromSql<'_> for Kind {
    accepts!(INT2);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        let num = u8::try_from(i16::from_sql(ty, raw)?)?;
        Self::from_u8(num)
            .ok_or_else(|| format!("invalid `Kind` value: {num}").into())
    }
}

#[cfg(feature = "postgres")]
impl ToSql for Kind {
    accepts!(INT2);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        i16::from(self.u8()).to_sql(ty, w)
    }
}

/// Free-form notes on a [`Contact`].
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

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::{Email, Kind, Phone};

    #[test]
    fn phone_normalizes_to_ten_digits() {
        assert_eq!(Phone::new("555-867-5309").unwrap().to_string(), "5558675309");
        assert_eq!(
            Phone::new("(555) 867-5309").unwrap().to_string(),
            "5558675309",
        );
        assert_eq!(
            Phone::new("+1 555 867 5309").unwrap().to_string(),
            "5558675309",
        );
        assert_eq!(Phone::new("5558675309").unwrap().to_string(), "5558675309");

        assert!(Phone::new("867-5309").is_none());
        assert!(Phone::new("555-867-53090").is_none());
        assert!(Phone::new("call me maybe").is_none());
    }

    #[test]
    fn email_format_is_checked() {
        assert!(Email::new("jane@example.com").is_some());
        assert!(Email::new("j.doe+rent@mail.example.org").is_some());

        assert!(Email::new("jane").is_none());
        assert!(Email::new("jane@").is_none());
        assert!(Email::new("@example.com").is_none());
        assert!(Email::new("jane doe@example.com").is_none());
    }

    #[test]
    fn kind_parses_both_spellings_of_emergency_contact() {
        assert_eq!(
            Kind::from_str("Emergency Contact").unwrap(),
            Kind::EmergencyContact,
        );
        assert_eq!(
            Kind::from_str("emergencycontact").unwrap(),
            Kind::EmergencyContact,
        );
        assert_eq!(Kind::from_str("Vendor").unwrap(), Kind::Vendor);

        assert_eq!(Kind::EmergencyContact.to_string(), "Emergency Contact");
        assert_eq!(Kind::Other.to_string(), "Other");
    }
}
