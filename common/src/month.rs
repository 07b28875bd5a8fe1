//! Calendar [`Month`] definitions.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;

#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use strum::{Display, EnumString};

/// Month of a calendar year.
///
/// Renders and parses as the English three-letter abbreviation (`Jan`), with
/// the full month name accepted on input as well.
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize)
)]
#[repr(u8)]
#[strum(ascii_case_insensitive)]
pub enum Month {
    #[doc(hidden)]
    #[strum(to_string = "Jan", serialize = "January")]
    Jan = 1,
    #[doc(hidden)]
    #[strum(to_string = "Feb", serialize = "February")]
    Feb = 2,
    #[doc(hidden)]
    #[strum(to_string = "Mar", serialize = "March")]
    Mar = 3,
    #[doc(hidden)]
    #[strum(to_string = "Apr", serialize = "April")]
    Apr = 4,
    #[doc(hidden)]
    #[strum(to_string = "May")]
    May = 5,
    #[doc(hidden)]
    #[strum(to_string = "Jun", serialize = "June")]
    Jun = 6,
    #[doc(hidden)]
    #[strum(to_string = "Jul", serialize = "July")]
    Jul = 7,
    #[doc(hidden)]
    #[strum(to_string = "Aug", serialize = "August")]
    Aug = 8,
    #[doc(hidden)]
    #[strum(to_string = "Sep", serialize = "September")]
    Sep = 9,
    #[doc(hidden)]
    #[strum(to_string = "Oct", serialize = "October")]
    Oct = 10,
    #[doc(hidden)]
    #[strum(to_string = "Nov", serialize = "November")]
    Nov = 11,
    #[doc(hidden)]
    #[strum(to_string = "Dec", serialize = "December")]
    Dec = 12,
}

impl Month {
    /// Converts this [`Month`] into its [`u8`] representation (1-based).
    #[must_use]
    pub const fn u8(self) -> u8 {
        self as u8
    }

    /// Creates a new [`Month`] from its [`u8`] representation (1-based).
    #[must_use]
    pub const fn from_u8(num: u8) -> Option<Self> {
        Some(match num {
            1 => Self::Jan,
            2 => Self::Feb,
            3 => Self::Mar,
            4 => Self::Apr,
            5 => Self::May,
            6 => Self::Jun,
            7 => Self::Jul,
            8 => Self::Aug,
            9 => Self::Sep,
            10 => Self::Oct,
            11 => Self::Nov,
            12 => Self::Dec,
            _ => return None,
        })
    }
}

#[cfg(feature = "postgres")]
impl FromSql<'_> for Month {
    accepts!(INT2);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        let num = u8::try_from(i16::from_sql(ty, raw)?)?;
        Self::from_u8(num)
            .ok_or_else(|| format!("invalid `Month` value: {num}").into())
    }
}

#[cfg(feature = "postgres")]
impl ToSql for Month {
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

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::Month;

    #[test]
    fn parses_abbreviations_and_full_names() {
        assert_eq!(Month::from_str("Jan").unwrap(), Month::Jan);
        assert_eq!(Month::from_str("january").unwrap(), Month::Jan);
        assert_eq!(Month::from_str("DEC").unwrap(), Month::Dec);
        assert_eq!(Month::from_str("September").unwrap(), Month::Sep);

        assert!(Month::from_str("Janember").is_err());
        assert!(Month::from_str("").is_err());
    }

    #[test]
    fn renders_as_abbreviation() {
        assert_eq!(Month::Jan.to_string(), "Jan");
        assert_eq!(Month::Dec.to_string(), "Dec");
    }

    #[test]
    fn numeric_round_trip() {
        for num in 1..=12 {
            assert_eq!(Month::from_u8(num).unwrap().u8(), num);
        }
        assert_eq!(Month::from_u8(0), None);
        assert_eq!(Month::from_u8(13), None);
    }
}
