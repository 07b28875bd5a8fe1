//! [`Tenant`] definitions.

use common::{define_kind, Date, Money};
use derive_more::{AsRef, Display, FromStr};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

use crate::domain::property;
#[cfg(doc)]
use crate::domain::{Contact, Property};

/// Tenant occupying a [`Property`].
///
/// Identified by its natural [`Key`]: the [`Name`] is a denormalized copy
/// of a [`Contact`]'s name, and a [`Property`] may house several tenants.
#[derive(Clone, Debug)]
pub struct Tenant {
    /// ID of the [`Property`] this [`Tenant`] occupies.
    pub property_id: property::Id,

    /// [`Name`] of this [`Tenant`].
    pub name: Name,

    /// [`Status`] of this [`Tenant`], derived from the lease dates.
    pub status: Status,

    /// [`Date`] the lease starts.
    pub lease_start: Option<Date>,

    /// [`Date`] the lease ends.
    pub lease_end: Option<Date>,

    /// Monthly rent amount.
    pub rent_amount: Money,
}

impl Tenant {
    /// Returns the natural [`Key`] of this [`Tenant`].
    #[must_use]
    pub fn key(&self) -> Key {
        Key {
            property_id: self.property_id,
            name: self.name.clone(),
        }
    }
}

/// Natural key of a [`Tenant`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Key {
    /// ID of the [`Property`] the tenant occupies.
    pub property_id: property::Id,

    /// [`Name`] of the tenant.
    pub name: Name,
}

/// Name of a [`Tenant`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
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

define_kind! {
    #[doc = "Status of a [`Tenant`], derived from the lease dates."]
    enum Status {
        #[doc = "Lease covers today."]
        Current = 1,

        #[doc = "Lease has not started yet."]
        Future = 2,

        #[doc = "Lease has already ended."]
        Past = 3,
    }
}

impl Status {
    /// Derives the [`Status`] of a [`Tenant`] from its lease dates.
    ///
    /// Open-ended leases (a missing start or end date) count as covering
    /// today on the open side.
    #[must_use]
    pub fn derive(
        lease_start: Option<Date>,
        lease_end: Option<Date>,
        today: Date,
    ) -> Self {
        if lease_start.is_some_and(|start| start > today) {
            return Self::Future;
        }

        if lease_end.is_some_and(|end| end < today) {
            return Self::Past;
        }

        Self::Current
    }
}

#[cfg(test)]
mod spec {
    use common::Date;

    use super::Status;

    fn date(s: &str) -> Date {
        Date::from_iso8601(s).unwrap()
    }

    #[test]
    fn lease_covering_today_is_current() {
        let today = date("2024-06-15");

        assert_eq!(
            Status::derive(
                Some(date("2024-01-01")),
                Some(date("2024-12-31")),
                today,
            ),
            Status::Current,
        );
        assert_eq!(
            Status::derive(Some(today), Some(today), today),
            Status::Current,
        );
    }

    #[test]
    fn future_lease_wins_over_everything() {
        let today = date("2024-06-15");

        assert_eq!(
            Status::derive(
                Some(date("2024-07-01")),
                Some(date("2025-06-30")),
                today,
            ),
            Status::Future,
        );
    }

    #[test]
    fn ended_lease_is_past() {
        let today = date("2024-06-15");

        assert_eq!(
            Status::derive(
                Some(date("2023-01-01")),
                Some(date("2023-12-31")),
                today,
            ),
            Status::Past,
        );
        assert_eq!(
            Status::derive(None, Some(date("2024-06-14")), today),
            Status::Past,
        );
    }

    #[test]
    fn open_ended_leases_are_current() {
        let today = date("2024-06-15");

        assert_eq!(
            Status::derive(Some(date("2024-01-01")), None, today),
            Status::Current,
        );
        assert_eq!(Status::derive(None, None, today), Status::Current);
    }
}
