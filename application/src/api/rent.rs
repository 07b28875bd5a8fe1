//! Handlers of the `/api/rentlog` (aliased `/api/rentroll`) endpoints.

use axum::{extract::Query, Extension, Json};
use common::{Date, Money, Month, Patch};
use serde::{Deserialize, Serialize};
use service::{command, domain, query, read, Command as _};
use uuid::Uuid;

use crate::{define_error, AsError, Error, Service};

use super::{missing_field, option_int, parse_field, parse_patch, Payload};

/// Representation of a [`domain::RentEntry`] in API responses.
#[derive(Clone, Debug, Serialize)]
pub struct RentEntry {
    /// ID of the property this entry belongs to.
    pub property_id: domain::property::Id,

    /// Month this entry covers.
    pub month: Month,

    /// Year this entry covers.
    pub year: i32,

    /// Rent amount collected.
    pub rent_amount: Money,

    /// Date the rent was deposited.
    pub date_deposited: Option<Date>,

    /// Number of the check the rent arrived with.
    pub check_number: Option<String>,

    /// Free-form notes.
    pub notes: Option<String>,
}

impl From<domain::RentEntry> for RentEntry {
    fn from(entry: domain::RentEntry) -> Self {
        Self {
            property_id: entry.property_id,
            month: entry.month,
            year: entry.year,
            rent_amount: entry.rent_amount,
            date_deposited: entry.date_deposited,
            check_number: entry.check_number.map(|num| num.to_string()),
            notes: entry.notes.map(|notes| notes.to_string()),
        }
    }
}

/// Query parameters of the rent log list.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// ID of the property to list the entries of.
    property_id: Option<Uuid>,

    /// Year to narrow the list to.
    year: Option<i32>,
}

/// Body of a rent log upsert request.
#[derive(Debug, Deserialize)]
pub struct UpsertBody {
    /// ID of the property the entry belongs to.
    property_id: Option<Uuid>,

    /// Month the entry covers.
    month: Option<String>,

    /// Year the entry covers.
    #[serde(default, deserialize_with = "option_int")]
    year: Option<i32>,

    /// Rent amount collected.
    rent_amount: Option<Money>,

    /// Date the rent was deposited.
    #[serde(default)]
    date_deposited: Patch<String>,

    /// Number of the check the rent arrived with.
    #[serde(default)]
    check_number: Patch<String>,

    /// Free-form notes.
    #[serde(default)]
    notes: Patch<String>,
}

/// `GET /api/rentlog?property_id=&year=`
pub async fn list(
    Extension(service): Extension<Service>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<RentEntry>>, Error> {
    let ListParams { property_id, year } = params;
    let property_id =
        property_id.ok_or_else(|| missing_field("property_id"))?;

    service
        .execute(query::rent::List::by(read::rent::Selector {
            property_id: property_id.into(),
            year,
        }))
        .await
        .map_err(AsError::into_error)
        .map(|entries| Json(entries.into_iter().map(Into::into).collect()))
}

/// `POST /api/rentlog`
///
/// Upsert by the (property, month, year) natural key: merges onto the
/// existing entry when one exists, creates it otherwise.
#[tracing::instrument(skip_all, fields(api.name = "logRent"))]
pub async fn upsert(
    Extension(service): Extension<Service>,
    Payload(body): Payload<UpsertBody>,
) -> Result<Json<RentEntry>, Error> {
    let UpsertBody {
        property_id,
        month,
        year,
        rent_amount,
        date_deposited,
        check_number,
        notes,
    } = body;

    let key = domain::rent::Key {
        property_id: property_id
            .ok_or_else(|| missing_field("property_id"))?
            .into(),
        month: parse_field(
            "month",
            &month.ok_or_else(|| missing_field("month"))?,
        )?,
        year: year.ok_or_else(|| missing_field("year"))?,
    };

    service
        .execute(command::LogRent {
            key,
            rent_amount,
            date_deposited: parse_patch("date_deposited", date_deposited)?,
            check_number: parse_patch("check_number", check_number)?,
            notes: parse_patch("notes", notes)?,
        })
        .await
        .map_err(AsError::into_error)
        .map(|entry| Json(entry.into()))
}

#[cfg(test)]
mod spec {
    use common::{Month, Patch};

    use super::{super::parse_field, UpsertBody};

    #[test]
    fn upsert_body_distinguishes_absent_and_null() {
        let body: UpsertBody = serde_json::from_str(
            r#"{"property_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "month": "Jan", "year": 2024, "rent_amount": 1200}"#,
        )
        .unwrap();
        assert_eq!(body.year, Some(2024));
        assert_eq!(body.date_deposited, Patch::Omitted);
        assert_eq!(body.check_number, Patch::Omitted);
        assert_eq!(body.notes, Patch::Omitted);

        let body: UpsertBody = serde_json::from_str(
            r#"{"month": "Jan", "year": "2024",
                "notes": "late", "check_number": null}"#,
        )
        .unwrap();
        assert_eq!(body.year, Some(2024));
        assert_eq!(body.notes, Patch::Value("late".to_owned()));
        assert_eq!(body.check_number, Patch::Null);
    }

    #[test]
    fn month_parses_case_insensitively() {
        assert_eq!(
            parse_field::<Month>("month", "jan").unwrap(),
            Month::Jan,
        );
        assert_eq!(
            parse_field::<Month>("month", "December").unwrap(),
            Month::Dec,
        );
        assert!(parse_field::<Month>("month", "Janissary").is_err());
    }
}

impl AsError for command::log_rent::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "PROPERTY_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Property` with the provided ID does not exist"]
                PropertyNotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => Some(Error::PropertyNotExists.into()),
        }
    }
}
