//! Handlers of the `/api/transactions` endpoints.

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use common::{Date, Money, Patch};
use serde::{Deserialize, Serialize};
use service::{command, domain, query, read, Command as _};
use uuid::Uuid;

use crate::{define_error, AsError, Error, Service};

use super::{missing_field, parse_opt, parse_patch, Payload};

/// Representation of a [`domain::Transaction`] in API responses.
#[derive(Clone, Debug, Serialize)]
pub struct Transaction {
    /// Unique identifier of this `Transaction`.
    pub id: domain::transaction::Id,

    /// ID of the property this `Transaction` belongs to.
    pub property_id: domain::property::Id,

    /// Amount of this `Transaction`.
    pub amount: Money,

    /// Date of this `Transaction`.
    pub date: Date,

    /// Kind of this `Transaction`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Free-form notes.
    pub notes: Option<String>,
}

impl From<domain::Transaction> for Transaction {
    fn from(transaction: domain::Transaction) -> Self {
        Self {
            id: transaction.id,
            property_id: transaction.property_id,
            amount: transaction.amount,
            date: transaction.date,
            kind: transaction.kind.to_string(),
            notes: transaction.notes.map(|notes| notes.to_string()),
        }
    }
}

/// Query parameters of the `Transaction` ledger list.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// ID of the property to narrow the ledger to.
    property_id: Option<Uuid>,
}

/// Body of a `Transaction` creation request.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
    /// ID of the property the `Transaction` belongs to.
    property_id: Option<Uuid>,

    /// Amount of the `Transaction`.
    amount: Option<Money>,

    /// Date of the `Transaction`.
    date: Option<Date>,

    /// Kind of the `Transaction`.
    #[serde(rename = "type")]
    kind: Option<String>,

    /// Free-form notes.
    notes: Option<String>,
}

/// Body of a `Transaction` update request.
#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    /// New amount of the `Transaction`.
    amount: Option<Money>,

    /// New date of the `Transaction`.
    date: Option<Date>,

    /// New kind of the `Transaction`.
    #[serde(rename = "type")]
    kind: Option<String>,

    /// New free-form notes.
    #[serde(default)]
    notes: Patch<String>,
}

/// `GET /api/transactions?property_id=`
pub async fn list(
    Extension(service): Extension<Service>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Transaction>>, Error> {
    service
        .execute(query::transaction::List::by(read::transaction::Filter {
            property_id: params.property_id.map(Into::into),
        }))
        .await
        .map_err(AsError::into_error)
        .map(|transactions| {
            Json(transactions.into_iter().map(Into::into).collect())
        })
}

/// `GET /api/transactions/:id`
pub async fn get(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<Transaction>, Error> {
    service
        .execute(query::transaction::ById::by(id.into()))
        .await
        .map_err(AsError::into_error)?
        .map(|transaction| Json(transaction.into()))
        .ok_or_else(|| LookupError::NotFound.into())
}

/// `POST /api/transactions`
///
/// Append-only: every request inserts a new ledger row.
#[tracing::instrument(skip_all, fields(api.name = "recordTransaction"))]
pub async fn create(
    Extension(service): Extension<Service>,
    Payload(body): Payload<CreateBody>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let CreateBody {
        property_id,
        amount,
        date,
        kind,
        notes,
    } = body;

    let transaction = service
        .execute(command::RecordTransaction {
            property_id: property_id
                .ok_or_else(|| missing_field("property_id"))?
                .into(),
            amount: amount.ok_or_else(|| missing_field("amount"))?,
            date,
            kind: parse_opt("type", kind)?,
            notes: parse_opt("notes", notes)?,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(transaction.into())))
}

/// `PATCH /api/transactions/:id`
#[tracing::instrument(skip_all, fields(api.name = "updateTransaction"))]
pub async fn update(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
    Payload(body): Payload<UpdateBody>,
) -> Result<Json<Transaction>, Error> {
    let UpdateBody {
        amount,
        date,
        kind,
        notes,
    } = body;

    service
        .execute(command::UpdateTransaction {
            id: id.into(),
            amount,
            date,
            kind: parse_opt("type", kind)?,
            notes: parse_patch("notes", notes)?,
        })
        .await
        .map_err(AsError::into_error)
        .map(|transaction| Json(transaction.into()))
}

/// `DELETE /api/transactions/:id`
#[tracing::instrument(skip_all, fields(api.name = "deleteTransaction"))]
pub async fn remove(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Error> {
    service
        .execute(command::DeleteTransaction { id: id.into() })
        .await
        .map_err(AsError::into_error)
        .map(|()| StatusCode::NO_CONTENT)
}

define_error! {
    enum LookupError {
        #[code = "TRANSACTION_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Transaction` with the provided ID does not exist"]
        NotFound,
    }
}

impl AsError for command::record_transaction::ExecutionError {
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

impl AsError for command::update_transaction::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists(_) => Some(LookupError::NotFound.into()),
        }
    }
}

impl AsError for command::delete_transaction::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists(_) => Some(LookupError::NotFound.into()),
        }
    }
}
