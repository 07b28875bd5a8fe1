//! Handlers of the `/api/purchase_details` endpoints.

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use common::{Date, Money, Patch};
use serde::{Deserialize, Serialize};
use service::{command, domain, query, Command as _};
use uuid::Uuid;

use crate::{define_error, AsError, Error, Service};

use super::{missing_field, parse_opt, parse_patch, Payload};

/// Representation of a [`domain::PurchaseDetails`] in API responses.
#[derive(Clone, Debug, Serialize)]
pub struct PurchaseDetails {
    /// Unique identifier of this `PurchaseDetails`.
    pub id: domain::purchase::Id,

    /// ID of the property this `PurchaseDetails` belongs to.
    pub property_id: domain::property::Id,

    /// Date the purchase was closed.
    pub closing_date: Option<Date>,

    /// Purchase price.
    pub purchase_price: Money,

    /// Closing costs.
    pub closing_costs: Money,

    /// Earnest money deposit.
    pub earnest_money: Money,

    /// Down payment.
    pub down_payment: Money,

    /// Financing of the purchase.
    pub financing_type: Option<String>,

    /// How the property was acquired.
    pub acquisition_type: String,

    /// Buying party.
    pub buyer: String,

    /// Selling party.
    pub seller: String,

    /// Free-form notes.
    pub notes: String,
}

impl From<domain::PurchaseDetails> for PurchaseDetails {
    fn from(details: domain::PurchaseDetails) -> Self {
        Self {
            id: details.id,
            property_id: details.property_id,
            closing_date: details.closing_date,
            purchase_price: details.purchase_price,
            closing_costs: details.closing_costs,
            earnest_money: details.earnest_money,
            down_payment: details.down_payment,
            financing_type: details.financing.map(|f| f.to_string()),
            acquisition_type: details.acquisition.to_string(),
            buyer: details.buyer.to_string(),
            seller: details.seller.to_string(),
            notes: details.notes.to_string(),
        }
    }
}

/// Query parameters of the `PurchaseDetails` lookup.
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    /// ID of the property to look the `PurchaseDetails` up for.
    property_id: Option<Uuid>,
}

/// Body of a `PurchaseDetails` auto-creation request.
#[derive(Debug, Deserialize)]
pub struct EnsureBody {
    /// ID of the property to ensure the `PurchaseDetails` of.
    property_id: Option<Uuid>,
}

/// Body of a `PurchaseDetails` update request.
#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    /// New closing date of the purchase.
    #[serde(default)]
    closing_date: Patch<String>,

    /// New purchase price.
    purchase_price: Option<Money>,

    /// New closing costs.
    closing_costs: Option<Money>,

    /// New earnest money deposit.
    earnest_money: Option<Money>,

    /// New down payment.
    down_payment: Option<Money>,

    /// New financing of the purchase.
    #[serde(default)]
    financing_type: Patch<String>,

    /// New acquisition of the purchase.
    acquisition_type: Option<String>,

    /// New buying party.
    buyer: Option<String>,

    /// New selling party.
    seller: Option<String>,

    /// New notes on the purchase.
    notes: Option<String>,
}

/// `GET /api/purchase_details?property_id=`
pub async fn get_by_property(
    Extension(service): Extension<Service>,
    Query(params): Query<LookupParams>,
) -> Result<Json<PurchaseDetails>, Error> {
    let property_id = params
        .property_id
        .ok_or_else(|| missing_field("property_id"))?;

    service
        .execute(query::purchase::ByProperty::by(property_id.into()))
        .await
        .map_err(AsError::into_error)?
        .map(|details| Json(details.into()))
        .ok_or_else(|| LookupError::NotFound.into())
}

/// `POST /api/purchase_details`
///
/// Auto-creation on first view: responds with `201 Created` when the row
/// was created by this request, and `200 OK` when it already existed.
#[tracing::instrument(skip_all, fields(api.name = "ensurePurchaseDetails"))]
pub async fn ensure(
    Extension(service): Extension<Service>,
    Payload(body): Payload<EnsureBody>,
) -> Result<(StatusCode, Json<PurchaseDetails>), Error> {
    let property_id = body
        .property_id
        .ok_or_else(|| missing_field("property_id"))?;

    let outcome = service
        .execute(command::EnsurePurchaseDetails {
            property_id: property_id.into(),
        })
        .await
        .map_err(AsError::into_error)?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.details.into())))
}

/// `PATCH /api/purchase_details/:id`
#[tracing::instrument(skip_all, fields(api.name = "updatePurchaseDetails"))]
pub async fn update(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
    Payload(body): Payload<UpdateBody>,
) -> Result<Json<PurchaseDetails>, Error> {
    let UpdateBody {
        closing_date,
        purchase_price,
        closing_costs,
        earnest_money,
        down_payment,
        financing_type,
        acquisition_type,
        buyer,
        seller,
        notes,
    } = body;

    service
        .execute(command::UpdatePurchaseDetails {
            id: id.into(),
            closing_date: parse_patch("closing_date", closing_date)?,
            purchase_price,
            closing_costs,
            earnest_money,
            down_payment,
            financing: parse_patch("financing_type", financing_type)?,
            acquisition: parse_opt("acquisition_type", acquisition_type)?,
            buyer: parse_opt("buyer", buyer)?,
            seller: parse_opt("seller", seller)?,
            notes: parse_opt("notes", notes)?,
        })
        .await
        .map_err(AsError::into_error)
        .map(|details| Json(details.into()))
}

define_error! {
    enum LookupError {
        #[code = "NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "not_found"]
        NotFound,
    }
}

impl AsError for command::ensure_purchase_details::ExecutionError {
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

impl AsError for command::update_purchase_details::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists(_) => Some(LookupError::NotFound.into()),
        }
    }
}
