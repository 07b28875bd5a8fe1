//! Handlers of the `/api/loan_details` endpoints.

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use common::{Date, Money, Patch, Percent};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, update_loan::Selector},
    domain, query, Command as _,
};
use uuid::Uuid;

use crate::{define_error, AsError, Error, Service};

use super::{missing_field, option_int, parse_field, parse_opt, Payload};

/// Representation of a [`domain::Loan`] in API responses.
#[derive(Clone, Debug, Serialize)]
pub struct Loan {
    /// User-assigned loan number identifying this `Loan`.
    pub id: String,

    /// ID of the property this `Loan` finances.
    pub property_id: domain::property::Id,

    /// ID of the purchase this `Loan` finances.
    pub purchase_id: domain::purchase::Id,

    /// Principal amount.
    pub loan_amount: Money,

    /// Issuing lender.
    pub lender: String,

    /// Yearly interest rate.
    pub interest_rate: Percent,

    /// Term, in months.
    pub loan_term: u16,

    /// Date this `Loan` starts.
    pub loan_start: Option<Date>,

    /// Date this `Loan` ends.
    pub loan_end: Option<Date>,

    /// Amortization period, in months.
    pub amortization_period: u16,

    /// Monthly payment.
    pub monthly_payment: Money,

    /// Kind of this `Loan`.
    pub loan_type: String,

    /// Indicator whether this `Loan` has a balloon payment.
    pub balloon_payment: bool,

    /// Indicator whether this `Loan` has a prepayment penalty.
    pub prepayment_penalty: bool,

    /// Indicator whether this `Loan` was refinanced.
    pub refinanced: bool,

    /// Status of this `Loan`.
    pub loan_status: String,

    /// Free-form notes.
    pub notes: String,
}

impl From<domain::Loan> for Loan {
    fn from(loan: domain::Loan) -> Self {
        Self {
            id: loan.id.to_string(),
            property_id: loan.property_id,
            purchase_id: loan.purchase_id,
            loan_amount: loan.loan_amount,
            lender: loan.lender.to_string(),
            interest_rate: loan.interest_rate,
            loan_term: loan.loan_term,
            loan_start: loan.loan_start,
            loan_end: loan.loan_end,
            amortization_period: loan.amortization_period,
            monthly_payment: loan.monthly_payment,
            loan_type: loan.kind.to_string(),
            balloon_payment: loan.balloon_payment,
            prepayment_penalty: loan.prepayment_penalty,
            refinanced: loan.refinanced,
            loan_status: loan.status.to_string(),
            notes: loan.notes.to_string(),
        }
    }
}

/// Query parameters of the `Loan` list lookup.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// ID of the property to list the `Loan`s of.
    property_id: Option<Uuid>,
}

/// Body of a `Loan` creation request.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
    /// User-assigned loan number of the new `Loan`.
    #[serde(alias = "loan_id")]
    id: Option<String>,

    /// ID of the property the `Loan` finances.
    property_id: Option<Uuid>,

    /// ID of the purchase the `Loan` finances.
    purchase_id: Option<Uuid>,

    /// Principal amount.
    loan_amount: Option<Money>,

    /// Issuing lender.
    lender: Option<String>,

    /// Yearly interest rate.
    interest_rate: Option<Percent>,

    /// Term, in months.
    #[serde(default, deserialize_with = "option_int")]
    loan_term: Option<u16>,

    /// Date the `Loan` starts.
    loan_start: Option<Date>,

    /// Date the `Loan` ends.
    loan_end: Option<Date>,

    /// Amortization period, in months.
    #[serde(default, deserialize_with = "option_int")]
    amortization_period: Option<u16>,

    /// Monthly payment.
    monthly_payment: Option<Money>,

    /// Kind of the `Loan`.
    loan_type: Option<String>,

    /// Indicator whether the `Loan` has a balloon payment.
    balloon_payment: Option<bool>,

    /// Indicator whether the `Loan` has a prepayment penalty.
    prepayment_penalty: Option<bool>,

    /// Indicator whether the `Loan` was refinanced.
    refinanced: Option<bool>,

    /// Status of the `Loan`.
    loan_status: Option<String>,

    /// Free-form notes.
    notes: Option<String>,
}

/// Body of a `Loan` update request.
#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    /// ID of the property the `Loan` finances (composite-key updates only).
    property_id: Option<Uuid>,

    /// ID of the purchase the `Loan` finances (composite-key updates only).
    purchase_id: Option<Uuid>,

    /// New principal amount.
    loan_amount: Option<Money>,

    /// New issuing lender.
    lender: Option<String>,

    /// New yearly interest rate.
    interest_rate: Option<Percent>,

    /// New term, in months.
    #[serde(default, deserialize_with = "option_int")]
    loan_term: Option<u16>,

    /// New start date.
    #[serde(default)]
    loan_start: Patch<Date>,

    /// New end date.
    #[serde(default)]
    loan_end: Patch<Date>,

    /// New amortization period, in months.
    #[serde(default, deserialize_with = "option_int")]
    amortization_period: Option<u16>,

    /// New monthly payment.
    monthly_payment: Option<Money>,

    /// New kind of the `Loan`.
    loan_type: Option<String>,

    /// New balloon payment indicator.
    balloon_payment: Option<bool>,

    /// New prepayment penalty indicator.
    prepayment_penalty: Option<bool>,

    /// New refinanced indicator.
    refinanced: Option<bool>,

    /// New status of the `Loan`.
    loan_status: Option<String>,

    /// New free-form notes.
    notes: Option<String>,
}

impl UpdateBody {
    /// Converts this [`UpdateBody`] into an [`command::UpdateLoan`] with the
    /// provided [`Selector`].
    fn into_command(
        self,
        selector: Selector,
    ) -> Result<command::UpdateLoan, Error> {
        let Self {
            property_id: _,
            purchase_id: _,
            loan_amount,
            lender,
            interest_rate,
            loan_term,
            loan_start,
            loan_end,
            amortization_period,
            monthly_payment,
            loan_type,
            balloon_payment,
            prepayment_penalty,
            refinanced,
            loan_status,
            notes,
        } = self;

        Ok(command::UpdateLoan {
            selector,
            loan_amount,
            lender: parse_opt("lender", lender)?,
            interest_rate,
            loan_term,
            loan_start,
            loan_end,
            amortization_period,
            monthly_payment,
            kind: parse_opt("loan_type", loan_type)?,
            balloon_payment,
            prepayment_penalty,
            refinanced,
            status: parse_opt("loan_status", loan_status)?,
            notes: parse_opt("notes", notes)?,
        })
    }
}

/// `GET /api/loan_details?property_id=`
pub async fn list_by_property(
    Extension(service): Extension<Service>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Loan>>, Error> {
    let property_id = params
        .property_id
        .ok_or_else(|| missing_field("property_id"))?;

    service
        .execute(query::loan::ByProperty::by(property_id.into()))
        .await
        .map_err(AsError::into_error)
        .map(|loans| Json(loans.into_iter().map(Into::into).collect()))
}

/// `POST /api/loan_details`
///
/// Creation is rejected with `409 Conflict` when a `Loan` already exists
/// for the (property, purchase) pair.
#[tracing::instrument(skip_all, fields(api.name = "createLoan"))]
pub async fn create(
    Extension(service): Extension<Service>,
    Payload(body): Payload<CreateBody>,
) -> Result<(StatusCode, Json<Loan>), Error> {
    let CreateBody {
        id,
        property_id,
        purchase_id,
        loan_amount,
        lender,
        interest_rate,
        loan_term,
        loan_start,
        loan_end,
        amortization_period,
        monthly_payment,
        loan_type,
        balloon_payment,
        prepayment_penalty,
        refinanced,
        loan_status,
        notes,
    } = body;

    let loan = service
        .execute(command::CreateLoan {
            id: parse_field("id", &id.ok_or_else(|| missing_field("id"))?)?,
            property_id: property_id
                .ok_or_else(|| missing_field("property_id"))?
                .into(),
            purchase_id: purchase_id
                .ok_or_else(|| missing_field("purchase_id"))?
                .into(),
            loan_amount,
            lender: parse_opt("lender", lender)?,
            interest_rate,
            loan_term,
            loan_start,
            loan_end,
            amortization_period,
            monthly_payment,
            kind: parse_opt("loan_type", loan_type)?,
            balloon_payment,
            prepayment_penalty,
            refinanced,
            status: parse_opt("loan_status", loan_status)?,
            notes: parse_opt("notes", notes)?,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(loan.into())))
}

/// `PATCH /api/loan_details/:loan_id`
#[tracing::instrument(skip_all, fields(api.name = "updateLoan"))]
pub async fn update(
    Extension(service): Extension<Service>,
    Path(loan_id): Path<String>,
    Payload(body): Payload<UpdateBody>,
) -> Result<Json<Loan>, Error> {
    let number = parse_field("loan_id", &loan_id)?;

    service
        .execute(body.into_command(Selector::ByNumber(number))?)
        .await
        .map_err(AsError::into_error)
        .map(|loan| Json(loan.into()))
}

/// `PATCH /api/loan_details/by_property_purchase`
#[tracing::instrument(
    skip_all,
    fields(api.name = "updateLoanByPropertyPurchase")
)]
pub async fn update_by_property_purchase(
    Extension(service): Extension<Service>,
    Payload(body): Payload<UpdateBody>,
) -> Result<Json<Loan>, Error> {
    let property_id = body
        .property_id
        .ok_or_else(|| missing_field("property_id"))?;
    let purchase_id = body
        .purchase_id
        .ok_or_else(|| missing_field("purchase_id"))?;

    service
        .execute(body.into_command(Selector::ByPropertyPurchase(
            property_id.into(),
            purchase_id.into(),
        ))?)
        .await
        .map_err(AsError::into_error)
        .map(|loan| Json(loan.into()))
}

#[cfg(test)]
mod spec {
    use super::CreateBody;

    #[test]
    fn create_body_coerces_numbers_from_strings() {
        let body: CreateBody = serde_json::from_str(
            r#"{"id": "LN-1001",
                "property_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "purchase_id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
                "loan_amount": "250000", "interest_rate": "6.25",
                "loan_term": "360", "loan_start": "2024-03-01"}"#,
        )
        .unwrap();
        assert_eq!(body.id.as_deref(), Some("LN-1001"));
        assert_eq!(body.loan_term, Some(360));
        assert_eq!(
            body.loan_amount,
            Some("250000".parse().unwrap()),
        );
        assert_eq!(
            body.loan_start,
            Some("2024-03-01".parse().unwrap()),
        );

        assert!(serde_json::from_str::<CreateBody>(
            r#"{"loan_term": "soon"}"#
        )
        .is_err());
    }
}

impl AsError for command::create_loan::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LOAN_EXISTS"]
                #[status = CONFLICT]
                #[message = "Loan already exists for this property"]
                AlreadyExists,

                #[code = "PROPERTY_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Property` with the provided ID does not exist"]
                PropertyNotExists,

                #[code = "PURCHASE_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`PurchaseDetails` with the provided ID does not \
                             exist"]
                PurchaseNotExists,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::AlreadyExists => Error::AlreadyExists.into(),
            Self::PropertyNotExists(_) => Error::PropertyNotExists.into(),
            Self::PurchaseNotExists(_) => Error::PurchaseNotExists.into(),
        })
    }
}

impl AsError for command::update_loan::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LOAN_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Loan` with the provided key does not exist"]
                NotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists => Some(Error::NotExists.into()),
        }
    }
}
