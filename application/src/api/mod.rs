//! REST API definitions.

pub mod contact;
pub mod loan;
pub mod property;
pub mod purchase;
pub mod rent;
pub mod tenant;
pub mod transaction;

use std::str::FromStr;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    routing::{get, patch},
    Router,
};
use common::Patch;
use serde::{de, Deserialize, Deserializer};

use crate::Error;

/// Builds the [`Router`] of the REST API.
#[must_use]
pub fn router() -> Router {
    Router::new()
        .route(
            "/api/properties",
            get(property::list).post(property::create),
        )
        .route(
            "/api/properties/:id",
            get(property::get)
                .put(property::update)
                .patch(property::update)
                .delete(property::remove),
        )
        .route(
            "/api/purchase_details",
            get(purchase::get_by_property).post(purchase::ensure),
        )
        .route("/api/purchase_details/:id", patch(purchase::update))
        .route(
            "/api/loan_details",
            get(loan::list_by_property).post(loan::create),
        )
        .route(
            "/api/loan_details/by_property_purchase",
            patch(loan::update_by_property_purchase),
        )
        .route("/api/loan_details/:loan_id", patch(loan::update))
        .route("/api/rentlog", get(rent::list).post(rent::upsert))
        .route("/api/rentroll", get(rent::list).post(rent::upsert))
        .route(
            "/api/transactions",
            get(transaction::list).post(transaction::create),
        )
        .route(
            "/api/transactions/:id",
            get(transaction::get)
                .patch(transaction::update)
                .delete(transaction::remove),
        )
        .route("/api/contacts", get(contact::list).post(contact::create))
        .route(
            "/api/contacts/:id",
            get(contact::get)
                .patch(contact::update)
                .delete(contact::remove),
        )
        .route(
            "/api/tenant",
            get(tenant::list_by_property)
                .post(tenant::upsert)
                .put(tenant::replace)
                .delete(tenant::remove),
        )
}

/// JSON request body mapping extraction failures onto the API [`Error`]
/// shape with a `400 Bad Request` status.
#[derive(Debug)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(
        req: Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        axum::Json::<T>::from_request(req, state)
            .await
            .map(|axum::Json(value)| Self(value))
            .map_err(|e| Error {
                code: "BAD_REQUEST",
                status_code: http::StatusCode::BAD_REQUEST,
                message: e.body_text(),
                backtrace: None,
            })
    }
}

/// [`Error`] of a missing required `field`.
pub(crate) fn missing_field(field: &'static str) -> Error {
    Error {
        code: "MISSING_FIELD",
        status_code: http::StatusCode::BAD_REQUEST,
        message: format!("missing required `{field}` field"),
        backtrace: None,
    }
}

/// [`Error`] of an invalid `field` value.
pub(crate) fn invalid_field(field: &'static str) -> Error {
    Error {
        code: "INVALID_FIELD",
        status_code: http::StatusCode::BAD_REQUEST,
        message: format!("invalid `{field}` value"),
        backtrace: None,
    }
}

/// Parses the provided `input` into a domain value, mapping the failure
/// onto an [`invalid_field`] [`Error`].
pub(crate) fn parse_field<T: FromStr>(
    field: &'static str,
    input: &str,
) -> Result<T, Error> {
    input.parse().map_err(|_| invalid_field(field))
}

/// Parses the provided optional `input` into an optional domain value.
pub(crate) fn parse_opt<T: FromStr>(
    field: &'static str,
    input: Option<String>,
) -> Result<Option<T>, Error> {
    input.as_deref().map(|s| parse_field(field, s)).transpose()
}

/// Parses the provided [`Patch`]ed `input` into a domain [`Patch`].
pub(crate) fn parse_patch<T: FromStr>(
    field: &'static str,
    input: Patch<String>,
) -> Result<Patch<T>, Error> {
    input.try_map(|s| parse_field(field, &s))
}

/// Deserializes an optional integer from either a JSON number or its string
/// rendering.
pub(crate) fn option_int<'de, D, T>(
    deserializer: D,
) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + FromStr,
{
    let Some(value) = Option::<serde_json::Value>::deserialize(deserializer)?
    else {
        return Ok(None);
    };
    match value {
        serde_json::Value::Number(num) => num
            .as_i64()
            .and_then(|n| T::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| de::Error::custom("integer out of range")),
        serde_json::Value::String(s) => s
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom("invalid integer")),
        serde_json::Value::Null
        | serde_json::Value::Bool(_)
        | serde_json::Value::Array(_)
        | serde_json::Value::Object(_) => {
            Err(de::Error::custom("expected an integer"))
        }
    }
}
