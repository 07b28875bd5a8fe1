//! Handlers of the `/api/tenant` endpoints.

use axum::{extract::Query, http::StatusCode, Extension, Json};
use common::{Date, Money, Patch};
use serde::{Deserialize, Serialize};
use service::{command, domain, query, Command as _};
use uuid::Uuid;

use crate::{define_error, AsError, Error, Service};

use super::{missing_field, parse_field, parse_patch, Payload};

/// Representation of a [`domain::Tenant`] in API responses.
#[derive(Clone, Debug, Serialize)]
pub struct Tenant {
    /// ID of the property this `Tenant` occupies.
    pub property_id: domain::property::Id,

    /// Name of this `Tenant`.
    pub name: String,

    /// Status of this `Tenant`, derived from the lease dates.
    pub status: String,

    /// Date the lease starts.
    pub lease_start: Option<Date>,

    /// Date the lease ends.
    pub lease_end: Option<Date>,

    /// Monthly rent amount.
    pub rent_amount: Money,
}

impl From<domain::Tenant> for Tenant {
    fn from(tenant: domain::Tenant) -> Self {
        Self {
            property_id: tenant.property_id,
            name: tenant.name.to_string(),
            status: tenant.status.to_string(),
            lease_start: tenant.lease_start,
            lease_end: tenant.lease_end,
            rent_amount: tenant.rent_amount,
        }
    }
}

/// Query parameters of the `Tenant` list.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// ID of the property to list the `Tenant`s of.
    property_id: Option<Uuid>,
}

/// Query parameters of the `Tenant` deletion.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    /// ID of the property the `Tenant` occupies.
    property_id: Option<Uuid>,

    /// Name of the `Tenant`.
    name: Option<String>,
}

/// Body of a `Tenant` write request.
#[derive(Debug, Deserialize)]
pub struct WriteBody {
    /// ID of the property the `Tenant` occupies.
    property_id: Option<Uuid>,

    /// Name of the `Tenant`.
    name: Option<String>,

    /// Date the lease starts.
    #[serde(default)]
    lease_start: Patch<String>,

    /// Date the lease ends.
    #[serde(default)]
    lease_end: Patch<String>,

    /// Monthly rent amount.
    rent_amount: Option<Money>,
}

impl WriteBody {
    /// Extracts the natural [`domain::tenant::Key`] out of this
    /// [`WriteBody`].
    fn key(&self) -> Result<domain::tenant::Key, Error> {
        Ok(domain::tenant::Key {
            property_id: self
                .property_id
                .ok_or_else(|| missing_field("property_id"))?
                .into(),
            name: parse_field(
                "name",
                self.name.as_deref().ok_or_else(|| missing_field("name"))?,
            )?,
        })
    }
}

/// `GET /api/tenant?property_id=`
pub async fn list_by_property(
    Extension(service): Extension<Service>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Tenant>>, Error> {
    let property_id = params
        .property_id
        .ok_or_else(|| missing_field("property_id"))?;

    service
        .execute(query::tenant::ByProperty::by(property_id.into()))
        .await
        .map_err(AsError::into_error)
        .map(|tenants| Json(tenants.into_iter().map(Into::into).collect()))
}

/// `POST /api/tenant`
///
/// Merge-upsert by the (property, name) natural key.
#[tracing::instrument(skip_all, fields(api.name = "upsertTenant"))]
pub async fn upsert(
    Extension(service): Extension<Service>,
    Payload(body): Payload<WriteBody>,
) -> Result<Json<Tenant>, Error> {
    let key = body.key()?;
    let WriteBody {
        property_id: _,
        name: _,
        lease_start,
        lease_end,
        rent_amount,
    } = body;

    service
        .execute(command::UpsertTenant {
            key,
            lease_start: parse_patch("lease_start", lease_start)?,
            lease_end: parse_patch("lease_end", lease_end)?,
            rent_amount,
        })
        .await
        .map_err(AsError::into_error)
        .map(|tenant| Json(tenant.into()))
}

/// `PUT /api/tenant`
///
/// Full-replace upsert by the (property, name) natural key: fields absent
/// from the body are reset instead of kept.
#[tracing::instrument(skip_all, fields(api.name = "replaceTenant"))]
pub async fn replace(
    Extension(service): Extension<Service>,
    Payload(body): Payload<WriteBody>,
) -> Result<Json<Tenant>, Error> {
    let key = body.key()?;
    let WriteBody {
        property_id: _,
        name: _,
        lease_start,
        lease_end,
        rent_amount,
    } = body;

    /// Turns an omitted field into an explicit reset.
    fn forced<T>(patch: Patch<T>) -> Patch<T> {
        match patch {
            Patch::Omitted | Patch::Null => Patch::Null,
            Patch::Value(value) => Patch::Value(value),
        }
    }

    service
        .execute(command::UpsertTenant {
            key,
            lease_start: forced(parse_patch("lease_start", lease_start)?),
            lease_end: forced(parse_patch("lease_end", lease_end)?),
            rent_amount: Some(rent_amount.unwrap_or(Money::ZERO)),
        })
        .await
        .map_err(AsError::into_error)
        .map(|tenant| Json(tenant.into()))
}

/// `DELETE /api/tenant?property_id=&name=`
#[tracing::instrument(skip_all, fields(api.name = "deleteTenant"))]
pub async fn remove(
    Extension(service): Extension<Service>,
    Query(params): Query<DeleteParams>,
) -> Result<StatusCode, Error> {
    let DeleteParams { property_id, name } = params;

    let key = domain::tenant::Key {
        property_id: property_id
            .ok_or_else(|| missing_field("property_id"))?
            .into(),
        name: parse_field(
            "name",
            &name.ok_or_else(|| missing_field("name"))?,
        )?,
    };

    service
        .execute(command::DeleteTenant { key })
        .await
        .map_err(AsError::into_error)
        .map(|()| StatusCode::NO_CONTENT)
}

define_error! {
    enum LookupError {
        #[code = "TENANT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Tenant` with the provided key does not exist"]
        NotFound,
    }
}

impl AsError for command::upsert_tenant::ExecutionError {
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

impl AsError for command::delete_tenant::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists => Some(LookupError::NotFound.into()),
        }
    }
}
