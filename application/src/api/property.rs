//! Handlers of the `/api/properties` endpoints.

use axum::{extract::Path, http::StatusCode, Extension, Json};
use common::DateTime;
use serde::{Deserialize, Serialize};
use service::{command, domain, query, Command as _};
use uuid::Uuid;

use crate::{define_error, AsError, Error, Service};

use super::{missing_field, parse_field, parse_opt, Payload};

/// Representation of a [`domain::Property`] in API responses.
#[derive(Clone, Debug, Serialize)]
pub struct Property {
    /// Unique identifier of this `Property`.
    pub id: domain::property::Id,

    /// Name of this `Property`.
    pub name: String,

    /// Address of this `Property`.
    pub address: String,

    /// Owner of this `Property`.
    pub owner: String,

    /// Kind of this `Property`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Occupancy status of this `Property`.
    pub status: String,

    /// `DateTime` when this `Property` was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: DateTime,
}

impl From<domain::Property> for Property {
    fn from(property: domain::Property) -> Self {
        Self {
            id: property.id,
            name: property.name.to_string(),
            address: property.address.to_string(),
            owner: property.owner.to_string(),
            kind: property.kind.to_string(),
            status: property.status.to_string(),
            created_at: property.created_at.coerce(),
        }
    }
}

/// Body of a `Property` creation request.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
    /// Name of the new `Property`.
    #[serde(alias = "property_name")]
    name: Option<String>,

    /// Address of the new `Property`.
    address: Option<String>,

    /// Owner of the new `Property`.
    owner: Option<String>,

    /// Kind of the new `Property`.
    #[serde(rename = "type")]
    kind: Option<String>,

    /// Occupancy status of the new `Property`.
    status: Option<String>,
}

/// Body of a `Property` update request.
#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    /// New name of the `Property`.
    #[serde(alias = "property_name")]
    name: Option<String>,

    /// New address of the `Property`.
    address: Option<String>,

    /// New owner of the `Property`.
    owner: Option<String>,

    /// New kind of the `Property`.
    #[serde(rename = "type")]
    kind: Option<String>,

    /// New occupancy status of the `Property`.
    status: Option<String>,
}

/// `GET /api/properties`
pub async fn list(
    Extension(service): Extension<Service>,
) -> Result<Json<Vec<Property>>, Error> {
    service
        .execute(query::property::All::by(()))
        .await
        .map_err(AsError::into_error)
        .map(|properties| {
            Json(properties.into_iter().map(Into::into).collect())
        })
}

/// `GET /api/properties/:id`
pub async fn get(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<Property>, Error> {
    service
        .execute(query::property::ById::by(id.into()))
        .await
        .map_err(AsError::into_error)?
        .map(|property| Json(property.into()))
        .ok_or_else(|| LookupError::NotFound.into())
}

/// `POST /api/properties`
#[tracing::instrument(skip_all, fields(api.name = "createProperty"))]
pub async fn create(
    Extension(service): Extension<Service>,
    Payload(body): Payload<CreateBody>,
) -> Result<(StatusCode, Json<Property>), Error> {
    let CreateBody {
        name,
        address,
        owner,
        kind,
        status,
    } = body;

    let property = service
        .execute(command::CreateProperty {
            name: parse_field(
                "name",
                &name.ok_or_else(|| missing_field("name"))?,
            )?,
            address: parse_field(
                "address",
                &address.ok_or_else(|| missing_field("address"))?,
            )?,
            owner: parse_field(
                "owner",
                &owner.ok_or_else(|| missing_field("owner"))?,
            )?,
            kind: parse_opt("type", kind)?,
            status: parse_opt("status", status)?,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(property.into())))
}

/// `PUT/PATCH /api/properties/:id`
#[tracing::instrument(skip_all, fields(api.name = "updateProperty"))]
pub async fn update(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
    Payload(body): Payload<UpdateBody>,
) -> Result<Json<Property>, Error> {
    let UpdateBody {
        name,
        address,
        owner,
        kind,
        status,
    } = body;

    service
        .execute(command::UpdateProperty {
            id: id.into(),
            name: parse_opt("name", name)?,
            address: parse_opt("address", address)?,
            owner: parse_opt("owner", owner)?,
            kind: parse_opt("type", kind)?,
            status: parse_opt("status", status)?,
        })
        .await
        .map_err(AsError::into_error)
        .map(|property| Json(property.into()))
}

/// `DELETE /api/properties/:id`
#[tracing::instrument(skip_all, fields(api.name = "deleteProperty"))]
pub async fn remove(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Error> {
    service
        .execute(command::DeleteProperty { id: id.into() })
        .await
        .map_err(AsError::into_error)
        .map(|()| StatusCode::NO_CONTENT)
}

define_error! {
    enum LookupError {
        #[code = "PROPERTY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Property` with the provided ID does not exist"]
        NotFound,
    }
}

#[cfg(test)]
mod spec {
    use super::CreateBody;

    #[test]
    fn create_body_accepts_property_name_alias() {
        let body: CreateBody = serde_json::from_str(
            r#"{"property_name": "Oak St", "address": "1 Oak St",
                "owner": "Jane", "type": "Residential",
                "status": "Vacant"}"#,
        )
        .unwrap();
        assert_eq!(body.name.as_deref(), Some("Oak St"));
        assert_eq!(body.kind.as_deref(), Some("Residential"));
        assert_eq!(body.status.as_deref(), Some("Vacant"));

        let body: CreateBody =
            serde_json::from_str(r#"{"name": "Oak St"}"#).unwrap();
        assert_eq!(body.name.as_deref(), Some("Oak St"));
        assert_eq!(body.address, None);
    }
}

impl AsError for command::create_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists(_) => Some(LookupError::NotFound.into()),
        }
    }
}

impl AsError for command::delete_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists(_) => Some(LookupError::NotFound.into()),
        }
    }
}
