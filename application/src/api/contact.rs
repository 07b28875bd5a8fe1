//! Handlers of the `/api/contacts` endpoints.

use axum::{extract::Path, http::StatusCode, Extension, Json};
use common::Patch;
use serde::{Deserialize, Serialize};
use service::{command, domain, query, Command as _};
use uuid::Uuid;

use crate::{define_error, AsError, Error, Service};

use super::{missing_field, parse_field, parse_opt, parse_patch, Payload};

/// Representation of a [`domain::Contact`] in API responses.
#[derive(Clone, Debug, Serialize)]
pub struct Contact {
    /// Unique identifier of this `Contact`.
    pub id: domain::contact::Id,

    /// Name of this `Contact`.
    pub name: String,

    /// Normalized 10-digit phone number.
    pub phone: Option<String>,

    /// Email address.
    pub email: Option<String>,

    /// Kind of this `Contact`.
    pub contact_type: String,

    /// Free-form notes.
    pub notes: Option<String>,
}

impl From<domain::Contact> for Contact {
    fn from(contact: domain::Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name.to_string(),
            phone: contact.phone.map(|phone| phone.to_string()),
            email: contact.email.map(|email| email.to_string()),
            contact_type: contact.kind.to_string(),
            notes: contact.notes.map(|notes| notes.to_string()),
        }
    }
}

/// Body of a `Contact` creation request.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
    /// Name of the new `Contact`.
    name: Option<String>,

    /// Phone number of the new `Contact` (normalized to 10 digits).
    phone: Option<String>,

    /// Email address of the new `Contact`.
    email: Option<String>,

    /// Kind of the new `Contact`.
    contact_type: Option<String>,

    /// Free-form notes.
    notes: Option<String>,
}

/// Body of a `Contact` update request.
#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    /// New name of the `Contact`.
    name: Option<String>,

    /// New phone number of the `Contact` (normalized to 10 digits).
    #[serde(default)]
    phone: Patch<String>,

    /// New email address of the `Contact`.
    #[serde(default)]
    email: Patch<String>,

    /// New kind of the `Contact`.
    contact_type: Option<String>,

    /// New free-form notes.
    #[serde(default)]
    notes: Patch<String>,
}

/// `GET /api/contacts`
pub async fn list(
    Extension(service): Extension<Service>,
) -> Result<Json<Vec<Contact>>, Error> {
    service
        .execute(query::contact::All::by(()))
        .await
        .map_err(AsError::into_error)
        .map(|contacts| Json(contacts.into_iter().map(Into::into).collect()))
}

/// `GET /api/contacts/:id`
pub async fn get(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<Contact>, Error> {
    service
        .execute(query::contact::ById::by(id.into()))
        .await
        .map_err(AsError::into_error)?
        .map(|contact| Json(contact.into()))
        .ok_or_else(|| LookupError::NotFound.into())
}

/// `POST /api/contacts`
#[tracing::instrument(skip_all, fields(api.name = "createContact"))]
pub async fn create(
    Extension(service): Extension<Service>,
    Payload(body): Payload<CreateBody>,
) -> Result<(StatusCode, Json<Contact>), Error> {
    let CreateBody {
        name,
        phone,
        email,
        contact_type,
        notes,
    } = body;

    let contact = service
        .execute(command::CreateContact {
            name: parse_field(
                "name",
                &name.ok_or_else(|| missing_field("name"))?,
            )?,
            phone: parse_opt("phone", phone)?,
            email: parse_opt("email", email)?,
            kind: parse_opt("contact_type", contact_type)?,
            notes: parse_opt("notes", notes)?,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(contact.into())))
}

/// `PATCH /api/contacts/:id`
#[tracing::instrument(skip_all, fields(api.name = "updateContact"))]
pub async fn update(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
    Payload(body): Payload<UpdateBody>,
) -> Result<Json<Contact>, Error> {
    let UpdateBody {
        name,
        phone,
        email,
        contact_type,
        notes,
    } = body;

    service
        .execute(command::UpdateContact {
            id: id.into(),
            name: parse_opt("name", name)?,
            phone: parse_patch("phone", phone)?,
            email: parse_patch("email", email)?,
            kind: parse_opt("contact_type", contact_type)?,
            notes: parse_patch("notes", notes)?,
        })
        .await
        .map_err(AsError::into_error)
        .map(|contact| Json(contact.into()))
}

/// `DELETE /api/contacts/:id`
#[tracing::instrument(skip_all, fields(api.name = "deleteContact"))]
pub async fn remove(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Error> {
    service
        .execute(command::DeleteContact { id: id.into() })
        .await
        .map_err(AsError::into_error)
        .map(|()| StatusCode::NO_CONTENT)
}

define_error! {
    enum LookupError {
        #[code = "CONTACT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Contact` with the provided ID does not exist"]
        NotFound,
    }
}

impl AsError for command::create_contact::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_contact::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists(_) => Some(LookupError::NotFound.into()),
        }
    }
}

impl AsError for command::delete_contact::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists(_) => Some(LookupError::NotFound.into()),
        }
    }
}
