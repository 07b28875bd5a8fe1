//! [`Query`] collection related to [`Tenant`]s.

use common::operations::By;

use crate::domain::{property, tenant, Tenant};
#[cfg(doc)]
use crate::{domain::Property, Query};

use super::DatabaseQuery;

/// Queries all [`Tenant`]s of a [`Property`].
pub type ByProperty = DatabaseQuery<By<Vec<Tenant>, property::Id>>;

/// Queries a [`Tenant`] by its natural [`tenant::Key`].
pub type ByKey = DatabaseQuery<By<Option<Tenant>, tenant::Key>>;
