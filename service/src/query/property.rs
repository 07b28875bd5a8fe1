//! [`Query`] collection related to [`Property`]s.

use common::operations::By;

use crate::domain::{property, Property};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Property`] by its [`property::Id`].
pub type ById = DatabaseQuery<By<Option<Property>, property::Id>>;

/// Queries all [`Property`]s of the portfolio.
pub type All = DatabaseQuery<By<Vec<Property>, ()>>;
