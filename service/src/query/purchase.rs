//! [`Query`] collection related to [`PurchaseDetails`].

use common::operations::By;

use crate::domain::{property, purchase, PurchaseDetails};
#[cfg(doc)]
use crate::{domain::Property, Query};

use super::DatabaseQuery;

/// Queries the [`PurchaseDetails`] of a [`Property`].
pub type ByProperty = DatabaseQuery<By<Option<PurchaseDetails>, property::Id>>;

/// Queries a [`PurchaseDetails`] by its [`purchase::Id`].
pub type ById = DatabaseQuery<By<Option<PurchaseDetails>, purchase::Id>>;
