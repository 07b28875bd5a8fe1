//! [`Query`] collection related to [`Loan`]s.

use common::operations::By;

use crate::domain::{loan, property, purchase, Loan};
#[cfg(doc)]
use crate::{
    domain::{Property, PurchaseDetails},
    Query,
};

use super::DatabaseQuery;

/// Queries all [`Loan`]s of a [`Property`].
pub type ByProperty = DatabaseQuery<By<Vec<Loan>, property::Id>>;

/// Queries a [`Loan`] by its [`loan::Number`].
pub type ByNumber = DatabaseQuery<By<Option<Loan>, loan::Number>>;

/// Queries a [`Loan`] by the ([`property::Id`], [`purchase::Id`]) pair it
/// finances.
pub type ByPropertyPurchase =
    DatabaseQuery<By<Option<Loan>, (property::Id, purchase::Id)>>;
