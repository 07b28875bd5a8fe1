//! [`Query`] collection related to [`Transaction`]s.

use common::operations::By;

use crate::{
    domain::{transaction, Transaction},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Transaction`] by its [`transaction::Id`].
pub type ById = DatabaseQuery<By<Option<Transaction>, transaction::Id>>;

/// Queries the [`Transaction`] ledger, optionally narrowed to a property.
pub type List = DatabaseQuery<By<Vec<Transaction>, read::transaction::Filter>>;
