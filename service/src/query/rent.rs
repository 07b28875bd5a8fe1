//! [`Query`] collection related to [`RentEntry`]s.

use common::operations::By;

use crate::{
    domain::{rent, RentEntry},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`RentEntry`] by its natural [`rent::Key`].
pub type ByKey = DatabaseQuery<By<Option<RentEntry>, rent::Key>>;

/// Queries the [`RentEntry`] list of a property, optionally narrowed to a
/// year.
pub type List = DatabaseQuery<By<Vec<RentEntry>, read::rent::Selector>>;
