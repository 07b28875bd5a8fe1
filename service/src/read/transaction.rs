//! [`Transaction`]-related read definitions.

use crate::domain::property;
#[cfg(doc)]
use crate::domain::Transaction;

/// Filter of the [`Transaction`] ledger list.
#[derive(Clone, Copy, Debug, Default)]
pub struct Filter {
    /// ID of the property to narrow the ledger to, if any.
    pub property_id: Option<property::Id>,
}
