//! [`RentEntry`]-related read definitions.

use crate::domain::{property, rent};
#[cfg(doc)]
use crate::domain::RentEntry;

/// Selector of the [`RentEntry`] list of a property.
#[derive(Clone, Copy, Debug)]
pub struct Selector {
    /// ID of the property the entries belong to.
    pub property_id: property::Id,

    /// [`rent::Year`] to narrow the list to, if any.
    pub year: Option<rent::Year>,
}
