//! Domain definitions.

pub mod contact;
pub mod loan;
pub mod property;
pub mod purchase;
pub mod rent;
pub mod tenant;
pub mod transaction;

pub use self::{
    contact::Contact, loan::Loan, property::Property,
    purchase::PurchaseDetails, rent::RentEntry, tenant::Tenant,
    transaction::Transaction,
};
