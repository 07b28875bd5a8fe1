//! [`Command`] definition.

pub mod create_contact;
pub mod create_loan;
pub mod create_property;
pub mod delete_contact;
pub mod delete_property;
pub mod delete_tenant;
pub mod delete_transaction;
pub mod ensure_purchase_details;
pub mod log_rent;
pub mod record_transaction;
pub mod update_contact;
pub mod update_loan;
pub mod update_property;
pub mod update_purchase_details;
pub mod update_transaction;
pub mod upsert_tenant;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_contact::CreateContact, create_loan::CreateLoan,
    create_property::CreateProperty, delete_contact::DeleteContact,
    delete_property::DeleteProperty, delete_tenant::DeleteTenant,
    delete_transaction::DeleteTransaction,
    ensure_purchase_details::EnsurePurchaseDetails, log_rent::LogRent,
    record_transaction::RecordTransaction, update_contact::UpdateContact,
    update_loan::UpdateLoan, update_property::UpdateProperty,
    update_purchase_details::UpdatePurchaseDetails,
    update_transaction::UpdateTransaction, upsert_tenant::UpsertTenant,
};
