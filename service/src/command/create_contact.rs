//! [`Command`] for creating a new [`Contact`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{contact, Contact},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Contact`].
///
/// Name uniqueness is a UI-side convention, so no uniqueness is enforced
/// here.
#[derive(Clone, Debug)]
pub struct CreateContact {
    /// [`Name`] of a new [`Contact`].
    ///
    /// [`Name`]: contact::Name
    pub name: contact::Name,

    /// [`Phone`] of a new [`Contact`].
    ///
    /// [`Phone`]: contact::Phone
    pub phone: Option<contact::Phone>,

    /// [`Email`] of a new [`Contact`].
    ///
    /// [`Email`]: contact::Email
    pub email: Option<contact::Email>,

    /// [`Kind`] of a new [`Contact`].
    ///
    /// [`Kind`]: contact::Kind
    pub kind: Option<contact::Kind>,

    /// [`Notes`] on a new [`Contact`].
    ///
    /// [`Notes`]: contact::Notes
    pub notes: Option<contact::Notes>,
}

impl<Db> Command<CreateContact> for Service<Db>
where
    Db: Database<Insert<Contact>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Contact;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateContact,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateContact {
            name,
            phone,
            email,
            kind,
            notes,
        } = cmd;

        let contact = Contact {
            id: contact::Id::new(),
            name,
            phone,
            email,
            kind: kind.unwrap_or_default(),
            notes,
        };

        self.database()
            .execute(Insert(contact.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;

        Ok(contact)
    }
}

/// Error of [`CreateContact`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
