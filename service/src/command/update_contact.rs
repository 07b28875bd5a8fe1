//! [`Command`] for updating an existing [`Contact`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    Patch,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{contact, Contact},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Contact`].
///
/// [`Option`] fields keep their current value when [`None`]; [`Patch`]
/// fields follow the partial-merge contract (absent keeps, `null` clears,
/// value replaces).
#[derive(Clone, Debug)]
pub struct UpdateContact {
    /// ID of the [`Contact`] to update.
    pub id: contact::Id,

    /// New [`Name`] of the [`Contact`].
    ///
    /// [`Name`]: contact::Name
    pub name: Option<contact::Name>,

    /// New [`Phone`] of the [`Contact`].
    ///
    /// [`Phone`]: contact::Phone
    pub phone: Patch<contact::Phone>,

    /// New [`Email`] of the [`Contact`].
    ///
    /// [`Email`]: contact::Email
    pub email: Patch<contact::Email>,

    /// New [`Kind`] of the [`Contact`].
    ///
    /// [`Kind`]: contact::Kind
    pub kind: Option<contact::Kind>,

    /// New [`Notes`] on the [`Contact`].
    ///
    /// [`Notes`]: contact::Notes
    pub notes: Patch<contact::Notes>,
}

impl<Db> Command<UpdateContact> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Contact>, contact::Id>>,
            Ok = Option<Contact>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Contact, contact::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Contact>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Contact;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateContact,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateContact {
            id,
            name,
            phone,
            email,
            kind,
            notes,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Contact`.
        tx.execute(Lock(By::<Contact, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut contact = tx
            .execute(Select(By::<Option<Contact>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotExists(id))
            .map_err(tracerr::wrap!())?;

        if let Some(name) = name {
            contact.name = name;
        }
        phone.apply_to(&mut contact.phone);
        email.apply_to(&mut contact.email);
        if let Some(kind) = kind {
            contact.kind = kind;
        }
        notes.apply_to(&mut contact.notes);

        tx.execute(Update(contact.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(contact)
    }
}

/// Error of [`UpdateContact`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Contact`] doesn't exist.
    #[display("`Contact(id: {_0})` does not exist")]
    #[from(ignore)]
    NotExists(#[error(not(source))] contact::Id),
}
