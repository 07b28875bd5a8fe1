//! [`Command`] for deleting an existing [`Contact`].

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{contact, Contact},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting an existing [`Contact`].
#[derive(Clone, Copy, Debug)]
pub struct DeleteContact {
    /// ID of the [`Contact`] to delete.
    pub id: contact::Id,
}

impl<Db> Command<DeleteContact> for Service<Db>
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
        > + Database<
            Delete<By<Contact, contact::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteContact,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteContact { id } = cmd;

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

        let _ = tx
            .execute(Select(By::<Option<Contact>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotExists(id))
            .map_err(tracerr::wrap!())?;

        tx.execute(Delete(By::<Contact, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(())
    }
}

/// Error of [`DeleteContact`] [`Command`] execution.
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
