//! [`Command`] for deleting an existing [`Transaction`].

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{transaction, Transaction},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting an existing [`Transaction`].
#[derive(Clone, Copy, Debug)]
pub struct DeleteTransaction {
    /// ID of the [`Transaction`] to delete.
    pub id: transaction::Id,
}

impl<Db> Command<DeleteTransaction> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Transaction>, transaction::Id>>,
            Ok = Option<Transaction>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Transaction, transaction::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Transaction, transaction::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteTransaction,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteTransaction { id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Transaction`.
        tx.execute(Lock(By::<Transaction, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let _ = tx
            .execute(Select(By::<Option<Transaction>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotExists(id))
            .map_err(tracerr::wrap!())?;

        tx.execute(Delete(By::<Transaction, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(())
    }
}

/// Error of [`DeleteTransaction`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Transaction`] doesn't exist.
    #[display("`Transaction(id: {_0})` does not exist")]
    #[from(ignore)]
    NotExists(#[error(not(source))] transaction::Id),
}
