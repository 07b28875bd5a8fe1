//! [`Command`] for deleting an existing [`Tenant`].

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{tenant, Tenant},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting an existing [`Tenant`].
#[derive(Clone, Debug)]
pub struct DeleteTenant {
    /// Natural [`tenant::Key`] of the [`Tenant`] to delete.
    pub key: tenant::Key,
}

impl<Db> Command<DeleteTenant> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Tenant>, tenant::Key>>,
            Ok = Option<Tenant>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Tenant, tenant::Key>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Tenant, tenant::Key>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteTenant,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteTenant { key } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Tenant`.
        tx.execute(Lock(By::<Tenant, _>::new(key.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let _ = tx
            .execute(Select(By::<Option<Tenant>, _>::new(key.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotExists)
            .map_err(tracerr::wrap!())?;

        tx.execute(Delete(By::<Tenant, _>::new(key)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(())
    }
}

/// Error of [`DeleteTenant`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Tenant`] doesn't exist.
    #[display("`Tenant` does not exist")]
    NotExists,
}
