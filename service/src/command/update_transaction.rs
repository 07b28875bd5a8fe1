//! [`Command`] for updating an existing [`Transaction`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    Date, Money, Patch,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{transaction, Transaction},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Transaction`].
///
/// [`Option`] fields keep their current value when [`None`]; [`Patch`]
/// fields follow the partial-merge contract (absent keeps, `null` clears,
/// value replaces).
#[derive(Clone, Debug)]
pub struct UpdateTransaction {
    /// ID of the [`Transaction`] to update.
    pub id: transaction::Id,

    /// New amount of the [`Transaction`].
    pub amount: Option<Money>,

    /// New [`Date`] of the [`Transaction`].
    pub date: Option<Date>,

    /// New [`Kind`] of the [`Transaction`].
    ///
    /// [`Kind`]: transaction::Kind
    pub kind: Option<transaction::Kind>,

    /// New [`Notes`] on the [`Transaction`].
    ///
    /// [`Notes`]: transaction::Notes
    pub notes: Patch<transaction::Notes>,
}

impl<Db> Command<UpdateTransaction> for Service<Db>
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
            Update<Transaction>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Transaction;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateTransaction,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateTransaction {
            id,
            amount,
            date,
            kind,
            notes,
        } = cmd;

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

        let mut transaction = tx
            .execute(Select(By::<Option<Transaction>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotExists(id))
            .map_err(tracerr::wrap!())?;

        if let Some(amount) = amount {
            transaction.amount = amount;
        }
        if let Some(date) = date {
            transaction.date = date;
        }
        if let Some(kind) = kind {
            transaction.kind = kind;
        }
        notes.apply_to(&mut transaction.notes);

        tx.execute(Update(transaction.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(transaction)
    }
}

/// Error of [`UpdateTransaction`] [`Command`] execution.
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
