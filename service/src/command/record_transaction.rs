//! [`Command`] appending a [`Transaction`] to the ledger.

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    Date, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{property, transaction, Property, Transaction},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] appending a [`Transaction`] to the ledger of a [`Property`].
///
/// The ledger is append-only: every execution inserts a new row, with no
/// natural-key deduplication.
#[derive(Clone, Debug)]
pub struct RecordTransaction {
    /// ID of the [`Property`] the [`Transaction`] belongs to.
    pub property_id: property::Id,

    /// Amount of the [`Transaction`].
    pub amount: Money,

    /// [`Date`] of the [`Transaction`].
    ///
    /// Defaults to today when omitted.
    pub date: Option<Date>,

    /// [`Kind`] of the [`Transaction`].
    ///
    /// [`Kind`]: transaction::Kind
    pub kind: Option<transaction::Kind>,

    /// [`Notes`] on the [`Transaction`].
    ///
    /// [`Notes`]: transaction::Notes
    pub notes: Option<transaction::Notes>,
}

impl<Db> Command<RecordTransaction> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Insert<Transaction>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Transaction;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RecordTransaction,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RecordTransaction {
            property_id,
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

        let _ = tx
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        let transaction = Transaction {
            id: transaction::Id::new(),
            property_id,
            amount,
            date: date.unwrap_or_else(Date::today),
            kind: kind.unwrap_or_default(),
            notes,
        };

        tx.execute(Insert(transaction.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(transaction)
    }
}

/// Error of [`RecordTransaction`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),
}
