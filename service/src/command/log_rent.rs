//! [`Command`] upserting a [`RentEntry`] by its natural key.

use common::{
    operations::{
        By, Commit, Insert, Lock, Select, Transact, Transacted, Update,
    },
    Date, Money, Patch,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{property, rent, Property, RentEntry},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] upserting a [`RentEntry`] by its natural [`rent::Key`].
///
/// When an entry already exists for the key, the defined fields of this
/// [`Command`] are merged onto it (absent fields keep, `null` clears, a
/// value replaces); otherwise a full entry is created with defaults
/// substituted for the omitted fields. Concurrent executions for the same
/// key are serialized on a lock, so at most one row exists per key.
#[derive(Clone, Debug)]
pub struct LogRent {
    /// Natural [`rent::Key`] of the [`RentEntry`] to upsert.
    pub key: rent::Key,

    /// Rent amount collected.
    ///
    /// Defaults to zero on first write.
    pub rent_amount: Option<Money>,

    /// [`Date`] the rent was deposited.
    ///
    /// Defaults to today on first write when omitted.
    pub date_deposited: Patch<Date>,

    /// [`CheckNumber`] of the rent check.
    ///
    /// [`CheckNumber`]: rent::CheckNumber
    pub check_number: Patch<rent::CheckNumber>,

    /// [`Notes`] on the entry.
    ///
    /// [`Notes`]: rent::Notes
    pub notes: Patch<rent::Notes>,
}

impl<Db> Command<LogRent> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<RentEntry>, rent::Key>>,
            Ok = Option<RentEntry>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<RentEntry, rent::Key>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Insert<RentEntry>, Ok = (), Err = Traced<database::Error>>
        + Database<Update<RentEntry>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = RentEntry;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: LogRent) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let LogRent {
            key,
            rent_amount,
            date_deposited,
            check_number,
            notes,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent writes upon the same natural key.
        tx.execute(Lock(By::<RentEntry, _>::new(key)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<RentEntry>, _>::new(key)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let entry = if let Some(mut entry) = existing {
            if let Some(amount) = rent_amount {
                entry.rent_amount = amount;
            }
            date_deposited.apply_to(&mut entry.date_deposited);
            check_number.apply_to(&mut entry.check_number);
            notes.apply_to(&mut entry.notes);

            tx.execute(Update(entry.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            entry
        } else {
            let _ = tx
                .execute(Select(By::<Option<Property>, _>::new(
                    key.property_id,
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::PropertyNotExists(key.property_id))
                .map_err(tracerr::wrap!())?;

            let entry = RentEntry {
                property_id: key.property_id,
                month: key.month,
                year: key.year,
                rent_amount: rent_amount.unwrap_or(Money::ZERO),
                date_deposited: match date_deposited {
                    Patch::Omitted => Some(Date::today()),
                    Patch::Null => None,
                    Patch::Value(date) => Some(date),
                },
                check_number: check_number.into_option(),
                notes: notes.into_option(),
            };

            tx.execute(Insert(entry.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            entry
        };

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(entry)
    }
}

/// Error of [`LogRent`] [`Command`] execution.
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
