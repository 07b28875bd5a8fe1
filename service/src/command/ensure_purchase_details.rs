//! [`Command`] ensuring a [`PurchaseDetails`] row exists for a [`Property`].

use common::operations::{
    By, Commit, Insert, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{property, Property, PurchaseDetails},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] ensuring a [`PurchaseDetails`] row exists for a [`Property`].
///
/// This is the auto-creation-on-first-view reconciliation: the first
/// execution seeds a row from the [`Property`]'s creation date, every
/// following one returns the existing row untouched. Concurrent executions
/// for the same [`Property`] are serialized on a creation lock, so exactly
/// one row ever comes to exist.
#[derive(Clone, Copy, Debug)]
pub struct EnsurePurchaseDetails {
    /// ID of the [`Property`] to ensure the [`PurchaseDetails`] of.
    pub property_id: property::Id,
}

/// Result of an [`EnsurePurchaseDetails`] [`Command`] execution.
#[derive(Clone, Debug)]
pub struct Outcome {
    /// The ensured [`PurchaseDetails`].
    pub details: PurchaseDetails,

    /// Indicator whether the [`PurchaseDetails`] row was created by this
    /// very execution.
    pub created: bool,
}

impl<Db> Command<EnsurePurchaseDetails> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<PurchaseDetails>, property::Id>>,
            Ok = Option<PurchaseDetails>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<PurchaseDetails, property::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Insert<PurchaseDetails>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Outcome;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: EnsurePurchaseDetails,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let EnsurePurchaseDetails { property_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent creation of the same `PurchaseDetails`.
        tx.execute(Lock(By::<PurchaseDetails, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<PurchaseDetails>, _>::new(
                property_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if let Some(details) = existing {
            // `PurchaseDetails` already exist for this `Property`.
            return Ok(Outcome {
                details,
                created: false,
            });
        }

        let property = tx
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        let details = PurchaseDetails::seeded(&property);

        tx.execute(Insert(details.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Outcome {
            details,
            created: true,
        })
    }
}

/// Error of [`EnsurePurchaseDetails`] [`Command`] execution.
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
