//! [`Command`] upserting a [`Tenant`] by its natural key.

use common::{
    operations::{
        By, Commit, Insert, Lock, Select, Transact, Transacted, Update,
    },
    Date, Money, Patch,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{property, tenant, Property, Tenant},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] upserting a [`Tenant`] by its natural [`tenant::Key`].
///
/// When the [`Tenant`] already exists, the defined fields are merged onto
/// it; otherwise a new row is created with defaults for the omitted fields.
/// The [`tenant::Status`] is never taken from the caller: it is re-derived
/// from the (merged) lease dates on every write.
#[derive(Clone, Debug)]
pub struct UpsertTenant {
    /// Natural [`tenant::Key`] of the [`Tenant`] to upsert.
    pub key: tenant::Key,

    /// [`Date`] the lease starts.
    pub lease_start: Patch<Date>,

    /// [`Date`] the lease ends.
    pub lease_end: Patch<Date>,

    /// Monthly rent amount.
    ///
    /// Defaults to zero on first write.
    pub rent_amount: Option<Money>,
}

impl<Db> Command<UpsertTenant> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Tenant>, tenant::Key>>,
            Ok = Option<Tenant>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Tenant, tenant::Key>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Insert<Tenant>, Ok = (), Err = Traced<database::Error>>
        + Database<Update<Tenant>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Tenant;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpsertTenant,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpsertTenant {
            key,
            lease_start,
            lease_end,
            rent_amount,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent writes upon the same natural key.
        tx.execute(Lock(By::<Tenant, _>::new(key.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<Tenant>, _>::new(key.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let tenant = if let Some(mut tenant) = existing {
            lease_start.apply_to(&mut tenant.lease_start);
            lease_end.apply_to(&mut tenant.lease_end);
            if let Some(amount) = rent_amount {
                tenant.rent_amount = amount;
            }
            tenant.status = tenant::Status::derive(
                tenant.lease_start,
                tenant.lease_end,
                Date::today(),
            );

            tx.execute(Update(tenant.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            tenant
        } else {
            let _ = tx
                .execute(Select(By::<Option<Property>, _>::new(
                    key.property_id,
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::PropertyNotExists(key.property_id))
                .map_err(tracerr::wrap!())?;

            let lease_start = lease_start.into_option();
            let lease_end = lease_end.into_option();
            let tenant = Tenant {
                property_id: key.property_id,
                name: key.name,
                status: tenant::Status::derive(
                    lease_start,
                    lease_end,
                    Date::today(),
                ),
                lease_start,
                lease_end,
                rent_amount: rent_amount.unwrap_or(Money::ZERO),
            };

            tx.execute(Insert(tenant.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            tenant
        };

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(tenant)
    }
}

/// Error of [`UpsertTenant`] [`Command`] execution.
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
