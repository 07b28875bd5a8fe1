//! [`Command`] for updating an existing [`Property`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{property, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Property`].
///
/// Every [`None`] field keeps its current value.
#[derive(Clone, Debug)]
pub struct UpdateProperty {
    /// ID of the [`Property`] to update.
    pub id: property::Id,

    /// New [`Name`] of the [`Property`].
    ///
    /// [`Name`]: property::Name
    pub name: Option<property::Name>,

    /// New [`Address`] of the [`Property`].
    ///
    /// [`Address`]: property::Address
    pub address: Option<property::Address>,

    /// New [`Owner`] of the [`Property`].
    ///
    /// [`Owner`]: property::Owner
    pub owner: Option<property::Owner>,

    /// New [`Kind`] of the [`Property`].
    ///
    /// [`Kind`]: property::Kind
    pub kind: Option<property::Kind>,

    /// New [`Status`] of the [`Property`].
    ///
    /// [`Status`]: property::Status
    pub status: Option<property::Status>,
}

impl<Db> Command<UpdateProperty> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Property, property::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Property>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProperty {
            id,
            name,
            address,
            owner,
            kind,
            status,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Property`.
        tx.execute(Lock(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut property = tx
            .execute(Select(By::<Option<Property>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotExists(id))
            .map_err(tracerr::wrap!())?;

        if let Some(name) = name {
            property.name = name;
        }
        if let Some(address) = address {
            property.address = address;
        }
        if let Some(owner) = owner {
            property.owner = owner;
        }
        if let Some(kind) = kind {
            property.kind = kind;
        }
        if let Some(status) = status {
            property.status = status;
        }

        tx.execute(Update(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(property)
    }
}

/// Error of [`UpdateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    NotExists(#[error(not(source))] property::Id),
}
