//! [`Command`] for creating a new [`Property`].

use common::{operations::Insert, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{property, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Property`].
#[derive(Clone, Debug)]
pub struct CreateProperty {
    /// [`Name`] of a new [`Property`].
    ///
    /// [`Name`]: property::Name
    pub name: property::Name,

    /// [`Address`] of a new [`Property`].
    ///
    /// [`Address`]: property::Address
    pub address: property::Address,

    /// [`Owner`] of a new [`Property`].
    ///
    /// [`Owner`]: property::Owner
    pub owner: property::Owner,

    /// [`Kind`] of a new [`Property`].
    ///
    /// [`Kind`]: property::Kind
    pub kind: Option<property::Kind>,

    /// [`Status`] of a new [`Property`].
    ///
    /// [`Status`]: property::Status
    pub status: Option<property::Status>,
}

impl<Db> Command<CreateProperty> for Service<Db>
where
    Db: Database<Insert<Property>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateProperty {
            name,
            address,
            owner,
            kind,
            status,
        } = cmd;

        let property = Property {
            id: property::Id::new(),
            name,
            address,
            owner,
            kind: kind.unwrap_or_default(),
            status: status.unwrap_or_default(),
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;

        Ok(property)
    }
}

/// Error of [`CreateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
