//! [`Tenant`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{property, tenant, Tenant},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Builds a [`Tenant`] from the provided database `row`.
fn from_row(row: &Row) -> Tenant {
    Tenant {
        property_id: row.get("property_id"),
        name: row.get("name"),
        status: row.get("status"),
        lease_start: row.get("lease_start"),
        lease_end: row.get("lease_end"),
        rent_amount: row.get("rent_amount"),
    }
}

impl<C> Database<Select<By<Vec<Tenant>, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Tenant>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Tenant>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let property_id: property::Id = by.into_inner();

        const SQL: &str = "\
            SELECT property_id, name, status, \
                   lease_start, lease_end, rent_amount \
            FROM tenants \
            WHERE property_id = $1::UUID \
            ORDER BY name";
        Ok(self
            .query(SQL, &[&property_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Option<Tenant>, tenant::Key>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Tenant>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Tenant>, tenant::Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let tenant::Key { property_id, name } = by.into_inner();

        const SQL: &str = "\
            SELECT property_id, name, status, \
                   lease_start, lease_end, rent_amount \
            FROM tenants \
            WHERE property_id = $1::UUID \
              AND name = $2::VARCHAR \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&property_id, &name])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Insert<Tenant>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(tenant): Insert<Tenant>,
    ) -> Result<Self::Ok, Self::Err> {
        let Tenant {
            property_id,
            name,
            status,
            lease_start,
            lease_end,
            rent_amount,
        } = tenant;

        const SQL: &str = "\
            INSERT INTO tenants (\
                property_id, name, status, \
                lease_start, lease_end, rent_amount \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::INT2, \
                $4::DATE, $5::DATE, $6::NUMERIC \
            )";
        self.exec(
            SQL,
            &[
                &property_id,
                &name,
                &status,
                &lease_start,
                &lease_end,
                &rent_amount,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<Tenant>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(tenant): Update<Tenant>,
    ) -> Result<Self::Ok, Self::Err> {
        let Tenant {
            property_id,
            name,
            status,
            lease_start,
            lease_end,
            rent_amount,
        } = tenant;

        const SQL: &str = "\
            UPDATE tenants \
            SET status = $3::INT2, \
                lease_start = $4::DATE, \
                lease_end = $5::DATE, \
                rent_amount = $6::NUMERIC \
            WHERE property_id = $1::UUID \
              AND name = $2::VARCHAR";
        self.exec(
            SQL,
            &[
                &property_id,
                &name,
                &status,
                &lease_start,
                &lease_end,
                &rent_amount,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Tenant, tenant::Key>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Tenant, tenant::Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let tenant::Key { property_id, name } = by.into_inner();

        const SQL: &str = "\
            DELETE FROM tenants \
            WHERE property_id = $1::UUID \
              AND name = $2::VARCHAR";
        self.exec(SQL, &[&property_id, &name])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Tenant, tenant::Key>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Tenant, tenant::Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let tenant::Key { property_id, name } = by.into_inner();

        // `DO UPDATE` keeps the lock row held until the transaction ends.
        const SQL: &str = "\
            INSERT INTO tenants_lock \
            VALUES ($1::UUID, $2::VARCHAR) \
            ON CONFLICT (property_id, name) DO UPDATE \
            SET property_id = EXCLUDED.property_id";
        self.query(SQL, &[&property_id, &name])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
