//! [`Contact`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{contact, Contact},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Builds a [`Contact`] from the provided database `row`.
fn from_row(row: &Row) -> Contact {
    Contact {
        id: row.get("id"),
        name: row.get("name"),
        phone: row.get("phone"),
        email: row.get("email"),
        kind: row.get("kind"),
        notes: row.get("notes"),
    }
}

impl<C> Database<Select<By<Vec<Contact>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Contact>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<Contact>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, phone, email, kind, notes \
            FROM contacts \
            ORDER BY name";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Option<Contact>, contact::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Contact>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Contact>, contact::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: contact::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, phone, email, kind, notes \
            FROM contacts \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Insert<Contact>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(contact): Insert<Contact>,
    ) -> Result<Self::Ok, Self::Err> {
        let Contact {
            id,
            name,
            phone,
            email,
            kind,
            notes,
        } = contact;

        const SQL: &str = "\
            INSERT INTO contacts (\
                id, name, phone, email, kind, notes \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::INT2, $6::VARCHAR \
            )";
        self.exec(SQL, &[&id, &name, &phone, &email, &kind, &notes])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Update<Contact>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(contact): Update<Contact>,
    ) -> Result<Self::Ok, Self::Err> {
        let Contact {
            id,
            name,
            phone,
            email,
            kind,
            notes,
        } = contact;

        const SQL: &str = "\
            UPDATE contacts \
            SET name = $2::VARCHAR, \
                phone = $3::VARCHAR, \
                email = $4::VARCHAR, \
                kind = $5::INT2, \
                notes = $6::VARCHAR \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id, &name, &phone, &email, &kind, &notes])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Contact, contact::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Contact, contact::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: contact::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM contacts \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Contact, contact::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Contact, contact::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: contact::Id = by.into_inner();

        // `DO UPDATE` keeps the lock row held until the transaction ends.
        const SQL: &str = "\
            INSERT INTO contacts_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO UPDATE \
            SET id = EXCLUDED.id";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
