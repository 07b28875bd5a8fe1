//! [`Transaction`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{transaction, Transaction},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Builds a [`Transaction`] from the provided database `row`.
fn from_row(row: &Row) -> Transaction {
    Transaction {
        id: row.get("id"),
        property_id: row.get("property_id"),
        amount: row.get("amount"),
        date: row.get("date"),
        kind: row.get("kind"),
        notes: row.get("notes"),
    }
}

impl<C> Database<Select<By<Vec<Transaction>, read::transaction::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Transaction>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Transaction>, read::transaction::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::transaction::Filter { property_id } = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = Vec::new();

        let property_idx = property_id.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });

        let sql = format!(
            "SELECT id, property_id, amount, date, kind, notes \
             FROM transactions \
             WHERE true \
                   {property_filtering} \
             ORDER BY date, id",
            property_filtering = property_idx
                .map(|idx| format!("AND property_id = ${idx}::UUID"))
                .unwrap_or_default(),
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Option<Transaction>, transaction::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Transaction>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Transaction>, transaction::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: transaction::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, property_id, amount, date, kind, notes \
            FROM transactions \
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

impl<C> Database<Insert<Transaction>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(transaction): Insert<Transaction>,
    ) -> Result<Self::Ok, Self::Err> {
        let Transaction {
            id,
            property_id,
            amount,
            date,
            kind,
            notes,
        } = transaction;

        const SQL: &str = "\
            INSERT INTO transactions (\
                id, property_id, amount, date, kind, notes \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::NUMERIC, $4::DATE, \
                $5::VARCHAR, $6::VARCHAR \
            )";
        self.exec(SQL, &[&id, &property_id, &amount, &date, &kind, &notes])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Update<Transaction>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(transaction): Update<Transaction>,
    ) -> Result<Self::Ok, Self::Err> {
        let Transaction {
            id,
            property_id: _,
            amount,
            date,
            kind,
            notes,
        } = transaction;

        const SQL: &str = "\
            UPDATE transactions \
            SET amount = $2::NUMERIC, \
                date = $3::DATE, \
                kind = $4::VARCHAR, \
                notes = $5::VARCHAR \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id, &amount, &date, &kind, &notes])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Transaction, transaction::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Transaction, transaction::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: transaction::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM transactions \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Transaction, transaction::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Transaction, transaction::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: transaction::Id = by.into_inner();

        // `DO UPDATE` keeps the lock row held until the transaction ends.
        const SQL: &str = "\
            INSERT INTO transactions_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO UPDATE \
            SET id = EXCLUDED.id";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
