//! [`RentEntry`]-related [`Database`] implementations.

use common::operations::{By, Insert, Lock, Select, Update};
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{rent, RentEntry},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Builds a [`RentEntry`] from the provided database `row`.
fn from_row(row: &Row) -> RentEntry {
    RentEntry {
        property_id: row.get("property_id"),
        month: row.get("month"),
        year: row.get("year"),
        rent_amount: row.get("rent_amount"),
        date_deposited: row.get("date_deposited"),
        check_number: row.get("check_number"),
        notes: row.get("notes"),
    }
}

impl<C> Database<Select<By<Vec<RentEntry>, read::rent::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<RentEntry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<RentEntry>, read::rent::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::rent::Selector { property_id, year } = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&property_id];

        let year_idx = year.as_ref().map(|y| {
            ps.push(y);
            ps.len()
        });

        let sql = format!(
            "SELECT property_id, month, year, rent_amount, \
                    date_deposited, check_number, notes \
             FROM rent_log \
             WHERE property_id = $1::UUID \
                   {year_filtering} \
             ORDER BY year, month",
            year_filtering = year_idx
                .map(|idx| format!("AND year = ${idx}::INT4"))
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

impl<C> Database<Select<By<Option<RentEntry>, rent::Key>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<RentEntry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<RentEntry>, rent::Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let rent::Key {
            property_id,
            month,
            year,
        } = by.into_inner();

        const SQL: &str = "\
            SELECT property_id, month, year, rent_amount, \
                   date_deposited, check_number, notes \
            FROM rent_log \
            WHERE property_id = $1::UUID \
              AND month = $2::INT2 \
              AND year = $3::INT4 \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&property_id, &month, &year])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Insert<RentEntry>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(entry): Insert<RentEntry>,
    ) -> Result<Self::Ok, Self::Err> {
        let RentEntry {
            property_id,
            month,
            year,
            rent_amount,
            date_deposited,
            check_number,
            notes,
        } = entry;

        const SQL: &str = "\
            INSERT INTO rent_log (\
                property_id, month, year, rent_amount, \
                date_deposited, check_number, notes \
            ) VALUES (\
                $1::UUID, $2::INT2, $3::INT4, $4::NUMERIC, \
                $5::DATE, $6::VARCHAR, $7::VARCHAR \
            )";
        self.exec(
            SQL,
            &[
                &property_id,
                &month,
                &year,
                &rent_amount,
                &date_deposited,
                &check_number,
                &notes,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<RentEntry>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(entry): Update<RentEntry>,
    ) -> Result<Self::Ok, Self::Err> {
        let RentEntry {
            property_id,
            month,
            year,
            rent_amount,
            date_deposited,
            check_number,
            notes,
        } = entry;

        const SQL: &str = "\
            UPDATE rent_log \
            SET rent_amount = $4::NUMERIC, \
                date_deposited = $5::DATE, \
                check_number = $6::VARCHAR, \
                notes = $7::VARCHAR \
            WHERE property_id = $1::UUID \
              AND month = $2::INT2 \
              AND year = $3::INT4";
        self.exec(
            SQL,
            &[
                &property_id,
                &month,
                &year,
                &rent_amount,
                &date_deposited,
                &check_number,
                &notes,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<RentEntry, rent::Key>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<RentEntry, rent::Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let rent::Key {
            property_id,
            month,
            year,
        } = by.into_inner();

        // `DO UPDATE` keeps the lock row held until the transaction ends.
        const SQL: &str = "\
            INSERT INTO rent_log_lock \
            VALUES ($1::UUID, $2::INT2, $3::INT4) \
            ON CONFLICT (property_id, month, year) DO UPDATE \
            SET property_id = EXCLUDED.property_id";
        self.query(SQL, &[&property_id, &month, &year])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
