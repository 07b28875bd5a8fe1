//! [`PurchaseDetails`]-related [`Database`] implementations.

use common::operations::{By, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{property, purchase, PurchaseDetails},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Builds a [`PurchaseDetails`] from the provided database `row`.
fn from_row(row: &Row) -> PurchaseDetails {
    PurchaseDetails {
        id: row.get("id"),
        property_id: row.get("property_id"),
        closing_date: row.get("closing_date"),
        purchase_price: row.get("purchase_price"),
        closing_costs: row.get("closing_costs"),
        earnest_money: row.get("earnest_money"),
        down_payment: row.get("down_payment"),
        financing: row.get("financing"),
        acquisition: row.get("acquisition"),
        buyer: row.get("buyer"),
        seller: row.get("seller"),
        notes: row.get("notes"),
    }
}

impl<C> Database<Select<By<Option<PurchaseDetails>, property::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<PurchaseDetails>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<PurchaseDetails>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let property_id: property::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, property_id, closing_date, \
                   purchase_price, closing_costs, earnest_money, \
                   down_payment, \
                   financing, acquisition, buyer, seller, notes \
            FROM purchase_details \
            WHERE property_id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&property_id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Option<PurchaseDetails>, purchase::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<PurchaseDetails>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<PurchaseDetails>, purchase::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: purchase::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, property_id, closing_date, \
                   purchase_price, closing_costs, earnest_money, \
                   down_payment, \
                   financing, acquisition, buyer, seller, notes \
            FROM purchase_details \
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

impl<C> Database<Insert<PurchaseDetails>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(details): Insert<PurchaseDetails>,
    ) -> Result<Self::Ok, Self::Err> {
        let PurchaseDetails {
            id,
            property_id,
            closing_date,
            purchase_price,
            closing_costs,
            earnest_money,
            down_payment,
            financing,
            acquisition,
            buyer,
            seller,
            notes,
        } = details;

        const SQL: &str = "\
            INSERT INTO purchase_details (\
                id, property_id, closing_date, \
                purchase_price, closing_costs, earnest_money, down_payment, \
                financing, acquisition, buyer, seller, notes \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::DATE, \
                $4::NUMERIC, $5::NUMERIC, $6::NUMERIC, $7::NUMERIC, \
                $8::INT2, \
                $9::VARCHAR, $10::VARCHAR, $11::VARCHAR, $12::VARCHAR \
            )";
        self.exec(
            SQL,
            &[
                &id,
                &property_id,
                &closing_date,
                &purchase_price,
                &closing_costs,
                &earnest_money,
                &down_payment,
                &financing,
                &acquisition,
                &buyer,
                &seller,
                &notes,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<PurchaseDetails>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(details): Update<PurchaseDetails>,
    ) -> Result<Self::Ok, Self::Err> {
        let PurchaseDetails {
            id,
            property_id: _,
            closing_date,
            purchase_price,
            closing_costs,
            earnest_money,
            down_payment,
            financing,
            acquisition,
            buyer,
            seller,
            notes,
        } = details;

        const SQL: &str = "\
            UPDATE purchase_details \
            SET closing_date = $2::DATE, \
                purchase_price = $3::NUMERIC, \
                closing_costs = $4::NUMERIC, \
                earnest_money = $5::NUMERIC, \
                down_payment = $6::NUMERIC, \
                financing = $7::INT2, \
                acquisition = $8::VARCHAR, \
                buyer = $9::VARCHAR, \
                seller = $10::VARCHAR, \
                notes = $11::VARCHAR \
            WHERE id = $1::UUID";
        self.exec(
            SQL,
            &[
                &id,
                &closing_date,
                &purchase_price,
                &closing_costs,
                &earnest_money,
                &down_payment,
                &financing,
                &acquisition,
                &buyer,
                &seller,
                &notes,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<PurchaseDetails, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<PurchaseDetails, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let property_id: property::Id = by.into_inner();

        // `DO UPDATE` keeps the lock row held until the transaction ends.
        const SQL: &str = "\
            INSERT INTO purchase_details_creation_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (property_id) DO UPDATE \
            SET property_id = EXCLUDED.property_id";
        self.query(SQL, &[&property_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<PurchaseDetails, purchase::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<PurchaseDetails, purchase::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: purchase::Id = by.into_inner();

        // `DO UPDATE` keeps the lock row held until the transaction ends.
        const SQL: &str = "\
            INSERT INTO purchase_details_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO UPDATE \
            SET id = EXCLUDED.id";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
