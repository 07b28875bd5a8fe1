//! [`Loan`]-related [`Database`] implementations.

use common::operations::{By, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{loan, property, purchase, Loan},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Builds a [`Loan`] from the provided database `row`.
fn from_row(row: &Row) -> Loan {
    Loan {
        id: row.get("id"),
        property_id: row.get("property_id"),
        purchase_id: row.get("purchase_id"),
        loan_amount: row.get("loan_amount"),
        lender: row.get("lender"),
        interest_rate: row.get("interest_rate"),
        loan_term: u16::try_from(row.get::<_, i32>("loan_term"))
            .expect("`loan_term` overflow"),
        loan_start: row.get("loan_start"),
        loan_end: row.get("loan_end"),
        amortization_period: u16::try_from(
            row.get::<_, i32>("amortization_period"),
        )
        .expect("`amortization_period` overflow"),
        monthly_payment: row.get("monthly_payment"),
        kind: row.get("kind"),
        balloon_payment: row.get("balloon_payment"),
        prepayment_penalty: row.get("prepayment_penalty"),
        refinanced: row.get("refinanced"),
        status: row.get("status"),
        notes: row.get("notes"),
    }
}

/// Columns of the `loan_details` table, in insertion order.
const SQL_SELECT: &str = "\
    SELECT id, property_id, purchase_id, \
           loan_amount, lender, interest_rate, \
           loan_term, loan_start, loan_end, amortization_period, \
           monthly_payment, kind, \
           balloon_payment, prepayment_penalty, refinanced, \
           status, notes \
    FROM loan_details";

impl<C> Database<Select<By<Vec<Loan>, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Loan>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Loan>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let property_id: property::Id = by.into_inner();

        let sql = format!(
            "{SQL_SELECT} \
             WHERE property_id = $1::UUID \
             ORDER BY id",
        );
        Ok(self
            .query(&sql, &[&property_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Option<Loan>, loan::Number>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Loan>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Loan>, loan::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: loan::Number = by.into_inner();

        let sql = format!(
            "{SQL_SELECT} \
             WHERE id = $1::VARCHAR \
             LIMIT 1",
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Option<Loan>, (property::Id, purchase::Id)>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Loan>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Loan>, (property::Id, purchase::Id)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (property_id, purchase_id) = by.into_inner();

        let sql = format!(
            "{SQL_SELECT} \
             WHERE property_id = $1::UUID \
               AND purchase_id = $2::UUID \
             LIMIT 1",
        );
        Ok(self
            .query_opt(&sql, &[&property_id, &purchase_id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Insert<Loan>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(loan): Insert<Loan>,
    ) -> Result<Self::Ok, Self::Err> {
        let Loan {
            id,
            property_id,
            purchase_id,
            loan_amount,
            lender,
            interest_rate,
            loan_term,
            loan_start,
            loan_end,
            amortization_period,
            monthly_payment,
            kind,
            balloon_payment,
            prepayment_penalty,
            refinanced,
            status,
            notes,
        } = loan;

        let loan_term = i32::from(loan_term);
        let amortization_period = i32::from(amortization_period);

        // A plain `INSERT`: a unique violation on the
        // `(property_id, purchase_id)` pair (or the loan number itself) is a
        // meaningful conflict signal for the caller.
        const SQL: &str = "\
            INSERT INTO loan_details (\
                id, property_id, purchase_id, \
                loan_amount, lender, interest_rate, \
                loan_term, loan_start, loan_end, amortization_period, \
                monthly_payment, kind, \
                balloon_payment, prepayment_penalty, refinanced, \
                status, notes \
            ) VALUES (\
                $1::VARCHAR, $2::UUID, $3::UUID, \
                $4::NUMERIC, $5::VARCHAR, $6::NUMERIC, \
                $7::INT4, $8::DATE, $9::DATE, $10::INT4, \
                $11::NUMERIC, $12::VARCHAR, \
                $13::BOOL, $14::BOOL, $15::BOOL, \
                $16::VARCHAR, $17::VARCHAR \
            )";
        self.exec(
            SQL,
            &[
                &id,
                &property_id,
                &purchase_id,
                &loan_amount,
                &lender,
                &interest_rate,
                &loan_term,
                &loan_start,
                &loan_end,
                &amortization_period,
                &monthly_payment,
                &kind,
                &balloon_payment,
                &prepayment_penalty,
                &refinanced,
                &status,
                &notes,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<Loan>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(loan): Update<Loan>,
    ) -> Result<Self::Ok, Self::Err> {
        let Loan {
            id,
            property_id: _,
            purchase_id: _,
            loan_amount,
            lender,
            interest_rate,
            loan_term,
            loan_start,
            loan_end,
            amortization_period,
            monthly_payment,
            kind,
            balloon_payment,
            prepayment_penalty,
            refinanced,
            status,
            notes,
        } = loan;

        let loan_term = i32::from(loan_term);
        let amortization_period = i32::from(amortization_period);

        const SQL: &str = "\
            UPDATE loan_details \
            SET loan_amount = $2::NUMERIC, \
                lender = $3::VARCHAR, \
                interest_rate = $4::NUMERIC, \
                loan_term = $5::INT4, \
                loan_start = $6::DATE, \
                loan_end = $7::DATE, \
                amortization_period = $8::INT4, \
                monthly_payment = $9::NUMERIC, \
                kind = $10::VARCHAR, \
                balloon_payment = $11::BOOL, \
                prepayment_penalty = $12::BOOL, \
                refinanced = $13::BOOL, \
                status = $14::VARCHAR, \
                notes = $15::VARCHAR \
            WHERE id = $1::VARCHAR";
        self.exec(
            SQL,
            &[
                &id,
                &loan_amount,
                &lender,
                &interest_rate,
                &loan_term,
                &loan_start,
                &loan_end,
                &amortization_period,
                &monthly_payment,
                &kind,
                &balloon_payment,
                &prepayment_penalty,
                &refinanced,
                &status,
                &notes,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Loan, loan::Number>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Loan, loan::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: loan::Number = by.into_inner();

        // `DO UPDATE` keeps the lock row held until the transaction ends.
        const SQL: &str = "\
            INSERT INTO loan_details_lock \
            VALUES ($1::VARCHAR) \
            ON CONFLICT (id) DO UPDATE \
            SET id = EXCLUDED.id";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Loan, (property::Id, purchase::Id)>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Loan, (property::Id, purchase::Id)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (property_id, purchase_id) = by.into_inner();

        // `DO UPDATE` keeps the lock row held until the transaction ends.
        const SQL: &str = "\
            INSERT INTO loan_details_creation_lock \
            VALUES ($1::UUID, $2::UUID) \
            ON CONFLICT (property_id, purchase_id) DO UPDATE \
            SET property_id = EXCLUDED.property_id";
        self.query(SQL, &[&property_id, &purchase_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
