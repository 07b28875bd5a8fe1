//! [`Command`] for updating an existing [`Loan`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    Date, Money, Patch, Percent,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{loan, property, purchase, Loan},
    infra::{database, Database},
    Service,
};

use super::Command;

/// Selector of the [`Loan`] to update.
#[derive(Clone, Debug)]
pub enum Selector {
    /// By the user-assigned [`loan::Number`].
    ByNumber(loan::Number),

    /// By the financed ([`property::Id`], [`purchase::Id`]) pair.
    ByPropertyPurchase(property::Id, purchase::Id),
}

/// [`Command`] for updating an existing [`Loan`].
///
/// [`Option`] fields keep their current value when [`None`]; [`Patch`]
/// fields follow the partial-merge contract (absent keeps, `null` clears,
/// value replaces).
#[derive(Clone, Debug)]
pub struct UpdateLoan {
    /// [`Selector`] of the [`Loan`] to update.
    pub selector: Selector,

    /// New principal amount of the [`Loan`].
    pub loan_amount: Option<Money>,

    /// New [`Lender`] of the [`Loan`].
    ///
    /// [`Lender`]: loan::Lender
    pub lender: Option<loan::Lender>,

    /// New yearly interest rate of the [`Loan`].
    pub interest_rate: Option<Percent>,

    /// New term of the [`Loan`], in months.
    pub loan_term: Option<loan::TermMonths>,

    /// New start [`Date`] of the [`Loan`].
    pub loan_start: Patch<Date>,

    /// New end [`Date`] of the [`Loan`].
    pub loan_end: Patch<Date>,

    /// New amortization period of the [`Loan`], in months.
    pub amortization_period: Option<loan::TermMonths>,

    /// New monthly payment of the [`Loan`].
    pub monthly_payment: Option<Money>,

    /// New [`Kind`] of the [`Loan`].
    ///
    /// [`Kind`]: loan::Kind
    pub kind: Option<loan::Kind>,

    /// New balloon payment indicator of the [`Loan`].
    pub balloon_payment: Option<bool>,

    /// New prepayment penalty indicator of the [`Loan`].
    pub prepayment_penalty: Option<bool>,

    /// New refinanced indicator of the [`Loan`].
    pub refinanced: Option<bool>,

    /// New [`Status`] of the [`Loan`].
    ///
    /// [`Status`]: loan::Status
    pub status: Option<loan::Status>,

    /// New [`Notes`] on the [`Loan`].
    ///
    /// [`Notes`]: loan::Notes
    pub notes: Option<loan::Notes>,
}

impl<Db> Command<UpdateLoan> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Loan>, loan::Number>>,
            Ok = Option<Loan>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Loan>, (property::Id, purchase::Id)>>,
            Ok = Option<Loan>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Loan, loan::Number>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Loan, (property::Id, purchase::Id)>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Loan>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Loan;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateLoan) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateLoan {
            selector,
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
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Loan`.
        let existing = match selector {
            Selector::ByNumber(id) => {
                tx.execute(Lock(By::<Loan, _>::new(id.clone())))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(drop)?;
                tx.execute(Select(By::<Option<Loan>, _>::new(id)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
            }
            Selector::ByPropertyPurchase(property_id, purchase_id) => {
                tx.execute(Lock(By::<Loan, _>::new((
                    property_id,
                    purchase_id,
                ))))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
                tx.execute(Select(By::<Option<Loan>, _>::new((
                    property_id,
                    purchase_id,
                ))))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
            }
        };
        let mut loan = existing.ok_or(E::NotExists).map_err(tracerr::wrap!())?;

        if let Some(amount) = loan_amount {
            loan.loan_amount = amount;
        }
        if let Some(lender) = lender {
            loan.lender = lender;
        }
        if let Some(rate) = interest_rate {
            loan.interest_rate = rate;
        }
        if let Some(term) = loan_term {
            loan.loan_term = term;
        }
        loan_start.apply_to(&mut loan.loan_start);
        loan_end.apply_to(&mut loan.loan_end);
        if let Some(period) = amortization_period {
            loan.amortization_period = period;
        }
        if let Some(payment) = monthly_payment {
            loan.monthly_payment = payment;
        }
        if let Some(kind) = kind {
            loan.kind = kind;
        }
        if let Some(balloon) = balloon_payment {
            loan.balloon_payment = balloon;
        }
        if let Some(penalty) = prepayment_penalty {
            loan.prepayment_penalty = penalty;
        }
        if let Some(refinanced) = refinanced {
            loan.refinanced = refinanced;
        }
        if let Some(status) = status {
            loan.status = status;
        }
        if let Some(notes) = notes {
            loan.notes = notes;
        }

        tx.execute(Update(loan.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(loan)
    }
}

/// Error of [`UpdateLoan`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Loan`] doesn't exist.
    #[display("`Loan` does not exist")]
    NotExists,
}
