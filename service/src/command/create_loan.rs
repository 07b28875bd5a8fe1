//! [`Command`] for creating a new [`Loan`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    Date, Money, Percent,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{loan, property, purchase, Loan, Property, PurchaseDetails},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Loan`].
///
/// At most one [`Loan`] may exist per ([`property::Id`], [`purchase::Id`])
/// pair: creation is rejected with [`ExecutionError::AlreadyExists`] when
/// one does, and the existing row is left untouched. Every omitted optional
/// field is stored with a defensive default (zero, `false` or an empty
/// string), so no field ever ends up undefined.
#[derive(Clone, Debug)]
pub struct CreateLoan {
    /// User-assigned [`Number`] of a new [`Loan`].
    ///
    /// [`Number`]: loan::Number
    pub id: loan::Number,

    /// ID of the [`Property`] the [`Loan`] finances.
    pub property_id: property::Id,

    /// ID of the [`PurchaseDetails`] the [`Loan`] finances.
    pub purchase_id: purchase::Id,

    /// Principal amount of the [`Loan`].
    pub loan_amount: Option<Money>,

    /// [`Lender`] issuing the [`Loan`].
    ///
    /// [`Lender`]: loan::Lender
    pub lender: Option<loan::Lender>,

    /// Yearly interest rate of the [`Loan`].
    pub interest_rate: Option<Percent>,

    /// Term of the [`Loan`], in months.
    pub loan_term: Option<loan::TermMonths>,

    /// [`Date`] the [`Loan`] starts.
    pub loan_start: Option<Date>,

    /// [`Date`] the [`Loan`] ends.
    pub loan_end: Option<Date>,

    /// Amortization period of the [`Loan`], in months.
    pub amortization_period: Option<loan::TermMonths>,

    /// Monthly payment of the [`Loan`].
    pub monthly_payment: Option<Money>,

    /// [`Kind`] of the [`Loan`].
    ///
    /// [`Kind`]: loan::Kind
    pub kind: Option<loan::Kind>,

    /// Indicator whether the [`Loan`] has a balloon payment.
    pub balloon_payment: Option<bool>,

    /// Indicator whether the [`Loan`] has a prepayment penalty.
    pub prepayment_penalty: Option<bool>,

    /// Indicator whether the [`Loan`] was refinanced.
    pub refinanced: Option<bool>,

    /// [`Status`] of the [`Loan`].
    ///
    /// [`Status`]: loan::Status
    pub status: Option<loan::Status>,

    /// [`Notes`] on the [`Loan`].
    ///
    /// [`Notes`]: loan::Notes
    pub notes: Option<loan::Notes>,
}

impl<Db> Command<CreateLoan> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Loan>, (property::Id, purchase::Id)>>,
            Ok = Option<Loan>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<PurchaseDetails>, purchase::Id>>,
            Ok = Option<PurchaseDetails>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Loan, (property::Id, purchase::Id)>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Insert<Loan>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Loan;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateLoan) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateLoan {
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
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent creation of a `Loan` for the same pair.
        tx.execute(Lock(By::<Loan, _>::new((property_id, purchase_id))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let _ = tx
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;
        let _ = tx
            .execute(Select(By::<Option<PurchaseDetails>, _>::new(
                purchase_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PurchaseNotExists(purchase_id))
            .map_err(tracerr::wrap!())?;

        let existing = tx
            .execute(Select(By::<Option<Loan>, _>::new((
                property_id,
                purchase_id,
            ))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(E::AlreadyExists).map_err(tracerr::wrap!());
        }

        let loan = Loan {
            id,
            property_id,
            purchase_id,
            loan_amount: loan_amount.unwrap_or(Money::ZERO),
            lender: lender.unwrap_or_default(),
            interest_rate: interest_rate.unwrap_or(Percent::ZERO),
            loan_term: loan_term.unwrap_or(0),
            loan_start,
            loan_end,
            amortization_period: amortization_period.unwrap_or(0),
            monthly_payment: monthly_payment.unwrap_or(Money::ZERO),
            kind: kind.unwrap_or_default(),
            balloon_payment: balloon_payment.unwrap_or(false),
            prepayment_penalty: prepayment_penalty.unwrap_or(false),
            refinanced: refinanced.unwrap_or(false),
            status: status.unwrap_or_default(),
            notes: notes.unwrap_or_default(),
        };

        if let Err(e) = tx.execute(Insert(loan.clone())).await {
            // The store-level unique constraint is the final arbiter of the
            // pair uniqueness.
            return if e.as_ref().is_unique_violation(None) {
                Err(E::AlreadyExists).map_err(tracerr::wrap!())
            } else {
                Err(e).map_err(tracerr::map_from_and_wrap!(=> E))
            };
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(loan)
    }
}

/// Error of [`CreateLoan`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// A [`Loan`] for the pair already exists.
    #[display("Loan already exists for this property")]
    AlreadyExists,

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// [`PurchaseDetails`] doesn't exist.
    #[display("`PurchaseDetails(id: {_0})` does not exist")]
    #[from(ignore)]
    PurchaseNotExists(#[error(not(source))] purchase::Id),
}
