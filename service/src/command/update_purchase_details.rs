//! [`Command`] for updating an existing [`PurchaseDetails`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    Date, Money, Patch,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{purchase, PurchaseDetails},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`PurchaseDetails`].
///
/// [`Option`] fields keep their current value when [`None`]; [`Patch`]
/// fields follow the partial-merge contract (absent keeps, `null` clears,
/// value replaces).
#[derive(Clone, Debug)]
pub struct UpdatePurchaseDetails {
    /// ID of the [`PurchaseDetails`] to update.
    pub id: purchase::Id,

    /// New closing [`Date`] of the purchase.
    pub closing_date: Patch<Date>,

    /// New purchase price.
    pub purchase_price: Option<Money>,

    /// New closing costs.
    pub closing_costs: Option<Money>,

    /// New earnest money deposit.
    pub earnest_money: Option<Money>,

    /// New down payment.
    pub down_payment: Option<Money>,

    /// New [`Financing`] of the purchase.
    ///
    /// [`Financing`]: purchase::Financing
    pub financing: Patch<purchase::Financing>,

    /// New [`Acquisition`] of the purchase.
    ///
    /// [`Acquisition`]: purchase::Acquisition
    pub acquisition: Option<purchase::Acquisition>,

    /// New buying [`Party`] of the purchase.
    ///
    /// [`Party`]: purchase::Party
    pub buyer: Option<purchase::Party>,

    /// New selling [`Party`] of the purchase.
    ///
    /// [`Party`]: purchase::Party
    pub seller: Option<purchase::Party>,

    /// New [`Notes`] on the purchase.
    ///
    /// [`Notes`]: purchase::Notes
    pub notes: Option<purchase::Notes>,
}

impl<Db> Command<UpdatePurchaseDetails> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<PurchaseDetails>, purchase::Id>>,
            Ok = Option<PurchaseDetails>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<PurchaseDetails, purchase::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Update<PurchaseDetails>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = PurchaseDetails;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdatePurchaseDetails,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdatePurchaseDetails {
            id,
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
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `PurchaseDetails`.
        tx.execute(Lock(By::<PurchaseDetails, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut details = tx
            .execute(Select(By::<Option<PurchaseDetails>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotExists(id))
            .map_err(tracerr::wrap!())?;

        closing_date.apply_to(&mut details.closing_date);
        if let Some(price) = purchase_price {
            details.purchase_price = price;
        }
        if let Some(costs) = closing_costs {
            details.closing_costs = costs;
        }
        if let Some(money) = earnest_money {
            details.earnest_money = money;
        }
        if let Some(payment) = down_payment {
            details.down_payment = payment;
        }
        financing.apply_to(&mut details.financing);
        if let Some(acquisition) = acquisition {
            details.acquisition = acquisition;
        }
        if let Some(buyer) = buyer {
            details.buyer = buyer;
        }
        if let Some(seller) = seller {
            details.seller = seller;
        }
        if let Some(notes) = notes {
            details.notes = notes;
        }

        tx.execute(Update(details.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(details)
    }
}

/// Error of [`UpdatePurchaseDetails`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`PurchaseDetails`] doesn't exist.
    #[display("`PurchaseDetails(id: {_0})` does not exist")]
    #[from(ignore)]
    NotExists(#[error(not(source))] purchase::Id),
}
