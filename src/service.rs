use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{
    account::{Account, AccountError, AccountId},
    command::{TransferCommand, TransferCommandError},
    store::{AccountStore, StoreError, StoreScope},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("Account {account_id} does not exist")]
    AccountNotFound { account_id: AccountId },
    #[error(
        "Insufficient funds in account {account_id}: requested {requested}, available {available}"
    )]
    InsufficientFunds {
        account_id: AccountId,
        requested: Decimal,
        available: Decimal,
    },
    #[error("Crediting {amount} would overflow the balance of account {account_id}")]
    BalanceOverflow {
        account_id: AccountId,
        amount: Decimal,
    },
    #[error(transparent)]
    InvalidTransfer(#[from] TransferCommandError),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for TransferError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AccountNotFound { account_id } => Self::AccountNotFound { account_id },
            err => Self::Store(err),
        }
    }
}

impl TransferError {
    fn from_account(account_id: AccountId, err: AccountError) -> Self {
        match err {
            AccountError::InsufficientFunds {
                requested,
                available,
            } => Self::InsufficientFunds {
                account_id,
                requested,
                available,
            },
            AccountError::BalanceOverflow { amount, .. } => {
                Self::BalanceOverflow { account_id, amount }
            }
        }
    }

    /// Domain failures are deterministic; retrying them yields the same result.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

pub struct TransferService<S> {
    store: S,
}

impl<S> TransferService<S>
where
    S: AccountStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn balance_for_customer(&self, account_id: AccountId) -> Result<Decimal, TransferError> {
        let mut scope = self.store.begin_transaction()?;
        let balance = scope.get_balance(account_id)?;
        scope.rollback();
        Ok(balance)
    }

    /// Moves `amount` from one account to another in a single store scope.
    /// Either both balances change or neither does.
    pub fn transfer_funds(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        let command = TransferCommand::parse_command(from, to, amount)?;
        let mut scope = self.store.begin_transaction()?;

        let result = stage_transfer(&mut scope, &command);
        match result {
            Ok(()) => {
                scope.commit()?;
                debug!(from, to, %amount, "transfer committed");
                Ok(())
            }
            Err(err) => {
                scope.rollback();
                debug!(from, to, %amount, %err, "transfer aborted");
                Err(err)
            }
        }
    }
}

fn stage_transfer(
    scope: &mut impl StoreScope,
    command: &TransferCommand,
) -> Result<(), TransferError> {
    let from = Account::new(command.from, scope.get_balance(command.from)?);
    let new_from_balance = from
        .withdraw(command.amount)
        .map_err(|err| TransferError::from_account(from.id, err))?;
    // credited account must be resolved before anything is written
    let to = Account::new(command.to, scope.get_balance(command.to)?);
    let new_to_balance = to
        .deposit(command.amount)
        .map_err(|err| TransferError::from_account(to.id, err))?;

    scope.set_balance(from.id, new_from_balance)?;
    scope.set_balance(to.id, new_to_balance)?;
    Ok(())
}
