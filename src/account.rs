use rust_decimal::Decimal;
use thiserror::Error;

pub type AccountId = u32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("Balance overflow: {balance} + {amount}")]
    BalanceOverflow { balance: Decimal, amount: Decimal },
}

/// Snapshot of a single account balance, as read inside a store scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub balance: Decimal,
}

impl Account {
    pub fn new(id: AccountId, balance: Decimal) -> Self {
        Self { id, balance }
    }

    /// Returns the balance left after taking `amount` out.
    pub fn withdraw(&self, amount: Decimal) -> Result<Decimal, AccountError> {
        let remaining = self.balance - amount;
        if remaining < Decimal::ZERO {
            return Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        Ok(remaining)
    }

    pub fn deposit(&self, amount: Decimal) -> Result<Decimal, AccountError> {
        self.balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow {
                balance: self.balance,
                amount,
            })
    }
}
