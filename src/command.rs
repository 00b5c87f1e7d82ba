use rust_decimal::{Decimal, prelude::Zero};
use thiserror::Error;

use crate::account::AccountId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransferCommandError {
    #[error("Amount must not be negative, got {amount}")]
    NegativeAmount { amount: Decimal },
    #[error("Cannot transfer from account {account_id} to itself")]
    SameAccount { account_id: AccountId },
}

/// A transfer request that passed shape validation. Balances and account
/// existence are only checked against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferCommand {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Decimal,
}

impl TransferCommand {
    pub fn parse_command(
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<Self, TransferCommandError> {
        if amount < Decimal::zero() {
            return Err(TransferCommandError::NegativeAmount { amount });
        }
        if from == to {
            return Err(TransferCommandError::SameAccount { account_id: from });
        }
        Ok(Self { from, to, amount })
    }
}
