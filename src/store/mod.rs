use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::AccountId;

pub mod in_memory_store;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Account {account_id} does not exist")]
    AccountNotFound { account_id: AccountId },
    #[error("Account {account_id} already exists")]
    DuplicateAccount { account_id: AccountId },
    #[error("Account {account_id} cannot be opened with negative balance {balance}")]
    NegativeBalance {
        account_id: AccountId,
        balance: Decimal,
    },
    #[error("Account store is unavailable: {0}")]
    Unavailable(String),
}

/// Durable mapping from account id to balance, accessed only through
/// transactional scopes.
pub trait AccountStore {
    type Scope<'s>: StoreScope
    where
        Self: 's;

    /// Acquires an atomic, isolated unit of work. Blocks while another scope
    /// holds the accounts it needs.
    fn begin_transaction(&self) -> Result<Self::Scope<'_>, StoreError>;
}

/// Commit-or-rollback boundary. Dropping a scope without calling
/// [`StoreScope::commit`] discards every write made through it.
pub trait StoreScope {
    fn get_balance(&mut self, account_id: AccountId) -> Result<Decimal, StoreError>;

    /// Stages a new balance. Fails without staging anything if the account
    /// does not exist.
    fn set_balance(&mut self, account_id: AccountId, balance: Decimal) -> Result<(), StoreError>;

    fn commit(self) -> Result<(), StoreError>;

    fn rollback(self);
}
