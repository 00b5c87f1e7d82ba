use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use rust_decimal::Decimal;

use crate::account::AccountId;

use super::{AccountStore, StoreError, StoreScope};

#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: Mutex<HashMap<AccountId, Decimal>>,
}

impl InMemoryAccountStore {
    pub fn open_account(&self, account_id: AccountId, balance: Decimal) -> Result<(), StoreError> {
        if balance < Decimal::ZERO {
            return Err(StoreError::NegativeBalance {
                account_id,
                balance,
            });
        }
        let mut accounts = self.lock()?;
        if accounts.contains_key(&account_id) {
            return Err(StoreError::DuplicateAccount { account_id });
        }
        accounts.insert(account_id, balance);
        Ok(())
    }

    /// Committed balances ordered by account id.
    pub fn snapshot(&self) -> Result<Vec<(AccountId, Decimal)>, StoreError> {
        let mut balances: Vec<_> = self
            .lock()?
            .iter()
            .map(|(id, balance)| (*id, *balance))
            .collect();
        balances.sort_unstable_by_key(|(id, _)| *id);
        Ok(balances)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<AccountId, Decimal>>, StoreError> {
        self.accounts
            .lock()
            .map_err(|err| StoreError::Unavailable(err.to_string()))
    }
}

impl AccountStore for InMemoryAccountStore {
    type Scope<'s> = InMemoryScope<'s>;

    fn begin_transaction(&self) -> Result<Self::Scope<'_>, StoreError> {
        Ok(InMemoryScope {
            accounts: self.lock()?,
            staged: HashMap::new(),
        })
    }
}

/// Holds the store lock for its whole lifetime, so scopes are fully
/// serialized. Writes stay in `staged` until commit.
pub struct InMemoryScope<'s> {
    accounts: MutexGuard<'s, HashMap<AccountId, Decimal>>,
    staged: HashMap<AccountId, Decimal>,
}

impl StoreScope for InMemoryScope<'_> {
    fn get_balance(&mut self, account_id: AccountId) -> Result<Decimal, StoreError> {
        self.staged
            .get(&account_id)
            .or_else(|| self.accounts.get(&account_id))
            .copied()
            .ok_or(StoreError::AccountNotFound { account_id })
    }

    fn set_balance(&mut self, account_id: AccountId, balance: Decimal) -> Result<(), StoreError> {
        if !self.accounts.contains_key(&account_id) {
            return Err(StoreError::AccountNotFound { account_id });
        }
        self.staged.insert(account_id, balance);
        Ok(())
    }

    fn commit(mut self) -> Result<(), StoreError> {
        let staged = std::mem::take(&mut self.staged);
        self.accounts.extend(staged);
        Ok(())
    }

    fn rollback(self) {
        // staged writes are dropped together with the lock
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::prelude::FromPrimitive;

    use super::*;

    fn seeded_store() -> InMemoryAccountStore {
        let store = InMemoryAccountStore::default();
        store
            .open_account(0, Decimal::from_u32(100).unwrap())
            .unwrap();
        store
            .open_account(1, Decimal::from_u32(50).unwrap())
            .unwrap();
        store
    }

    #[test]
    fn open_accounts() {
        let store = seeded_store();
        assert_eq!(
            store.snapshot().unwrap(),
            vec![
                (0, Decimal::from_u32(100).unwrap()),
                (1, Decimal::from_u32(50).unwrap())
            ]
        );

        let err = store.open_account(1, Decimal::ZERO).unwrap_err();
        assert_eq!(err, StoreError::DuplicateAccount { account_id: 1 });

        let err = store.open_account(2, Decimal::new(-1, 0)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::NegativeBalance { account_id: 2, .. }
        ));
        assert_eq!(store.snapshot().unwrap().len(), 2);
    }

    #[test]
    fn commit_applies_staged_writes() {
        let store = seeded_store();
        let mut scope = store.begin_transaction().unwrap();
        scope.set_balance(0, Decimal::from_u32(90).unwrap()).unwrap();
        // reads inside the scope see its own writes
        assert_eq!(scope.get_balance(0).unwrap(), Decimal::from_u32(90).unwrap());
        scope.commit().unwrap();

        let mut scope = store.begin_transaction().unwrap();
        assert_eq!(scope.get_balance(0).unwrap(), Decimal::from_u32(90).unwrap());
    }

    #[test]
    fn rollback_and_drop_discard_writes() {
        let store = seeded_store();

        let mut scope = store.begin_transaction().unwrap();
        scope.set_balance(0, Decimal::from_u32(1).unwrap()).unwrap();
        scope.rollback();

        let mut scope = store.begin_transaction().unwrap();
        scope.set_balance(1, Decimal::from_u32(1).unwrap()).unwrap();
        drop(scope);

        assert_eq!(
            store.snapshot().unwrap(),
            vec![
                (0, Decimal::from_u32(100).unwrap()),
                (1, Decimal::from_u32(50).unwrap())
            ]
        );
    }

    #[test]
    fn missing_account() {
        let store = seeded_store();
        let mut scope = store.begin_transaction().unwrap();
        assert_eq!(
            scope.get_balance(5).unwrap_err(),
            StoreError::AccountNotFound { account_id: 5 }
        );
        assert_eq!(
            scope.set_balance(5, Decimal::ONE).unwrap_err(),
            StoreError::AccountNotFound { account_id: 5 }
        );
        scope.commit().unwrap();
        assert_eq!(store.snapshot().unwrap().len(), 2);
    }
}
