//! This module could be a separate crate on its own, to bootstrap [`teller`](crate) within binary
//! and to seed fixtures for tests. It plays the role of the external loader the
//! service itself knows nothing about.

use std::io::{Read, Write};

use crate::{
    service::{TransferError, TransferService},
    store::in_memory_store::InMemoryAccountStore,
};
use anyhow::{Context, Result};
use csv_parser::{CsvRecordParser, OpeningBalance, TransferRequest};
use csv_printer::{Balance, print_balances};
use tracing::info;
pub mod csv_parser;
pub mod csv_printer;

/// Builds a store from `account,balance` rows. Any malformed row, duplicate
/// or negative balance aborts the whole load.
pub fn load_accounts<R>(source: R) -> Result<InMemoryAccountStore>
where
    R: Read,
{
    let store = InMemoryAccountStore::default();
    let mut count = 0usize;
    for (line, row) in CsvRecordParser::<_, OpeningBalance>::new(source) {
        let row = row.with_context(|| format!("Invalid account at line {line}"))?;
        store
            .open_account(row.account, row.balance)
            .with_context(|| format!("Cannot open account at line {line}"))?;
        count += 1;
    }
    info!(accounts = count, "account fixture loaded");
    Ok(store)
}

pub struct Service<'w, A, R, W: 'w> {
    pub accounts: A,
    pub transfers: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, TransferError)>,
}

impl<'w, A, R, W> Service<'w, A, R, W>
where
    A: Read,
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let service = TransferService::new(load_accounts(self.accounts)?);

        for (line, row) in CsvRecordParser::<_, TransferRequest>::new(self.transfers) {
            let row = row.with_context(|| format!("Invalid transfer at line {line}"))?;
            if let Err(err) = service.transfer_funds(row.from, row.to, row.amount) {
                (self.error_printer)(line, err);
            }
        }

        let balances = service.store().snapshot()?;
        print_balances(
            self.output,
            balances
                .into_iter()
                .map(|(account, balance)| Balance { account, balance }),
        )
    }
}
