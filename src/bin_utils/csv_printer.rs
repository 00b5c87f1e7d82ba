use std::io::Write;

use crate::account::AccountId;
use anyhow::Context;
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Balance {
    pub account: AccountId,
    pub balance: Decimal,
}

pub fn print_balances<W>(
    output: &mut W,
    balances: impl Iterator<Item = Balance>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for balance in balances {
        let account = balance.account;
        writer
            .serialize(balance)
            .with_context(|| format!("Failed to write balance of account {account}"))?;
    }
    writer.flush().context("Failed to flush balances")?;
    Ok(())
}
