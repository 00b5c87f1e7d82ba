use std::{io::Read, marker::PhantomData};

use crate::account::AccountId;
use csv::{Position, Reader, StringRecord, Trim};
use rust_decimal::Decimal;
use serde::{Deserialize, de::DeserializeOwned};

/// Row of the seed fixture.
#[derive(Debug, Deserialize)]
pub struct OpeningBalance {
    pub account: AccountId,
    pub balance: Decimal,
}

/// Row of a transfer batch.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Decimal,
}

/// Parses headed CSV rows into `T`, yielding each with the line it started on.
pub struct CsvRecordParser<R, T> {
    reader: Reader<R>,
    record: StringRecord,
    _row: PhantomData<T>,
}

impl<R, T> CsvRecordParser<R, T>
where
    R: Read,
    T: DeserializeOwned,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(source);

        Self {
            reader,
            record: StringRecord::new(),
            _row: PhantomData,
        }
    }
}

impl<R, T> Iterator for CsvRecordParser<R, T>
where
    R: Read,
    T: DeserializeOwned,
{
    type Item = (u64, csv::Result<T>);

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let line = self.record.position().map_or(0, Position::line);
                let row = self
                    .reader
                    .headers()
                    .and_then(|headers| self.record.deserialize(Some(headers)));
                Some((line, row))
            }
            Err(err) => Some((err.position().map_or(0, Position::line), Err(err))),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::prelude::FromPrimitive;

    use super::*;

    #[test]
    fn parse_transfers() {
        let input = "from, to, amount\n0, 1, 10.5\n1,0,3\n";
        let rows: Vec<_> = CsvRecordParser::<_, TransferRequest>::new(input.as_bytes()).collect();
        assert_eq!(rows.len(), 2);

        let (line, row) = &rows[0];
        let row = row.as_ref().unwrap();
        assert_eq!(*line, 2);
        assert_eq!((row.from, row.to), (0, 1));
        assert_eq!(row.amount, Decimal::new(105, 1));

        let (line, row) = &rows[1];
        assert_eq!(*line, 3);
        assert_eq!(row.as_ref().unwrap().amount, Decimal::from_u32(3).unwrap());
    }

    #[test]
    fn malformed_row_is_reported() {
        let input = "account,balance\n0,100\nx,1\n";
        let rows: Vec<_> = CsvRecordParser::<_, OpeningBalance>::new(input.as_bytes()).collect();
        assert!(rows[0].1.is_ok());
        assert_eq!(rows[1].0, 3);
        assert!(rows[1].1.is_err());
    }
}
