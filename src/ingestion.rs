use std::io::Read;
use std::pin::Pin;

use futures::stream::{self, Stream};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::amount::deserialize_amount;
use crate::domain::traits::ExpenseStream;
use crate::domain::{Error, Expense, ParticipantId};

pub struct CsvReader<R: Read> {
    reader: Option<csv::Reader<R>>,
}

impl<R: Read> CsvReader<R> {
    pub fn new(reader: R) -> Self {
        let rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        Self { reader: Some(rdr) }
    }
}

/// Internal shape used only for CSV deserialization.
#[derive(Debug, Deserialize)]
struct CsvRow {
    participant: String,
    #[serde(deserialize_with = "deserialize_amount")]
    amount: Decimal,
}

impl TryFrom<CsvRow> for Expense {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        if row.participant.is_empty() {
            return Err(Error::Ingestion("Missing participant name".to_string()));
        }

        Ok(Expense {
            participant: ParticipantId::new(row.participant),
            amount: row.amount,
        })
    }
}

impl<R: Read + Send + 'static> ExpenseStream for CsvReader<R> {
    type ExpStream = Pin<Box<dyn Stream<Item = Result<Expense, Error>> + Send>>;

    fn stream(&mut self) -> Self::ExpStream {
        let reader = match self.reader.take() {
            Some(r) => r,
            None => return Box::pin(stream::empty::<Result<Expense, Error>>()),
        };

        let iter = reader
            .into_deserialize::<CsvRow>()
            .map(|row_res| match row_res {
                Ok(row) => Expense::try_from(row),
                Err(e) => Err(Error::Ingestion(format!(
                    "CSV deserialization error: {}",
                    e
                ))),
            });

        Box::pin(stream::iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{StreamExt, executor::block_on};

    fn collect(input: &'static str) -> Vec<Result<Expense, Error>> {
        let mut reader = CsvReader::new(input.as_bytes());
        block_on(reader.stream().collect::<Vec<_>>())
    }

    #[test]
    fn reads_trimmed_rows() {
        let rows = collect("participant, amount\nA, 1100\n B , 12.50\n");
        let rows: Vec<Expense> = rows.into_iter().map(Result::unwrap).collect();
        assert_eq!(
            rows,
            vec![
                Expense {
                    participant: "A".into(),
                    amount: Decimal::from(1100),
                },
                Expense {
                    participant: "B".into(),
                    amount: Decimal::new(1250, 2),
                },
            ]
        );
    }

    #[test]
    fn bad_rows_become_ingestion_errors() {
        let rows = collect("participant,amount\nA,abc\n,5\nC\n");
        assert_eq!(rows.len(), 3);
        assert!(
            rows.iter()
                .all(|r| matches!(r, Err(Error::Ingestion(_))))
        );
    }

    #[test]
    fn stream_is_consumed_once() {
        let mut reader = CsvReader::new("participant,amount\nA,1\n".as_bytes());
        assert_eq!(block_on(reader.stream().count()), 1);
        assert_eq!(block_on(reader.stream().count()), 0);
    }
}
