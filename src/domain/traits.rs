use futures::Stream;

use crate::domain::{Error, Expense, Settlement};

pub trait ExpenseStream {
    type ExpStream: Stream<Item = Result<Expense, Error>> + Send + Unpin + 'static;
    fn stream(&mut self) -> Self::ExpStream;
}

pub trait SettlementReport {
    fn report(&mut self, settlement: &Settlement) -> Result<(), Error>;
}
