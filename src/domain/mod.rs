pub mod amount;
pub mod balance;
pub mod error;
pub mod expenditures;
pub mod expense;
pub mod participant;
pub mod partition;
pub mod traits;
pub mod transfer;

pub use balance::{Balance, BalanceSet};
pub use error::Error;
pub use expenditures::Expenditures;
pub use expense::Expense;
pub use participant::{EXCESS, ParticipantId};
pub use partition::Partition;
pub use traits::{ExpenseStream, SettlementReport};
pub use transfer::{Settlement, Transfer};
