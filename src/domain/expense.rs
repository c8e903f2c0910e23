use rust_decimal::Decimal;

use crate::domain::ParticipantId;

/// One line of the expense list: `participant` paid `amount`.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub participant: ParticipantId,
    pub amount: Decimal,
}
