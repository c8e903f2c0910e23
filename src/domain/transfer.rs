use std::fmt;

use rust_decimal::Decimal;

use crate::domain::{Error, Expenditures, ParticipantId};

/// Moves `amount` of expenditure from `from` onto `to`: `from`'s total goes
/// down and `to`'s goes up. In cash terms `to` hands `amount` to `from`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transfer {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Decimal,
}

impl Transfer {
    pub fn involves_excess(&self) -> bool {
        self.from.is_excess() || self.to.is_excess()
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.amount)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub target: Decimal,
    pub transfers: Vec<Transfer>,
}

impl Settlement {
    /// Applies the transfers in order and returns every participant's
    /// adjusted total, in the order of `expenditures`.
    pub fn apply(&self, expenditures: &Expenditures) -> Result<Vec<(ParticipantId, Decimal)>, Error> {
        let mut totals: Vec<(ParticipantId, Decimal)> = expenditures
            .iter()
            .map(|(id, amount)| (id.clone(), amount))
            .collect();

        for transfer in &self.transfers {
            for (id, delta) in [
                (&transfer.from, -transfer.amount),
                (&transfer.to, transfer.amount),
            ] {
                let entry = totals.iter_mut().find(|(p, _)| p == id).ok_or_else(|| {
                    Error::InvalidInput(format!("transfer references unknown participant {}", id))
                })?;
                entry.1 += delta;
            }
        }

        Ok(totals)
    }
}
