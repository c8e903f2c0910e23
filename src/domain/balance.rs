use rust_decimal::Decimal;

use crate::domain::ParticipantId;

#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    pub participant: ParticipantId,
    pub amount: Decimal, // positive: owed money, negative: owes money
}

/// Net balances of every real participant followed by the synthetic
/// `EXCESS` entry. The amounts always sum to exactly zero.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSet {
    entries: Vec<Balance>,
}

impl BalanceSet {
    pub(crate) fn new(entries: Vec<Balance>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Balance] {
        &self.entries
    }

    pub fn get(&self, participant: &ParticipantId) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|b| &b.participant == participant)
            .map(|b| b.amount)
    }

    pub fn amounts(&self) -> Vec<Decimal> {
        self.entries.iter().map(|b| b.amount).collect()
    }

    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|b| b.amount).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
