use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::domain::{Error, ParticipantId};

/// Total spent per participant, kept in first-seen order so that every
/// downstream stage iterates deterministically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expenditures {
    entries: Vec<(ParticipantId, Decimal)>,
    index: HashMap<ParticipantId, usize>,
}

impl Expenditures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the mapping from distinct `(participant, total)` pairs.
    pub fn try_from_iter<I, K>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: Into<ParticipantId>,
    {
        let mut expenditures = Self::new();
        for (id, amount) in pairs {
            let id = id.into();
            Self::validate_id(&id)?;
            if expenditures.index.contains_key(&id) {
                return Err(Error::InvalidInput(format!(
                    "participant {} appears more than once",
                    id
                )));
            }
            expenditures.push(id, amount);
        }
        Ok(expenditures)
    }

    /// Adds one expense to the participant's running total.
    pub fn record(&mut self, id: ParticipantId, amount: Decimal) -> Result<(), Error> {
        Self::validate_id(&id)?;
        match self.index.get(&id) {
            Some(&pos) => {
                let total = &mut self.entries[pos].1;
                *total = total.checked_add(amount).ok_or_else(|| {
                    Error::InvalidInput(format!("expenditure of {} overflows", id))
                })?;
            }
            None => self.push(id, amount),
        }
        Ok(())
    }

    pub fn get(&self, id: &ParticipantId) -> Option<Decimal> {
        self.index.get(id).map(|&pos| self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, Decimal)> {
        self.entries.iter().map(|(id, amount)| (id, *amount))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, id: ParticipantId, amount: Decimal) {
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push((id, amount));
    }

    fn validate_id(id: &ParticipantId) -> Result<(), Error> {
        if id.as_str().trim().is_empty() {
            return Err(Error::InvalidInput(
                "participant identifier is empty".to_string(),
            ));
        }
        if id.is_excess() {
            return Err(Error::InvalidInput(format!(
                "participant identifier {} is reserved",
                id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accumulates_in_first_seen_order() {
        let mut exp = Expenditures::new();
        exp.record("B".into(), Decimal::from(10)).unwrap();
        exp.record("A".into(), Decimal::from(5)).unwrap();
        exp.record("B".into(), Decimal::new(250, 2)).unwrap();

        let ids: Vec<_> = exp.iter().map(|(id, _)| id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["B", "A"]);
        assert_eq!(exp.get(&"B".into()), Some(Decimal::new(1250, 2)));
    }

    #[test]
    fn duplicates_and_reserved_ids_are_rejected() {
        let dup = Expenditures::try_from_iter([("A", Decimal::ONE), ("A", Decimal::TWO)]);
        assert!(matches!(dup, Err(Error::InvalidInput(_))));

        let reserved = Expenditures::try_from_iter([("EXCESS", Decimal::ONE)]);
        assert!(matches!(reserved, Err(Error::InvalidInput(_))));

        let mut exp = Expenditures::new();
        assert!(matches!(
            exp.record(" ".into(), Decimal::ONE),
            Err(Error::InvalidInput(_))
        ));
    }
}
