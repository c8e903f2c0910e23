use rust_decimal::Decimal;

use crate::domain::{Balance, BalanceSet, Error, Expenditures, ParticipantId};

/// rust_decimal keeps at most 28 fractional digits.
const MAX_SCALE: u32 = 28;

/// Computes the even-split target and every participant's net balance
/// against it, plus the `EXCESS` entry that makes the set sum to zero.
pub fn normalize(expenditures: &Expenditures) -> Result<(Decimal, BalanceSet), Error> {
    if expenditures.is_empty() {
        return Err(Error::InvalidInput(
            "expenditure mapping is empty".to_string(),
        ));
    }

    let total = expenditures
        .iter()
        .try_fold(Decimal::ZERO, |acc, (_, amount)| acc.checked_add(amount))
        .ok_or_else(|| overflow("sum of expenditures"))?;
    let magnitude = expenditures
        .iter()
        .try_fold(Decimal::ZERO, |acc, (_, amount)| acc.checked_add(amount.abs()))
        .ok_or_else(|| overflow("sum of expenditure magnitudes"))?;

    let scale = working_scale(magnitude)?;
    if let Some((id, amount)) = expenditures
        .iter()
        .find(|(_, amount)| amount.normalize().scale() > scale)
    {
        return Err(Error::InvalidInput(format!(
            "expenditure {} of {} needs more than {} decimal places at this magnitude",
            amount, id, scale
        )));
    }

    let target = total
        .checked_div(Decimal::from(expenditures.len()))
        .ok_or_else(|| overflow("target share"))?
        .round_dp(scale);

    let mut entries = Vec::with_capacity(expenditures.len() + 1);
    let mut net_sum = Decimal::ZERO;
    for (id, amount) in expenditures.iter() {
        let net = amount
            .checked_sub(target)
            .ok_or_else(|| overflow("net balance"))?;
        net_sum = net_sum
            .checked_add(net)
            .ok_or_else(|| overflow("sum of net balances"))?;
        entries.push(Balance {
            participant: id.clone(),
            amount: net,
        });
    }

    entries.push(Balance {
        participant: ParticipantId::excess(),
        amount: -net_sum,
    });

    tracing::debug!(
        participants = expenditures.len(),
        %total,
        %target,
        scale,
        excess = %(-net_sum),
        "normalized expenditures"
    );

    Ok((target, BalanceSet::new(entries)))
}

/// Largest number of decimal places at which any sum of net balances stays
/// exact. Net magnitudes add up to at most twice `magnitude`, and that span
/// must still fit the 96-bit mantissa once scaled.
fn working_scale(magnitude: Decimal) -> Result<u32, Error> {
    let span = magnitude
        .checked_mul(Decimal::TWO)
        .ok_or_else(|| overflow("sum of net balances"))?
        .max(Decimal::ONE);
    let mut headroom = Decimal::MAX / span;
    let mut scale = 0;
    while scale < MAX_SCALE && headroom >= Decimal::TEN {
        headroom /= Decimal::TEN;
        scale += 1;
    }
    Ok(scale)
}

fn overflow(what: &str) -> Error {
    Error::InvalidInput(format!("{} exceeds the representable decimal range", what))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expenditures(pairs: &[(&str, i64)]) -> Expenditures {
        Expenditures::try_from_iter(pairs.iter().map(|&(id, v)| (id, Decimal::from(v)))).unwrap()
    }

    #[test]
    fn even_split_has_zero_excess() {
        let (target, balances) = normalize(&expenditures(&[("A", 0), ("B", 200)])).unwrap();
        assert_eq!(target, Decimal::from(100));
        assert_eq!(balances.get(&"A".into()), Some(Decimal::from(-100)));
        assert_eq!(balances.get(&"B".into()), Some(Decimal::from(100)));
        assert_eq!(balances.get(&ParticipantId::excess()), Some(Decimal::ZERO));
    }

    #[test]
    fn excess_absorbs_division_remainder() {
        let (target, balances) = normalize(&expenditures(&[
            ("A", 1100),
            ("B", 1100),
            ("C", 250),
            ("D", 71),
            ("E", 103),
            ("F", 240),
        ]))
        .unwrap();

        assert_eq!(target.round_dp(2), Decimal::new(47733, 2));
        assert_eq!(target.scale(), 25);
        assert_eq!(balances.len(), 7);
        assert_eq!(balances.total(), Decimal::ZERO);

        let excess = balances.get(&ParticipantId::excess()).unwrap();
        assert_ne!(excess, Decimal::ZERO);
        assert!(excess.abs() < Decimal::new(1, 20));
    }

    #[test]
    fn single_participant_is_balanced() {
        let (target, balances) = normalize(&expenditures(&[("A", 42)])).unwrap();
        assert_eq!(target, Decimal::from(42));
        assert!(balances.entries().iter().all(|b| b.amount.is_zero()));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            normalize(&Expenditures::new()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn working_scale_shrinks_with_magnitude() {
        assert_eq!(working_scale(Decimal::ZERO).unwrap(), 28);
        assert_eq!(working_scale(Decimal::from(2864)).unwrap(), 25);
        assert_eq!(working_scale(Decimal::from(1_000_000_000_000i64)).unwrap(), 16);
    }

    #[test]
    fn over_precise_amount_is_rejected() {
        let exp = Expenditures::try_from_iter([
            ("A", Decimal::from(1_000_000_000_000_000_000i64)),
            ("B", Decimal::new(1, 12)),
        ])
        .unwrap();
        assert!(matches!(normalize(&exp), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn overflowing_total_is_rejected() {
        let exp = Expenditures::try_from_iter([("A", Decimal::MAX), ("B", Decimal::MAX)]).unwrap();
        assert!(matches!(normalize(&exp), Err(Error::InvalidInput(_))));
    }
}
