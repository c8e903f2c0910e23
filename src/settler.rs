use rust_decimal::Decimal;

use crate::domain::{Balance, Error, ParticipantId, Transfer};

/// Zeroes one zero-sum group of balances with at most `len - 1` transfers,
/// always pairing the largest remaining creditor with the largest remaining
/// debtor. Ties go to the entry that sorts first, so identical input gives
/// identical output.
pub fn settle_group(group: &[&Balance], tolerance: Decimal) -> Result<Vec<Transfer>, Error> {
    let mut working: Vec<(&ParticipantId, Decimal)> = group
        .iter()
        .map(|b| (&b.participant, b.amount))
        .collect();
    // Stable: equal balances keep their original order.
    working.sort_by(|a, b| b.1.cmp(&a.1));

    let mut transfers = Vec::with_capacity(working.len().saturating_sub(1));
    for _ in 1..working.len() {
        let (Some(creditor), Some(debtor)) = (extreme(&working, true), extreme(&working, false))
        else {
            break;
        };

        let amount = working[creditor].1.min(-working[debtor].1);
        working[creditor].1 -= amount;
        working[debtor].1 += amount;

        let transfer = Transfer {
            from: working[creditor].0.clone(),
            to: working[debtor].0.clone(),
            amount,
        };
        tracing::debug!(%transfer, "emitted transfer");
        transfers.push(transfer);
    }

    if let Some((participant, residue)) = working.iter().find(|(_, b)| b.abs() > tolerance) {
        return Err(Error::UnbalancedSubgroup {
            participant: (*participant).clone(),
            residue: *residue,
        });
    }

    Ok(transfers)
}

/// Index of the largest positive (`creditor`) or most negative balance.
fn extreme(working: &[(&ParticipantId, Decimal)], creditor: bool) -> Option<usize> {
    let mut found: Option<usize> = None;
    for (i, (_, balance)) in working.iter().enumerate() {
        let candidate = if creditor {
            *balance > Decimal::ZERO
        } else {
            *balance < Decimal::ZERO
        };
        if !candidate {
            continue;
        }
        let better = match found {
            None => true,
            Some(j) if creditor => *balance > working[j].1,
            Some(j) => *balance < working[j].1,
        };
        if better {
            found = Some(i);
        }
    }
    found
}
