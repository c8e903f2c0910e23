use std::io::{self, Write};

use crate::domain::{Error, Settlement, SettlementReport};

/// Writes a human-readable settlement. Amounts are rounded here and nowhere
/// else.
#[derive(Debug)]
pub struct WriterReport<W: Write> {
    out: W,
    scale: u32,
}

pub type StdOutReport = WriterReport<io::Stdout>;

impl StdOutReport {
    pub fn stdout(scale: u32) -> Self {
        WriterReport::new(io::stdout(), scale)
    }
}

impl<W: Write> WriterReport<W> {
    pub fn new(out: W, scale: u32) -> Self {
        Self { out, scale }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SettlementReport for WriterReport<W> {
    fn report(&mut self, settlement: &Settlement) -> Result<(), Error> {
        writeln!(
            self.out,
            "After all transfers, everyone will have spent ${}",
            settlement.target.round_dp(self.scale)
        )?;
        writeln!(self.out, "Transactions")?;
        writeln!(self.out, "------------------")?;
        // `to` is the participant who hands the money over.
        for transfer in &settlement.transfers {
            writeln!(
                self.out,
                "{} transfers ${} to {}",
                transfer.to,
                transfer.amount.round_dp(self.scale),
                transfer.from
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Transfer;
    use rust_decimal::Decimal;

    #[test]
    fn rounds_only_for_display() {
        let settlement = Settlement {
            target: Decimal::new(4773333333, 7),
            transfers: vec![Transfer {
                from: "A".into(),
                to: "D".into(),
                amount: Decimal::new(4063333333, 7),
            }],
        };

        let mut report = WriterReport::new(Vec::new(), 2);
        report.report(&settlement).unwrap();
        let text = String::from_utf8(report.into_inner()).unwrap();

        assert!(text.contains("everyone will have spent $477.33"));
        assert!(text.contains("D transfers $406.33 to A"));
    }
}
