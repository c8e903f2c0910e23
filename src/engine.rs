use futures::StreamExt;

use crate::config::SolverConfig;
use crate::domain::{
    Balance, Error, Expenditures, Settlement,
    traits::{ExpenseStream, SettlementReport},
};
use crate::normalizer::normalize;
use crate::partition::search_partition;
use crate::settler::settle_group;

/// Settles `expenditures` with the default configuration.
pub fn solve(expenditures: &Expenditures) -> Result<Settlement, Error> {
    solve_with(expenditures, &SolverConfig::default())
}

/// Computes the even-split target and the transfers that bring every
/// participant to it. Transfers stay inside the blocks of the finest
/// zero-sum partition, and any transfer touching `EXCESS` is dropped.
pub fn solve_with(expenditures: &Expenditures, config: &SolverConfig) -> Result<Settlement, Error> {
    let (target, balances) = normalize(expenditures)?;
    let partition = search_partition(&balances, config)?;

    let mut transfers = Vec::new();
    for group in partition.groups() {
        let members: Vec<&Balance> = group.iter().map(|&i| &balances.entries()[i]).collect();
        transfers.extend(settle_group(&members, config.tolerance)?);
    }

    let emitted = transfers.len();
    transfers.retain(|t| !t.involves_excess());

    tracing::info!(
        participants = expenditures.len(),
        groups = partition.len(),
        transfers = transfers.len(),
        dropped = emitted - transfers.len(),
        "settlement computed"
    );

    Ok(Settlement { target, transfers })
}

#[derive(Debug)]
pub struct Engine<I, O>
where
    I: ExpenseStream,
    O: SettlementReport,
{
    ingestion: I,
    report: O,
    config: SolverConfig,
}

impl<I, O> Engine<I, O>
where
    I: ExpenseStream,
    O: SettlementReport,
{
    pub fn new(ingestion: I, report: O, config: SolverConfig) -> Self {
        Self {
            ingestion,
            report,
            config,
        }
    }

    /// Drains the expense stream, settles the totals and hands the result
    /// to the report. The first bad row aborts the run.
    pub async fn process(&mut self) -> Result<Settlement, Error> {
        let mut expenses = self.ingestion.stream();
        let mut expenditures = Expenditures::new();

        while let Some(expense) = expenses.next().await {
            let expense = expense?;
            expenditures.record(expense.participant, expense.amount)?;
        }

        let settlement = solve_with(&expenditures, &self.config)?;
        self.report.report(&settlement)?;
        Ok(settlement)
    }

    pub fn into_report(self) -> O {
        self.report
    }
}
