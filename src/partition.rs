//! Search for the zero-sum partition of a balance set with the most blocks.
//!
//! Every block of `m` entries settles with at most `m - 1` transfers, so a
//! finer partition never needs more transfers than a coarser one.
//!
//! The search walks restricted-growth assignments (entry `i` joins one of
//! the blocks opened by entries `< i`, or opens a new one) with an explicit
//! cursor stack instead of recursion. Two facts keep it small:
//!
//! * A zero entry is always best as a singleton, so zeros never enter the
//!   search.
//! * In a partition with the most blocks no block has a proper prefix that
//!   already sums to zero (splitting it off would add a block). A block
//!   whose running sum hits zero is therefore closed to later entries.
//!
//! With closed blocks fixed, each open block still needs at least one more
//! entry and every new block needs at least two, which bounds how many
//! blocks the current branch can still reach.

use std::time::{Duration, Instant};

use rust_decimal::Decimal;

use crate::config::SolverConfig;
use crate::domain::{BalanceSet, Error, Partition};

const DEADLINE_CHECK_INTERVAL: u64 = 1024;

/// Finds the zero-sum partition of `balances` with the most blocks.
pub fn search_partition(balances: &BalanceSet, config: &SolverConfig) -> Result<Partition, Error> {
    let amounts = balances.amounts();
    PartitionSearch::new(&amounts, config).run()
}

pub struct PartitionSearch<'a> {
    amounts: &'a [Decimal],
    max_nodes: Option<u64>,
    deadline: Option<Duration>,
}

impl<'a> PartitionSearch<'a> {
    pub fn new(amounts: &'a [Decimal], config: &SolverConfig) -> Self {
        Self {
            amounts,
            max_nodes: config.max_nodes,
            deadline: config.deadline,
        }
    }

    pub fn run(&self) -> Result<Partition, Error> {
        let entries = self.amounts.len();
        if entries == 0 {
            return Err(Error::NoValidPartition { entries });
        }

        let live: Vec<usize> = (0..entries)
            .filter(|&i| !self.amounts[i].is_zero())
            .collect();
        let live_amounts: Vec<Decimal> = live.iter().map(|&i| self.amounts[i]).collect();

        let mut budget = Budget::new(self.max_nodes, self.deadline);
        let best = if live_amounts.is_empty() {
            Vec::new()
        } else {
            let mut state = SearchState::new(&live_amounts);
            state.explore(&mut budget)?;
            match state.best {
                Some(best) => best.block_of,
                None => return Err(Error::NoValidPartition { entries }),
            }
        };

        // Dense block ids in order of each block's first entry; zeros are
        // singletons of their own.
        let mut renumbered: Vec<Option<usize>> = vec![None; live.len()];
        let mut block_of = vec![0; entries];
        let mut next_block = 0;
        let mut live_pos = 0;
        for (entry, slot) in block_of.iter_mut().enumerate() {
            if live.get(live_pos) == Some(&entry) {
                let search_block = best[live_pos];
                *slot = *renumbered[search_block].get_or_insert_with(|| {
                    next_block += 1;
                    next_block - 1
                });
                live_pos += 1;
            } else {
                *slot = next_block;
                next_block += 1;
            }
        }

        let partition = Partition::from_assignment(block_of);
        tracing::debug!(
            entries,
            zero_entries = entries - live.len(),
            blocks = partition.len(),
            nodes = budget.nodes,
            "partition search finished"
        );
        Ok(partition)
    }
}

struct Budget {
    nodes: u64,
    max_nodes: Option<u64>,
    deadline: Option<Duration>,
    started: Instant,
}

impl Budget {
    fn new(max_nodes: Option<u64>, deadline: Option<Duration>) -> Self {
        Self {
            nodes: 0,
            max_nodes,
            deadline,
            started: Instant::now(),
        }
    }

    fn tick(&mut self) -> Result<(), Error> {
        self.nodes += 1;
        if let Some(max_nodes) = self.max_nodes {
            if self.nodes > max_nodes {
                tracing::warn!(nodes = self.nodes, "partition search node budget exhausted");
                return Err(Error::SearchAborted { nodes: self.nodes });
            }
        }
        if let Some(deadline) = self.deadline {
            if self.nodes % DEADLINE_CHECK_INTERVAL == 1 && self.started.elapsed() >= deadline {
                tracing::warn!(nodes = self.nodes, ?deadline, "partition search timed out");
                return Err(Error::SearchTimeout(deadline));
            }
        }
        Ok(())
    }
}

struct Best {
    blocks: usize,
    block_of: Vec<usize>,
}

/// What the entries from some index onwards can still offer to close open
/// blocks of the opposite sign.
#[derive(Clone, Copy, Default)]
struct Reserve {
    positives: usize,
    negatives: usize,
    positive_total: Decimal,
    negative_total: Decimal,
}

struct SearchState<'a> {
    amounts: &'a [Decimal],
    reserve: Vec<Reserve>,
    block_of: Vec<usize>,
    opened: Vec<bool>,
    sums: Vec<Decimal>,
    open_positive: usize,
    open_negative: usize,
    positive_need: Decimal,
    negative_need: Decimal,
    best: Option<Best>,
}

impl<'a> SearchState<'a> {
    fn new(amounts: &'a [Decimal]) -> Self {
        let n = amounts.len();
        let mut reserve = vec![Reserve::default(); n + 1];
        for i in (0..n).rev() {
            let mut r = reserve[i + 1];
            if amounts[i].is_sign_positive() {
                r.positives += 1;
                r.positive_total += amounts[i];
            } else {
                r.negatives += 1;
                r.negative_total -= amounts[i];
            }
            reserve[i] = r;
        }

        Self {
            amounts,
            reserve,
            block_of: vec![0; n],
            opened: vec![false; n],
            sums: Vec::with_capacity(n),
            open_positive: 0,
            open_negative: 0,
            positive_need: Decimal::ZERO,
            negative_need: Decimal::ZERO,
            best: None,
        }
    }

    fn explore(&mut self, budget: &mut Budget) -> Result<(), Error> {
        let n = self.amounts.len();
        // Every block of non-zero entries holds at least two of them.
        let ceiling = n / 2;
        let mut cursor = vec![0usize; n];
        let mut assigned = vec![false; n];
        let mut depth = 0;

        loop {
            if depth == n {
                self.record();
                if self.best.as_ref().is_some_and(|b| b.blocks >= ceiling) {
                    return Ok(());
                }
                depth -= 1;
                continue;
            }

            budget.tick()?;
            if assigned[depth] {
                self.unassign(depth);
                assigned[depth] = false;
            }

            let candidates = self.sums.len();
            while cursor[depth] <= candidates {
                let block = cursor[depth];
                cursor[depth] += 1;
                if block < candidates && self.sums[block].is_zero() {
                    continue;
                }
                self.assign(depth, block);
                if self.viable(depth) {
                    assigned[depth] = true;
                    break;
                }
                self.unassign(depth);
            }

            if assigned[depth] {
                depth += 1;
                if depth < n {
                    cursor[depth] = 0;
                }
            } else if depth == 0 {
                return Ok(());
            } else {
                depth -= 1;
            }
        }
    }

    fn open(&self) -> usize {
        self.open_positive + self.open_negative
    }

    fn assign(&mut self, entry: usize, block: usize) {
        let amount = self.amounts[entry];
        if block == self.sums.len() {
            self.sums.push(amount);
            self.opened[entry] = true;
        } else {
            self.untrack(self.sums[block]);
            self.sums[block] += amount;
            self.opened[entry] = false;
        }
        self.track(self.sums[block]);
        self.block_of[entry] = block;
    }

    // Entries are undone strictly in reverse order of assignment.
    fn unassign(&mut self, entry: usize) {
        let block = self.block_of[entry];
        self.untrack(self.sums[block]);
        if self.opened[entry] {
            self.sums.pop();
        } else {
            self.sums[block] -= self.amounts[entry];
            self.track(self.sums[block]);
        }
    }

    fn track(&mut self, sum: Decimal) {
        if sum.is_zero() {
            return;
        }
        if sum.is_sign_positive() {
            self.open_positive += 1;
            self.positive_need += sum;
        } else {
            self.open_negative += 1;
            self.negative_need -= sum;
        }
    }

    fn untrack(&mut self, sum: Decimal) {
        if sum.is_zero() {
            return;
        }
        if sum.is_sign_positive() {
            self.open_positive -= 1;
            self.positive_need -= sum;
        } else {
            self.open_negative -= 1;
            self.negative_need += sum;
        }
    }

    fn viable(&self, entry: usize) -> bool {
        // Each open block must still meet entries of the opposite sign
        // worth at least its running sum.
        let reserve = &self.reserve[entry + 1];
        if self.open_positive > reserve.negatives
            || self.open_negative > reserve.positives
            || self.positive_need > reserve.negative_total
            || self.negative_need > reserve.positive_total
        {
            return false;
        }

        let remaining = self.amounts.len() - entry - 1;
        let open = self.open();
        let closed = self.sums.len() - open;
        let reachable = closed + open + (remaining - open) / 2;
        match &self.best {
            Some(best) => reachable > best.blocks,
            None => true,
        }
    }

    fn record(&mut self) {
        if self.open() != 0 {
            return;
        }
        let blocks = self.sums.len();
        if self.best.as_ref().is_none_or(|b| blocks > b.blocks) {
            self.best = Some(Best {
                blocks,
                block_of: self.block_of.clone(),
            });
        }
    }
}
