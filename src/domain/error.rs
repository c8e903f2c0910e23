use std::time::Duration;

use rust_decimal::Decimal;

use crate::domain::ParticipantId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error("Ingestion failed with: {0}")]
    Ingestion(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No zero-sum partition exists for {entries} balance entries")]
    NoValidPartition { entries: usize },

    #[error("Subgroup left unbalanced: {participant} still holds {residue}")]
    UnbalancedSubgroup {
        participant: ParticipantId,
        residue: Decimal,
    },

    #[error("Partition search exceeded its deadline of {0:?}")]
    SearchTimeout(Duration),

    #[error("Partition search aborted after exploring {nodes} nodes")]
    SearchAborted { nodes: u64 },
}
