pub mod config;
pub mod domain;
pub mod engine;
pub mod ingestion;
pub mod normalizer;
pub mod partition;
pub mod report;
pub mod settler;

pub use config::{CliArgs, SolverConfig};
pub use domain::{Error, Expenditures, ParticipantId, Settlement, Transfer};
pub use engine::{Engine, solve, solve_with};
