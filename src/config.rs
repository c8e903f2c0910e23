use std::path::PathBuf;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::domain::{Error, amount::parse_amount};

/// Knobs for one settlement run.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Upper bound on partition-search nodes before giving up.
    pub max_nodes: Option<u64>,
    /// Wall-clock budget for the partition search.
    pub deadline: Option<Duration>,
    /// Largest residue a settled subgroup may keep.
    pub tolerance: Decimal,
    /// Decimal places used when presenting amounts.
    pub display_scale: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_nodes: None,
            deadline: None,
            tolerance: Decimal::ZERO,
            display_scale: 2,
        }
    }
}

impl SolverConfig {
    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_tolerance(mut self, tolerance: Decimal) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    pub fn with_display_scale(mut self, scale: u32) -> Self {
        self.display_scale = scale;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub input: PathBuf,
    pub config: SolverConfig,
}

impl CliArgs {
    /// Parses `<file> [--max-nodes N] [--timeout-ms N] [--tolerance D] [--scale N]`.
    /// The first item of `args` is the program name.
    pub fn parse<I>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter().skip(1);
        let mut input = None;
        let mut config = SolverConfig::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--max-nodes" => {
                    config = config.with_max_nodes(parse_flag(&arg, args.next())?);
                }
                "--timeout-ms" => {
                    let ms: u64 = parse_flag(&arg, args.next())?;
                    config = config.with_deadline(Duration::from_millis(ms));
                }
                "--tolerance" => {
                    let value = args.next().ok_or_else(|| missing_value(&arg))?;
                    let tolerance = parse_amount(&value).ok_or_else(|| {
                        Error::InvalidInput(format!("{} expects a decimal, got {}", arg, value))
                    })?;
                    config = config.with_tolerance(tolerance);
                }
                "--scale" => {
                    config = config.with_display_scale(parse_flag(&arg, args.next())?);
                }
                flag if flag.starts_with("--") => {
                    return Err(Error::InvalidInput(format!("unknown option {}", flag)));
                }
                _ if input.is_none() => input = Some(PathBuf::from(arg)),
                _ => {
                    return Err(Error::InvalidInput(format!(
                        "unexpected argument {}",
                        arg
                    )));
                }
            }
        }

        let input = input.ok_or_else(|| {
            Error::InvalidInput("No input file argument was provided".to_string())
        })?;

        Ok(Self { input, config })
    }
}

fn parse_flag<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, Error> {
    let value = value.ok_or_else(|| missing_value(flag))?;
    value
        .parse()
        .map_err(|_| Error::InvalidInput(format!("{} expects a number, got {}", flag, value)))
}

fn missing_value(flag: &str) -> Error {
    Error::InvalidInput(format!("{} expects a value", flag))
}
