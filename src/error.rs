use std::path::PathBuf;

use thiserror::Error;

use crate::outcome::PairwiseOutcome;

/// Failures surfaced by the simulation core and its loaders.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("participant index {index} is out of range for a roster of {roster_size}")]
    IndexOutOfRange { index: usize, roster_size: usize },

    #[error("round {round}, group {group}: expected exactly 3 participants, got {len}")]
    GroupSize {
        round: usize,
        group: usize,
        len: usize,
    },

    #[error("participant {index} is scheduled more than once in the same round")]
    DuplicateParticipant { index: usize },

    #[error("invalid model parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("roster line {line}: {message}")]
    RosterParse { line: usize, message: String },

    #[error("malformed schedule in {origin}: {source}")]
    ScheduleParse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("no scoring rule for r01={r01:?}, r12={r12:?}, r02={r02:?}")]
    Unresolved {
        r01: PairwiseOutcome,
        r12: PairwiseOutcome,
        r02: Option<PairwiseOutcome>,
    },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type SimResult<T> = std::result::Result<T, SimError>;
