use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading a charge log or deriving statistics from it.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("Failed to open charge log {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load charge log {} (line {line}): {message}", path.display())]
    DataLoad {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("Charge log contains no events")]
    EmptyLog,

    #[error("Division by zero while computing {0}")]
    DivisionByZero(&'static str),

    #[error("Projected date is outside the representable calendar range")]
    DateOutOfRange,

    #[error("No charge log has been loaded")]
    NoData,
}

impl CycleError {
    /// True for load failures, i.e. anything that stopped the log from being read.
    pub fn is_data_load(&self) -> bool {
        matches!(self, CycleError::Io { .. } | CycleError::DataLoad { .. })
    }
}

pub type Result<T, E = CycleError> = std::result::Result<T, E>;
