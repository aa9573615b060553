use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for bank loading, constraint checks, sampling and rendering.
#[derive(Debug, Error)]
pub enum TestGenError {
    #[error("invalid constraint set: {0}")]
    InvalidConstraints(String),
    #[error("no valid test found after {attempts} attempts")]
    Infeasible { attempts: u64 },
    #[error("constraints can never be satisfied by this bank: {0}")]
    Unsatisfiable(String),
    #[error("bank line {line}: {reason}")]
    BankParse { line: usize, reason: String },
    #[error("invalid header command name '{0}'")]
    InvalidCommand(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("failed to read '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, TestGenError>;
