//! CLI failures and their process exit codes.

use codeflow_assist::AssistError;
use codeflow_core::CoreError;
use codeflow_storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    InvalidId(#[from] CoreError),

    #[error("script {0} not found")]
    NotFound(String),

    #[error("assistant failed: {0}")]
    Assist(#[from] AssistError),

    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }

    /// 1 = usage or not found, 2 = assistant failure, 3 = storage or I/O.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidId(_) | CliError::NotFound(_) => 1,
            CliError::Assist(_) => 2,
            CliError::Storage(_) | CliError::Io { .. } | CliError::Output(_) => 3,
        }
    }
}
