use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every failure a vault operation can report back to the caller.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("File not found: {0}")]
    NoteNotFound(String),

    #[error("Vault not found: {}", .0.display())]
    VaultNotFound(PathBuf),

    #[error("Invalid note path: {0:?}")]
    InvalidPath(String),

    #[error("Access denied: path outside vault")]
    AccessDenied,

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },
}

impl VaultError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoteNotFound(_) | Self::VaultNotFound(_))
    }
}

pub type VaultResult<T> = Result<T, VaultError>;
