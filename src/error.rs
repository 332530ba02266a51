use std::path::PathBuf;
use thiserror::Error;

/// Recoverable conditions found while scanning. Neither one stops the pass.
#[derive(Debug, PartialEq, Clone, Error)]
pub enum LexingError {
    #[error("Unexpected character.")]
    UnexpectedCharacter(char),
    #[error("Unterminated string")]
    UnterminatedString,
}

#[derive(Debug, Error)]
pub enum CompilerError {
    #[error("Usage: lox [script]")]
    Usage,
    #[error("IOError: cannot read {}: {source}", path.display())]
    IO {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("ScanError: {count} error(s) reported")]
    Scan { count: usize },
    #[error("OutputError: {0}")]
    Output(#[source] std::io::Error),
}

impl CompilerError {
    /// Process exit code, following the sysexits convention.
    pub fn exit_code(&self) -> i32 {
        match self {
            CompilerError::Usage => 64,
            CompilerError::Scan { .. } => 65,
            CompilerError::IO { .. } => 66,
            CompilerError::Output(_) => 74,
            CompilerError::Config(_) => 78,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access {}: {source}", path.display())]
    IO {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
