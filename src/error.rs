//! Error types for powledger

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// A block was addressed by an index outside `1..=len`.
    InvalidIndex { index: u64, len: usize },
    /// The block's `prev_hash` does not match the stored hash of its predecessor.
    InvalidBlockLinkage { index: u64 },
    /// The block's proof does not solve the puzzle against its predecessor's proof.
    InvalidProofOfWork { index: u64 },
    InvalidInput(String),
    ConfigError(String),
    IoError(String),
    SerializationError(String),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChainError::InvalidIndex { index, len } => {
                write!(f, "Invalid block index: {} (chain has {} blocks)", index, len)
            }
            ChainError::InvalidBlockLinkage { index } => {
                write!(f, "Invalid block linkage at block #{}", index)
            }
            ChainError::InvalidProofOfWork { index } => {
                write!(f, "Invalid proof of work at block #{}", index)
            }
            ChainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ChainError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ChainError::IoError(msg) => write!(f, "IO error: {}", msg),
            ChainError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ChainError {}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::IoError(err.to_string())
    }
}

impl From<toml::de::Error> for ChainError {
    fn from(err: toml::de::Error) -> Self {
        ChainError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::SerializationError(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_index_message() {
        let err = ChainError::InvalidIndex { index: 7, len: 2 };
        assert_eq!(err.to_string(), "Invalid block index: 7 (chain has 2 blocks)");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ChainError = io.into();
        assert!(matches!(err, ChainError::IoError(_)));
        assert!(err.to_string().starts_with("IO error:"));
    }
}
