//! Error types for fleet-node value types

/// Errors raised while constructing node value types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeError {
    /// Name is empty or contains whitespace
    #[error("invalid node name: {0:?}")]
    InvalidName(String),
}
