//! Error types for the node registry

use fleet_node::NodeName;

/// Errors raised by registry operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A node with this name is already registered
    #[error("name conflict: {0}")]
    NameConflict(NodeName),

    /// No node with this name is registered
    #[error("node not found: {0}")]
    NotFound(NodeName),

    /// The backing store failed to persist a change
    #[error("storage failure on {node}: {reason}")]
    Storage {
        /// Node whose write failed
        node: NodeName,
        /// Store-specific failure description
        reason: String,
    },
}
