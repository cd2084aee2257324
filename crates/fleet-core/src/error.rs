//! Error types for the fleet core
//!
//! Propagation policy: a malformed patch aborts the whole batch before any
//! node is touched; per-node persistence failures after validation are
//! collected into one aggregate report instead of aborting the remaining
//! nodes. Querying an unknown session is not an error at all - it degrades
//! to an empty result.

use crate::patch::{ChangeSummary, LabelOp};
use fleet_node::NodeName;
use fleet_registry::RegistryError;

/// Malformed patch value, rejected before any mutation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Executor count must be at least 1
    #[error("executor count must be positive")]
    NonPositiveExecutors,

    /// A label operation was enabled without any tokens
    #[error("label {op} operation requires at least one token")]
    EmptyLabelPatch {
        /// The operation that was enabled
        op: LabelOp,
    },
}

/// One node that failed to update, with its cause
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{node}: {cause}")]
pub struct NodeFailure {
    /// Node whose update failed
    pub node: NodeName,

    /// Why the update failed
    pub cause: RegistryError,
}

/// Aggregate report of per-node failures after validation passed
///
/// Nodes not listed in `failures` were successfully updated; nothing is
/// rolled back.
#[derive(Debug, Clone, thiserror::Error)]
#[error("bulk apply failed on {} of {} nodes", .failures.len(), .node_count)]
pub struct PartialApplyError {
    /// Nodes that failed, with individual causes
    pub failures: Vec<NodeFailure>,

    /// Total number of targeted nodes
    pub node_count: usize,

    /// What was applied to the nodes that did succeed
    pub summary: ChangeSummary,
}

/// Failure of a bulk patch application
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApplyError {
    /// The patch itself was rejected; no node was touched
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Some nodes failed to persist after validation passed
    #[error(transparent)]
    Partial(#[from] PartialApplyError),
}

/// Failure while building a creation request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProvisionError {
    /// Range bounds are inverted
    #[error("empty name range: first {first} > last {last}")]
    EmptyRange {
        /// First index requested
        first: u32,
        /// Last index requested
        last: u32,
    },

    /// A generated name failed node-name validation
    #[error(transparent)]
    InvalidName(#[from] fleet_node::NodeError),
}
