//! Fleet Node - shared value types for managed build agents
//!
//! Defines the configuration vocabulary every other fleet crate speaks:
//! - Node names (the registry key)
//! - Label sets with order-preserving set algebra
//! - Usage mode, launcher and retention-strategy variants
//! - The full per-node configuration record

#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod labels;
pub mod name;

pub use config::{Launcher, NodeConfig, RetentionStrategy, UsageMode, NAME_PLACEHOLDER};
pub use error::NodeError;
pub use labels::LabelSet;
pub use name::NodeName;
