//! Fleet Registry - the node registry boundary
//!
//! The registry owns every managed node keyed by name. The rest of the
//! workspace talks to it through the [`NodeRegistry`] trait; the bundled
//! [`InMemoryRegistry`] backs the embedded host and every test.
//!
//! Iteration order is registry order: the order nodes were added, stable
//! across repeated reads of unchanged state.

#![warn(unreachable_pub)]

pub mod error;
pub mod registry;

pub use error::RegistryError;
pub use registry::{InMemoryRegistry, NodeRegistry};
