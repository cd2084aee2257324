//! Registry trait and in-memory implementation

use crate::error::RegistryError;
use fleet_node::{NodeConfig, NodeName};
use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, info};

/// Storage boundary for managed nodes
///
/// Calls are synchronous and may fail; no retry happens behind this trait.
/// Implementations must keep iteration order stable across repeated reads
/// of unchanged state.
pub trait NodeRegistry: Send + Sync {
    /// Snapshot of every node in registry order
    fn list_all(&self) -> Vec<(NodeName, NodeConfig)>;

    /// Current configuration of one node, if registered
    fn get(&self, name: &NodeName) -> Option<NodeConfig>;

    /// Register a new node
    ///
    /// # Errors
    /// [`RegistryError::NameConflict`] if the name is already taken.
    fn add(&self, name: NodeName, config: NodeConfig) -> Result<(), RegistryError>;

    /// Remove a node
    ///
    /// # Errors
    /// [`RegistryError::NotFound`] if no such node is registered.
    fn remove(&self, name: &NodeName) -> Result<(), RegistryError>;

    /// Replace a node's configuration
    ///
    /// # Errors
    /// [`RegistryError::NotFound`] if no such node is registered;
    /// implementations backed by real storage may surface
    /// [`RegistryError::Storage`].
    fn update(&self, name: &NodeName, config: NodeConfig) -> Result<(), RegistryError>;
}

/// In-memory registry with insertion-ordered iteration
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    nodes: RwLock<IndexMap<NodeName, NodeConfig>>,
}

impl InMemoryRegistry {
    /// Create an empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    /// Check if no nodes are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }
}

impl NodeRegistry for InMemoryRegistry {
    fn list_all(&self) -> Vec<(NodeName, NodeConfig)> {
        self.nodes
            .read()
            .iter()
            .map(|(name, config)| (name.clone(), config.clone()))
            .collect()
    }

    fn get(&self, name: &NodeName) -> Option<NodeConfig> {
        self.nodes.read().get(name).cloned()
    }

    fn add(&self, name: NodeName, config: NodeConfig) -> Result<(), RegistryError> {
        let mut nodes = self.nodes.write();
        if nodes.contains_key(&name) {
            return Err(RegistryError::NameConflict(name));
        }
        info!(node = %name, "node registered");
        nodes.insert(name, config);
        Ok(())
    }

    fn remove(&self, name: &NodeName) -> Result<(), RegistryError> {
        let mut nodes = self.nodes.write();
        // shift_remove keeps the iteration order of the survivors
        match nodes.shift_remove(name) {
            Some(_) => {
                info!(node = %name, "node removed");
                Ok(())
            }
            None => Err(RegistryError::NotFound(name.clone())),
        }
    }

    fn update(&self, name: &NodeName, config: NodeConfig) -> Result<(), RegistryError> {
        let mut nodes = self.nodes.write();
        match nodes.get_mut(name) {
            Some(slot) => {
                *slot = config;
                debug!(node = %name, "node updated");
                Ok(())
            }
            None => Err(RegistryError::NotFound(name.clone())),
        }
    }
}
