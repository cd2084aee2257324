//! Testing utilities for the fleet workspace
//!
//! Shared fixtures: canned node names and configs, a registry seeded like
//! the host test bed, and a fault-injecting registry wrapper.

#![allow(missing_docs)]

use fleet_node::{NodeConfig, NodeName};
use fleet_registry::{InMemoryRegistry, NodeRegistry, RegistryError};
use parking_lot::Mutex;

pub fn node_name(s: &str) -> NodeName {
    NodeName::new(s).unwrap()
}

pub fn plain_config() -> NodeConfig {
    NodeConfig::default()
}

/// Registry seeded with the four-node fixture the host UI tests use:
/// two plain agents plus two with distinctive settings to filter on.
pub fn seeded_registry() -> InMemoryRegistry {
    let registry = InMemoryRegistry::new();
    registry.add(node_name("slave0"), plain_config()).unwrap();
    registry.add(node_name("slave1"), plain_config()).unwrap();
    registry
        .add(
            node_name("slave2"),
            NodeConfig::new()
                .with_description("This is the description on dumbSlave1")
                .with_remote_fs("HOME/slave2")
                .with_executors(2)
                .with_labels("LABEL1 LABEL3"),
        )
        .unwrap();
    registry
        .add(
            node_name("slave3"),
            NodeConfig::new()
                .with_description("This is the description on dumbSlave2")
                .with_remote_fs("home/slave3")
                .with_executors(4)
                .with_labels("label1"),
        )
        .unwrap();
    registry
}

/// Registry wrapper that fails `update` for chosen node names.
///
/// Everything else delegates to the wrapped in-memory registry. Used to
/// exercise partial-apply reporting.
#[derive(Debug, Default)]
pub struct FlakyRegistry {
    inner: InMemoryRegistry,
    failing: Mutex<Vec<NodeName>>,
}

impl FlakyRegistry {
    pub fn new(inner: InMemoryRegistry) -> Self {
        Self {
            inner,
            failing: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_updates_for(&self, name: NodeName) {
        self.failing.lock().push(name);
    }

    pub fn inner(&self) -> &InMemoryRegistry {
        &self.inner
    }
}

impl NodeRegistry for FlakyRegistry {
    fn list_all(&self) -> Vec<(NodeName, NodeConfig)> {
        self.inner.list_all()
    }

    fn get(&self, name: &NodeName) -> Option<NodeConfig> {
        self.inner.get(name)
    }

    fn add(&self, name: NodeName, config: NodeConfig) -> Result<(), RegistryError> {
        self.inner.add(name, config)
    }

    fn remove(&self, name: &NodeName) -> Result<(), RegistryError> {
        self.inner.remove(name)
    }

    fn update(&self, name: &NodeName, config: NodeConfig) -> Result<(), RegistryError> {
        if self.failing.lock().contains(name) {
            return Err(RegistryError::Storage {
                node: name.clone(),
                reason: "injected write failure".to_string(),
            });
        }
        self.inner.update(name, config)
    }
}
