//! Node names
//!
//! A [`NodeName`] is the unique, immutable key a node is registered under.
//! The core never invents names on its own; it validates the ones callers
//! supply and hands them around as opaque handles.

use crate::error::NodeError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unique node name, used as the registry key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeName(String);

impl NodeName {
    /// Create a validated node name
    ///
    /// # Errors
    /// Returns [`NodeError::InvalidName`] if the name is empty or contains
    /// whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, NodeError> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(NodeError::InvalidName(name));
        }
        Ok(Self(name))
    }

    /// View as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeName {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for NodeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_accepts_plain_identifiers() {
        let name = NodeName::new("slave06").unwrap();
        assert_eq!(name.as_str(), "slave06");
        assert_eq!(name.to_string(), "slave06");
    }

    #[test]
    fn name_rejects_empty() {
        assert_eq!(
            NodeName::new(""),
            Err(NodeError::InvalidName(String::new()))
        );
    }

    #[test]
    fn name_rejects_whitespace() {
        assert!(NodeName::new("slave 1").is_err());
        assert!(NodeName::new("slave\t1").is_err());
    }

    #[test]
    fn name_parses_from_str() {
        let name: NodeName = "builder-a".parse().unwrap();
        assert_eq!(name.as_str(), "builder-a");
    }
}
