//! Search criteria
//!
//! A [`SearchCriteria`] is a set of optional predicates over a node's name
//! and configuration. Every supplied predicate must match (they are ANDed);
//! an absent predicate does not filter on its field at all.

use fleet_node::{NodeConfig, NodeName};
use serde::{Deserialize, Serialize};

/// Optional, ANDed predicates for filtering nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Substring of the node name (case-insensitive)
    pub name: Option<String>,

    /// Substring of the description (case-insensitive)
    pub description: Option<String>,

    /// Substring of the remote filesystem root (case-insensitive)
    pub remote_fs: Option<String>,

    /// Exact executor count
    pub executors: Option<u32>,

    /// Label token the node's label set must contain (case-sensitive,
    /// as stored)
    pub label: Option<String>,
}

impl SearchCriteria {
    /// Criteria with no predicates; matches every node
    #[inline]
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// With a name substring predicate
    #[inline]
    #[must_use]
    pub fn with_name(mut self, needle: impl Into<String>) -> Self {
        self.name = Some(needle.into());
        self
    }

    /// With a description substring predicate
    #[inline]
    #[must_use]
    pub fn with_description(mut self, needle: impl Into<String>) -> Self {
        self.description = Some(needle.into());
        self
    }

    /// With a remote filesystem root substring predicate
    #[inline]
    #[must_use]
    pub fn with_remote_fs(mut self, needle: impl Into<String>) -> Self {
        self.remote_fs = Some(needle.into());
        self
    }

    /// With an exact executor-count predicate
    #[inline]
    #[must_use]
    pub fn with_executors(mut self, executors: u32) -> Self {
        self.executors = Some(executors);
        self
    }

    /// With a label membership predicate
    #[inline]
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Check if no predicate is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.remote_fs.is_none()
            && self.executors.is_none()
            && self.label.is_none()
    }

    /// Evaluate all predicates against one node
    #[must_use]
    pub fn matches(&self, name: &NodeName, config: &NodeConfig) -> bool {
        if let Some(needle) = &self.name {
            if !contains_ignore_case(name.as_str(), needle) {
                return false;
            }
        }
        if let Some(needle) = &self.description {
            if !contains_ignore_case(&config.description, needle) {
                return false;
            }
        }
        if let Some(needle) = &self.remote_fs {
            if !contains_ignore_case(&config.remote_fs, needle) {
                return false;
            }
        }
        if let Some(executors) = self.executors {
            if config.num_executors != executors {
                return false;
            }
        }
        if let Some(label) = &self.label {
            if !config.labels.contains(label) {
                return false;
            }
        }
        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, config: NodeConfig) -> (NodeName, NodeConfig) {
        (NodeName::new(name).unwrap(), config)
    }

    #[test]
    fn empty_criteria_matches_everything() {
        let (name, config) = node("slave0", NodeConfig::new());
        assert!(SearchCriteria::any().is_empty());
        assert!(SearchCriteria::any().matches(&name, &config));
    }

    #[test]
    fn name_predicate_is_case_insensitive_substring() {
        let (name, config) = node("Slave2", NodeConfig::new());
        assert!(SearchCriteria::any().with_name("slave").matches(&name, &config));
        assert!(SearchCriteria::any().with_name("AVE2").matches(&name, &config));
        assert!(!SearchCriteria::any().with_name("builder").matches(&name, &config));
    }

    #[test]
    fn description_predicate_is_case_insensitive_substring() {
        let (name, config) = node(
            "slave2",
            NodeConfig::new().with_description("This is the description on dumbSlave1"),
        );
        assert!(SearchCriteria::any()
            .with_description("DUMBSLAVE1")
            .matches(&name, &config));
    }

    #[test]
    fn remote_fs_predicate_is_case_insensitive_substring() {
        let (name, config) = node("slave2", NodeConfig::new().with_remote_fs("HOME/slave2"));
        assert!(SearchCriteria::any()
            .with_remote_fs("home/slave2")
            .matches(&name, &config));
    }

    #[test]
    fn executors_predicate_is_exact() {
        let (name, config) = node("slave2", NodeConfig::new().with_executors(2));
        assert!(SearchCriteria::any().with_executors(2).matches(&name, &config));
        assert!(!SearchCriteria::any().with_executors(4).matches(&name, &config));
    }

    #[test]
    fn label_predicate_is_case_sensitive_membership() {
        let (name, config) = node("slave2", NodeConfig::new().with_labels("LABEL1 LABEL3"));
        assert!(SearchCriteria::any().with_label("LABEL1").matches(&name, &config));
        assert!(!SearchCriteria::any().with_label("label1").matches(&name, &config));
        assert!(!SearchCriteria::any().with_label("LABEL").matches(&name, &config));
    }

    #[test]
    fn predicates_are_anded() {
        let (name, config) = node(
            "slave2",
            NodeConfig::new()
                .with_description("This is the description on dumbSlave1")
                .with_remote_fs("HOME/slave2")
                .with_executors(2)
                .with_labels("LABEL1 LABEL3"),
        );

        let all = SearchCriteria::any()
            .with_name("slave2")
            .with_description("This is the description on dumbSlave1")
            .with_remote_fs("HOME/slave2")
            .with_executors(2)
            .with_label("LABEL1");
        assert!(all.matches(&name, &config));

        let one_off = all.with_executors(3);
        assert!(!one_off.matches(&name, &config));
    }
}
