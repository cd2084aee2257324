//! Bulk patch engine
//!
//! Applies a sparse [`FieldPatch`] to every node in a target set. The
//! patch is validated once, up front, before any node is touched; per-node
//! persistence failures after that are collected and reported together
//! while the remaining nodes still proceed. No rollback: the host registry
//! has no multi-node transaction primitive, so the batch is best-effort
//! after validation.

use crate::error::{ApplyError, NodeFailure, PartialApplyError};
use crate::patch::{ChangeSummary, FieldPatch};
use fleet_node::NodeName;
use fleet_registry::{NodeRegistry, RegistryError};
use tracing::{debug, info, warn};

/// Applies sparse patches across node sets
#[derive(Debug, Clone, Copy, Default)]
pub struct BulkPatchEngine;

impl BulkPatchEngine {
    /// Create an engine
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Apply `patch` to every node in `targets`, in order
    ///
    /// # Errors
    /// - [`ApplyError::Validation`] if the patch is malformed; no node was
    ///   touched.
    /// - [`ApplyError::Partial`] if some nodes failed to persist after
    ///   validation passed; the error lists the failed nodes with their
    ///   causes, and carries the summary applied to the rest.
    pub fn apply<R>(
        &self,
        registry: &R,
        targets: &[NodeName],
        patch: &FieldPatch,
    ) -> Result<ChangeSummary, ApplyError>
    where
        R: NodeRegistry + ?Sized,
    {
        patch.validate()?;

        let mut failures = Vec::new();
        for name in targets {
            match registry.get(name) {
                Some(mut config) => {
                    patch.apply_to(name, &mut config);
                    match registry.update(name, config) {
                        Ok(()) => debug!(node = %name, "patch applied"),
                        Err(cause) => {
                            warn!(node = %name, %cause, "patch failed");
                            failures.push(NodeFailure {
                                node: name.clone(),
                                cause,
                            });
                        }
                    }
                }
                // The node vanished between selection and apply
                None => failures.push(NodeFailure {
                    node: name.clone(),
                    cause: RegistryError::NotFound(name.clone()),
                }),
            }
        }

        let summary = patch.summary(targets.len());
        if failures.is_empty() {
            info!(
                nodes = targets.len(),
                fields = summary.applied.len(),
                "bulk patch applied"
            );
            Ok(summary)
        } else {
            Err(PartialApplyError {
                failures,
                node_count: targets.len(),
                summary,
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::patch::{AppliedSetting, LabelOp};
    use fleet_node::{Launcher, NodeConfig, RetentionStrategy, UsageMode};
    use fleet_registry::InMemoryRegistry;
    use pretty_assertions::assert_eq;

    fn name(s: &str) -> NodeName {
        NodeName::new(s).unwrap()
    }

    fn registry_of(nodes: &[(&str, NodeConfig)]) -> InMemoryRegistry {
        let registry = InMemoryRegistry::new();
        for (n, config) in nodes {
            registry.add(name(n), config.clone()).unwrap();
        }
        registry
    }

    fn all_names(registry: &InMemoryRegistry) -> Vec<NodeName> {
        registry.list_all().into_iter().map(|(n, _)| n).collect()
    }

    #[test]
    fn replaces_description_on_every_target() {
        let registry = registry_of(&[
            ("slave0", NodeConfig::new()),
            ("slave1", NodeConfig::new().with_description("old")),
        ]);
        let targets = all_names(&registry);

        let summary = BulkPatchEngine::new()
            .apply(
                &registry,
                &targets,
                &FieldPatch::new().with_description("This description is more describable..."),
            )
            .unwrap();

        assert_eq!(summary.node_count, 2);
        for (_, config) in registry.list_all() {
            assert_eq!(config.description, "This description is more describable...");
        }
    }

    #[test]
    fn disabled_fields_survive_across_the_batch() {
        let registry = registry_of(&[(
            "slave2",
            NodeConfig::new()
                .with_executors(2)
                .with_remote_fs("HOME/slave2")
                .with_labels("LABEL1 LABEL3"),
        )]);
        let targets = all_names(&registry);

        let summary = BulkPatchEngine::new()
            .apply(&registry, &targets, &FieldPatch::new().with_executors(4))
            .unwrap();

        assert_eq!(summary.applied, vec![AppliedSetting::Executors(4)]);

        let config = registry.get(&name("slave2")).unwrap();
        assert_eq!(config.num_executors, 4);
        assert_eq!(config.remote_fs, "HOME/slave2");
        assert_eq!(config.labels.to_string(), "LABEL1 LABEL3");
    }

    #[test]
    fn launcher_template_yields_per_node_commands() {
        let registry = registry_of(&[
            ("slave0", NodeConfig::new()),
            ("slave1", NodeConfig::new()),
        ]);
        let targets = all_names(&registry);

        BulkPatchEngine::new()
            .apply(
                &registry,
                &targets,
                &FieldPatch::new().with_launcher(Launcher::command("$NAME.run")),
            )
            .unwrap();

        assert_eq!(
            registry.get(&name("slave0")).unwrap().launcher,
            Launcher::command("slave0.run")
        );
        assert_eq!(
            registry.get(&name("slave1")).unwrap().launcher,
            Launcher::command("slave1.run")
        );
    }

    #[test]
    fn invalid_patch_touches_no_node() {
        let registry = registry_of(&[("slave0", NodeConfig::new().with_description("keep"))]);
        let targets = all_names(&registry);

        let result = BulkPatchEngine::new().apply(
            &registry,
            &targets,
            &FieldPatch::new().with_description("lost").with_executors(0),
        );

        assert!(matches!(
            result,
            Err(ApplyError::Validation(ValidationError::NonPositiveExecutors))
        ));
        assert_eq!(registry.get(&name("slave0")).unwrap().description, "keep");
    }

    #[test]
    fn vanished_node_is_reported_and_siblings_proceed() {
        let registry = registry_of(&[
            ("slave0", NodeConfig::new()),
            ("slave1", NodeConfig::new()),
        ]);
        let targets = vec![name("slave0"), name("ghost"), name("slave1")];

        let err = BulkPatchEngine::new()
            .apply(
                &registry,
                &targets,
                &FieldPatch::new().with_mode(UsageMode::Exclusive),
            )
            .unwrap_err();

        let ApplyError::Partial(partial) = err else {
            panic!("expected partial apply error");
        };
        assert_eq!(partial.node_count, 3);
        assert_eq!(partial.failures.len(), 1);
        assert_eq!(partial.failures[0].node, name("ghost"));
        assert_eq!(
            partial.failures[0].cause,
            RegistryError::NotFound(name("ghost"))
        );

        // Both surviving nodes were still updated
        assert_eq!(
            registry.get(&name("slave0")).unwrap().mode,
            UsageMode::Exclusive
        );
        assert_eq!(
            registry.get(&name("slave1")).unwrap().mode,
            UsageMode::Exclusive
        );
    }

    #[test]
    fn retention_is_constructed_fresh_per_node() {
        let registry = registry_of(&[
            ("slave0", NodeConfig::new()),
            ("slave1", NodeConfig::new()),
        ]);
        let targets = all_names(&registry);
        let retention = RetentionStrategy::OnDemand {
            in_demand_delay_min: 10,
            idle_delay_min: 20,
        };

        BulkPatchEngine::new()
            .apply(
                &registry,
                &targets,
                &FieldPatch::new().with_retention(retention),
            )
            .unwrap();

        for (_, config) in registry.list_all() {
            assert_eq!(config.retention, retention);
        }
    }

    #[test]
    fn empty_target_set_applies_to_nothing() {
        let registry = registry_of(&[("slave0", NodeConfig::new())]);

        let summary = BulkPatchEngine::new()
            .apply(&registry, &[], &FieldPatch::new().with_description("x"))
            .unwrap();

        assert_eq!(summary.node_count, 0);
        assert_eq!(registry.get(&name("slave0")).unwrap().description, "");
    }
}
