//! Sparse field patches and change summaries
//!
//! A [`FieldPatch`] carries one tagged optional per patchable setting, so
//! "not enabled" and "set to the default value" are statically distinct.
//! Applying a patch yields a [`ChangeSummary`] listing exactly the enabled
//! fields - a disabled field never changes node state and never shows up
//! in the summary.

use crate::error::ValidationError;
use fleet_node::{LabelSet, Launcher, NodeConfig, NodeName, RetentionStrategy, UsageMode};
use serde::{Deserialize, Serialize};

/// How a label patch combines with a node's existing label set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelOp {
    /// Replace the full token set
    Set,

    /// Union with the existing tokens
    Add,

    /// Remove the given tokens from the existing set
    Remove,
}

impl std::fmt::Display for LabelOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Set => write!(f, "set"),
            Self::Add => write!(f, "add"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// Enabled label change: an operation plus its token set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPatch {
    /// Merge operation
    pub op: LabelOp,

    /// Tokens to set, add or remove (de-duplicated on parse)
    pub tokens: LabelSet,
}

/// Sparse update over node settings; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPatch {
    /// New description
    pub description: Option<String>,

    /// New executor count (must be positive to validate)
    pub num_executors: Option<u32>,

    /// New remote filesystem root
    pub remote_fs: Option<String>,

    /// Label change
    pub labels: Option<LabelPatch>,

    /// New usage mode
    pub mode: Option<UsageMode>,

    /// New launcher; command templates are resolved per node
    pub launcher: Option<Launcher>,

    /// New retention strategy, constructed fresh per node
    pub retention: Option<RetentionStrategy>,
}

impl FieldPatch {
    /// Patch with every field disabled
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the description field
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Enable the executor-count field
    #[inline]
    #[must_use]
    pub fn with_executors(mut self, num_executors: u32) -> Self {
        self.num_executors = Some(num_executors);
        self
    }

    /// Enable the remote filesystem root field
    #[inline]
    #[must_use]
    pub fn with_remote_fs(mut self, remote_fs: impl Into<String>) -> Self {
        self.remote_fs = Some(remote_fs.into());
        self
    }

    /// Enable a label change
    #[inline]
    #[must_use]
    pub fn with_labels(mut self, op: LabelOp, tokens: impl Into<LabelSet>) -> Self {
        self.labels = Some(LabelPatch {
            op,
            tokens: tokens.into(),
        });
        self
    }

    /// Enable the usage-mode field
    #[inline]
    #[must_use]
    pub fn with_mode(mut self, mode: UsageMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Enable the launcher field
    #[inline]
    #[must_use]
    pub fn with_launcher(mut self, launcher: Launcher) -> Self {
        self.launcher = Some(launcher);
        self
    }

    /// Enable the retention-strategy field
    #[inline]
    #[must_use]
    pub fn with_retention(mut self, retention: RetentionStrategy) -> Self {
        self.retention = Some(retention);
        self
    }

    /// Check if every field is disabled
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.num_executors.is_none()
            && self.remote_fs.is_none()
            && self.labels.is_none()
            && self.mode.is_none()
            && self.launcher.is_none()
            && self.retention.is_none()
    }

    /// Validate every enabled field
    ///
    /// Pure pre-check over the patch itself, no I/O. The engine runs this
    /// once before mutating any node, which makes a batch all-or-nothing
    /// with respect to validation.
    ///
    /// # Errors
    /// [`ValidationError`] on the first malformed enabled field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.num_executors == Some(0) {
            return Err(ValidationError::NonPositiveExecutors);
        }
        if let Some(labels) = &self.labels {
            if labels.tokens.is_empty() {
                return Err(ValidationError::EmptyLabelPatch { op: labels.op });
            }
        }
        Ok(())
    }

    /// Apply every enabled field to one node's configuration
    ///
    /// Assumes the patch already validated. Disabled fields leave the
    /// configuration untouched.
    pub(crate) fn apply_to(&self, name: &NodeName, config: &mut NodeConfig) {
        if let Some(description) = &self.description {
            config.description.clone_from(description);
        }
        if let Some(num_executors) = self.num_executors {
            config.num_executors = num_executors;
        }
        if let Some(remote_fs) = &self.remote_fs {
            config.remote_fs.clone_from(remote_fs);
        }
        if let Some(labels) = &self.labels {
            config.labels = match labels.op {
                LabelOp::Set => labels.tokens.clone(),
                LabelOp::Add => config.labels.add(&labels.tokens),
                LabelOp::Remove => config.labels.remove(&labels.tokens),
            };
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(launcher) = &self.launcher {
            config.launcher = launcher.resolve_for(name);
        }
        if let Some(retention) = self.retention {
            config.retention = retention;
        }
    }

    /// Summary of the enabled fields, in fixed field order
    #[must_use]
    pub(crate) fn summary(&self, node_count: usize) -> ChangeSummary {
        let mut applied = Vec::new();
        if let Some(description) = &self.description {
            applied.push(AppliedSetting::Description(description.clone()));
        }
        if let Some(num_executors) = self.num_executors {
            applied.push(AppliedSetting::Executors(num_executors));
        }
        if let Some(remote_fs) = &self.remote_fs {
            applied.push(AppliedSetting::RemoteFs(remote_fs.clone()));
        }
        if let Some(labels) = &self.labels {
            applied.push(match labels.op {
                LabelOp::Set => AppliedSetting::LabelsSet(labels.tokens.clone()),
                LabelOp::Add => AppliedSetting::LabelsAdded(labels.tokens.clone()),
                LabelOp::Remove => AppliedSetting::LabelsRemoved(labels.tokens.clone()),
            });
        }
        if let Some(mode) = self.mode {
            applied.push(AppliedSetting::Mode(mode));
        }
        if let Some(launcher) = &self.launcher {
            applied.push(AppliedSetting::Launcher(launcher.clone()));
        }
        if let Some(retention) = self.retention {
            applied.push(AppliedSetting::Retention(retention));
        }
        ChangeSummary { applied, node_count }
    }
}

/// One applied field with the effective value, for confirmation rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppliedSetting {
    /// Description replaced
    Description(String),

    /// Executor count replaced
    Executors(u32),

    /// Remote filesystem root replaced
    RemoteFs(String),

    /// Label set replaced
    LabelsSet(LabelSet),

    /// Labels added
    LabelsAdded(LabelSet),

    /// Labels removed
    LabelsRemoved(LabelSet),

    /// Usage mode replaced
    Mode(UsageMode),

    /// Launcher replaced (the unresolved template)
    Launcher(Launcher),

    /// Retention strategy replaced
    Retention(RetentionStrategy),
}

impl std::fmt::Display for AppliedSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Captions match the confirmation rows the host renders
        match self {
            Self::Description(value) => write!(f, "Description: {value}"),
            Self::Executors(value) => write!(f, "# of executors: {value}"),
            Self::RemoteFs(value) => write!(f, "Remote FS root: {value}"),
            Self::LabelsSet(value) => write!(f, "Set labels: {value}"),
            Self::LabelsAdded(value) => write!(f, "Add labels: {value}"),
            Self::LabelsRemoved(value) => write!(f, "Remove labels: {value}"),
            Self::Mode(value) => write!(f, "Usage mode: {value}"),
            Self::Launcher(value) => write!(f, "Launch method: {value}"),
            Self::Retention(value) => write!(f, "Availability: {value}"),
        }
    }
}

/// Summary of one bulk application: the applied fields and the batch size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    /// One record per enabled field, in fixed field order
    pub applied: Vec<AppliedSetting>,

    /// Number of targeted nodes
    pub node_count: usize,
}

impl ChangeSummary {
    /// Check if no field was applied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}
