//! Node configuration
//!
//! [`NodeConfig`] is the full mutable configuration record of one managed
//! agent. Launchers and retention strategies are closed tagged variants:
//! the set of strategies the core supports is fixed at compile time rather
//! than discovered through a host plugin mechanism.

use crate::labels::LabelSet;
use crate::name::NodeName;
use serde::{Deserialize, Serialize};

/// Placeholder token in a command template that denotes the target node's
/// own name
pub const NAME_PLACEHOLDER: &str = "$NAME";

/// Whether a node accepts any job or only jobs pinned to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UsageMode {
    /// Accept any job
    #[default]
    Normal,

    /// Only accept jobs tied to this node
    Exclusive,
}

impl std::fmt::Display for UsageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Uppercase to match the host's rendering of mode values
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Exclusive => write!(f, "EXCLUSIVE"),
        }
    }
}

/// Mechanism used to start the agent process
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Launcher {
    /// The agent connects to the host on its own
    #[default]
    Inbound,

    /// The host starts the agent via a shell command
    ///
    /// The command may be a template containing [`NAME_PLACEHOLDER`];
    /// resolve it per node with [`Launcher::resolve_for`].
    Command {
        /// Command line, possibly templated
        command: String,
    },
}

impl Launcher {
    /// Command launcher from a command line or template
    #[inline]
    pub fn command(command: impl Into<String>) -> Self {
        Self::Command {
            command: command.into(),
        }
    }

    /// Resolve the launcher for one concrete node
    ///
    /// Every occurrence of [`NAME_PLACEHOLDER`] in a command template is
    /// substituted with the node's name, so the same template produces a
    /// different command per node. Non-templated launchers are returned
    /// unchanged.
    #[must_use]
    pub fn resolve_for(&self, name: &NodeName) -> Self {
        match self {
            Self::Command { command } => Self::Command {
                command: command.replace(NAME_PLACEHOLDER, name.as_str()),
            },
            Self::Inbound => Self::Inbound,
        }
    }
}

impl std::fmt::Display for Launcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inbound => write!(f, "inbound agent"),
            Self::Command { command } => write!(f, "command: {command}"),
        }
    }
}

/// Policy governing when a node is brought online/offline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RetentionStrategy {
    /// Keep the node online at all times
    #[default]
    Always,

    /// Bring the node up when demanded, take it down when idle
    OnDemand {
        /// Minutes of queued demand before the node is started
        in_demand_delay_min: u32,

        /// Minutes of idleness before the node is stopped
        idle_delay_min: u32,
    },
}

impl std::fmt::Display for RetentionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Always => write!(f, "always on"),
            Self::OnDemand {
                in_demand_delay_min,
                idle_delay_min,
            } => write!(
                f,
                "on demand (in demand delay: {in_demand_delay_min} min, \
                 idle delay: {idle_delay_min} min)"
            ),
        }
    }
}

/// Full mutable configuration of one managed node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Free-text description
    pub description: String,

    /// Number of concurrent executors (a valid config has at least 1;
    /// enforced when a patch is validated)
    pub num_executors: u32,

    /// Remote filesystem root on the agent machine
    pub remote_fs: String,

    /// Scheduling labels
    pub labels: LabelSet,

    /// Usage mode
    pub mode: UsageMode,

    /// Launch mechanism
    pub launcher: Launcher,

    /// Retention strategy
    pub retention: RetentionStrategy,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            description: String::new(),
            num_executors: 1,
            remote_fs: String::new(),
            labels: LabelSet::new(),
            mode: UsageMode::Normal,
            launcher: Launcher::Inbound,
            retention: RetentionStrategy::Always,
        }
    }
}

impl NodeConfig {
    /// Default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With executor count
    #[inline]
    #[must_use]
    pub fn with_executors(mut self, num_executors: u32) -> Self {
        self.num_executors = num_executors;
        self
    }

    /// With remote filesystem root
    #[inline]
    #[must_use]
    pub fn with_remote_fs(mut self, remote_fs: impl Into<String>) -> Self {
        self.remote_fs = remote_fs.into();
        self
    }

    /// With labels parsed from a space-separated string
    #[inline]
    #[must_use]
    pub fn with_labels(mut self, labels: impl Into<LabelSet>) -> Self {
        self.labels = labels.into();
        self
    }

    /// With usage mode
    #[inline]
    #[must_use]
    pub fn with_mode(mut self, mode: UsageMode) -> Self {
        self.mode = mode;
        self
    }

    /// With launcher
    #[inline]
    #[must_use]
    pub fn with_launcher(mut self, launcher: Launcher) -> Self {
        self.launcher = launcher;
        self
    }

    /// With retention strategy
    #[inline]
    #[must_use]
    pub fn with_retention(mut self, retention: RetentionStrategy) -> Self {
        self.retention = retention;
        self
    }
}
