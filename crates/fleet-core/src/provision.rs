//! Bulk node creation and deletion
//!
//! Creation accepts either a zero-padded name range or an explicit name
//! list. Duplicates within one request collapse to a single creation; a
//! collision with an existing registry entry fails only that creation and
//! the siblings proceed. New nodes start from a template clone (copy-from)
//! or from the host defaults.
//!
//! Deletion is a two-step flow: a [`DeletePlan`] holds the pending target
//! set until the caller either confirms or cancels. Cancel drops the plan
//! and leaves the registry untouched.

use crate::error::ProvisionError;
use fleet_node::{NodeConfig, NodeName};
use fleet_registry::{NodeRegistry, RegistryError};
use tracing::{info, warn};

/// Contiguous range of generated node names: `base` + zero-padded index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRange {
    base: String,
    first: u32,
    last: u32,
    pad_width: usize,
}

impl NameRange {
    /// Range covering `first..=last` with indices padded to `pad_width`
    ///
    /// # Errors
    /// [`ProvisionError::EmptyRange`] when `last < first`.
    pub fn new(
        base: impl Into<String>,
        first: u32,
        last: u32,
        pad_width: usize,
    ) -> Result<Self, ProvisionError> {
        if last < first {
            return Err(ProvisionError::EmptyRange { first, last });
        }
        Ok(Self {
            base: base.into(),
            first,
            last,
            pad_width,
        })
    }

    /// Generate the names of the range, in index order
    ///
    /// # Errors
    /// [`ProvisionError::InvalidName`] if the base makes a name that fails
    /// node-name validation.
    pub fn names(&self) -> Result<Vec<NodeName>, ProvisionError> {
        (self.first..=self.last)
            .map(|index| {
                NodeName::new(format!(
                    "{}{:0width$}",
                    self.base,
                    index,
                    width = self.pad_width
                ))
                .map_err(ProvisionError::from)
            })
            .collect()
    }
}

/// Outcome of a bulk creation request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateReport {
    /// Nodes created, in request order
    pub created: Vec<NodeName>,

    /// Requested names that collided with existing registry entries
    pub conflicts: Vec<NodeName>,
}

impl CreateReport {
    /// Check if every requested creation succeeded
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Create one node per unique requested name
///
/// Duplicate names within the request collapse to a single creation, so
/// the operation is idempotent over the request. Each node starts as a
/// clone of `template` when given, else as [`NodeConfig::default`]. A name
/// collision with the registry fails that single creation and is recorded
/// in the report; the remaining creations proceed.
pub fn create_named<R>(
    registry: &R,
    names: &[NodeName],
    template: Option<&NodeConfig>,
) -> CreateReport
where
    R: NodeRegistry + ?Sized,
{
    let mut report = CreateReport::default();
    let mut requested: Vec<&NodeName> = Vec::new();

    for name in names {
        if requested.contains(&name) {
            continue;
        }
        requested.push(name);

        let config = template.cloned().unwrap_or_default();
        match registry.add(name.clone(), config) {
            Ok(()) => report.created.push(name.clone()),
            Err(RegistryError::NameConflict(_)) => {
                warn!(node = %name, "creation skipped, name taken");
                report.conflicts.push(name.clone());
            }
            Err(cause) => {
                warn!(node = %name, %cause, "creation failed");
                report.conflicts.push(name.clone());
            }
        }
    }

    info!(
        created = report.created.len(),
        conflicts = report.conflicts.len(),
        "bulk create finished"
    );
    report
}

/// Create one node per name in a generated range
///
/// # Errors
/// [`ProvisionError`] if the range produces no valid names; creation
/// conflicts are reported per name, not as an error.
pub fn create_range<R>(
    registry: &R,
    range: &NameRange,
    template: Option<&NodeConfig>,
) -> Result<CreateReport, ProvisionError>
where
    R: NodeRegistry + ?Sized,
{
    let names = range.names()?;
    Ok(create_named(registry, &names, template))
}

/// Outcome of a confirmed bulk deletion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    /// Nodes removed from the registry
    pub deleted: Vec<NodeName>,

    /// Targets that were already gone when the plan was confirmed
    pub missing: Vec<NodeName>,
}

/// Pending bulk deletion awaiting explicit confirmation
///
/// The plan owns the selected target set. [`DeletePlan::confirm`] removes
/// every target; [`DeletePlan::cancel`] discards the pending set and
/// leaves the registry untouched. Both consume the plan, so it cannot be
/// replayed.
#[derive(Debug, Clone)]
pub struct DeletePlan {
    targets: Vec<NodeName>,
}

impl DeletePlan {
    /// Plan the deletion of `targets`
    #[inline]
    #[must_use]
    pub fn new(targets: Vec<NodeName>) -> Self {
        Self { targets }
    }

    /// The pending target set
    #[inline]
    #[must_use]
    pub fn targets(&self) -> &[NodeName] {
        &self.targets
    }

    /// Remove every targeted node from the registry
    ///
    /// Targets already gone are skipped and reported as missing.
    pub fn confirm<R>(self, registry: &R) -> DeleteReport
    where
        R: NodeRegistry + ?Sized,
    {
        let mut report = DeleteReport::default();
        for name in self.targets {
            match registry.remove(&name) {
                Ok(()) => report.deleted.push(name),
                Err(_) => report.missing.push(name),
            }
        }
        info!(
            deleted = report.deleted.len(),
            missing = report.missing.len(),
            "bulk delete confirmed"
        );
        report
    }

    /// Discard the pending target set without touching the registry
    pub fn cancel(self) {
        info!(targets = self.targets.len(), "bulk delete cancelled");
    }
}
