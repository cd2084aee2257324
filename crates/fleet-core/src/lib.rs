//! Fleet Core - session-scoped filtering and bulk configuration
//!
//! The workflow this crate implements:
//! - A search filters the node registry and parks the ordered match list
//!   under the caller's session id ([`FilterSessionStore`])
//! - The caller marks which settings to change and supplies values
//!   ([`FieldPatch`])
//! - The engine applies the sparse patch to every selected node and
//!   reports exactly the fields it changed ([`BulkPatchEngine`],
//!   [`ChangeSummary`])
//! - Bulk create/delete flows cover provisioning ([`create_range`],
//!   [`create_named`], [`DeletePlan`])
//!
//! # Example
//!
//! ```rust,ignore
//! use fleet_core::{BulkPatchEngine, FieldPatch, FilterSessionStore, SearchCriteria, SessionId};
//!
//! let store = FilterSessionStore::new();
//! let session = SessionId::from("user-42");
//!
//! let targets = store.search(&session, SearchCriteria::any().with_label("linux"), &registry.list_all());
//! let summary = BulkPatchEngine::new().apply(
//!     &registry,
//!     &targets,
//!     &FieldPatch::new().with_executors(2),
//! )?;
//! println!("changed {} settings on {} nodes", summary.applied.len(), summary.node_count);
//! ```

#![warn(unreachable_pub)]

pub mod criteria;
pub mod engine;
pub mod error;
pub mod patch;
pub mod provision;
pub mod session;

pub use criteria::SearchCriteria;
pub use engine::BulkPatchEngine;
pub use error::{
    ApplyError, NodeFailure, PartialApplyError, ProvisionError, ValidationError,
};
pub use patch::{AppliedSetting, ChangeSummary, FieldPatch, LabelOp, LabelPatch};
pub use provision::{
    create_named, create_range, CreateReport, DeletePlan, DeleteReport, NameRange,
};
pub use session::{FilterSession, FilterSessionStore, SessionId};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the fleet core
    pub use crate::{
        BulkPatchEngine, DeletePlan, FieldPatch, FilterSessionStore, LabelOp, NameRange,
        SearchCriteria, SessionId,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
