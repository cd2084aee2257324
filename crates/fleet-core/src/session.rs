//! Session-scoped filter state
//!
//! Each user interaction carries an opaque session id; the store keeps, per
//! id, the most recent search criteria and the resulting ordered match
//! list. A session id is the isolation boundary: the store never mixes
//! state across ids, and it performs no authentication of its own.

use crate::criteria::SearchCriteria;
use dashmap::DashMap;
use fleet_node::{NodeConfig, NodeName};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Opaque per-user session identifier, supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a caller-supplied id
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One session's filter state: last criteria and resulting matches
#[derive(Debug, Clone)]
pub struct FilterSession {
    /// Criteria of the most recent search
    pub criteria: SearchCriteria,

    /// Matching nodes of the most recent search, in registry order
    pub matches: Vec<NodeName>,
}

/// Process-wide map from session id to filter state
///
/// Reads and writes of one id are atomic with respect to each other; a
/// search cannot interleave with a concurrent read of the same id into a
/// torn result. Distinct ids are fully independent. A session holds a
/// single slot: each search overwrites the previous one, no history.
#[derive(Debug, Default)]
pub struct FilterSessionStore {
    sessions: DashMap<SessionId, FilterSession>,
}

impl FilterSessionStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter a registry snapshot and store the result under the session
    ///
    /// Nodes are kept in the order of the supplied snapshot. The session's
    /// previous criteria and matches are overwritten. An empty result is
    /// valid and returned as such.
    pub fn search(
        &self,
        session: &SessionId,
        criteria: SearchCriteria,
        nodes: &[(NodeName, NodeConfig)],
    ) -> Vec<NodeName> {
        let matches: Vec<NodeName> = nodes
            .iter()
            .filter(|(name, config)| criteria.matches(name, config))
            .map(|(name, _)| name.clone())
            .collect();

        debug!(
            session = %session,
            candidates = nodes.len(),
            matched = matches.len(),
            "session search"
        );

        self.sessions.insert(
            session.clone(),
            FilterSession {
                criteria,
                matches: matches.clone(),
            },
        );
        matches
    }

    /// The session's last computed matches
    ///
    /// A session that has never searched has nothing selected, so an
    /// unknown id yields an empty list rather than an error.
    #[must_use]
    pub fn node_list(&self, session: &SessionId) -> Vec<NodeName> {
        self.sessions
            .get(session)
            .map(|state| state.matches.clone())
            .unwrap_or_default()
    }

    /// The session's full stored state, if it has searched
    ///
    /// Returns criteria and matches as one consistent snapshot, for
    /// callers that re-render the search form alongside the result list.
    #[must_use]
    pub fn session(&self, session: &SessionId) -> Option<FilterSession> {
        self.sessions.get(session).map(|state| state.value().clone())
    }

    /// The session's last search criteria, if it has searched
    #[must_use]
    pub fn criteria(&self, session: &SessionId) -> Option<SearchCriteria> {
        self.sessions.get(session).map(|state| state.criteria.clone())
    }

    /// Drop the session's stored state; idempotent
    pub fn clear(&self, session: &SessionId) {
        self.sessions.remove(session);
    }

    /// Number of sessions currently holding state
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check if no session holds state
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
