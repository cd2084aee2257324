//! Label sets
//!
//! Labels are free-text scheduling tags stored by the host as a single
//! space-separated string. [`LabelSet`] gives that string real set
//! semantics: tokens are unique, membership is case-sensitive, and the
//! first-seen order of tokens is preserved so the rendered string stays
//! stable for tokens an operation did not touch.

use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free set of label tokens
///
/// The wire form is a plain token array; duplicates in incoming data
/// collapse on the way in so the uniqueness invariant holds no matter how
/// a set was built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct LabelSet {
    tokens: Vec<String>,
}

impl LabelSet {
    /// Create an empty label set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a space-separated label string
    ///
    /// Duplicate tokens in the input collapse to the first occurrence.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let mut set = Self::new();
        for token in s.split_whitespace() {
            set.push_unique(token);
        }
        set
    }

    /// Check token membership (case-sensitive, as stored)
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Union with another set
    ///
    /// Existing tokens keep their order; tokens of `other` not already
    /// present are appended in `other`'s order. Adding a present token is
    /// a no-op, so the operation is idempotent.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for token in &other.tokens {
            result.push_unique(token);
        }
        result
    }

    /// Difference with another set
    ///
    /// Surviving tokens keep their relative order. Removing an absent
    /// token is a no-op, so the operation is idempotent.
    #[must_use]
    pub fn remove(&self, other: &Self) -> Self {
        Self {
            tokens: self
                .tokens
                .iter()
                .filter(|t| !other.contains(t))
                .cloned()
                .collect(),
        }
    }

    /// Iterate over tokens in stored order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Number of tokens
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the set has no tokens
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn push_unique(&mut self, token: &str) {
        if !self.contains(token) {
            self.tokens.push(token.to_string());
        }
    }
}

impl std::fmt::Display for LabelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

impl From<&str> for LabelSet {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<Vec<String>> for LabelSet {
    fn from(tokens: Vec<String>) -> Self {
        let mut set = Self::new();
        for token in &tokens {
            set.push_unique(token);
        }
        set
    }
}

impl From<LabelSet> for Vec<String> {
    fn from(set: LabelSet) -> Self {
        set.tokens
    }
}
