//! The identity a tracking call is about.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The person (or other identity) a tracking call concerns.
///
/// The receiving service treats identities as opaque text, so this is a thin
/// newtype: anything with a textual form converts in, nothing is validated.
/// Numeric account IDs and UUIDs convert via their canonical renderings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subject(String);

impl Subject {
    /// Creates a subject from anything textual.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a random anonymous identity (a v4 UUID).
    ///
    /// Useful for tracking visitors before sign-in; once the real identity
    /// is known, an alias call links the two.
    #[must_use]
    pub fn anonymous() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identity as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Subject {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Subject {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for Subject {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for Subject {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<Uuid> for Subject {
    fn from(id: Uuid) -> Self {
        Self(id.to_string())
    }
}

impl From<Subject> for String {
    fn from(subject: Subject) -> Self {
        subject.0
    }
}

impl AsRef<str> for Subject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
