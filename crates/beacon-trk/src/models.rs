//! Typed tracking calls and their endpoints.
//!
//! The tracking service accepts three kinds of call, each on its own
//! single-letter path. The structs here carry one call's fields and know how
//! to lay them out as a [`Query`]; keeping the event name and the alias
//! identity in separate types means the shared `_n` wire key can never be
//! assigned both meanings in a single request.

use std::str::FromStr;

use beacon_core::{Error, Properties, PropertyValue, Query, Result, Subject, Timestamp};
use serde::{Deserialize, Serialize};

/// The tracking service's endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    /// Record an event (`/e`).
    Record,
    /// Set subject properties without an event (`/s`).
    Set,
    /// Link two identities (`/a`).
    Alias,
}

impl Endpoint {
    /// Returns the endpoint's path segment.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Record => "e",
            Self::Set => "s",
            Self::Alias => "a",
        }
    }

    /// Returns all endpoints.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Record, Self::Set, Self::Alias]
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "e" => Ok(Self::Record),
            "s" => Ok(Self::Set),
            "a" => Ok(Self::Alias),
            _ => Err(Error::InvalidEndpoint(format!("Unknown endpoint: {s}"))),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// An event performed by a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Who performed the event.
    pub subject: Subject,
    /// Name of the event.
    pub event: String,
    /// When the event happened; omitted for "now".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    /// Extra properties recorded with the event.
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

impl Record {
    /// Creates an event record with no timestamp and no properties.
    pub fn new(subject: impl Into<Subject>, event: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            event: event.into(),
            timestamp: None,
            properties: Properties::new(),
        }
    }

    /// Back-dates the event.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<Timestamp>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Adds a single property.
    #[must_use]
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.properties.insert(name, value);
        self
    }

    /// Replaces the property mapping.
    #[must_use]
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// The endpoint this call targets.
    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        Endpoint::Record
    }

    /// Lays the call out as a wire query under the given API key.
    #[must_use]
    pub fn to_query(&self, key: &str) -> Query {
        let mut query = Query::new(key, self.subject.clone());
        if let Some(timestamp) = self.timestamp {
            query.set_timestamp(timestamp);
        }
        query.set_event(&self.event);
        query.merge(&self.properties);
        query
    }
}

/// Property updates for a subject, with no event attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetProperties {
    /// Whose properties to update.
    pub subject: Subject,
    /// When the update applies; omitted for "now".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    /// The properties to set.
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

impl SetProperties {
    /// Creates a property update.
    pub fn new(subject: impl Into<Subject>, properties: Properties) -> Self {
        Self {
            subject: subject.into(),
            timestamp: None,
            properties,
        }
    }

    /// Back-dates the update.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<Timestamp>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Adds a single property.
    #[must_use]
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.properties.insert(name, value);
        self
    }

    /// The endpoint this call targets.
    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        Endpoint::Set
    }

    /// Lays the call out as a wire query under the given API key.
    ///
    /// Never emits `_n`: a set call has no event name.
    #[must_use]
    pub fn to_query(&self, key: &str) -> Query {
        let mut query = Query::new(key, self.subject.clone());
        if let Some(timestamp) = self.timestamp {
            query.set_timestamp(timestamp);
        }
        query.merge(&self.properties);
        query
    }
}

/// Links a second identity to a subject.
///
/// Typically pairs [`Subject::anonymous`] pre-signup activity with the
/// identity the person signs up as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alias {
    /// The identity tracked so far.
    pub subject: Subject,
    /// The identity to link it to.
    pub identity: Subject,
}

impl Alias {
    /// Creates an alias call linking `identity` to `subject`.
    pub fn new(subject: impl Into<Subject>, identity: impl Into<Subject>) -> Self {
        Self {
            subject: subject.into(),
            identity: identity.into(),
        }
    }

    /// The endpoint this call targets.
    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        Endpoint::Alias
    }

    /// Lays the call out as a wire query under the given API key.
    #[must_use]
    pub fn to_query(&self, key: &str) -> Query {
        let mut query = Query::new(key, self.subject.clone());
        query.set_alias(self.identity.as_str());
        query
    }
}
