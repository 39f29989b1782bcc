//! The fixed field-key table of the tracking wire format.
//!
//! The receiving API identifies every call through a handful of short,
//! underscore-prefixed query keys. This module is the single source of truth
//! for that table; nothing else in the workspace spells the wire names out.

use serde::{Deserialize, Serialize};

/// Wire names that belong to the protocol rather than to caller properties.
///
/// Caller-supplied properties may still use these names; when they do, the
/// property silently overwrites the built-in field (the receiving service
/// treats the pairs uniformly).
pub const RESERVED_WIRE_NAMES: [&str; 5] = ["_k", "_p", "_n", "_t", "_d"];

/// Logical fields of a tracking call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Product API key (`_k`).
    ApiKey,
    /// The person the call is about (`_p`).
    Subject,
    /// Name of the event performed (`_n`).
    EventName,
    /// Seconds since epoch for back-dated calls (`_t`).
    Time,
    /// Flag the service checks before honouring `_t` (`_d`, always `1`).
    TimeFlag,
    /// Identity to link to the subject (`_n`).
    ///
    /// The alias field shares its wire name with [`Field::EventName`]; the
    /// receiving API reads `_n` as "the other identity" on its alias
    /// endpoint and as the event name everywhere else. A single query can
    /// therefore never carry both meanings; later assignments overwrite.
    Alias,
}

impl Field {
    /// Returns the short wire name the service expects for the field.
    #[must_use]
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Self::ApiKey => "_k",
            Self::Subject => "_p",
            Self::EventName | Self::Alias => "_n",
            Self::Time => "_t",
            Self::TimeFlag => "_d",
        }
    }

    /// Returns all logical fields.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::ApiKey,
            Self::Subject,
            Self::EventName,
            Self::Time,
            Self::TimeFlag,
            Self::Alias,
        ]
    }

    /// Returns true if `name` is one of the protocol's reserved wire names.
    #[must_use]
    pub fn is_reserved(name: &str) -> bool {
        RESERVED_WIRE_NAMES.contains(&name)
    }

    /// Looks up the field carrying the given wire name.
    ///
    /// `_n` resolves to [`Field::EventName`]: the alias spelling shares the
    /// name and cannot be distinguished on the wire.
    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "_k" => Some(Self::ApiKey),
            "_p" => Some(Self::Subject),
            "_n" => Some(Self::EventName),
            "_t" => Some(Self::Time),
            "_d" => Some(Self::TimeFlag),
            _ => None,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}
