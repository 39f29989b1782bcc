//! # beacon-core
//!
//! Wire format and query building for the Beacon tracking API.
//!
//! The tracking service reads every call from a percent-encoded query string
//! with short fixed field keys. This crate builds those strings: it models
//! the field-key table, property values, subjects, and timestamps, and
//! assembles them into deterministic `application/x-www-form-urlencoded`
//! output. It performs no network I/O.
//!
//! ## Modules
//!
//! - [`error`] - Error types for timestamp coercion and client configuration
//! - [`field`] - The fixed field-key table (`_k`, `_p`, `_n`, `_t`, `_d`)
//! - [`properties`] - Property values and insertion-ordered mappings
//! - [`subject`] - The identity a call is about
//! - [`timestamp`] - Whole-second epoch timestamps for back-dated calls
//! - [`query`] - Ordered query assembly and [`create_query`]
//! - [`encode`] - Percent-encoded serialization and its inverse
//!
//! ## Example
//!
//! ```
//! use beacon_core::{create_query, QueryOptions};
//!
//! let options = QueryOptions::new()
//!     .with_event("Signed Up")
//!     .with_property("plan", "pro");
//! let query = create_query("ABC123", "bob@example.com", &options);
//! assert_eq!(query, "_k=ABC123&_p=bob%40example.com&_n=Signed+Up&plan=pro");
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod encode;
pub mod error;
pub mod field;
pub mod properties;
pub mod query;
pub mod subject;
pub mod timestamp;

// Re-export commonly used types
pub use encode::{form_decode, form_encode};
pub use error::{Error, Result};
pub use field::{Field, RESERVED_WIRE_NAMES};
pub use properties::{Properties, PropertyValue};
pub use query::{create_query, Query, QueryOptions};
pub use subject::Subject;
pub use timestamp::Timestamp;
