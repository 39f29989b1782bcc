//! Tracking client and call models for the Beacon tracking API.
//!
//! This crate exposes typed tracking calls (record an event, set subject
//! properties, alias two identities) and a client that assembles the
//! ready-to-send GET URLs for them. It performs no network I/O itself; hand
//! the URLs to whatever HTTP client the application uses.
//!
//! ```
//! use beacon_trk::{Record, TrkClient};
//!
//! # fn main() -> beacon_trk::Result<()> {
//! let client = TrkClient::new("ABC123")?;
//! let url = client.record(&Record::new("bob@example.com", "Signed Up"))?;
//! assert_eq!(
//!     url.as_str(),
//!     "https://trk.beacon.io/e?_k=ABC123&_p=bob%40example.com&_n=Signed+Up"
//! );
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{TrkClient, TrkClientBuilder, DEFAULT_BASE_URL};
pub use models::{Alias, Endpoint, Record, SetProperties};

/// Convenient result alias matching the shared Beacon error type.
pub type Result<T> = beacon_core::Result<T>;
