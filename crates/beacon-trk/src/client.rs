//! Tracking client that assembles ready-to-send request URLs.
//!
//! The tracking service reads calls from GET query strings, so "sending" a
//! call is just fetching a URL. This client owns the API key and base URL
//! and turns typed calls into those URLs; the actual GET is left to
//! whatever HTTP client the application already uses.

use beacon_core::{Error, Query, Result};
use tracing::debug;
use url::Url;

use crate::models::{Alias, Endpoint, Record, SetProperties};

/// Public host of the tracking service.
pub const DEFAULT_BASE_URL: &str = "https://trk.beacon.io";

/// Builder for [`TrkClient`].
#[derive(Debug, Clone)]
pub struct TrkClientBuilder {
    api_key: String,
    base_url: String,
}

impl TrkClientBuilder {
    /// Creates a builder for the given product API key, targeting the
    /// public tracking host.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the tracking host, e.g. for a staging environment or a
    /// local capture proxy.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builds the client, validating the base URL.
    pub fn build(self) -> Result<TrkClient> {
        let base_url = Url::parse(&self.base_url).map_err(|err| {
            Error::ConfigError(format!(
                "Invalid tracking base URL `{}`: {err}",
                self.base_url
            ))
        })?;

        match base_url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::ConfigError(format!(
                    "Unsupported tracking URL scheme `{other}`: expected http or https"
                )));
            }
        }

        Ok(TrkClient {
            api_key: self.api_key,
            base_url,
        })
    }
}

/// Assembles GET URLs for tracking calls.
///
/// The API key is embedded in every URL's query string, so treat assembled
/// URLs as secrets the way the key itself is.
#[derive(Debug, Clone)]
pub struct TrkClient {
    api_key: String,
    base_url: Url,
}

impl TrkClient {
    /// Creates a client for the public tracking host.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        TrkClientBuilder::new(api_key).build()
    }

    /// The product API key the client signs calls with.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Access the underlying base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL for recording an event.
    pub fn record(&self, record: &Record) -> Result<Url> {
        self.request_url(record.endpoint(), &record.to_query(&self.api_key))
    }

    /// URL for updating subject properties.
    pub fn set_properties(&self, set: &SetProperties) -> Result<Url> {
        self.request_url(set.endpoint(), &set.to_query(&self.api_key))
    }

    /// URL for linking two identities.
    pub fn alias(&self, alias: &Alias) -> Result<Url> {
        self.request_url(alias.endpoint(), &alias.to_query(&self.api_key))
    }

    /// Attaches an already-built query to an endpoint.
    ///
    /// The typed calls cover the common cases; this is the escape hatch for
    /// queries assembled by hand.
    pub fn request_url(&self, endpoint: Endpoint, query: &Query) -> Result<Url> {
        let mut url = self.base_url.join(endpoint.path())?;
        url.set_query(Some(&query.encode()));
        debug!(
            endpoint = endpoint.path(),
            pairs = query.len(),
            "assembled tracking URL"
        );
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::Properties;

    #[test]
    fn builder_targets_public_host_by_default() {
        let client = TrkClientBuilder::new("ABC123").build().unwrap();
        assert_eq!(client.api_key(), "ABC123");
        assert_eq!(client.base_url().as_str(), "https://trk.beacon.io/");
    }

    #[test]
    fn builder_accepts_http_and_https() {
        for base in ["http://localhost:8080", "https://trk.example.com"] {
            assert!(
                TrkClientBuilder::new("K").with_base_url(base).build().is_ok(),
                "{base} should be accepted"
            );
        }
    }

    #[test]
    fn builder_rejects_unsupported_scheme() {
        let err = TrkClientBuilder::new("K")
            .with_base_url("ftp://trk.example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn builder_rejects_unparseable_url() {
        let err = TrkClientBuilder::new("K")
            .with_base_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn record_url_hits_the_event_endpoint() {
        let client = TrkClient::new("ABC123").unwrap();
        let url = client
            .record(&Record::new("bob@example.com", "Signed Up"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://trk.beacon.io/e?_k=ABC123&_p=bob%40example.com&_n=Signed+Up"
        );
    }

    #[test]
    fn set_properties_url_hits_the_set_endpoint() {
        let client = TrkClient::new("ABC123").unwrap();
        let mut properties = Properties::new();
        properties.insert("plan", "pro");
        let url = client
            .set_properties(&SetProperties::new("bob@example.com", properties))
            .unwrap();
        assert_eq!(url.path(), "/s");
        assert_eq!(url.query(), Some("_k=ABC123&_p=bob%40example.com&plan=pro"));
    }

    #[test]
    fn alias_url_hits_the_alias_endpoint() {
        let client = TrkClient::new("ABC123").unwrap();
        let url = client
            .alias(&Alias::new("anon-3f82", "bob@example.com"))
            .unwrap();
        assert_eq!(url.path(), "/a");
        assert_eq!(
            url.query(),
            Some("_k=ABC123&_p=anon-3f82&_n=bob%40example.com")
        );
    }

    #[test]
    fn custom_base_url_keeps_port() {
        let client = TrkClientBuilder::new("K")
            .with_base_url("http://localhost:8080")
            .build()
            .unwrap();
        let url = client.record(&Record::new("p", "Ping")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/e?_k=K&_p=p&_n=Ping");
    }

    #[test]
    fn request_url_accepts_hand_built_queries() {
        let client = TrkClient::new("K").unwrap();
        let mut query = Query::new("K", "p");
        query.set_event("Custom");
        let url = client.request_url(Endpoint::Record, &query).unwrap();
        assert_eq!(url.query(), Some("_k=K&_p=p&_n=Custom"));
    }
}
