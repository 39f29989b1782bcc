//! Ordered query assembly for tracking calls.
//!
//! A [`Query`] is the call's wire mapping in the order it was built: the API
//! key and subject first, then whichever optional fields were supplied, then
//! caller properties. Assigning to a name that already exists overwrites the
//! value but keeps the name's first position, so repeated builds of the same
//! call serialize identically.

use crate::encode::form_encode;
use crate::field::Field;
use crate::properties::{Properties, PropertyValue};
use crate::subject::Subject;
use crate::timestamp::Timestamp;

/// An ordered key/value mapping ready to serialize as a query string.
///
/// Every query starts from the two fields the receiving service requires,
/// the API key (`_k`) and the subject (`_p`); the mutators layer the rest of
/// a call on top. Truthiness rules from the wire protocol apply: empty text
/// and zero timestamps count as "not supplied" and leave the query unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pairs: Vec<(String, PropertyValue)>,
}

impl Query {
    /// Creates a query seeded with the required `_k` and `_p` fields.
    #[must_use]
    pub fn new(key: impl Into<String>, subject: impl Into<Subject>) -> Self {
        let subject: Subject = subject.into();
        let mut query = Self { pairs: Vec::new() };
        query.assign(Field::ApiKey.wire_name(), PropertyValue::Text(key.into()));
        query.assign(
            Field::Subject.wire_name(),
            PropertyValue::Text(subject.into()),
        );
        query
    }

    /// Back-dates the call: sets `_d=1` and `_t` to the timestamp's seconds.
    ///
    /// A zero timestamp counts as absent and leaves the query unchanged, so
    /// `_d` and `_t` always appear together.
    pub fn set_timestamp(&mut self, timestamp: Timestamp) {
        if timestamp.is_zero() {
            return;
        }
        self.assign(Field::TimeFlag.wire_name(), PropertyValue::Integer(1));
        self.assign(
            Field::Time.wire_name(),
            PropertyValue::Integer(timestamp.seconds()),
        );
    }

    /// Names the event performed (`_n`). Empty text is a no-op.
    pub fn set_event(&mut self, event: &str) {
        if event.is_empty() {
            return;
        }
        self.assign(Field::EventName.wire_name(), PropertyValue::from(event));
    }

    /// Sets the identity to alias to the subject (`_n`). Empty text is a
    /// no-op.
    ///
    /// The alias field shares its wire name with the event name, so this
    /// overwrites any event already set, at the event's position.
    pub fn set_alias(&mut self, identity: &str) {
        if identity.is_empty() {
            return;
        }
        self.assign(Field::Alias.wire_name(), PropertyValue::from(identity));
    }

    /// Assigns one of the protocol fields directly.
    pub fn set(&mut self, field: Field, value: impl Into<PropertyValue>) {
        self.assign(field.wire_name(), value.into());
    }

    /// Adds a caller property. Reserved wire names are not protected: a
    /// property named `_p` overwrites the subject, in place.
    pub fn insert_property(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        let name = name.into();
        self.assign(&name, value.into());
    }

    /// Merges a property mapping into the query, in the mapping's order.
    pub fn merge(&mut self, properties: &Properties) {
        for (name, value) in properties {
            self.assign(name, value.clone());
        }
    }

    /// Returns the value under `name`, field or property alike.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Number of names in the mapping (sequence values still count once).
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true when the mapping holds no pairs.
    ///
    /// Always false for queries built by [`Query::new`], which seeds `_k`
    /// and `_p`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates the mapping's pairs in assembly order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.pairs.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Serializes the query as a percent-encoded string, no leading `?`.
    #[must_use]
    pub fn encode(&self) -> String {
        form_encode(self.pairs())
    }

    fn assign(&mut self, name: &str, value: PropertyValue) {
        if let Some(entry) = self.pairs.iter_mut().find(|(existing, _)| existing == name) {
            entry.1 = value;
        } else {
            self.pairs.push((name.to_string(), value));
        }
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

/// The optional inputs of a tracking call, for [`create_query`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    /// Name of the event performed, if any.
    pub event: Option<String>,
    /// Seconds since epoch for a back-dated call, if any.
    pub timestamp: Option<Timestamp>,
    /// Identity to alias to the subject, if any.
    pub identity: Option<String>,
    /// Extra properties, merged last.
    pub properties: Properties,
}

impl QueryOptions {
    /// Creates empty options: no event, no timestamp, no identity, no
    /// properties.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the event name.
    #[must_use]
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<Timestamp>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Sets the identity to alias.
    #[must_use]
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Replaces the property mapping.
    #[must_use]
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
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
}

/// Builds the complete percent-encoded query string for one tracking call.
///
/// Assembly order is fixed: `_k` and `_p`, then `_d`/`_t` when a non-zero
/// timestamp was given, then the event name, then the alias identity (which
/// shares `_n` with the event and overwrites it), then properties in their
/// supplied order. Pure and deterministic; the receiving service does not
/// depend on pair order, but identical inputs always serialize identically.
///
/// ```
/// use beacon_core::{create_query, QueryOptions};
///
/// let query = create_query("ABC123", "bob@example.com", &QueryOptions::new());
/// assert_eq!(query, "_k=ABC123&_p=bob%40example.com");
/// ```
#[must_use]
pub fn create_query(key: &str, subject: impl Into<Subject>, options: &QueryOptions) -> String {
    let mut query = Query::new(key, subject);
    if let Some(timestamp) = options.timestamp {
        query.set_timestamp(timestamp);
    }
    if let Some(event) = &options.event {
        query.set_event(event);
    }
    if let Some(identity) = &options.identity {
        query.set_alias(identity);
    }
    query.merge(&options.properties);
    query.encode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::form_decode;

    #[test]
    fn test_key_and_subject_only() {
        let query = create_query("ABC123", "bob@example.com", &QueryOptions::new());
        assert_eq!(query, "_k=ABC123&_p=bob%40example.com");
    }

    #[test]
    fn test_event_and_timestamp() {
        let options = QueryOptions::new()
            .with_event("Purchased")
            .with_timestamp(1_234_567_890);
        let query = create_query("ABC123", "bob@example.com", &options);
        assert_eq!(
            query,
            "_k=ABC123&_p=bob%40example.com&_d=1&_t=1234567890&_n=Purchased"
        );
    }

    #[test]
    fn test_zero_timestamp_omits_time_fields() {
        let options = QueryOptions::new().with_timestamp(0);
        let query = create_query("K", "p", &options);
        assert_eq!(query, "_k=K&_p=p");
    }

    #[test]
    fn test_time_flag_present_iff_time_present() {
        for options in [
            QueryOptions::new(),
            QueryOptions::new().with_timestamp(0),
            QueryOptions::new().with_timestamp(1_355_875_200),
        ] {
            let decoded = form_decode(&create_query("K", "p", &options));
            let has_flag = decoded.iter().any(|(name, _)| name == "_d");
            let has_time = decoded.iter().any(|(name, _)| name == "_t");
            assert_eq!(has_flag, has_time);
        }
    }

    #[test]
    fn test_empty_event_omitted() {
        let options = QueryOptions::new().with_event("");
        assert_eq!(create_query("K", "p", &options), "_k=K&_p=p");
    }

    #[test]
    fn test_identity_overwrites_event_in_place() {
        let options = QueryOptions::new()
            .with_event("Signed Up")
            .with_identity("bob@example.com");
        let query = create_query("K", "anon-7", &options);
        assert_eq!(query, "_k=K&_p=anon-7&_n=bob%40example.com");

        let decoded = form_decode(&query);
        let n_count = decoded.iter().filter(|(name, _)| name == "_n").count();
        assert_eq!(n_count, 1);
    }

    #[test]
    fn test_properties_follow_supplied_order() {
        let options = QueryOptions::new()
            .with_property("color", "blue")
            .with_property("qty", 3);
        let query = create_query("K", "p", &options);
        assert_eq!(query, "_k=K&_p=p&color=blue&qty=3");
    }

    #[test]
    fn test_property_overwrites_reserved_field_in_place() {
        let options = QueryOptions::new()
            .with_event("Signed Up")
            .with_property("_p", "mallory@example.com");
        let query = create_query("K", "bob@example.com", &options);
        assert_eq!(query, "_k=K&_p=mallory%40example.com&_n=Signed+Up");
    }

    #[test]
    fn test_sequence_property_repeats_key() {
        let options = QueryOptions::new().with_property("items", vec!["hat", "scarf"]);
        let query = create_query("K", "p", &options);
        assert_eq!(query, "_k=K&_p=p&items=hat&items=scarf");
    }

    #[test]
    fn test_round_trip_preserves_unicode_fields() {
        let options = QueryOptions::new()
            .with_event("Развернуть")
            .with_property("city", "Zürich");
        let decoded = form_decode(&create_query("K", "Шишкин", &options));
        assert!(decoded.contains(&("_p".to_string(), "Шишкин".to_string())));
        assert!(decoded.contains(&("_n".to_string(), "Развернуть".to_string())));
        assert!(decoded.contains(&("city".to_string(), "Zürich".to_string())));
    }

    #[test]
    fn test_query_accessors() {
        let mut query = Query::new("K", "p");
        assert_eq!(query.len(), 2);
        assert!(!query.is_empty());
        assert_eq!(query.get("_k"), Some(&PropertyValue::from("K")));
        assert_eq!(query.get("_n"), None);

        query.set_event("Signed Up");
        assert_eq!(query.get("_n"), Some(&PropertyValue::from("Signed Up")));

        query.set(Field::EventName, "Renamed");
        assert_eq!(query.get("_n"), Some(&PropertyValue::from("Renamed")));
        assert_eq!(query.len(), 3);
    }

    #[test]
    fn test_repeated_builds_serialize_identically() {
        let options = QueryOptions::new()
            .with_event("Purchased")
            .with_timestamp(1_355_875_200)
            .with_property("qty", 3);
        let first = create_query("K", "bob@example.com", &options);
        let second = create_query("K", "bob@example.com", &options);
        assert_eq!(first, second);
    }

    #[test]
    fn test_display_matches_encode() {
        let query = Query::new("ABC123", "bob@example.com");
        assert_eq!(query.to_string(), query.encode());
    }

    #[test]
    fn test_subject_from_number() {
        let query = create_query("K", 42u64, &QueryOptions::new());
        assert_eq!(query, "_k=K&_p=42");
    }
}
