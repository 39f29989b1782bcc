//! Query-string serialization.
//!
//! Pairs serialize per `application/x-www-form-urlencoded`: UTF-8 bytes
//! percent-encoded, spaces as `+`, pairs joined with `&`. The output never
//! carries a leading `?`; it is the raw query component.

use url::form_urlencoded;

use crate::properties::PropertyValue;

/// Serializes ordered pairs into a percent-encoded query string.
///
/// Sequence values expand into repeated `key=value` pairs at their position,
/// so an empty sequence contributes nothing to the output.
#[must_use]
pub fn form_encode<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a PropertyValue)>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        for rendered in value.wire_values() {
            serializer.append_pair(key, &rendered);
        }
    }
    serializer.finish()
}

/// Parses a percent-encoded query string back into owned text pairs.
///
/// The inverse of [`form_encode`] up to value typing: every decoded value is
/// plain text. Mostly useful for tests and debugging.
#[must_use]
pub fn form_decode(query: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs<'a>(raw: &'a [(&'a str, PropertyValue)]) -> Vec<(&'a str, &'a PropertyValue)> {
        raw.iter().map(|(key, value)| (*key, value)).collect()
    }

    #[test]
    fn test_encode_basic_pairs() {
        let raw = [
            ("_k", PropertyValue::from("ABC123")),
            ("_p", PropertyValue::from("bob@example.com")),
        ];
        assert_eq!(form_encode(pairs(&raw)), "_k=ABC123&_p=bob%40example.com");
    }

    #[test]
    fn test_encode_spaces_as_plus() {
        let raw = [("_n", PropertyValue::from("Signed Up"))];
        assert_eq!(form_encode(pairs(&raw)), "_n=Signed+Up");
    }

    #[test]
    fn test_encode_unicode_as_utf8_percent_escapes() {
        let raw = [("city", PropertyValue::from("Zürich"))];
        assert_eq!(form_encode(pairs(&raw)), "city=Z%C3%BCrich");
    }

    #[test]
    fn test_encode_expands_sequences() {
        let raw = [
            ("_k", PropertyValue::from("k")),
            ("tags", PropertyValue::from(vec!["a", "b"])),
            ("after", PropertyValue::from(1)),
        ];
        assert_eq!(form_encode(pairs(&raw)), "_k=k&tags=a&tags=b&after=1");
    }

    #[test]
    fn test_encode_empty_sequence_contributes_nothing() {
        let raw = [
            ("_k", PropertyValue::from("k")),
            ("tags", PropertyValue::Sequence(vec![])),
        ];
        assert_eq!(form_encode(pairs(&raw)), "_k=k");
    }

    #[test]
    fn test_encode_no_pairs_is_empty() {
        assert_eq!(form_encode(Vec::<(&str, &PropertyValue)>::new()), "");
    }

    #[test]
    fn test_decode_inverts_encode() {
        let raw = [
            ("_p", PropertyValue::from("bob@example.com")),
            ("note", PropertyValue::from("hello world")),
        ];
        let decoded = form_decode(&form_encode(pairs(&raw)));
        assert_eq!(
            decoded,
            vec![
                ("_p".to_string(), "bob@example.com".to_string()),
                ("note".to_string(), "hello world".to_string()),
            ]
        );
    }

    #[test]
    fn test_decode_plus_as_space() {
        assert_eq!(
            form_decode("_n=Signed+Up"),
            vec![("_n".to_string(), "Signed Up".to_string())]
        );
    }
}
