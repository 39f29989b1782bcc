//! Property values and insertion-ordered property mappings.
//!
//! Tracking calls attach arbitrary caller-defined properties. On the wire a
//! property is just more `key=value` pairs, so the value model is small:
//! text, numbers, booleans, and sequences thereof. Sequences become repeated
//! pairs under the same key. JSON payloads map onto this model directly,
//! except for `null` and nested objects, which have no query representation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single property value.
///
/// Deserializes untagged, so JSON payloads read naturally: strings become
/// [`PropertyValue::Text`], numbers [`PropertyValue::Integer`] or
/// [`PropertyValue::Float`], and arrays [`PropertyValue::Sequence`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Text, passed through to the wire unchanged.
    Text(String),
    /// A whole number.
    Integer(i64),
    /// A floating-point number.
    Float(f64),
    /// A boolean, rendered lowercase (`true` / `false`).
    Boolean(bool),
    /// An ordered sequence; each element becomes its own `key=value` pair.
    Sequence(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Returns the wire renderings of the value, one string per `key=value`
    /// pair the value occupies.
    ///
    /// Scalars yield exactly one entry. Sequences flatten depth-first, so an
    /// empty sequence yields none and a nested one yields its leaves in
    /// order.
    #[must_use]
    pub fn wire_values(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_wire_values(&mut out);
        out
    }

    fn collect_wire_values(&self, out: &mut Vec<String>) {
        match self {
            Self::Text(text) => out.push(text.clone()),
            Self::Integer(value) => out.push(value.to_string()),
            Self::Float(value) => out.push(value.to_string()),
            Self::Boolean(value) => out.push(value.to_string()),
            Self::Sequence(items) => {
                for item in items {
                    item.collect_wire_values(out);
                }
            }
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

macro_rules! impl_integer_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for PropertyValue {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_integer_from!(i8, i16, i32, u8, u16, u32);

impl<T: Into<PropertyValue>> From<Vec<T>> for PropertyValue {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<serde_json::Value> for PropertyValue {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(text) => Ok(Self::Text(text)),
            serde_json::Value::Bool(flag) => Ok(Self::Boolean(flag)),
            serde_json::Value::Number(number) => {
                if let Some(integer) = number.as_i64() {
                    Ok(Self::Integer(integer))
                } else if let Some(float) = number.as_f64() {
                    Ok(Self::Float(float))
                } else {
                    Err(Error::UnsupportedProperty(format!(
                        "number out of range: {number}"
                    )))
                }
            }
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(Self::try_from)
                .collect::<Result<Vec<_>>>()
                .map(Self::Sequence),
            serde_json::Value::Null => Err(Error::UnsupportedProperty(
                "null has no query representation".to_string(),
            )),
            serde_json::Value::Object(_) => Err(Error::UnsupportedProperty(
                "nested objects have no query representation".to_string(),
            )),
        }
    }
}

/// An insertion-ordered mapping of property names to values.
///
/// Backed by a `Vec` so that pair order in the serialized query is exactly
/// the order properties were supplied in. Re-inserting an existing name
/// overwrites the value but keeps the name's original position, which keeps
/// output deterministic when callers shadow earlier entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    entries: Vec<(String, PropertyValue)>,
}

impl Properties {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a property, overwriting in place if the name already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Returns the value stored under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Number of properties in the mapping.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the mapping holds no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates name/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Consumes the mapping into its ordered pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, PropertyValue)> {
        self.entries
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        for (name, value) in iter {
            properties.insert(name, value);
        }
        properties
    }
}

impl IntoIterator for Properties {
    type Item = (String, PropertyValue);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = (&'a str, &'a PropertyValue);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, PropertyValue)>,
        fn(&'a (String, PropertyValue)) -> (&'a str, &'a PropertyValue),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl Serialize for Properties {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct PropertiesVisitor;

        impl<'de> serde::de::Visitor<'de> for PropertiesVisitor {
            type Value = Properties;

            fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("a map of property names to values")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut properties = Properties::new();
                while let Some((name, value)) = access.next_entry::<String, PropertyValue>()? {
                    properties.insert(name, value);
                }
                Ok(properties)
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}

impl TryFrom<serde_json::Map<String, serde_json::Value>> for Properties {
    type Error = Error;

    fn try_from(map: serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let mut properties = Self::new();
        for (name, value) in map {
            properties.insert(name, PropertyValue::try_from(value)?);
        }
        Ok(properties)
    }
}

impl TryFrom<serde_json::Value> for Properties {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(map) => Self::try_from(map),
            other => Err(Error::UnsupportedProperty(format!(
                "expected a JSON object of properties, got: {other}"
            ))),
        }
    }
}
