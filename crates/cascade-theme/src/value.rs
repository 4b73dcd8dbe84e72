//! Theme tree values.
//!
//! A theme is an arbitrarily nested tree of [`ThemeValue`]s. Mappings keep
//! their keys in insertion order: the resolver walks them in document order,
//! and serializing a resolved theme writes keys back in the order they were
//! authored.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Number;

/// A single node of a theme tree.
///
/// # Example
///
/// ```rust
/// use cascade_theme::{ThemeMap, ThemeValue};
///
/// let mut spacing = ThemeMap::new();
/// spacing.insert("xs", "4px");
/// spacing.insert("sm", "{spacing.xs}");
///
/// let mut theme = ThemeMap::new();
/// theme.insert("spacing", spacing);
///
/// let theme = ThemeValue::from(theme);
/// assert_eq!(theme.kind(), "mapping");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ThemeValue {
    /// JSON `null` / YAML `~`.
    #[default]
    Null,
    Bool(bool),
    /// A number, kept in its JSON form so integers stay integers.
    Number(Number),
    /// A string, possibly containing `{dot.path}` references.
    String(String),
    Sequence(Vec<ThemeValue>),
    Mapping(ThemeMap),
}

impl ThemeValue {
    /// Returns a short name for the value's variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ThemeValue::Null => "null",
            ThemeValue::Bool(_) => "boolean",
            ThemeValue::Number(_) => "number",
            ThemeValue::String(_) => "string",
            ThemeValue::Sequence(_) => "sequence",
            ThemeValue::Mapping(_) => "mapping",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ThemeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&ThemeMap> {
        match self {
            ThemeValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ThemeValue]> {
        match self {
            ThemeValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the text a value contributes when interpolated into a larger
    /// string. Only strings and numbers have one.
    pub fn to_string_form(&self) -> Option<String> {
        match self {
            ThemeValue::String(s) => Some(s.clone()),
            ThemeValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Looks up a dot path below this value. See [`crate::resolve_path`].
    pub fn get_path(&self, path: &str) -> Option<&ThemeValue> {
        crate::path::resolve_path(self, path)
    }
}

impl From<&str> for ThemeValue {
    fn from(s: &str) -> Self {
        ThemeValue::String(s.to_string())
    }
}

impl From<String> for ThemeValue {
    fn from(s: String) -> Self {
        ThemeValue::String(s)
    }
}

impl From<bool> for ThemeValue {
    fn from(b: bool) -> Self {
        ThemeValue::Bool(b)
    }
}

impl From<i64> for ThemeValue {
    fn from(n: i64) -> Self {
        ThemeValue::Number(n.into())
    }
}

impl From<f64> for ThemeValue {
    /// Non-finite floats have no JSON representation and become `Null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(ThemeValue::Null, ThemeValue::Number)
    }
}

impl From<Vec<ThemeValue>> for ThemeValue {
    fn from(items: Vec<ThemeValue>) -> Self {
        ThemeValue::Sequence(items)
    }
}

impl From<ThemeMap> for ThemeValue {
    fn from(map: ThemeMap) -> Self {
        ThemeValue::Mapping(map)
    }
}

/// An insertion-ordered mapping from string keys to theme values.
///
/// Themes are small, so entries live in a flat vector and lookups are
/// linear.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThemeMap {
    entries: Vec<(String, ThemeValue)>,
}

impl ThemeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing (in place) any existing value for `key`.
    ///
    /// Returns the previous value if there was one.
    pub fn insert<K: Into<String>, V: Into<ThemeValue>>(
        &mut self,
        key: K,
        value: V,
    ) -> Option<ThemeValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ThemeValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ThemeValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ThemeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<ThemeValue>> FromIterator<(K, V)> for ThemeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ThemeMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for ThemeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ThemeValue::Null => serializer.serialize_unit(),
            ThemeValue::Bool(b) => serializer.serialize_bool(*b),
            ThemeValue::Number(n) => n.serialize(serializer),
            ThemeValue::String(s) => serializer.serialize_str(s),
            ThemeValue::Sequence(items) => items.serialize(serializer),
            ThemeValue::Mapping(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for ThemeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            out.serialize_entry(key, value)?;
        }
        out.end()
    }
}

impl<'de> Deserialize<'de> for ThemeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ThemeValueVisitor)
    }
}

impl<'de> Deserialize<'de> for ThemeMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ThemeValue::deserialize(deserializer)? {
            ThemeValue::Mapping(map) => Ok(map),
            other => Err(de::Error::custom(format!(
                "expected a mapping at the theme root, found {}",
                other.kind()
            ))),
        }
    }
}

struct ThemeValueVisitor;

impl<'de> Visitor<'de> for ThemeValueVisitor {
    type Value = ThemeValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a theme value (string, number, boolean, sequence or mapping)")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<ThemeValue, E> {
        Ok(ThemeValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ThemeValue, E> {
        Ok(ThemeValue::Number(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ThemeValue, E> {
        Ok(ThemeValue::Number(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ThemeValue, E> {
        Number::from_f64(v)
            .map(ThemeValue::Number)
            .ok_or_else(|| E::custom(format!("non-finite number {} in theme", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ThemeValue, E> {
        Ok(ThemeValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ThemeValue, E> {
        Ok(ThemeValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<ThemeValue, E> {
        Ok(ThemeValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<ThemeValue, E> {
        Ok(ThemeValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<ThemeValue, D::Error> {
        ThemeValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ThemeValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(ThemeValue::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ThemeValue, A::Error> {
        let mut map = ThemeMap::new();
        while let Some((key, value)) = access.next_entry::<String, ThemeValue>()? {
            map.insert(key, value);
        }
        Ok(ThemeValue::Mapping(map))
    }
}
