//! Ordered record type for pbxproj objects.
//!
//! This module provides [`PbxMap`], a wrapper around [`IndexMap`] that keeps
//! keys in insertion order and attaches an optional inline comment to each
//! entry. Xcode writes keys in a fixed order per object type, and the
//! `/* ... */` comments next to object identifiers are what keeps a project
//! file reviewable in version control, so both are part of the data.
//!
//! ## Why IndexMap?
//!
//! - **Byte-stable output**: keys serialize exactly in the order they were inserted
//! - **No hidden reordering**: two writes of the same tree are identical
//!
//! ## Comment annotations
//!
//! Each entry is a [`Field`]: a value plus an optional comment. Trees produced
//! by JavaScript tooling spell comments as a sibling key with a `_comment`
//! suffix instead (`fileRef` / `fileRef_comment`). [`PbxMap::from_legacy`]
//! folds that spelling into annotations; it is also what the `Deserialize`
//! impls and [`to_value`](crate::to_value) use.
//!
//! ## Examples
//!
//! ```rust
//! use serde_pbxproj::{PbxMap, Value};
//!
//! let mut map = PbxMap::new();
//! map.insert("isa".to_string(), Value::from("PBXBuildFile"));
//! map.insert_with_comment("fileRef".to_string(), Value::from("ABC"), "main.m");
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.comment("fileRef"), Some("main.m"));
//! assert_eq!(map.comment("isa"), None);
//! ```

use crate::Value;
use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Suffix of the legacy sibling key carrying a comment for another key.
pub const COMMENT_SUFFIX: &str = "_comment";

/// A single record entry: the value and its optional inline comment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Field {
    pub value: Value,
    pub comment: Option<String>,
}

impl Field {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Field {
            value,
            comment: None,
        }
    }

    #[must_use]
    pub fn with_comment(value: Value, comment: impl Into<String>) -> Self {
        Field {
            value,
            comment: Some(comment.into()),
        }
    }
}

/// An ordered map of string keys to commented values.
///
/// # Examples
///
/// ```rust
/// use serde_pbxproj::{PbxMap, Value};
///
/// let mut map = PbxMap::new();
/// map.insert("isa".to_string(), Value::from("PBXGroup"));
/// map.insert("sourceTree".to_string(), Value::from("\"<group>\""));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["isa", "sourceTree"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PbxMap(IndexMap<String, Field>);

impl PbxMap {
    /// Creates an empty `PbxMap`.
    #[must_use]
    pub fn new() -> Self {
        PbxMap(IndexMap::new())
    }

    /// Creates an empty `PbxMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        PbxMap(IndexMap::with_capacity(capacity))
    }

    /// Builds a map from raw key/value pairs, folding `<key>_comment` entries
    /// into the annotation of `<key>`.
    ///
    /// A suffixed key is only folded when its base key is present in the same
    /// map and its value is a scalar. Anything else stays a regular entry,
    /// which the writer later treats as an ambiguous comment key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pbxproj::{PbxMap, Value};
    ///
    /// let map = PbxMap::from_legacy(vec![
    ///     ("fileRef".to_string(), Value::from("ABC")),
    ///     ("fileRef_comment".to_string(), Value::from("main.m")),
    ///     ("path_comment".to_string(), Value::from("orphan")),
    /// ]);
    ///
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.comment("fileRef"), Some("main.m"));
    /// assert!(map.contains_key("path_comment"));
    /// ```
    pub fn from_legacy<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let pairs: Vec<(String, Value)> = pairs.into_iter().collect();
        let mut map = PbxMap::with_capacity(pairs.len());
        let mut comments = Vec::new();

        for (key, value) in pairs {
            let annotates = key
                .strip_suffix(COMMENT_SUFFIX)
                .map(str::to_string)
                .filter(|_| value.is_scalar());
            match annotates {
                Some(base) => comments.push((base, key, value)),
                None => {
                    map.0.insert(key, Field::new(value));
                }
            }
        }

        for (base, key, value) in comments {
            match map.0.get_mut(&base) {
                Some(field) => field.comment = value.comment_text(),
                None => {
                    map.0.insert(key, Field::new(value));
                }
            }
        }

        map
    }

    /// Inserts a key-value pair into the map.
    ///
    /// Replacing an existing key keeps its position and its comment; the old
    /// value is returned.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        match self.0.get_mut(&key) {
            Some(field) => Some(std::mem::replace(&mut field.value, value)),
            None => {
                self.0.insert(key, Field::new(value));
                None
            }
        }
    }

    /// Inserts a key-value pair together with its inline comment.
    pub fn insert_with_comment(
        &mut self,
        key: String,
        value: Value,
        comment: impl Into<String>,
    ) -> Option<Value> {
        self.0
            .insert(key, Field::with_comment(value, comment))
            .map(|field| field.value)
    }

    /// Sets the comment of an existing key. Returns `false` if the key is absent.
    pub fn set_comment(&mut self, key: &str, comment: impl Into<String>) -> bool {
        match self.0.get_mut(key) {
            Some(field) => {
                field.comment = Some(comment.into());
                true
            }
            None => false,
        }
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).map(|field| &field.value)
    }

    /// Returns the full entry (value and comment) for the key.
    #[must_use]
    pub fn get_field(&self, key: &str) -> Option<&Field> {
        self.0.get(key)
    }

    /// Resolves the inline comment for `key`.
    ///
    /// The entry's own annotation wins. Without one, a string-valued
    /// `<key>_comment` sibling is used, so maps filled through [`insert`](Self::insert)
    /// or `collect` in the legacy spelling still resolve. Empty comments count
    /// as absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pbxproj::{PbxMap, Value};
    ///
    /// let mut map = PbxMap::new();
    /// map.insert("rootObject".to_string(), Value::from("ABC"));
    /// map.insert("rootObject_comment".to_string(), Value::from("Project object"));
    ///
    /// assert_eq!(map.comment("rootObject"), Some("Project object"));
    /// ```
    #[must_use]
    pub fn comment(&self, key: &str) -> Option<&str> {
        let field = self.0.get(key)?;
        field
            .comment
            .as_deref()
            .filter(|text| !text.is_empty())
            .or_else(|| {
                self.0
                    .get(&format!("{}{}", key, COMMENT_SUFFIX))
                    .and_then(|sibling| sibling.value.as_str())
                    .filter(|text| !text.is_empty())
            })
    }

    /// Returns `true` if `key` is spelled as the comment of another key that
    /// is present in this map.
    #[must_use]
    pub fn annotates_sibling(&self, key: &str) -> bool {
        key.strip_suffix(COMMENT_SUFFIX)
            .map_or(false, |base| self.0.contains_key(base))
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Field> {
        self.0.keys()
    }

    /// Returns an iterator over the entries of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Field> {
        self.0.iter()
    }
}

impl IntoIterator for PbxMap {
    type Item = (String, Field);
    type IntoIter = indexmap::map::IntoIter<String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PbxMap {
    type Item = (&'a String, &'a Field);
    type IntoIter = indexmap::map::Iter<'a, String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for PbxMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        PbxMap(
            iter.into_iter()
                .map(|(key, value)| (key, Field::new(value)))
                .collect(),
        )
    }
}

impl FromIterator<(String, Field)> for PbxMap {
    fn from_iter<T: IntoIterator<Item = (String, Field)>>(iter: T) -> Self {
        PbxMap(IndexMap::from_iter(iter))
    }
}

// Annotations go back out in the `<key>_comment` spelling so JSON dumps stay
// readable by the JavaScript tooling.
impl Serialize for PbxMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let annotated = self
            .0
            .iter()
            .filter(|(key, field)| {
                field.comment.is_some()
                    && !self.0.contains_key(&format!("{}{}", key, COMMENT_SUFFIX))
            })
            .count();
        let mut map = serializer.serialize_map(Some(self.0.len() + annotated))?;
        for (key, field) in &self.0 {
            map.serialize_entry(key, &field.value)?;
            if let Some(comment) = &field.comment {
                let sibling = format!("{}{}", key, COMMENT_SUFFIX);
                if !self.0.contains_key(&sibling) {
                    map.serialize_entry(&sibling, comment)?;
                }
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PbxMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PbxMapVisitor;

        impl<'de> Visitor<'de> for PbxMapVisitor {
            type Value = PbxMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a pbxproj record")
            }

            fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                visit_legacy_map(map)
            }
        }

        deserializer.deserialize_map(PbxMapVisitor)
    }
}

pub(crate) fn visit_legacy_map<'de, A>(mut map: A) -> Result<PbxMap, A::Error>
where
    A: MapAccess<'de>,
{
    let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
    while let Some((key, value)) = map.next_entry::<String, Value>()? {
        pairs.push((key, value));
    }
    if pairs.iter().any(|(key, _)| key.is_empty()) {
        return Err(de::Error::custom("record keys must not be empty"));
    }
    Ok(PbxMap::from_legacy(pairs))
}
